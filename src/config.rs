use std::env;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

use crate::trivia::DEFAULT_PAGE_SIZE;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub server: ServerSettings,
    pub pagination: PaginationSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaginationSettings {
    pub page_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database: DatabaseSettings {
                path: "trivia.db".to_owned(),
            },
            server: ServerSettings {
                host: "0.0.0.0".to_owned(),
                port: 8080,
            },
            pagination: PaginationSettings {
                page_size: DEFAULT_PAGE_SIZE,
            },
        }
    }
}

impl Settings {
    /// Defaults, then `config/base.toml`, then `config/{APP_ENV}.toml`, then
    /// `TRIVIA__SECTION__KEY` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_owned());
        let defaults = Settings::default();

        let settings: Settings = config::Config::builder()
            .set_default("database.path", defaults.database.path)?
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("pagination.page_size", defaults.pagination.page_size as i64)?
            .add_source(File::with_name("config/base").required(false))
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(
                Environment::with_prefix("TRIVIA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pagination.page_size == 0 {
            return Err(ConfigError::Message(
                "pagination.page_size must be greater than zero".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
