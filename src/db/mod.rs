pub mod queries;

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub use queries::categories::Category;
pub use queries::questions::{NewQuestion, Question};

use crate::error::Result;
use queries::categories::import_categories;
use queries::questions::{import_questions, validate_import};
use sqlx::Error;

pub async fn establish_connection(path: impl AsRef<Path>) -> Result<SqlitePool, Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    SqlitePool::connect_with(options).await
}

/// A private in-memory database. Pinned to one connection, since every new
/// SQLite connection to `:memory:` opens a fresh, empty database.
pub async fn establish_in_memory() -> Result<SqlitePool, Error> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?)
        .await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Upserts categories and questions in one transaction. Question text is
/// checked before anything is written, so a bad batch leaves the store as it
/// was.
pub async fn import_bank(
    pool: &SqlitePool,
    categories: Vec<Category>,
    questions: Vec<Question>,
) -> Result<()> {
    validate_import(&questions)?;

    let mut tx = pool.begin().await?;
    import_categories(&mut tx, categories).await?;
    import_questions(&mut tx, questions).await?;
    tx.commit().await?;
    Ok(())
}
