pub mod app;
pub mod error;
mod routes;

pub use app::{build_router, run_server, AppState};
