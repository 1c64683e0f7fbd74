/// Failure kinds shared by the store, the engines and the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum TriviaError {
    /// Malformed or missing input, detected before the store is touched.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An empty result the caller treats as an error.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store failure: {0}")]
    StoreFailure(#[source] sqlx::Error),
}

pub type Result<T, E = TriviaError> = std::result::Result<T, E>;

impl From<sqlx::Error> for TriviaError {
    fn from(error: sqlx::Error) -> TriviaError {
        match error {
            sqlx::Error::RowNotFound => TriviaError::NotFound("Object not found".to_owned()),
            error => TriviaError::StoreFailure(error),
        }
    }
}
