use mongodb::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Authentication(String),
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Update error on document {id}: {message}")]
    Update { id: String, message: String },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

impl AppError {
    pub fn update(id: impl Into<String>, message: impl ToString) -> Self {
        AppError::Update {
            id: id.into(),
            message: message.to_string(),
        }
    }
}

/// Driver errors outside of a single document write: bad credentials are
/// reported as authentication failures, everything else as connectivity.
impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::Authentication { .. } => AppError::Authentication(err.to_string()),
            _ => AppError::Connection(err.to_string()),
        }
    }
}
