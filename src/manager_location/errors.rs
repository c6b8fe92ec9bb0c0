use thiserror::Error;

/// Error depicting errors that occur while resolving the host location
///
#[derive(Error, Debug)]
pub enum LocationError {
    #[error("ParseError: {0}")]
    ParseError(String),
    #[error("Unresolved: {0}")]
    Unresolved(String),
    #[error("StatusError: {0}")]
    StatusError(u16),
    #[error("NetworkError: {0}")]
    NetworkError(#[from] reqwest::Error),
}
