use thiserror::Error;

/// Error depicting errors that occur while sending text messages
///
#[derive(Error, Debug)]
pub enum SmsError {
    #[error("Rejected: status {0}: {1}")]
    Rejected(u16, String),
    #[error("ParseError: {0}")]
    ParseError(String),
    #[error("NetworkError: {0}")]
    NetworkError(#[from] reqwest::Error),
}
