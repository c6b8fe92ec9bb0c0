use thiserror::Error;

/// Error depicting errors that occur while sending emails
///
#[derive(Debug, Error)]
pub enum MailError {
    #[error("SMTPTransportError: {0}")]
    SMTPTransportError(String),
    #[error("TransportError: {0}")]
    TransportError(String),
    #[error("ParseError: {0}")]
    ParseError(String),
    #[error("MessageError: {0}")]
    MessageError(String),
}
