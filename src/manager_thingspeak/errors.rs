use thiserror::Error;

/// Error depicting errors that occur while posting to ThingSpeak
///
#[derive(Error, Debug)]
pub enum ThingSpeakError {
    #[error("NetworkError: {0}")]
    NetworkError(#[from] reqwest::Error),
}
