use thiserror::Error;

/// Error depicting errors that occur while fetching current weather
///
#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("ParseError: {0}")]
    ParseError(String),
    #[error("ApiError: status {0}: {1}")]
    ApiError(u16, String),
    #[error("NetworkError: {0}")]
    NetworkError(#[from] reqwest::Error),
}
