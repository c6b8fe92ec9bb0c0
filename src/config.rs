use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_WEATHER_URL: &str = "http://api.openweathermap.org/data/2.5/weather";
const DEFAULT_THINGSPEAK_URL: &str = "https://api.thingspeak.com/update";
const DEFAULT_LOCATION_URL: &str = "https://ipinfo.io/json";
const DEFAULT_TWILIO_URL: &str = "https://api.twilio.com/2010-04-01";

#[derive(Deserialize)]
pub struct WeatherParameters {
    pub api_key: String,
    #[serde(default = "default_weather_url")]
    pub url: String,
}

#[derive(Deserialize)]
pub struct ThingSpeakParameters {
    pub api_key: String,
    #[serde(default = "default_thingspeak_url")]
    pub url: String,
}

#[derive(Deserialize)]
pub struct LocationParameters {
    #[serde(default = "default_location_url")]
    pub url: String,
}

impl Default for LocationParameters {
    fn default() -> Self {
        Self { url: default_location_url() }
    }
}

#[derive(Deserialize)]
pub struct SmsParameters {
    pub account_sid: String,
    pub auth_token: String,
    pub from: String,
    pub to: String,
    #[serde(default = "default_twilio_url")]
    pub url: String,
}

#[derive(Deserialize)]
pub struct MailParameters {
    pub smtp_user: String,
    pub smtp_password: String,
    pub smtp_endpoint: String,
    pub from: String,
    pub to: String,
}

#[derive(Deserialize)]
pub struct General {
    pub log_path: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: LevelFilter,
    #[serde(default = "default_log_to_stdout")]
    pub log_to_stdout: bool,
}

impl Default for General {
    fn default() -> Self {
        Self {
            log_path: None,
            log_level: default_log_level(),
            log_to_stdout: default_log_to_stdout(),
        }
    }
}

#[derive(Deserialize)]
pub struct Config {
    pub weather: WeatherParameters,
    pub thingspeak: ThingSpeakParameters,
    #[serde(default)]
    pub location: LocationParameters,
    pub sms: SmsParameters,
    pub mail: Option<MailParameters>,
    #[serde(default)]
    pub general: General,
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, LoadConfigurationError> {
    let toml = fs::read_to_string(config_path)
        .map_err(|e| LoadConfigurationError::ReadError(format!("{}: {}", config_path, e.to_string())))?;

    parse_config(&toml)
}

/// Parses configuration from its TOML representation
///
/// # Arguments
///
/// * 'toml' - the configuration document
fn parse_config(toml: &str) -> Result<Config, LoadConfigurationError> {
    let config: Config = toml::from_str(toml)
        .map_err(|e| LoadConfigurationError::ParseError(e.to_string()))?;

    Ok(config)
}

fn default_weather_url() -> String { DEFAULT_WEATHER_URL.to_string() }
fn default_thingspeak_url() -> String { DEFAULT_THINGSPEAK_URL.to_string() }
fn default_location_url() -> String { DEFAULT_LOCATION_URL.to_string() }
fn default_twilio_url() -> String { DEFAULT_TWILIO_URL.to_string() }
fn default_log_level() -> LevelFilter { LevelFilter::Info }
fn default_log_to_stdout() -> bool { true }

/// Error depicting errors that occur while loading the configuration
///
#[derive(Debug, Error)]
pub enum LoadConfigurationError {
    #[error("ReadError: {0}")]
    ReadError(String),
    #[error("ParseError: {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [weather]
        api_key = "owm-key"

        [thingspeak]
        api_key = "ts-key"

        [sms]
        account_sid = "AC123"
        auth_token = "secret"
        from = "+1234567890"
        to = "+911234567890"
    "#;

    #[test]
    fn minimal_config_gets_defaults() {
        let config = parse_config(MINIMAL).unwrap();

        assert_eq!(config.weather.api_key, "owm-key");
        assert_eq!(config.weather.url, DEFAULT_WEATHER_URL);
        assert_eq!(config.thingspeak.url, DEFAULT_THINGSPEAK_URL);
        assert_eq!(config.location.url, DEFAULT_LOCATION_URL);
        assert_eq!(config.sms.url, DEFAULT_TWILIO_URL);
        assert!(config.mail.is_none());
        assert_eq!(config.general.log_level, LevelFilter::Info);
        assert!(config.general.log_to_stdout);
        assert!(config.general.log_path.is_none());
    }

    #[test]
    fn full_config_overrides_defaults() {
        let toml = format!(r#"{}
            [location]
            url = "http://localhost:8080/json"

            [mail]
            smtp_user = "user"
            smtp_password = "pass"
            smtp_endpoint = "smtp.example.com"
            from = "logger@example.com"
            to = "me@example.com"

            [general]
            log_path = "/var/log/cloud_logger.log"
            log_level = "debug"
            log_to_stdout = false
        "#, MINIMAL);

        let config = parse_config(&toml).unwrap();

        assert_eq!(config.location.url, "http://localhost:8080/json");
        assert_eq!(config.mail.unwrap().smtp_endpoint, "smtp.example.com");
        assert_eq!(config.general.log_level, LevelFilter::Debug);
        assert!(!config.general.log_to_stdout);
        assert_eq!(config.general.log_path.as_deref(), Some("/var/log/cloud_logger.log"));
    }

    #[test]
    fn sample_config_parses() {
        let config = parse_config(include_str!("../config/cloud_logger.toml")).unwrap();

        assert_eq!(config.sms.to, "+91XXXXXXXXXX");
        assert!(config.mail.is_none());
    }

    #[test]
    fn missing_section_is_a_parse_error() {
        let result = parse_config("[weather]\napi_key = \"k\"\n");
        assert!(matches!(result, Err(LoadConfigurationError::ParseError(_))));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let result = load_config("/nonexistent/cloud_logger.toml");
        assert!(matches!(result, Err(LoadConfigurationError::ReadError(_))));
    }
}
