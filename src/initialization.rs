use std::env;
use log::{info, warn};
use thiserror::Error;
use crate::alert::{AlertDispatcher, SendAlert};
use crate::config::{load_config, LoadConfigurationError};
use crate::logging::{setup_logger, LoggerError};
use crate::manager_location::Location;
use crate::manager_location::errors::LocationError;
use crate::manager_mail::Mail;
use crate::manager_mail::errors::MailError;
use crate::manager_sms::Sms;
use crate::manager_sms::errors::SmsError;
use crate::manager_thingspeak::ThingSpeak;
use crate::manager_thingspeak::errors::ThingSpeakError;
use crate::manager_weather::Weather;
use crate::manager_weather::errors::WeatherError;
use crate::worker::{FetchWeather, Locate, LogReading};

pub struct Mgr {
    pub location: Box<dyn Locate>,
    pub weather: Box<dyn FetchWeather>,
    pub cloud: Box<dyn LogReading>,
    pub alert: AlertDispatcher,
}

/// Loads configuration, sets up logging and returns a Mgr struct holding the initialized managers
///
pub fn init() -> Result<Mgr, InitializationError> {
    let args: Vec<String> = env::args().collect();
    let config_path = config_path(&args)
        .ok_or(InitializationError::ArgumentError("usage: cloud_logger --config=<path>".to_string()))?;

    // Load configuration
    let config = load_config(config_path)?;

    // Setup logging
    let _ = setup_logger(config.general.log_path.as_deref(), config.general.log_level, config.general.log_to_stdout)?;

    // Print version
    info!("starting cloud logger version: {}", env!("CARGO_PKG_VERSION"));

    // Instantiate structs
    let location = Location::new(&config.location)?;
    let weather = Weather::new(&config.weather)?;
    let cloud = ThingSpeak::new(&config.thingspeak)?;

    let mut channels: Vec<Box<dyn SendAlert>> = vec![Box::new(Sms::new(&config.sms)?)];
    match &config.mail {
        Some(mail) => channels.push(Box::new(Mail::new(mail)?)),
        None => warn!("no mail configuration, alerts go by sms only"),
    }

    let mgr = Mgr {
        location: Box::new(location),
        weather: Box::new(weather),
        cloud: Box::new(cloud),
        alert: AlertDispatcher::new(channels),
    };
    info!("alert channels: {}", mgr.alert.channels());

    Ok(mgr)
}

/// Finds the value of the --config=<path> argument
///
/// # Arguments
///
/// * 'args' - command line arguments
fn config_path(args: &[String]) -> Option<&str> {
    args.iter()
        .find(|p| p.starts_with("--config="))
        .and_then(|p| p.split_once('='))
        .map(|(_, path)| path)
        .filter(|path| !path.is_empty())
}

/// Error depicting errors that occur while starting up
///
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("ArgumentError: {0}")]
    ArgumentError(String),
    #[error("ConfigurationError: {0}")]
    ConfigurationError(#[from] LoadConfigurationError),
    #[error("SetupLoggerError: {0}")]
    SetupLoggerError(#[from] LoggerError),
    #[error("LocationSetupError: {0}")]
    LocationSetupError(#[from] LocationError),
    #[error("WeatherSetupError: {0}")]
    WeatherSetupError(#[from] WeatherError),
    #[error("ThingSpeakSetupError: {0}")]
    ThingSpeakSetupError(#[from] ThingSpeakError),
    #[error("SmsSetupError: {0}")]
    SmsSetupError(#[from] SmsError),
    #[error("MailSetupError: {0}")]
    MailSetupError(#[from] MailError),
}
