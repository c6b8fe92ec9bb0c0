pub mod errors;

use std::time::Duration;
use log::debug;
use reqwest::blocking::{Client, RequestBuilder};
use crate::config::ThingSpeakParameters;
use crate::manager_thingspeak::errors::ThingSpeakError;
use crate::models::{Coordinates, Reading};
use crate::worker::LogReading;

/// Posts readings to a ThingSpeak channel
pub struct ThingSpeak {
    client: Client,
    api_key: String,
    url: String,
}

/// How ThingSpeak answered an update
#[derive(Debug, PartialEq)]
pub enum LogOutcome {
    Accepted,
    Rejected(u16),
}

impl ThingSpeak {
    /// Returns a new instance of the ThingSpeak struct
    ///
    /// # Arguments
    ///
    /// * 'config' - channel write key and endpoint
    pub fn new(config: &ThingSpeakParameters) -> Result<Self, ThingSpeakError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self { client, api_key: config.api_key.clone(), url: config.url.clone() })
    }

    /// Sends one channel update as a form encoded POST
    ///
    /// # Arguments
    ///
    /// * 'reading' - temperature and humidity to log
    /// * 'coordinates' - where the reading applies
    pub fn update(&self, reading: &Reading, coordinates: Coordinates) -> Result<LogOutcome, ThingSpeakError> {
        let response = self.request(reading, coordinates).send()?;

        let outcome = classify(response.status().as_u16());
        if outcome == LogOutcome::Accepted {
            // The body is the id of the new entry
            if let Ok(body) = response.text() {
                debug!("thingspeak entry: {}", body.trim());
            }
        }

        Ok(outcome)
    }

    /// Builds the form encoded update POST
    ///
    /// # Arguments
    ///
    /// * 'reading' - temperature and humidity to log
    /// * 'coordinates' - where the reading applies
    fn request(&self, reading: &Reading, coordinates: Coordinates) -> RequestBuilder {
        let fields = form_fields(&self.api_key, reading, coordinates);

        self.client
            .post(&self.url)
            .form(&fields)
    }
}

impl LogReading for ThingSpeak {
    fn log_reading(&self, reading: &Reading, coordinates: Coordinates) -> Result<LogOutcome, ThingSpeakError> {
        self.update(reading, coordinates)
    }
}

/// Builds the update form: field1 temperature, field2 humidity, field3 latitude, field4 longitude
///
/// # Arguments
///
/// * 'api_key' - channel write key
/// * 'reading' - the reading
/// * 'coordinates' - the coordinates
fn form_fields(api_key: &str, reading: &Reading, coordinates: Coordinates) -> Vec<(&'static str, String)> {
    vec![
        ("api_key", api_key.to_string()),
        ("field1", format_value(reading.temperature)),
        ("field2", format_value(reading.humidity)),
        ("field3", format_value(coordinates.lat)),
        ("field4", format_value(coordinates.lon)),
    ]
}

/// Formats a value keeping the decimal point for whole numbers, i.e. 55.0 rather than 55
fn format_value(value: f64) -> String {
    format!("{:?}", value)
}

fn classify(status: u16) -> LogOutcome {
    if status == 200 {
        LogOutcome::Accepted
    } else {
        LogOutcome::Rejected(status)
    }
}
