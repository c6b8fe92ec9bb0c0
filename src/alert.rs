use log::{error, info};
use thiserror::Error;
use crate::manager_mail::errors::MailError;
use crate::manager_sms::errors::SmsError;
use crate::models::Reading;

pub const TEMP_THRESHOLD: f64 = 35.0;
pub const HUM_THRESHOLD: f64 = 80.0;

/// A channel an alert can be delivered through
pub trait SendAlert {
    fn channel(&self) -> &str;
    fn send_alert(&self, message: &str) -> Result<(), AlertError>;
}

/// Returns true if the reading is strictly above either threshold
///
/// # Arguments
///
/// * 'reading' - the reading to check
pub fn exceeds_threshold(reading: &Reading) -> bool {
    reading.temperature > TEMP_THRESHOLD || reading.humidity > HUM_THRESHOLD
}

/// Formats the alert text with temperature and humidity to one decimal place
///
/// # Arguments
///
/// * 'reading' - the reading that triggered the alert
pub fn format_alert(reading: &Reading) -> String {
    format!(
        "ALERT from IoT Cloud Logger:\nLocation: {}\nTemp: {:.1}°C | Humidity: {:.1}%\nThreshold exceeded!",
        reading.location, reading.temperature, reading.humidity
    )
}

/// Fans an alert out to every configured channel
pub struct AlertDispatcher {
    channels: Vec<Box<dyn SendAlert>>,
}

impl AlertDispatcher {
    /// Returns a new dispatcher
    ///
    /// # Arguments
    ///
    /// * 'channels' - delivery channels, tried in order
    pub fn new(channels: Vec<Box<dyn SendAlert>>) -> Self {
        Self { channels }
    }

    pub fn channels(&self) -> usize {
        self.channels.len()
    }

    /// Sends an alert for the reading through all channels and returns how many accepted it.
    /// A failing channel is logged and does not stop the others.
    ///
    /// # Arguments
    ///
    /// * 'reading' - the reading that exceeded a threshold
    pub fn dispatch(&self, reading: &Reading) -> usize {
        let message = format_alert(reading);

        let mut sent = 0;
        for channel in self.channels.iter() {
            match channel.send_alert(&message) {
                Ok(()) => {
                    info!("{} alert sent successfully", channel.channel());
                    sent += 1;
                }
                Err(e) => error!("failed to send {} alert: {}", channel.channel(), e),
            }
        }

        sent
    }
}

/// Error depicting errors that occur while delivering an alert
///
#[derive(Debug, Error)]
pub enum AlertError {
    #[error("SmsError: {0}")]
    SmsError(#[from] SmsError),
    #[error("MailError: {0}")]
    MailError(#[from] MailError),
}
