pub mod errors;
mod models;

use std::time::Duration;
use log::debug;
use reqwest::blocking::{Client, RequestBuilder};
use crate::alert::{AlertError, SendAlert};
use crate::config::SmsParameters;
use crate::manager_sms::errors::SmsError;
use crate::manager_sms::models::{MessageResource, TwilioError};

/// Sends text messages through the Twilio Messages API
pub struct Sms {
    client: Client,
    account_sid: String,
    auth_token: String,
    from: String,
    to: String,
    url: String,
}

impl Sms {
    /// Returns a new instance of the Sms struct
    ///
    /// # Arguments
    ///
    /// * 'config' - account credentials and phone numbers
    pub fn new(config: &SmsParameters) -> Result<Self, SmsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from: config.from.clone(),
            to: config.to.clone(),
            url: config.url.trim_end_matches('/').to_string(),
        })
    }

    /// Sends a text message to the configured recipient and returns the message sid
    ///
    /// # Arguments
    ///
    /// * 'body' - the message text
    pub fn send_sms(&self, body: &str) -> Result<String, SmsError> {
        let response = self.request(body).send()?;

        let status = response.status();
        let json = response.text()?;

        if !status.is_success() {
            return Err(rejection(status.as_u16(), &json));
        }

        let message: MessageResource = serde_json::from_str(&json)
            .map_err(|e| SmsError::ParseError(e.to_string()))?;
        debug!("sms {} is {}", message.sid, message.status);

        Ok(message.sid)
    }

    /// Builds the authenticated Messages.json POST for the given text
    ///
    /// # Arguments
    ///
    /// * 'body' - the message text
    fn request(&self, body: &str) -> RequestBuilder {
        let url = format!("{}/Accounts/{}/Messages.json", self.url, self.account_sid);
        let form = [("To", self.to.as_str()), ("From", self.from.as_str()), ("Body", body)];

        self.client
            .post(url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&form)
    }
}

impl SendAlert for Sms {
    fn channel(&self) -> &str {
        "sms"
    }

    fn send_alert(&self, message: &str) -> Result<(), AlertError> {
        self.send_sms(message)?;
        Ok(())
    }
}

/// Builds an error from a non-success response
///
/// # Arguments
///
/// * 'status' - http status code
/// * 'json' - the response body
fn rejection(status: u16, json: &str) -> SmsError {
    match serde_json::from_str::<TwilioError>(json) {
        Ok(e) => SmsError::Rejected(status, format!("{} (code {})", e.message, e.code.unwrap_or_default())),
        Err(_) => SmsError::Rejected(status, json.chars().take(200).collect()),
    }
}
