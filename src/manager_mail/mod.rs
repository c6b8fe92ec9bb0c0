pub mod errors;

use lettre::message::Mailbox;
use lettre::{Message, SmtpTransport, Transport};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use crate::alert::{AlertError, SendAlert};
use crate::config::MailParameters;
use crate::manager_mail::errors::MailError;

const ALERT_SUBJECT: &str = "Weather threshold exceeded";

pub struct Mail {
    sender: SmtpTransport,
    from: Mailbox,
    to: Mailbox,
}

impl Mail {
    /// Returns a new instance of the Mail struct
    ///
    /// # Arguments
    ///
    /// * 'config' - mail configuration parameters
    pub fn new(config: &MailParameters) -> Result<Self, MailError> {
        let credentials = Credentials::new(config.smtp_user.to_owned(), config.smtp_password.to_owned());
        let sender = SmtpTransport::relay(&config.smtp_endpoint)
            .map_err(|e| MailError::SMTPTransportError(e.to_string()))?
            .credentials(credentials)
            .build();

        let from = config.from.parse::<Mailbox>()
            .map_err(|e| MailError::ParseError(format!("from address: {}", e.to_string())))?;
        let to = config.to.parse::<Mailbox>()
            .map_err(|e| MailError::ParseError(format!("to address: {}", e.to_string())))?;

        Ok(
            Self {
                sender,
                from,
                to,
            }
        )
    }

    /// Builds a plain text mail with the given subject and body
    ///
    /// # Arguments
    ///
    /// * 'subject' - the subject of the mail
    /// * 'body' - the body of the mail
    fn build_message(&self, subject: &str, body: &str) -> Result<Message, MailError> {
        Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| MailError::MessageError(e.to_string()))
    }

    /// Sends a mail with the given subject and body
    ///
    /// # Arguments
    ///
    /// * 'subject' - the subject of the mail
    /// * 'body' - the body of the mail
    pub fn send_mail(&self, subject: &str, body: &str) -> Result<(), MailError> {
        let message = self.build_message(subject, body)?;

        self.sender.send(&message)
            .map_err(|e| MailError::TransportError(e.to_string()))?;

        Ok(())
    }
}

impl SendAlert for Mail {
    fn channel(&self) -> &str {
        "mail"
    }

    fn send_alert(&self, message: &str) -> Result<(), AlertError> {
        self.send_mail(ALERT_SUBJECT, message)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameters(to: &str) -> MailParameters {
        MailParameters {
            smtp_user: "user".into(),
            smtp_password: "pass".into(),
            smtp_endpoint: "smtp.example.com".into(),
            from: "Cloud Logger <logger@example.com>".into(),
            to: to.into(),
        }
    }

    #[test]
    fn invalid_recipient_is_rejected() {
        let result = Mail::new(&parameters("not an address"));
        assert!(matches!(result, Err(MailError::ParseError(_))));
    }

    #[test]
    fn alert_mail_is_plain_text() {
        let mail = Mail::new(&parameters("me@example.com")).unwrap();
        let message = mail.build_message(ALERT_SUBJECT, "Temp: 36.2°C").unwrap();
        let formatted = String::from_utf8(message.formatted()).unwrap();

        assert!(formatted.contains("Subject: Weather threshold exceeded"));
        assert!(formatted.contains("To: me@example.com"));
        assert!(formatted.contains("Content-Type: text/plain"));
        assert_eq!(mail.channel(), "mail");
    }
}
