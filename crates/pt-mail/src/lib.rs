//! Email delivery for rendered reports.
//!
//! Sends the report as a multipart message: the plain-text table as-is,
//! plus an HTML variant wrapped in `<pre>` so fixed-width alignment
//! survives HTML mail clients.

use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use serde::{Deserialize, Serialize};

/// SMTP delivery settings, loaded from the application config.
#[derive(Clone, Serialize, Deserialize)]
pub struct SmtpSettings {
    /// SMTP relay hostname.
    pub host: String,
    /// Relay port; 465 (implicit TLS) unless configured otherwise.
    #[serde(default = "default_port")]
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Sender, e.g. `Potty Trainer <pt@example.com>`.
    pub from: String,
    /// Recipient.
    pub to: String,
}

const fn default_port() -> u16 {
    465
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish()
    }
}

/// Errors from building or delivering the message.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("smtp delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Sends the rendered report. Blocking, no retry: the whole run is a
/// one-shot batch and a delivery failure aborts it.
pub fn send_report(settings: &SmtpSettings, subject: &str, report: &str) -> Result<(), MailError> {
    let from: Mailbox = settings.from.parse()?;
    let to: Mailbox = settings.to.parse()?;

    let message = Message::builder()
        .from(from)
        .to(to)
        .subject(subject)
        .multipart(MultiPart::alternative_plain_html(
            report.to_string(),
            html_body(report),
        ))?;

    let mailer = SmtpTransport::relay(&settings.host)?
        .port(settings.port)
        .credentials(Credentials::new(
            settings.username.clone(),
            settings.password.clone(),
        ))
        .build();

    tracing::debug!(host = %settings.host, port = settings.port, "sending report email");
    mailer.send(&message)?;
    Ok(())
}

/// Wraps the plain-text report for the HTML part.
fn html_body(report: &str) -> String {
    format!("<pre>{}</pre>", escape_html(report))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_body_is_pre_wrapped_and_escaped() {
        let body = html_body("mac & cheese | <1.00>");
        assert_eq!(body, "<pre>mac &amp; cheese | &lt;1.00&gt;</pre>");
    }

    #[test]
    fn debug_redacts_password() {
        let settings = SmtpSettings {
            host: "smtp.example.com".to_string(),
            port: 465,
            username: "pt".to_string(),
            password: "hunter2".to_string(),
            from: "pt@example.com".to_string(),
            to: "me@example.com".to_string(),
        };
        let debug = format!("{settings:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn port_defaults_to_465() {
        assert_eq!(default_port(), 465);
    }
}
