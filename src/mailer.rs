//! Outbound mail relay for contact form submissions
//!
//! Wraps a lettre [`SmtpTransport`] behind the [`Mailer`] trait so the HTTP
//! layer can be exercised against a recording double in tests. One submission
//! maps to exactly one delivery attempt; nothing here retries.

use std::error::Error as _;
use std::time::Duration;

use askama::Template;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use thiserror::Error;

use crate::config::SmtpConfig;
use crate::contact::Submission;

/// Transport and delivery failures, classified for the API response.
///
/// Each recognized subtype carries a stable short code and a fixed
/// user-facing hint. `Other` is the fallback for errors that carry a message
/// but no recognized code; `Unknown` is the final fallback.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MailError {
    #[error("Authentication failed")]
    Auth { detail: String },
    #[error("Connection failed")]
    Connection { detail: String },
    #[error("Connection timed out")]
    Timeout { detail: String },
    #[error("Socket error")]
    Socket { detail: String },
    #[error("{message}")]
    Other { message: String },
    #[error("Failed to send email")]
    Unknown,
}

impl MailError {
    pub fn code(&self) -> Option<&'static str> {
        match self {
            MailError::Auth { .. } => Some("EAUTH"),
            MailError::Connection { .. } => Some("ECONNECTION"),
            MailError::Timeout { .. } => Some("ETIMEDOUT"),
            MailError::Socket { .. } => Some("ESOCKET"),
            MailError::Other { .. } | MailError::Unknown => None,
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        match self {
            MailError::Auth { .. } => {
                Some("Check if you need an app-specific password for your mail provider")
            }
            MailError::Connection { .. } => Some("Check SMTP settings and firewall"),
            MailError::Timeout { .. } => {
                Some("Check network connectivity and firewall settings")
            }
            MailError::Socket { .. } => Some("Possible TLS/SSL configuration issue"),
            MailError::Other { .. } | MailError::Unknown => None,
        }
    }

    /// Raw underlying error text, exposed in responses only in development
    pub fn detail(&self) -> Option<&str> {
        match self {
            MailError::Auth { detail }
            | MailError::Connection { detail }
            | MailError::Timeout { detail }
            | MailError::Socket { detail } => Some(detail),
            MailError::Other { message } => Some(message),
            MailError::Unknown => None,
        }
    }
}

/// The email relayed to the site operators for one submission
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundEmail {
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

#[derive(Template)]
#[template(path = "emails/contact.html")]
struct ContactHtmlTemplate<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

#[derive(Template)]
#[template(path = "emails/contact.txt")]
struct ContactTextTemplate<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

impl OutboundEmail {
    /// Build the relay email for a validated submission
    ///
    /// The message is addressed to the configured contact inbox with reply-to
    /// set to the submitter, so a reply from the operator's mail client goes
    /// straight back to them.
    pub fn from_submission(submission: &Submission, to: &str) -> Result<Self, askama::Error> {
        let html_body = ContactHtmlTemplate {
            name: &submission.name,
            email: &submission.email,
            message: &submission.message,
        }
        .render()?;

        let text_body = ContactTextTemplate {
            name: &submission.name,
            email: &submission.email,
            message: &submission.message,
        }
        .render()?;

        Ok(OutboundEmail {
            to: to.to_string(),
            reply_to: submission.email.clone(),
            subject: submission.email_subject(),
            text_body,
            html_body,
        })
    }
}

/// Seam between the intake endpoint and the SMTP transport
pub trait Mailer: Send + Sync {
    /// Lightweight handshake/capability check before any delivery attempt
    fn verify(&self) -> Result<(), MailError>;

    /// Deliver one email; returns the provider message identifier
    fn send(&self, email: &OutboundEmail) -> Result<String, MailError>;
}

/// Production [`Mailer`] backed by an authenticated SMTP relay
pub struct SmtpMailer {
    transport: SmtpTransport,
    from: String,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> anyhow::Result<Self> {
        let timeout = Some(Duration::from_secs(config.timeout_secs));

        let transport = if config.username.is_empty() || config.password.is_empty() {
            tracing::info!(
                smtp_host = %config.host,
                smtp_port = config.port,
                "SMTP credentials not configured, using unauthenticated connection (e.g., MailDev)"
            );
            SmtpTransport::builder_dangerous(&config.host)
                .port(config.port)
                .timeout(timeout)
                .build()
        } else {
            tracing::info!(
                smtp_host = %config.host,
                smtp_port = config.port,
                from = %config.from,
                "SMTP transport initialized with authentication and TLS"
            );

            let creds = Credentials::new(config.username.clone(), config.password.clone());

            SmtpTransport::relay(&config.host)?
                .port(config.port)
                .credentials(creds)
                .timeout(timeout)
                .build()
        };

        Ok(Self {
            transport,
            from: config.from.clone(),
        })
    }
}

impl Mailer for SmtpMailer {
    fn verify(&self) -> Result<(), MailError> {
        match self.transport.test_connection() {
            Ok(true) => Ok(()),
            Ok(false) => Err(MailError::Connection {
                detail: "SMTP server rejected the connection check".to_string(),
            }),
            Err(err) => Err(classify(err)),
        }
    }

    fn send(&self, email: &OutboundEmail) -> Result<String, MailError> {
        let from: Mailbox = parse_mailbox(&format!("Carbie Contact Form <{}>", self.from))?;
        let to: Mailbox = parse_mailbox(&email.to)?;
        let reply_to: Mailbox = parse_mailbox(&email.reply_to)?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .reply_to(reply_to)
            .subject(&email.subject)
            .multipart(MultiPart::alternative_plain_html(
                email.text_body.clone(),
                email.html_body.clone(),
            ))
            .map_err(|err| MailError::Other {
                message: format!("Failed to build email message: {err}"),
            })?;

        let response = self.transport.send(&message).map_err(classify)?;

        Ok(response.message().collect::<Vec<_>>().join(" "))
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address.parse().map_err(|err| MailError::Other {
        message: format!("Invalid mailbox address: {err}"),
    })
}

/// Map an SMTP transport error onto the response taxonomy
fn classify(err: lettre::transport::smtp::Error) -> MailError {
    let detail = err.to_string();

    if err.is_timeout() {
        return MailError::Timeout { detail };
    }
    if err.is_tls() {
        return MailError::Socket { detail };
    }

    // 535 is the canonical bad-credentials reply; 530/534 cover servers that
    // demand auth or a stronger mechanism before accepting mail
    if let Some(code) = err.status() {
        if matches!(code.to_string().as_str(), "530" | "534" | "535") {
            return MailError::Auth { detail };
        }
    }

    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            use std::io::ErrorKind;
            return match io.kind() {
                ErrorKind::TimedOut => MailError::Timeout { detail },
                ErrorKind::InvalidData | ErrorKind::UnexpectedEof => {
                    MailError::Socket { detail }
                }
                _ => MailError::Connection { detail },
            };
        }
        source = cause.source();
    }

    if detail.is_empty() {
        MailError::Unknown
    } else {
        MailError::Other { message: detail }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::{SubmitForm, Submission};

    fn submission(subject: Option<&str>) -> Submission {
        Submission::parse(SubmitForm {
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            message: "Hello\nsecond line".to_string(),
            subject: subject.map(str::to_string),
        })
        .unwrap()
    }

    #[test]
    fn test_outbound_email_reply_to_is_submitter() {
        let email =
            OutboundEmail::from_submission(&submission(None), "contact@carbie.app").unwrap();
        assert_eq!(email.to, "contact@carbie.app");
        assert_eq!(email.reply_to, "test@example.com");
        assert_eq!(email.subject, "Contact Form: Test User");
    }

    #[test]
    fn test_outbound_email_subject_uses_category_label() {
        let email = OutboundEmail::from_submission(
            &submission(Some("Technical Support")),
            "contact@carbie.app",
        )
        .unwrap();
        assert_eq!(email.subject, "Contact Form: Technical Support");
    }

    #[test]
    fn test_outbound_email_bodies_embed_fields() {
        let email =
            OutboundEmail::from_submission(&submission(None), "contact@carbie.app").unwrap();

        assert!(email.text_body.contains("Test User"));
        assert!(email.text_body.contains("test@example.com"));
        assert!(email.text_body.contains("Hello\nsecond line"));

        assert!(email.html_body.contains("New Contact Form Submission"));
        assert!(email.html_body.contains("Test User"));
    }

    #[test]
    fn test_html_body_escapes_markup() {
        let submission = Submission::parse(SubmitForm {
            name: "<script>alert(1)</script>".to_string(),
            email: "test@example.com".to_string(),
            message: "Hello".to_string(),
            subject: None,
        })
        .unwrap();

        let email = OutboundEmail::from_submission(&submission, "contact@carbie.app").unwrap();
        assert!(!email.html_body.contains("<script>"));
    }

    #[test]
    fn test_error_codes_and_hints() {
        let auth = MailError::Auth {
            detail: "535 5.7.8 bad credentials".to_string(),
        };
        assert_eq!(auth.code(), Some("EAUTH"));
        assert!(auth.hint().unwrap().contains("app-specific password"));

        let timeout = MailError::Timeout {
            detail: "timed out".to_string(),
        };
        assert_eq!(timeout.code(), Some("ETIMEDOUT"));
        assert!(timeout.hint().unwrap().contains("network connectivity"));

        let connection = MailError::Connection {
            detail: "refused".to_string(),
        };
        assert_eq!(connection.code(), Some("ECONNECTION"));
        assert!(connection.hint().unwrap().contains("firewall"));

        let socket = MailError::Socket {
            detail: "tls".to_string(),
        };
        assert_eq!(socket.code(), Some("ESOCKET"));
        assert!(socket.hint().unwrap().contains("TLS"));

        let other = MailError::Other {
            message: "mailbox full".to_string(),
        };
        assert_eq!(other.code(), None);
        assert_eq!(other.hint(), None);
        assert_eq!(other.to_string(), "mailbox full");

        assert_eq!(MailError::Unknown.to_string(), "Failed to send email");
        assert_eq!(MailError::Unknown.detail(), None);
    }
}
