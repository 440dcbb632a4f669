use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use strum::{AsRefStr, Display, EnumString, VariantArray};
use thiserror::Error;

/// Permissive on purpose. This matches the acceptance behavior the site has
/// always had; it is not an RFC 5322 validator and must not become one.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

#[derive(EnumString, Display, AsRefStr, VariantArray, Clone, Copy, Debug, PartialEq, Deserialize)]
pub enum Subject {
    #[serde(rename = "General Inquiry")]
    #[strum(serialize = "General Inquiry")]
    GeneralInquiry,
    #[serde(rename = "Technical Support")]
    #[strum(serialize = "Technical Support")]
    TechnicalSupport,
    #[serde(rename = "Feature Request")]
    #[strum(serialize = "Feature Request")]
    FeatureRequest,
    #[serde(rename = "Bug Report")]
    #[strum(serialize = "Bug Report")]
    BugReport,
    Other,
}

/// Raw contact form body as posted by the client widget
#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub subject: Option<String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("All fields are required")]
    MissingFields,
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Invalid subject")]
    UnknownSubject,
}

/// A validated contact form submission
///
/// Exists only for the duration of one request. Constructed through
/// [`Submission::parse`], which enforces the field presence and email shape
/// rules before any email is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
    pub subject: Option<Subject>,
}

impl Submission {
    pub fn parse(form: SubmitForm) -> Result<Self, ValidationError> {
        let name = form.name.trim();
        let email = form.email.trim();

        if name.is_empty() || email.is_empty() || form.message.trim().is_empty() {
            return Err(ValidationError::MissingFields);
        }

        if !EMAIL_RE.is_match(email) {
            return Err(ValidationError::InvalidEmail);
        }

        let subject = match form.subject.as_deref().map(str::trim) {
            Some("") | None => None,
            Some(raw) => {
                Some(Subject::from_str(raw).map_err(|_| ValidationError::UnknownSubject)?)
            }
        };

        Ok(Submission {
            name: name.to_string(),
            email: email.to_string(),
            message: form.message,
            subject,
        })
    }

    /// Subject line of the relayed email: the mapped category label when one
    /// was selected, the sender name otherwise.
    pub fn email_subject(&self) -> String {
        match self.subject {
            Some(subject) => format!("Contact Form: {subject}"),
            None => format!("Contact Form: {}", self.name),
        }
    }
}
