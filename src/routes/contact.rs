use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::contact::{SubmitForm, Submission};
use crate::error;
use crate::mailer::OutboundEmail;
use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub message: String,
    #[serde(rename = "messageId")]
    pub message_id: String,
}

/// POST /api/contact
///
/// Validates the submission, verifies the SMTP connection, then relays the
/// message as a single email to the configured contact inbox. Exactly one
/// delivery is attempted per valid request; failed submissions are reported
/// back to the user, never retried.
pub async fn submit(State(state): State<AppState>, Json(form): Json<SubmitForm>) -> Response {
    let submission = match Submission::parse(form) {
        Ok(submission) => submission,
        Err(err) => return error::validation_rejection(err.to_string()),
    };

    tracing::info!(
        smtp_host = %state.config.smtp.host,
        smtp_port = state.config.smtp.port,
        "Verifying SMTP connection"
    );

    if let Err(err) = state.mailer.verify() {
        tracing::error!(error = %err, "SMTP verification failed");
        return error::mail_rejection(&err, state.config.environment);
    }

    let email = match OutboundEmail::from_submission(&submission, &state.config.smtp.from) {
        Ok(email) => email,
        Err(err) => {
            tracing::error!(error = %err, "Failed to render contact email templates");
            return error::mail_rejection(
                &crate::mailer::MailError::Other {
                    message: err.to_string(),
                },
                state.config.environment,
            );
        }
    };

    match state.mailer.send(&email) {
        Ok(message_id) => {
            tracing::info!(message_id = %message_id, "Contact email sent successfully");
            Json(SubmitResponse {
                message: "Email sent successfully".to_string(),
                message_id,
            })
            .into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, code = ?err.code(), "Failed to send contact email");
            error::mail_rejection(&err, state.config.environment)
        }
    }
}

/// Any method other than POST on /api/contact
pub async fn method_not_allowed() -> Response {
    error::method_not_allowed()
}
