use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::config::Environment;
use crate::mailer::MailError;

/// JSON body shared by every rejection from the contact endpoint
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            hint: None,
            code: None,
            error: None,
        }
    }
}

pub fn validation_rejection(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::message_only(message)),
    )
        .into_response()
}

pub fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::message_only("Method not allowed")),
    )
        .into_response()
}

/// Transport/delivery failure mapped to a 500 rejection
///
/// The raw error text is included only in development; the classification
/// code and hint are safe to expose in production.
pub fn mail_rejection(err: &MailError, environment: Environment) -> Response {
    let body = ErrorResponse {
        message: err.to_string(),
        hint: err.hint().map(str::to_string),
        code: err.code().map(str::to_string),
        error: if environment.is_development() {
            err.detail().map(str::to_string)
        } else {
            None
        },
    };

    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
