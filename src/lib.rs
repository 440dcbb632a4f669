pub mod config;
pub mod contact;
pub mod error;
pub mod mailer;
pub mod observability;
pub mod routes;
pub mod template;

pub use routes::AppState;

use std::sync::Arc;

/// Create the app router
///
/// Takes the mailer as a trait object so integration tests can swap the SMTP
/// transport for a recording double.
pub fn create_app(config: config::Config, mailer: Arc<dyn mailer::Mailer>) -> axum::Router {
    routes::router(AppState { config, mailer })
}
