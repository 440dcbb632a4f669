#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use carbie_web::config::{Config, Environment, ObservabilityConfig, ServerConfig, SmtpConfig};
use carbie_web::mailer::{MailError, Mailer, OutboundEmail};

/// Recording mailer double with scripted verify/send outcomes
pub struct MockMailer {
    verify_result: Result<(), MailError>,
    send_result: Result<String, MailError>,
    sent: Mutex<Vec<OutboundEmail>>,
}

impl MockMailer {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            verify_result: Ok(()),
            send_result: Ok("abc-123".to_string()),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn verify_failure(err: MailError) -> Arc<Self> {
        Arc::new(Self {
            verify_result: Err(err),
            send_result: Ok("abc-123".to_string()),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn send_failure(err: MailError) -> Arc<Self> {
        Arc::new(Self {
            verify_result: Ok(()),
            send_result: Err(err),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

impl Mailer for MockMailer {
    fn verify(&self) -> Result<(), MailError> {
        self.verify_result.clone()
    }

    fn send(&self, email: &OutboundEmail) -> Result<String, MailError> {
        self.sent.lock().unwrap().push(email.clone());
        self.send_result.clone()
    }
}

pub fn test_config(environment: Environment) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        smtp: SmtpConfig {
            host: "localhost".to_string(),
            port: 1025,
            username: String::new(),
            password: String::new(),
            from: "contact@carbie.app".to_string(),
            timeout_secs: 30,
        },
        environment,
        observability: ObservabilityConfig::default(),
    }
}

pub fn create_test_app(mailer: Arc<MockMailer>) -> Router {
    carbie_web::create_app(test_config(Environment::Development), mailer)
}

pub fn create_test_app_with(environment: Environment, mailer: Arc<MockMailer>) -> Router {
    carbie_web::create_app(test_config(environment), mailer)
}
