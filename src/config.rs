use config::{Config as ConfigBuilder, ConfigError, Environment as ConfigEnvironment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_development(self) -> bool {
        self == Environment::Development
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SmtpConfig {
    #[serde(default = "default_smtp_host")]
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_from")]
    pub from: String,
    /// Applied to connection, greeting and socket reads on the SMTP transport.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            from: default_from(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_smtp_host() -> String {
    "smtp.zoho.com.au".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from() -> String {
    "contact@carbie.app".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy environment variables (SMTP_HOST, SMTP_PORT, ...)
    /// 2. Prefixed environment variables (CARBIE__SMTP__HOST, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("environment", "development")?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Config file is optional
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            ConfigEnvironment::with_prefix("CARBIE")
                .separator("__")
                .try_parsing(true),
        );

        // Unprefixed variables kept for existing deployments
        if let Ok(host) = env::var("SMTP_HOST") {
            builder = builder.set_override("smtp.host", host)?;
        }
        if let Ok(port) = env::var("SMTP_PORT") {
            builder = builder.set_override("smtp.port", port)?;
        }
        if let Ok(username) = env::var("SMTP_USER") {
            builder = builder.set_override("smtp.username", username)?;
        }
        if let Ok(password) = env::var("SMTP_PASS") {
            builder = builder.set_override("smtp.password", password)?;
        }
        if let Ok(from) = env::var("SMTP_FROM") {
            builder = builder.set_override("smtp.from", from)?;
        }
        if let Ok(environment) = env::var("ENVIRONMENT") {
            builder = builder.set_override("environment", environment)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.smtp.port == 0 {
            return Err("SMTP port must be greater than 0".to_string());
        }
        if self.smtp.from.trim().is_empty() {
            return Err("SMTP from address must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            smtp: SmtpConfig::default(),
            environment: Environment::Development,
            observability: ObservabilityConfig::default(),
        }
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_validation_zero_server_port() {
        let mut config = base_config();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_smtp_port() {
        let mut config = base_config();
        config.smtp.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_from_address() {
        let mut config = base_config();
        config.smtp.from = "   ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_smtp_defaults() {
        let smtp = SmtpConfig::default();
        assert_eq!(smtp.host, "smtp.zoho.com.au");
        assert_eq!(smtp.port, 587);
        assert_eq!(smtp.timeout_secs, 30);
        assert!(smtp.username.is_empty());
    }

    #[test]
    fn test_environment_default_is_development() {
        assert!(Environment::default().is_development());
        assert!(!Environment::Production.is_development());
    }
}
