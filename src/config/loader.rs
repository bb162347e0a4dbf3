//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: GatewayConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay secrets from the environment onto a loaded configuration.
///
/// Secrets live in the deployment environment, not in the config file.
pub fn apply_env_overrides(config: &mut GatewayConfig) {
    if let Ok(secret) = std::env::var("TURNSTILE_SECRET") {
        config.turnstile.secret = secret;
    }
    if let Ok(url) = std::env::var("SMTP_URL") {
        config.smtp.url = url;
    }
    if let Ok(username) = std::env::var("SMTP_USERNAME") {
        config.smtp.username = Some(username);
    }
    if let Ok(password) = std::env::var("SMTP_PASSWORD") {
        config.smtp.password = Some(password);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp_config(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("edge-gateway-{}-{}.toml", name, std::process::id()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_and_validates_a_config_file() {
        let path = write_temp_config(
            "load",
            r#"
            [listener]
            bind_address = "127.0.0.1:8088"

            [upstream]
            host = "mail.example.net"
            port = 8447
            "#,
        );

        let config = load_config(&path).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8088");
        assert_eq!(config.upstream.host, "mail.example.net");

        fs::remove_file(path).ok();
    }

    #[test]
    fn semantic_errors_surface_as_validation_failures() {
        let path = write_temp_config(
            "invalid",
            r#"
            [upstream]
            scheme = "gopher"
            "#,
        );

        match load_config(&path) {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors[0].field, "upstream.scheme");
            }
            other => panic!("expected validation failure, got {:?}", other.map(|_| ())),
        }

        fs::remove_file(path).ok();
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load_config(std::path::Path::new("/nonexistent/gateway.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn environment_overlays_secrets() {
        std::env::set_var("TURNSTILE_SECRET", "from-env");
        std::env::set_var("SMTP_USERNAME", "mailer");

        let mut config = GatewayConfig::default();
        apply_env_overrides(&mut config);

        assert_eq!(config.turnstile.secret, "from-env");
        assert_eq!(config.smtp.username.as_deref(), Some("mailer"));

        std::env::remove_var("TURNSTILE_SECRET");
        std::env::remove_var("SMTP_USERNAME");
    }
}
