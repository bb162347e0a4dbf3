//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (ports valid, paths absolute)
//! - Check route paths are well-formed
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::GatewayConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every failure.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for prefix in &config.routes.autoconfig_prefixes {
        if !prefix.starts_with('/') {
            errors.push(ValidationError {
                field: "routes.autoconfig_prefixes",
                message: format!("prefix {:?} must start with '/'", prefix),
            });
        }
    }

    if !config.routes.contact_path.starts_with('/') {
        errors.push(ValidationError {
            field: "routes.contact_path",
            message: format!("path {:?} must start with '/'", config.routes.contact_path),
        });
    }

    if config.upstream.host.is_empty() {
        errors.push(ValidationError {
            field: "upstream.host",
            message: "host must not be empty".to_string(),
        });
    }

    if config.upstream.port == 0 {
        errors.push(ValidationError {
            field: "upstream.port",
            message: "port must not be zero".to_string(),
        });
    }

    if config.upstream.scheme != "http" && config.upstream.scheme != "https" {
        errors.push(ValidationError {
            field: "upstream.scheme",
            message: format!("scheme {:?} must be \"http\" or \"https\"", config.upstream.scheme),
        });
    }

    if config.contact.sender_address.is_empty() {
        errors.push(ValidationError {
            field: "contact.sender_address",
            message: "sender address must not be empty".to_string(),
        });
    }

    if config.contact.recipient_address.is_empty() {
        errors.push(ValidationError {
            field: "contact.recipient_address",
            message: "recipient address must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
