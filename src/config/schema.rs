//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! gateway. All types derive Serde traits for deserialization from config
//! files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the edge gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Route definitions (autoconfig prefixes, contact endpoint).
    pub routes: RoutesConfig,

    /// Mail-autoconfiguration upstream.
    pub upstream: UpstreamConfig,

    /// Static asset serving.
    pub static_assets: StaticAssetsConfig,

    /// Contact-form addresses and headers.
    pub contact: ContactConfig,

    /// Turnstile verification settings.
    pub turnstile: TurnstileConfig,

    /// SMTP transport settings.
    pub smtp: SmtpConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request body limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Route configuration for the dispatch chain.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Path prefixes forwarded to the mail-autoconfiguration upstream.
    pub autoconfig_prefixes: Vec<String>,

    /// Exact path of the contact-form endpoint (POST only).
    pub contact_path: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            autoconfig_prefixes: vec![
                "/.well-known/autoconfig/".to_string(),
                "/autodiscover/".to_string(),
            ],
            contact_path: "/api/contact".to_string(),
        }
    }
}

/// Upstream target for autoconfig forwarding.
///
/// Requests matching the autoconfig prefixes are rewritten to this
/// scheme/host/port with their path and query preserved.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Transport scheme ("https" in production).
    pub scheme: String,

    /// Upstream host.
    pub host: String,

    /// Upstream port.
    pub port: u16,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            host: "lykkebovej44.dalsgaard.net".to_string(),
            port: 8447,
        }
    }
}

/// Static asset serving configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticAssetsConfig {
    /// Directory served for requests no other route claims.
    pub root: PathBuf,
}

impl Default for StaticAssetsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("public"),
        }
    }
}

/// Contact-form configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Envelope sender address.
    pub sender_address: String,

    /// Display name used in the From header.
    pub sender_name: String,

    /// Recipient of contact-form messages.
    pub recipient_address: String,

    /// Header carrying the client IP at the edge.
    pub client_ip_header: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            sender_address: "contact@dataat.work".to_string(),
            sender_name: "Data At Work Contact Form".to_string(),
            recipient_address: "jakob@dalsgaard.net".to_string(),
            client_ip_header: "cf-connecting-ip".to_string(),
        }
    }
}

/// Turnstile verification configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TurnstileConfig {
    /// Siteverify endpoint URL.
    pub verify_url: String,

    /// Shared secret. Usually supplied via the `TURNSTILE_SECRET`
    /// environment variable rather than the config file.
    pub secret: String,
}

impl Default for TurnstileConfig {
    fn default() -> Self {
        Self {
            verify_url: "https://challenges.cloudflare.com/turnstile/v0/siteverify".to_string(),
            secret: String::new(),
        }
    }
}

/// SMTP transport configuration.
///
/// Credentials are only attached when the URL uses `smtps://`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SmtpConfig {
    /// Transport URL (e.g., "smtps://smtp.example.net").
    pub url: String,

    /// SMTP username, usually from the `SMTP_USERNAME` environment variable.
    pub username: Option<String>,

    /// SMTP password, usually from the `SMTP_PASSWORD` environment variable.
    pub password: Option<String>,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            url: "smtps://smtp.dalsgaard.net".to_string(),
            username: None,
            password: None,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Request body limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum contact-form body size in bytes.
    pub contact_body_bytes: usize,

    /// Maximum buffered body size for forwarded autoconfig requests.
    pub proxy_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            contact_body_bytes: 64 * 1024,
            proxy_body_bytes: 1024 * 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
