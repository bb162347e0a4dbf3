//! Edge Gateway Library
//!
//! Serves static assets, proxies mail-autoconfiguration requests to a
//! fixed upstream, and relays contact-form submissions as email after
//! Turnstile verification.

pub mod config;
pub mod contact;
pub mod http;
pub mod mail;
pub mod proxy;
pub mod routing;
pub mod verify;

pub use config::GatewayConfig;
pub use http::HttpServer;
