//! Mail-autoconfiguration proxy subsystem.
//!
//! Relays `/.well-known/autoconfig/` and `/autodiscover/` trees to the
//! mail host so email clients can self-configure against the website's
//! domain. Failures surface as 502; there is no retry.

pub mod forward;

pub use forward::{forward, ProxyError};
