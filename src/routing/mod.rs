//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (endpoint lookup)
//!     → matcher.rs (evaluate match conditions)
//!     → Return: AutoconfigProxy | ContactForm | StaticAssets
//!
//! Route Compilation (at startup):
//!     RoutesConfig
//!     → Compile matchers (prefix, exact path + method)
//!     → Freeze as immutable EdgeRouter
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always matches same endpoint
//! - First match wins; static assets are the explicit fallback

pub mod matcher;
pub mod router;

pub use router::{EdgeRouter, Endpoint};
