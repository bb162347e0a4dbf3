//! Human-verification subsystem (Turnstile).

pub mod turnstile;

pub use turnstile::{TurnstileVerifier, VerifyError};
