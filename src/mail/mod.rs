//! Mail subsystem.
//!
//! # Data Flow
//! ```text
//! Contact submission
//!     → mime.rs (render raw RFC-2822-style bytes)
//!     → transport.rs (MailTransport seam → SMTP via lettre)
//! ```

pub mod mime;
pub mod transport;

pub use transport::{MailError, MailTransport, SmtpMailer};
