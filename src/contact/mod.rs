//! Contact submission subsystem.
//!
//! # Data Flow
//! ```text
//! POST body (form-encoded)
//!     → form.rs (decode, validate required fields + token)
//!     → verify::TurnstileVerifier (siteverify call)
//!     → email.rs (render plain-text body)
//!     → mail::mime (render raw message)
//!     → mail::MailTransport (SMTP dispatch)
//!     → JSON response (200 / 400 / 500)
//! ```
//!
//! # Design Decisions
//! - Every step's outcome is a typed ContactError variant; mapping to a
//!   response happens once, at the boundary
//! - Validation failures are client errors and are not logged; transport
//!   failures are logged with context and collapsed into one generic 500
//! - The verifier is only invoked after field validation, and the mailer
//!   only after a successful verification

pub mod email;
pub mod form;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use thiserror::Error;

pub use form::{ContactForm, ContactSubmission};

use crate::http::response as api;
use crate::http::server::AppState;
use crate::mail::{mime, MailError};
use crate::verify::VerifyError;

const MSG_SENT: &str = "Thank you for your message. We will get back to you soon.";
const MSG_MISSING_FIELDS: &str = "Please fill in all required fields.";
const MSG_MISSING_TOKEN: &str = "Please complete the captcha verification.";
const MSG_VERIFICATION_FAILED: &str = "Captcha verification failed. Please try again.";
const MSG_INTERNAL: &str = "An error occurred while sending your message. Please try again later.";

/// Everything that can go wrong while handling a submission.
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("required fields missing or empty")]
    MissingFields,

    #[error("verification token missing")]
    MissingToken,

    #[error("verification token rejected")]
    VerificationRejected,

    #[error("request body unreadable: {0}")]
    Body(#[from] axum::Error),

    #[error("form decode failed: {0}")]
    Decode(#[from] serde_urlencoded::de::Error),

    #[error("verification call failed: {0}")]
    Verify(#[from] VerifyError),

    #[error("mail dispatch failed: {0}")]
    Mail(#[from] MailError),
}

impl ContactError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields | Self::MissingToken | Self::VerificationRejected => {
                StatusCode::BAD_REQUEST
            }
            Self::Body(_) | Self::Decode(_) | Self::Verify(_) | Self::Mail(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The message shown to the caller. Internal detail never leaks here.
    fn public_message(&self) -> &'static str {
        match self {
            Self::MissingFields => MSG_MISSING_FIELDS,
            Self::MissingToken => MSG_MISSING_TOKEN,
            Self::VerificationRejected => MSG_VERIFICATION_FAILED,
            Self::Body(_) | Self::Decode(_) | Self::Verify(_) | Self::Mail(_) => MSG_INTERNAL,
        }
    }

    fn is_internal(&self) -> bool {
        self.status() == StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Handle a contact-form POST. Always produces a JSON response.
pub async fn handle(state: &AppState, request: Request<Body>) -> Response {
    match process(state, request).await {
        Ok(name) => {
            tracing::info!(name = %name, "Contact form message relayed");
            api::success(MSG_SENT)
        }
        Err(error) => {
            if error.is_internal() {
                tracing::error!(error = %error, "Contact form processing failed");
            }
            api::failure(error.status(), error.public_message())
        }
    }
}

async fn process(state: &AppState, request: Request<Body>) -> Result<String, ContactError> {
    let contact = &state.config.contact;
    let (parts, body) = request.into_parts();

    let client_ip = parts
        .headers
        .get(contact.client_ip_header.as_str())
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let bytes = axum::body::to_bytes(body, state.config.limits.contact_body_bytes).await?;
    let form: ContactForm = serde_urlencoded::from_bytes(&bytes)?;
    let submission = form.validate()?;

    let verified = state
        .verifier
        .verify(submission.token, client_ip.as_deref())
        .await?;
    if !verified {
        return Err(ContactError::VerificationRejected);
    }

    let body_text = email::render_body(&submission, client_ip.as_deref());
    let subject = format!("Contact form: {}", submission.name);
    let raw = mime::format_message(
        &contact.sender_address,
        &contact.sender_name,
        &contact.recipient_address,
        &subject,
        &body_text,
    );

    state
        .mailer
        .send(
            &contact.sender_address,
            &contact.recipient_address,
            raw.as_bytes(),
        )
        .await?;

    Ok(submission.name.to_owned())
}
