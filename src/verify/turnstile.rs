//! Turnstile siteverify client.
//!
//! One POST per verification; no retry, no local timeout override. Any
//! transport or decode failure propagates to the contact handler, which
//! collapses it into the generic 500 response.

use serde::Deserialize;
use thiserror::Error;

/// Error type for verification calls.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("siteverify request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// The only field of the siteverify response this system consults.
#[derive(Debug, Deserialize)]
struct SiteverifyResponse {
    success: bool,
}

/// Client for the Turnstile siteverify endpoint.
pub struct TurnstileVerifier {
    client: reqwest::Client,
    verify_url: String,
    secret: String,
}

impl TurnstileVerifier {
    /// Create a verifier sharing the gateway's outbound HTTP client.
    pub fn new(client: reqwest::Client, verify_url: String, secret: String) -> Self {
        Self {
            client,
            verify_url,
            secret,
        }
    }

    /// Check a challenge token, passing the client IP along when known.
    ///
    /// Returns the `success` flag of the siteverify response.
    pub async fn verify(&self, token: &str, remote_ip: Option<&str>) -> Result<bool, VerifyError> {
        let mut form = vec![("secret", self.secret.as_str()), ("response", token)];
        if let Some(ip) = remote_ip {
            form.push(("remoteip", ip));
        }

        let response = self
            .client
            .post(&self.verify_url)
            .form(&form)
            .send()
            .await?;

        let result: SiteverifyResponse = response.json().await?;

        tracing::debug!(success = result.success, "Siteverify completed");
        Ok(result.success)
    }
}
