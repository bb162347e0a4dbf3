//! Contact-form field decoding and validation.

use serde::Deserialize;

use crate::contact::ContactError;

/// Raw form fields as submitted by the browser.
///
/// Every field is optional at the wire level; validation decides which
/// absences are client errors.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "cf-turnstile-response")]
    pub turnstile_token: Option<String>,
}

/// A submission whose required fields are present and non-empty.
#[derive(Debug)]
pub struct ContactSubmission<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub message: &'a str,
    pub token: &'a str,
}

impl ContactForm {
    /// Check required fields, then the verification token. Empty strings
    /// count as absent. The email address is not validated for RFC
    /// correctness; it only ever appears inside the relayed message body.
    pub fn validate(&self) -> Result<ContactSubmission<'_>, ContactError> {
        let (Some(name), Some(email), Some(message)) = (
            non_empty(&self.name),
            non_empty(&self.email),
            non_empty(&self.message),
        ) else {
            return Err(ContactError::MissingFields);
        };

        let Some(token) = non_empty(&self.turnstile_token) else {
            return Err(ContactError::MissingToken);
        };

        Ok(ContactSubmission {
            name,
            email,
            message,
            token,
        })
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}
