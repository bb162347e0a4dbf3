//! Rendering of the relayed message body.

use chrono::{SecondsFormat, Utc};

use crate::contact::form::ContactSubmission;

/// Render the plain-text body for a verified submission.
pub fn render_body(submission: &ContactSubmission<'_>, client_ip: Option<&str>) -> String {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    format!(
        "New contact form submission from dataat.work\n\
         \n\
         Name: {}\n\
         Email: {}\n\
         \n\
         Message:\n\
         {}\n\
         \n\
         ---\n\
         Submitted from IP: {}\n\
         Time: {}\n",
        submission.name,
        submission.email,
        submission.message,
        client_ip.unwrap_or("unknown"),
        timestamp,
    )
}
