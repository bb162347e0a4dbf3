//! Raw message formatting.
//!
//! # Responsibilities
//! - Render a minimal RFC-2822-style message: CRLF-terminated header
//!   block, one blank line, body verbatim
//! - Stamp the Date header with the current UTC time
//!
//! # Design Decisions
//! - The message is single-part text/plain, so no multipart boundary is
//!   generated
//! - Body bytes are reproduced exactly; only the Date header varies
//!   between invocations with identical inputs

use chrono::Utc;

/// Format a plain-text message ready for SMTP submission.
pub fn format_message(from: &str, from_name: &str, to: &str, subject: &str, body: &str) -> String {
    // HTTP-style UTC date, e.g. "Fri, 07 Aug 2026 12:00:00 GMT"
    let date = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();
    format_message_with_date(from, from_name, to, subject, body, &date)
}

fn format_message_with_date(
    from: &str,
    from_name: &str,
    to: &str,
    subject: &str,
    body: &str,
    date: &str,
) -> String {
    let headers = [
        format!("From: {} <{}>", from_name, from),
        format!("To: {}", to),
        format!("Subject: {}", subject),
        format!("Date: {}", date),
        "MIME-Version: 1.0".to_string(),
        "Content-Type: text/plain; charset=UTF-8".to_string(),
        "Content-Transfer-Encoding: 8bit".to_string(),
    ]
    .join("\r\n");

    format!("{}\r\n\r\n{}", headers, body)
}
