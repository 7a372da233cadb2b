use http::StatusCode;

/// Human-readable reason phrase for a status, e.g. `"Internal Server Error"`.
///
/// Unregistered codes yield an empty string.
pub fn status_text(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("")
}

/// Status line as a client reports it, e.g. `"404 Not Found"`.
pub fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_str()),
        None => status.as_str().to_string(),
    }
}
