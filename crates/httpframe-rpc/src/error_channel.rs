//! In-band error reporting.
//!
//! A server that fails marks the response with [`ERROR_HEADER`] and writes a
//! single framed [`StructuredError`] as the body. Clients look for the header
//! first; only when it is absent does the HTTP status decide.

use std::io::Read;

use http::{HeaderMap, HeaderValue, Response, StatusCode};
use httpframe_message::StructuredError;
use httpframe_transport::{status_line, status_text, ResponseSink};

use crate::error::{Cause, ProtoError, Result};
use crate::protocol::{DEFAULT_ERROR_STATUS, ERROR_HEADER};
use crate::response::{read_message, write_message};

/// Report `err` on `sink` as a framed structured error.
///
/// The status comes from a [`ProtoError::Http`] wrapper when there is one,
/// otherwise it is `500`. The marker header carries the status text and the
/// body carries the error message (a peer's message is passed on verbatim).
///
/// Never fails. If the error body itself cannot be written, the marker header
/// is overwritten with that failure's text and the body is left as the failed
/// write left it; readers must treat such a response as best effort.
pub fn write_error<S: ResponseSink + ?Sized>(sink: &mut S, err: ProtoError) {
    let (status, reported) = match err {
        ProtoError::Http { status, source } => (status, *source),
        other => (DEFAULT_ERROR_STATUS, other),
    };

    let marker = match status_text(status) {
        "" => status.as_str().to_string(),
        text => text.to_string(),
    };
    set_marker(sink, &marker);
    sink.set_status(status);

    let message = match reported {
        ProtoError::Remote { message } => message,
        other => other.to_string(),
    };
    tracing::debug!(status = status.as_u16(), error = %message, "writing error response");

    if let Err(write_err) = write_message(sink, &StructuredError::new(message)) {
        tracing::error!(error = %write_err, "error writing error to http response");
        set_marker(sink, &write_err.to_string());
    }
}

/// Check a received response for an error.
///
/// Returns the response untouched when it is a success without the marker
/// header, so its body can be decoded as frames.
pub fn check_response_for_error<B: Read>(rsp: Response<B>) -> Result<Response<B>> {
    let (parts, mut body) = rsp.into_parts();
    check_error(parts.status, &parts.headers, &mut body)?;
    Ok(Response::from_parts(parts, body))
}

/// Borrowed form of [`check_response_for_error`].
///
/// With the marker header present, exactly one frame is read from `body`.
pub fn check_error<R: Read + ?Sized>(
    status: StatusCode,
    headers: &HeaderMap,
    body: &mut R,
) -> Result<()> {
    let marker = headers
        .get(ERROR_HEADER)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .unwrap_or_default();

    if !marker.is_empty() {
        return Err(match read_message::<StructuredError, _>(body) {
            Ok(structured) => ProtoError::Remote {
                message: structured.error,
            },
            Err(err) => Cause::MalformedErrorBody {
                header: marker,
                source: Box::new(err),
            }
            .into(),
        });
    }

    if !status.is_success() {
        return Err(Cause::UnexpectedStatus {
            status,
            status_line: status_line(status),
        }
        .into());
    }

    Ok(())
}

fn set_marker<S: ResponseSink + ?Sized>(sink: &mut S, text: &str) {
    sink.headers_mut()
        .insert(ERROR_HEADER, header_value_lossy(text));
}

/// Header values may only hold visible ASCII, spaces and tabs.
fn header_value_lossy(text: &str) -> HeaderValue {
    let cleaned: String = text
        .chars()
        .map(|c| {
            if c == '\t' || (' '..='~').contains(&c) {
                c
            } else {
                '?'
            }
        })
        .collect();
    HeaderValue::from_str(&cleaned).unwrap_or_else(|_| HeaderValue::from_static("error"))
}
