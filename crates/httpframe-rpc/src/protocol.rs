//! Fixed protocol values shared by writers and readers.

use http::StatusCode;

/// Response header whose presence marks the body as a framed structured
/// error. Its value is diagnostic only.
pub const ERROR_HEADER: &str = "linkerd-error";

/// Content type of every framed response body.
pub const CONTENT_TYPE: &str = "application/octet-stream";

/// Status reported for errors that carry no status of their own.
pub const DEFAULT_ERROR_STATUS: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;

/// Status reported for request bodies that cannot be read or decoded.
pub const BAD_REQUEST_STATUS: StatusCode = StatusCode::BAD_REQUEST;
