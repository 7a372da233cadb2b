//! Framed messages over HTTP with in-band structured errors.
//!
//! Servers parse unframed request bodies with [`parse_request`], answer with
//! one framed message via [`write_message`] or many via [`StreamingWriter`],
//! and report failures with [`write_error`]. Clients call
//! [`check_response_for_error`] before decoding frames with
//! [`read_message`] or [`MessageStream`].

pub mod error;
pub mod error_channel;
pub mod protocol;
pub mod request;
pub mod response;
pub mod stream;

pub use error::{BoxError, Cause, ProtoError, Result};
pub use error_channel::{check_error, check_response_for_error, write_error};
pub use protocol::{BAD_REQUEST_STATUS, CONTENT_TYPE, DEFAULT_ERROR_STATUS, ERROR_HEADER};
pub use request::{parse_request, parse_request_with_limit};
pub use response::{read_message, read_response, write_message};
pub use stream::{MessageStream, StreamingWriter};
