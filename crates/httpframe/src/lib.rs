//! Length-prefixed message streams and structured errors over HTTP.
//!
//! A server answers with one or more framed messages, each a 4-byte
//! little-endian length followed by the serialized message. Failures travel
//! in-band: a `linkerd-error` response header plus one framed structured
//! error body.
//!
//! # Crate Structure
//!
//! - [`frame`] — The length-prefixed frame codec
//! - [`transport`] — Response sinks and the flush capability used for streaming
//! - [`message`] — The serialization capability (`Json`, `Proto` behind `prost`)
//! - [`rpc`] — Request parsing, response and streaming writers, the error channel

/// Re-export frame types.
pub mod frame {
    pub use httpframe_frame::*;
}

/// Re-export response sink types.
pub mod transport {
    pub use httpframe_transport::*;
}

/// Re-export message types.
pub mod message {
    pub use httpframe_message::*;
}

/// Re-export protocol operations.
pub mod rpc {
    pub use httpframe_rpc::*;
}

pub use httpframe_rpc::{
    check_response_for_error, parse_request, read_message, read_response, write_error,
    write_message, MessageStream, ProtoError, StreamingWriter,
};
