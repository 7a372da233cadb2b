//! Length-prefixed message framing for HTTP response bodies.
//!
//! Every message on a response stream is framed as:
//! - A 4-byte little-endian payload length
//! - Exactly that many payload bytes
//!
//! Frames are self-delimiting, so any number of them can be concatenated on
//! one chunked body and decoded in order without lookahead.

#[cfg(feature = "async")]
pub mod async_codec;
pub mod codec;
pub mod error;
pub mod reader;

#[cfg(feature = "async")]
pub use async_codec::FrameCodec;
pub use codec::{
    decode_frame, decode_frame_with_limit, encode_frame, encode_frame_into, try_decode_frame,
    FrameConfig, DEFAULT_MAX_PAYLOAD, LENGTH_PREFIX_SIZE, MAX_FRAME_PAYLOAD,
};
pub use error::{FrameError, ReadStage, Result};
pub use reader::FrameReader;
