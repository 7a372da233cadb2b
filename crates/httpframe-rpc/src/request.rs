use std::io::Read;

use http::StatusCode;
use httpframe_message::Message;

use crate::error::{Cause, ProtoError, Result};

/// Read a whole request body and deserialize it.
///
/// Request bodies are never framed: the body is exactly one serialized
/// message. A read or decode failure comes back as `400 Bad Request`.
pub fn parse_request<M: Message, R: Read>(mut body: R) -> Result<M> {
    let mut bytes = Vec::new();
    body.read_to_end(&mut bytes)
        .map_err(ProtoError::bad_request)?;

    decode_request(&bytes)
}

/// Like [`parse_request`], refusing bodies larger than `max_bytes` with
/// `413 Payload Too Large`.
pub fn parse_request_with_limit<M: Message, R: Read>(body: R, max_bytes: usize) -> Result<M> {
    let mut bytes = Vec::new();
    let limit = u64::try_from(max_bytes.saturating_add(1)).unwrap_or(u64::MAX);
    body.take(limit)
        .read_to_end(&mut bytes)
        .map_err(ProtoError::bad_request)?;

    if bytes.len() > max_bytes {
        return Err(ProtoError::with_status(
            StatusCode::PAYLOAD_TOO_LARGE,
            Cause::BodyTooLarge { max: max_bytes },
        ));
    }

    decode_request(&bytes)
}

fn decode_request<M: Message>(bytes: &[u8]) -> Result<M> {
    M::from_bytes(bytes).map_err(|err| {
        tracing::debug!(len = bytes.len(), error = %err, "rejecting undecodable request body");
        ProtoError::bad_request(err)
    })
}
