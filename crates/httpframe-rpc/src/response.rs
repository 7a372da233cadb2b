use std::io::Read;

use http::header::CONTENT_TYPE;
use http::HeaderValue;
use httpframe_frame::{decode_frame, encode_frame};
use httpframe_message::Message;
use httpframe_transport::ResponseSink;

use crate::error::{Cause, Result};
use crate::error_channel::check_response_for_error;
use crate::protocol;

/// Serialize `msg`, frame it, and write the frame to `sink`.
///
/// Sets the binary content type first. Serialization and write failures are
/// returned as they are, without a status attached.
pub fn write_message<S, M>(sink: &mut S, msg: &M) -> Result<()>
where
    S: ResponseSink + ?Sized,
    M: Message,
{
    sink.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(protocol::CONTENT_TYPE));

    let payload = msg.to_bytes()?;
    let frame = encode_frame(&payload)?;
    sink.write_body(&frame)?;
    Ok(())
}

/// Decode one framed message from a response body.
///
/// Consumes exactly one frame, leaving any following frames unread.
pub fn read_message<M: Message, R: Read + ?Sized>(body: &mut R) -> Result<M> {
    let payload = decode_frame(body).map_err(|source| Cause::ReadFrame { source })?;
    unmarshal(&payload)
}

/// Deserialize one frame payload, naming its size on failure.
pub(crate) fn unmarshal<M: Message>(payload: &[u8]) -> Result<M> {
    M::from_bytes(payload).map_err(|source| {
        Cause::Unmarshal {
            len: payload.len(),
            source,
        }
        .into()
    })
}

/// Check a single-message response for errors, then decode its one frame.
pub fn read_response<M: Message, B: Read>(rsp: http::Response<B>) -> Result<M> {
    let mut body = check_response_for_error(rsp)?.into_body();
    read_message(&mut body)
}
