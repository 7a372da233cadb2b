use std::io::{ErrorKind, Read};

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{FrameError, ReadStage, Result};

/// Length prefix: a single little-endian `u32`.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Default maximum payload size accepted by [`FrameReader`](crate::FrameReader): 16 MiB.
pub const DEFAULT_MAX_PAYLOAD: usize = 16 * 1024 * 1024;

/// Largest payload the prefix can describe.
pub const MAX_FRAME_PAYLOAD: usize = u32::MAX as usize;

/// Encode a payload into a standalone frame.
///
/// Wire format:
/// ```text
/// ┌──────────────────┬──────────────────────┐
/// │ Length (4B LE)   │ Payload              │
/// │ N                │ (exactly N bytes)    │
/// └──────────────────┴──────────────────────┘
/// ```
///
/// An empty payload is valid and produces the four prefix bytes only. The
/// only failure is a payload the prefix cannot describe (over `u32::MAX`).
pub fn encode_frame(payload: &[u8]) -> Result<Bytes> {
    let mut dst = BytesMut::with_capacity(LENGTH_PREFIX_SIZE + payload.len());
    encode_frame_into(payload, &mut dst)?;
    Ok(dst.freeze())
}

/// Append a frame for `payload` to `dst`.
pub fn encode_frame_into(payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    if payload.len() > MAX_FRAME_PAYLOAD {
        return Err(FrameError::PayloadTooLarge {
            size: payload.len(),
            max: MAX_FRAME_PAYLOAD,
        });
    }
    dst.reserve(LENGTH_PREFIX_SIZE + payload.len());
    dst.put_u32_le(payload.len() as u32);
    dst.put_slice(payload);
    Ok(())
}

/// Read exactly one frame from `reader` and return its payload.
///
/// Reads the 4-byte prefix and then exactly the announced number of bytes,
/// never more, so frames sharing a stream stay intact for the next caller.
pub fn decode_frame<R: Read + ?Sized>(reader: &mut R) -> Result<Bytes> {
    decode_frame_with_limit(reader, MAX_FRAME_PAYLOAD)
}

/// Like [`decode_frame`], rejecting declared lengths above `max_payload`
/// before any payload bytes are read.
pub fn decode_frame_with_limit<R: Read + ?Sized>(
    reader: &mut R,
    max_payload: usize,
) -> Result<Bytes> {
    let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
    let received = read_full(reader, &mut prefix)?;
    if received < LENGTH_PREFIX_SIZE {
        return Err(FrameError::ShortRead {
            stage: ReadStage::Header,
            expected: LENGTH_PREFIX_SIZE,
            received,
        });
    }

    let payload_len = u32::from_le_bytes(prefix) as usize;
    if payload_len > max_payload {
        return Err(FrameError::PayloadTooLarge {
            size: payload_len,
            max: max_payload,
        });
    }

    // Grows as data arrives rather than trusting the prefix for the allocation.
    let mut payload = Vec::new();
    Read::take(&mut *reader, payload_len as u64).read_to_end(&mut payload)?;

    if payload.len() < payload_len {
        return Err(FrameError::ShortRead {
            stage: ReadStage::Payload,
            expected: payload_len,
            received: payload.len(),
        });
    }

    tracing::trace!(len = payload_len, "decoded frame");
    Ok(Bytes::from(payload))
}

/// Decode a frame from a buffer that is filled incrementally.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete frame yet.
/// On success, consumes exactly that frame's bytes from the buffer.
pub fn try_decode_frame(src: &mut BytesMut, max_payload: usize) -> Result<Option<Bytes>> {
    if src.len() < LENGTH_PREFIX_SIZE {
        return Ok(None);
    }

    let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
    prefix.copy_from_slice(&src[..LENGTH_PREFIX_SIZE]);
    let payload_len = u32::from_le_bytes(prefix) as usize;

    if payload_len > max_payload {
        return Err(FrameError::PayloadTooLarge {
            size: payload_len,
            max: max_payload,
        });
    }

    let total = frame_len(payload_len)?;
    if src.len() < total {
        src.reserve(total - src.len());
        return Ok(None);
    }

    src.advance(LENGTH_PREFIX_SIZE);
    Ok(Some(src.split_to(payload_len).freeze()))
}

/// Prefix plus payload, refusing lengths the address space cannot hold.
fn frame_len(payload_len: usize) -> Result<usize> {
    LENGTH_PREFIX_SIZE
        .checked_add(payload_len)
        .ok_or(FrameError::PayloadTooLarge {
            size: payload_len,
            max: usize::MAX - LENGTH_PREFIX_SIZE,
        })
}

/// The error for a buffer left holding an incomplete frame at end of stream.
#[cfg_attr(not(feature = "async"), allow(dead_code))]
pub(crate) fn short_read_for(src: &[u8]) -> FrameError {
    if src.len() < LENGTH_PREFIX_SIZE {
        return FrameError::ShortRead {
            stage: ReadStage::Header,
            expected: LENGTH_PREFIX_SIZE,
            received: src.len(),
        };
    }
    let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
    prefix.copy_from_slice(&src[..LENGTH_PREFIX_SIZE]);
    FrameError::ShortRead {
        stage: ReadStage::Payload,
        expected: u32::from_le_bytes(prefix) as usize,
        received: src.len() - LENGTH_PREFIX_SIZE,
    }
}

/// Fill `buf` from `reader`, stopping early only at end of stream.
fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0usize;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(FrameError::Io(err)),
        }
    }
    Ok(filled)
}

/// Configuration for frame readers and writers.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Maximum payload size in bytes. Default: 16 MiB.
    pub max_payload_size: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_payload_size: DEFAULT_MAX_PAYLOAD,
        }
    }
}
