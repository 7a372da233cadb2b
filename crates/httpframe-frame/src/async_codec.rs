//! tokio-util codec over the same wire format, for async HTTP clients that
//! receive the response body as a byte stream.

use bytes::{Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::codec::{encode_frame_into, try_decode_frame, FrameConfig};
use crate::error::FrameError;

/// Length-prefixed frame codec.
#[derive(Debug, Clone, Default)]
pub struct FrameCodec {
    config: FrameConfig,
}

impl FrameCodec {
    /// Create a codec with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec with explicit configuration.
    pub fn with_config(config: FrameConfig) -> Self {
        Self { config }
    }
}

impl Decoder for FrameCodec {
    type Item = Bytes;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        try_decode_frame(src, self.config.max_payload_size)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(frame) => Ok(Some(frame)),
            None if src.is_empty() => Ok(None),
            None => Err(crate::codec::short_read_for(src)),
        }
    }
}

impl<T: AsRef<[u8]>> Encoder<T> for FrameCodec {
    type Error = FrameError;

    fn encode(&mut self, item: T, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let payload = item.as_ref();
        if payload.len() > self.config.max_payload_size {
            return Err(FrameError::PayloadTooLarge {
                size: payload.len(),
                max: self.config.max_payload_size,
            });
        }
        encode_frame_into(payload, dst)
    }
}

#[cfg(test)]
mod tests {
    use futures_util::{SinkExt, StreamExt};
    use tokio_util::codec::{FramedRead, FramedWrite};

    use super::*;
    use crate::error::ReadStage;

    #[tokio::test]
    async fn framed_roundtrip() {
        let mut wire = Vec::new();
        {
            let mut sink = FramedWrite::new(&mut wire, FrameCodec::new());
            sink.send(&b"first"[..]).await.unwrap();
            sink.send(&b""[..]).await.unwrap();
            sink.send(&b"third"[..]).await.unwrap();
        }

        let mut stream = FramedRead::new(&wire[..], FrameCodec::new());
        assert_eq!(stream.next().await.unwrap().unwrap().as_ref(), b"first");
        assert!(stream.next().await.unwrap().unwrap().is_empty());
        assert_eq!(stream.next().await.unwrap().unwrap().as_ref(), b"third");
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn truncated_body_is_short_read() {
        let mut wire = BytesMut::new();
        encode_frame_into(b"complete", &mut wire).unwrap();
        wire.truncate(6);

        let mut stream = FramedRead::new(&wire[..], FrameCodec::new());
        let err = stream.next().await.unwrap().unwrap_err();
        assert!(matches!(
            err,
            FrameError::ShortRead {
                stage: ReadStage::Payload,
                expected: 8,
                received: 2,
            }
        ));
    }

    #[test]
    fn encoder_respects_limit() {
        let mut codec = FrameCodec::with_config(FrameConfig {
            max_payload_size: 2,
        });
        let mut dst = BytesMut::new();
        let err = codec.encode(&b"abc"[..], &mut dst).unwrap_err();
        assert!(matches!(err, FrameError::PayloadTooLarge { .. }));
    }
}
