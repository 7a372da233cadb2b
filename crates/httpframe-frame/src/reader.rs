use std::io::Read;

use bytes::Bytes;

use crate::codec::{decode_frame_with_limit, FrameConfig};
use crate::error::{FrameError, ReadStage, Result};

/// Reads consecutive frames from any `Read` stream.
///
/// Each call consumes exactly one frame and nothing beyond it, so the inner
/// stream can be handed back with [`FrameReader::into_inner`] at any frame
/// boundary.
pub struct FrameReader<T> {
    inner: T,
    config: FrameConfig,
    frames_read: u64,
}

impl<T: Read> FrameReader<T> {
    /// Create a new frame reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new frame reader with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            config,
            frames_read: 0,
        }
    }

    /// Read the next frame payload (blocking).
    ///
    /// A stream that ends before any byte of a new frame yields `Ok(None)`;
    /// ending anywhere inside a frame is a `ShortRead` error.
    pub fn next_frame(&mut self) -> Result<Option<Bytes>> {
        match decode_frame_with_limit(&mut self.inner, self.config.max_payload_size) {
            Ok(payload) => {
                self.frames_read += 1;
                tracing::debug!(
                    index = self.frames_read,
                    len = payload.len(),
                    "read frame"
                );
                Ok(Some(payload))
            }
            Err(FrameError::ShortRead {
                stage: ReadStage::Header,
                received: 0,
                ..
            }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Read the next frame, treating end of stream as an error.
    pub fn read_frame(&mut self) -> Result<Bytes> {
        decode_frame_with_limit(&mut self.inner, self.config.max_payload_size).inspect(|_| {
            self.frames_read += 1;
        })
    }

    /// Number of complete frames read so far.
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Update maximum payload size for subsequent frame decoding.
    pub fn set_max_payload_size(&mut self, max_payload_size: usize) {
        self.config.max_payload_size = max_payload_size;
    }

    /// Current frame reader configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

impl<T: Read> Iterator for FrameReader<T> {
    type Item = Result<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame().transpose()
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, ErrorKind};

    use bytes::{BufMut, BytesMut};

    use super::*;
    use crate::codec::encode_frame_into;

    fn wire_of(payloads: &[&[u8]]) -> Vec<u8> {
        let mut wire = BytesMut::new();
        for payload in payloads {
            encode_frame_into(payload, &mut wire).unwrap();
        }
        wire.to_vec()
    }

    #[test]
    fn read_single_frame() {
        let mut reader = FrameReader::new(Cursor::new(wire_of(&[b"hello"])));
        let frame = reader.read_frame().unwrap();

        assert_eq!(frame.as_ref(), b"hello");
        assert_eq!(reader.frames_read(), 1);
    }

    #[test]
    fn read_multiple_frames_in_order() {
        let wire = wire_of(&[b"one", b"two", b"three"]);
        let reader = FrameReader::new(Cursor::new(wire));

        let frames: Vec<Bytes> = reader.collect::<Result<_>>().unwrap();
        assert_eq!(
            frames,
            vec![
                Bytes::from_static(b"one"),
                Bytes::from_static(b"two"),
                Bytes::from_static(b"three"),
            ]
        );
    }

    #[test]
    fn clean_end_of_stream_is_none() {
        let mut reader = FrameReader::new(Cursor::new(wire_of(&[b"only"])));
        assert!(reader.next_frame().unwrap().is_some());
        assert!(reader.next_frame().unwrap().is_none());
    }

    #[test]
    fn read_frame_at_end_of_stream_is_short_read() {
        let mut reader = FrameReader::new(Cursor::new(Vec::<u8>::new()));
        let err = reader.read_frame().unwrap_err();
        assert!(err.is_short_read());
    }

    #[test]
    fn stream_closed_mid_frame() {
        let mut partial = BytesMut::new();
        partial.put_u32_le(16);
        partial.put_slice(b"only-part");

        let mut reader = FrameReader::new(Cursor::new(partial.to_vec()));
        let err = reader.next_frame().unwrap_err();
        assert!(matches!(
            err,
            FrameError::ShortRead {
                stage: ReadStage::Payload,
                expected: 16,
                received: 9,
            }
        ));
    }

    #[test]
    fn stream_closed_inside_prefix() {
        let mut wire = wire_of(&[b"a"]);
        wire.extend_from_slice(&[0x02, 0x00]);

        let mut reader = FrameReader::new(Cursor::new(wire));
        assert!(reader.next_frame().unwrap().is_some());
        let err = reader.next_frame().unwrap_err();
        assert!(matches!(
            err,
            FrameError::ShortRead {
                stage: ReadStage::Header,
                received: 2,
                ..
            }
        ));
    }

    #[test]
    fn oversized_frame_in_stream() {
        let mut wire = BytesMut::new();
        wire.put_u32_le(1024);

        let cfg = FrameConfig {
            max_payload_size: 16,
        };
        let mut reader = FrameReader::with_config(Cursor::new(wire.to_vec()), cfg);
        let err = reader.next_frame().unwrap_err();
        assert!(matches!(err, FrameError::PayloadTooLarge { .. }));
    }

    #[test]
    fn partial_read_handling() {
        let byte_reader = ByteByByteReader {
            bytes: wire_of(&[b"slow", b"drip"]),
            pos: 0,
        };
        let mut reader = FrameReader::new(byte_reader);

        assert_eq!(reader.read_frame().unwrap().as_ref(), b"slow");
        assert_eq!(reader.read_frame().unwrap().as_ref(), b"drip");
    }

    #[test]
    fn inner_stream_left_at_frame_boundary() {
        let mut wire = wire_of(&[b"framed"]);
        wire.extend_from_slice(b"trailing");

        let mut reader = FrameReader::new(Cursor::new(wire));
        reader.read_frame().unwrap();

        let cursor = reader.into_inner();
        let pos = cursor.position() as usize;
        assert_eq!(&cursor.get_ref()[pos..], b"trailing");
    }

    #[test]
    fn interrupted_read_retries() {
        let reader = InterruptedThenData {
            interrupted: false,
            bytes: wire_of(&[b"ok"]),
            pos: 0,
        };
        let mut framed = FrameReader::new(reader);
        assert_eq!(framed.read_frame().unwrap().as_ref(), b"ok");
    }

    #[test]
    fn io_error_propagates() {
        let mut framed = FrameReader::new(BrokenReader);
        let err = framed.read_frame().unwrap_err();
        assert!(matches!(err, FrameError::Io(e) if e.kind() == ErrorKind::ConnectionReset));
    }

    #[test]
    fn accessors_and_config() {
        let mut reader = FrameReader::new(Cursor::new(Vec::<u8>::new()));
        reader.set_max_payload_size(32);
        assert_eq!(reader.config().max_payload_size, 32);

        let _ = reader.get_ref();
        let _ = reader.get_mut();
        let _inner = reader.into_inner();
    }

    struct ByteByByteReader {
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for ByteByByteReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.bytes.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.bytes[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    struct InterruptedThenData {
        interrupted: bool,
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for InterruptedThenData {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            let remaining = self.bytes.len() - self.pos;
            let n = remaining.min(buf.len());
            buf[..n].copy_from_slice(&self.bytes[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    struct BrokenReader;

    impl Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(ErrorKind::ConnectionReset))
        }
    }
}
