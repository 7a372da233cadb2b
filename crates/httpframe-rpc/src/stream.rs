use std::io::Read;
use std::marker::PhantomData;

use httpframe_frame::{FrameConfig, FrameReader};
use httpframe_message::Message;
use httpframe_transport::{open_streaming, ResponseSink, StreamingSink};

use crate::error::{Cause, Result};
use crate::error_channel::check_response_for_error;
use crate::response::{unmarshal, write_message};

/// Writes a sequence of framed messages over one chunked response.
///
/// Frames reach the sink in call order. Nothing is flushed automatically:
/// use [`StreamingWriter::flush`] or [`StreamingWriter::send_and_flush`]
/// when latency matters.
pub struct StreamingWriter<'a> {
    sink: StreamingSink<'a>,
    frames_written: u64,
}

impl<'a> StreamingWriter<'a> {
    /// Switch `sink` into streaming mode.
    ///
    /// Fails with a streaming-unsupported error, leaving headers untouched,
    /// when the sink cannot flush.
    pub fn open<S: ResponseSink + ?Sized>(sink: &'a mut S) -> Result<Self> {
        let sink = open_streaming(sink)?;
        Ok(Self {
            sink,
            frames_written: 0,
        })
    }

    /// Write one framed message.
    pub fn send<M: Message>(&mut self, msg: &M) -> Result<()> {
        write_message(&mut self.sink, msg)?;
        self.frames_written += 1;
        tracing::trace!(frame = self.frames_written, "streamed message");
        Ok(())
    }

    /// Push everything written so far to the transport.
    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }

    /// Write one framed message and flush it.
    pub fn send_and_flush<M: Message>(&mut self, msg: &M) -> Result<()> {
        self.send(msg)?;
        self.flush()
    }

    /// Number of messages written so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// The underlying streaming sink.
    pub fn sink_mut(&mut self) -> &mut StreamingSink<'a> {
        &mut self.sink
    }
}

/// Reads consecutive framed messages from a response body, in order.
pub struct MessageStream<R, M> {
    frames: FrameReader<R>,
    _message: PhantomData<fn() -> M>,
}

impl<R: Read, M: Message> MessageStream<R, M> {
    /// Decode messages from a body already known not to be an error response.
    pub fn new(body: R) -> Self {
        Self::with_config(body, FrameConfig::default())
    }

    /// Like [`MessageStream::new`] with explicit frame limits.
    pub fn with_config(body: R, config: FrameConfig) -> Self {
        Self {
            frames: FrameReader::with_config(body, config),
            _message: PhantomData,
        }
    }

    /// Check `rsp` for an in-band or status error, then stream its body.
    pub fn from_response(rsp: http::Response<R>) -> Result<Self> {
        let rsp = check_response_for_error(rsp)?;
        Ok(Self::new(rsp.into_body()))
    }

    /// Read the next message; `Ok(None)` once the body ends on a frame boundary.
    pub fn next_message(&mut self) -> Result<Option<M>> {
        match self
            .frames
            .next_frame()
            .map_err(|source| Cause::ReadFrame { source })?
        {
            Some(payload) => unmarshal(&payload).map(Some),
            None => Ok(None),
        }
    }

    /// Consume the stream and return the body reader.
    pub fn into_inner(self) -> R {
        self.frames.into_inner()
    }
}

impl<R: Read, M: Message> Iterator for MessageStream<R, M> {
    type Item = Result<M>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_message().transpose()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use bytes::Buf;
    use http::header::{CONNECTION, CONTENT_TYPE, TRANSFER_ENCODING};
    use http::{HeaderValue, Response, StatusCode};
    use httpframe_frame::decode_frame;
    use httpframe_message::Json;
    use httpframe_transport::BufferedResponse;
    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::error::ProtoError;
    use crate::protocol::ERROR_HEADER;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TapEvent {
        seq: u32,
        path: String,
    }

    fn event(seq: u32, path: &str) -> Json<TapEvent> {
        Json(TapEvent {
            seq,
            path: path.to_string(),
        })
    }

    #[test]
    fn three_messages_decode_in_order() {
        let mut rsp = BufferedResponse::new();
        let events = vec![event(1, "/a"), event(2, "/b"), event(3, "/c")];
        {
            let mut writer = StreamingWriter::open(&mut rsp).unwrap();
            for ev in &events {
                writer.send(ev).unwrap();
            }
            assert_eq!(writer.frames_written(), 3);
        }

        assert_eq!(rsp.headers()[CONNECTION], "keep-alive");
        assert_eq!(rsp.headers()[TRANSFER_ENCODING], "chunked");
        assert_eq!(rsp.headers()[CONTENT_TYPE], "application/octet-stream");

        let mut body = Cursor::new(rsp.body().to_vec());
        for expected in &events {
            let payload = decode_frame(&mut body).unwrap();
            let decoded: TapEvent = serde_json::from_slice(&payload).unwrap();
            assert_eq!(&decoded, &expected.0);
        }
        assert_eq!(body.position() as usize, body.get_ref().len());
    }

    #[test]
    fn flushing_is_left_to_the_caller() {
        let mut rsp = BufferedResponse::new();
        {
            let mut writer = StreamingWriter::open(&mut rsp).unwrap();
            writer.send(&event(1, "/a")).unwrap();
            writer.send(&event(2, "/b")).unwrap();
            writer.flush().unwrap();
            writer.send_and_flush(&event(3, "/c")).unwrap();
        }

        assert_eq!(rsp.flush_count(), 2);
        assert_eq!(rsp.flushed_len(), rsp.body().len());
    }

    #[test]
    fn rejects_sink_without_flush_and_leaves_headers() {
        let mut rsp = Response::new(Vec::<u8>::new());
        rsp.headers_mut()
            .insert("x-request-id", HeaderValue::from_static("abc"));
        let before = rsp.headers().clone();

        let err = StreamingWriter::open(&mut rsp).err().unwrap();

        assert!(err.is_streaming_unsupported());
        assert_eq!(rsp.headers(), &before);
    }

    #[test]
    fn message_stream_reads_until_end() {
        let mut rsp = BufferedResponse::new();
        {
            let mut writer = StreamingWriter::open(&mut rsp).unwrap();
            writer.send(&event(10, "/x")).unwrap();
            writer.send(&event(11, "/y")).unwrap();
        }

        let stream =
            MessageStream::<_, Json<TapEvent>>::from_response(rsp.into_response().map(Buf::reader))
                .unwrap();
        let received: Vec<u32> = stream.map(|ev| ev.unwrap().seq).collect();
        assert_eq!(received, vec![10, 11]);
    }

    #[test]
    fn message_stream_surfaces_error_response() {
        let mut rsp = BufferedResponse::new();
        crate::error_channel::write_error(&mut rsp, ProtoError::other("tap denied"));

        let err = MessageStream::<_, Json<TapEvent>>::from_response(
            rsp.into_response().map(Buf::reader),
        )
        .err()
        .unwrap();
        assert_eq!(err.to_string(), "tap denied");
    }

    #[test]
    fn message_stream_reports_truncated_frame() {
        let mut wire = httpframe_frame::encode_frame(br#"{"seq":1,"path":"/a"}"#)
            .unwrap()
            .to_vec();
        wire.truncate(wire.len() - 3);

        let mut stream = MessageStream::<_, Json<TapEvent>>::new(Cursor::new(wire));
        let err = stream.next_message().unwrap_err();
        assert!(err.is_short_read());
    }

    #[test]
    fn message_stream_names_size_of_undecodable_frame() {
        let wire = httpframe_frame::encode_frame(b"not json").unwrap().to_vec();

        let mut stream = MessageStream::<_, Json<TapEvent>>::new(Cursor::new(wire));
        let err = stream.next_message().unwrap_err();
        assert!(err.to_string().contains("array of [8] bytes"));
    }

    #[test]
    fn status_error_without_header_is_reported() {
        let mut rsp = Response::new(Cursor::new(Vec::<u8>::new()));
        *rsp.status_mut() = StatusCode::SERVICE_UNAVAILABLE;
        assert!(rsp.headers().get(ERROR_HEADER).is_none());

        let err = MessageStream::<_, Json<TapEvent>>::from_response(rsp)
            .err()
            .unwrap();
        assert!(err.to_string().contains("503 Service Unavailable"));
    }

    #[cfg(unix)]
    #[test]
    fn streams_across_a_socket() {
        use httpframe_transport::WriterResponse;

        let (left, right) = std::os::unix::net::UnixStream::pair().unwrap();

        let server = std::thread::spawn(move || {
            let mut rsp = WriterResponse::new(left);
            let mut writer = StreamingWriter::open(&mut rsp).unwrap();
            for seq in 0..16u32 {
                writer
                    .send_and_flush(&event(seq, &format!("/req/{seq}")))
                    .unwrap();
            }
        });

        let stream = MessageStream::<_, Json<TapEvent>>::new(right);
        let seqs: Vec<u32> = stream.map(|ev| ev.unwrap().seq).collect();

        server.join().unwrap();
        assert_eq!(seqs, (0..16).collect::<Vec<_>>());
    }
}
