use std::io;

use http::header::{CONNECTION, TRANSFER_ENCODING};
use http::{HeaderMap, HeaderValue, StatusCode};

use crate::error::{Result, SinkError};
use crate::traits::{FlushSink, ResponseSink};

/// A response sink that has been switched into chunked streaming mode.
///
/// Borrowed from the caller's sink for the lifetime of the response. Writes
/// go out in call order; flushing is left to the caller.
pub struct StreamingSink<'a> {
    inner: &'a mut dyn FlushSink,
}

/// Switch `sink` into streaming mode.
///
/// Fails with [`SinkError::StreamingUnsupported`] without touching any header
/// when the sink cannot flush. Otherwise sets `Connection: keep-alive` and
/// `Transfer-Encoding: chunked`.
pub fn open_streaming<S: ResponseSink + ?Sized>(sink: &mut S) -> Result<StreamingSink<'_>> {
    let inner = sink
        .as_flushable()
        .ok_or(SinkError::StreamingUnsupported)?;

    let headers = inner.headers_mut();
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
    tracing::debug!("response switched to chunked streaming");

    Ok(StreamingSink { inner })
}

impl StreamingSink<'_> {
    /// Flush everything written so far.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush_body().map_err(SinkError::Io)
    }
}

impl ResponseSink for StreamingSink<'_> {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        self.inner.headers_mut()
    }

    fn set_status(&mut self, status: StatusCode) {
        self.inner.set_status(status);
    }

    fn write_body(&mut self, buf: &[u8]) -> io::Result<()> {
        self.inner.write_body(buf)
    }

    fn as_flushable(&mut self) -> Option<&mut dyn FlushSink> {
        Some(self)
    }
}

impl FlushSink for StreamingSink<'_> {
    fn flush_body(&mut self) -> io::Result<()> {
        self.inner.flush_body()
    }
}
