use std::io;

use http::{HeaderMap, Response, StatusCode};

/// Where a handler writes its HTTP response.
///
/// Headers must be set before the first body write reaches the wire; sinks
/// that buffer may accept later header changes, but callers should not rely
/// on it.
pub trait ResponseSink {
    /// Mutable access to the response headers.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Set the response status.
    fn set_status(&mut self, status: StatusCode);

    /// Append bytes to the response body.
    fn write_body(&mut self, buf: &[u8]) -> io::Result<()>;

    /// View this sink as a [`FlushSink`], if it has that capability.
    fn as_flushable(&mut self) -> Option<&mut dyn FlushSink> {
        None
    }
}

/// A response sink that can push buffered body bytes to the transport on
/// demand. Required for chunked streaming.
pub trait FlushSink: ResponseSink {
    /// Force everything written so far out to the transport.
    fn flush_body(&mut self) -> io::Result<()>;
}

/// Buffered, single-shot responses. Not flushable.
impl ResponseSink for Response<Vec<u8>> {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        Response::headers_mut(self)
    }

    fn set_status(&mut self, status: StatusCode) {
        *self.status_mut() = status;
    }

    fn write_body(&mut self, buf: &[u8]) -> io::Result<()> {
        self.body_mut().extend_from_slice(buf);
        Ok(())
    }
}

impl<S: ResponseSink + ?Sized> ResponseSink for &mut S {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        (**self).headers_mut()
    }

    fn set_status(&mut self, status: StatusCode) {
        (**self).set_status(status);
    }

    fn write_body(&mut self, buf: &[u8]) -> io::Result<()> {
        (**self).write_body(buf)
    }

    fn as_flushable(&mut self) -> Option<&mut dyn FlushSink> {
        (**self).as_flushable()
    }
}
