use std::io::{self, Write};

use http::{HeaderMap, StatusCode};

use crate::traits::{FlushSink, ResponseSink};

/// Response sink that streams the body into any `Write`.
///
/// Status and headers are kept alongside for the surrounding server to emit;
/// only body bytes go to the writer. Flushing flushes the writer.
#[derive(Debug)]
pub struct WriterResponse<W> {
    status: StatusCode,
    headers: HeaderMap,
    inner: W,
}

impl<W: Write> WriterResponse<W> {
    /// Wrap `inner` as a `200 OK` response body.
    pub fn new(inner: W) -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            inner,
        }
    }

    /// Current status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Current headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Borrow the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Mutably borrow the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ResponseSink for WriterResponse<W> {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    fn write_body(&mut self, buf: &[u8]) -> io::Result<()> {
        self.inner.write_all(buf)
    }

    fn as_flushable(&mut self) -> Option<&mut dyn FlushSink> {
        Some(self)
    }
}

impl<W: Write> FlushSink for WriterResponse<W> {
    fn flush_body(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
