use std::io;

use bytes::{Bytes, BytesMut};
use http::{HeaderMap, Response, StatusCode};

use crate::traits::{FlushSink, ResponseSink};

/// In-memory response that supports flushing.
///
/// Records how often and how much was flushed, which makes it the sink of
/// choice for handler tests and for bridging into servers that want the
/// whole body at once.
#[derive(Debug, Default)]
pub struct BufferedResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: BytesMut,
    flushes: usize,
    flushed_len: usize,
}

impl BufferedResponse {
    /// Create an empty `200 OK` response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Current headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Body bytes written so far.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Number of flushes requested.
    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    /// Body length at the most recent flush.
    pub fn flushed_len(&self) -> usize {
        self.flushed_len
    }

    /// Convert into an [`http::Response`] carrying the body.
    pub fn into_response(self) -> Response<Bytes> {
        let mut rsp = Response::new(self.body.freeze());
        *rsp.status_mut() = self.status;
        *rsp.headers_mut() = self.headers;
        rsp
    }
}

impl ResponseSink for BufferedResponse {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    fn write_body(&mut self, buf: &[u8]) -> io::Result<()> {
        self.body.extend_from_slice(buf);
        Ok(())
    }

    fn as_flushable(&mut self) -> Option<&mut dyn FlushSink> {
        Some(self)
    }
}

impl FlushSink for BufferedResponse {
    fn flush_body(&mut self) -> io::Result<()> {
        self.flushes += 1;
        self.flushed_len = self.body.len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use http::header::CONTENT_TYPE;
    use http::HeaderValue;

    use super::*;

    #[test]
    fn defaults_to_ok() {
        let rsp = BufferedResponse::new();
        assert_eq!(rsp.status(), StatusCode::OK);
        assert!(rsp.body().is_empty());
    }

    #[test]
    fn tracks_flushes() {
        let mut rsp = BufferedResponse::new();
        rsp.write_body(b"abc").unwrap();
        rsp.flush_body().unwrap();
        rsp.write_body(b"de").unwrap();

        assert_eq!(rsp.flush_count(), 1);
        assert_eq!(rsp.flushed_len(), 3);
        assert_eq!(rsp.body(), b"abcde");
    }

    #[test]
    fn converts_into_http_response() {
        let mut rsp = BufferedResponse::new();
        rsp.set_status(StatusCode::NOT_FOUND);
        rsp.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/octet-stream"));
        rsp.write_body(b"body").unwrap();

        let rsp = rsp.into_response();
        assert_eq!(rsp.status(), StatusCode::NOT_FOUND);
        assert_eq!(rsp.headers()[CONTENT_TYPE], "application/octet-stream");
        assert_eq!(rsp.body().as_ref(), b"body");
    }
}
