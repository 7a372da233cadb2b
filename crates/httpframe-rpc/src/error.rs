use httpframe_frame::FrameError;
use httpframe_message::CodecError;
use httpframe_transport::SinkError;
use http::StatusCode;

/// Boxed error for causes that come from outside this workspace.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Every error produced by request parsing, response writing, streaming and
/// the error channel.
///
/// The three variants are the whole taxonomy the error channel dispatches on:
/// an error with an HTTP status attached, an error decoded from a peer's
/// error body, and everything else.
#[derive(Debug, thiserror::Error)]
pub enum ProtoError {
    /// An error paired with the HTTP status to report for it.
    #[error("http error, status code [{}], wrapped error is: {source}", .status.as_u16())]
    Http {
        status: StatusCode,
        #[source]
        source: Box<ProtoError>,
    },

    /// A structured error sent by the peer. Displays as the peer's message.
    #[error("{message}")]
    Remote { message: String },

    /// Any other failure.
    #[error(transparent)]
    Opaque(#[from] Cause),
}

/// What went wrong underneath a [`ProtoError::Opaque`].
#[derive(Debug, thiserror::Error)]
pub enum Cause {
    /// Frame encoding or decoding failed, including short reads.
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// Message serialization or deserialization failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A response body ended or failed before one whole frame was read.
    #[error("error reading byte stream header: {source}")]
    ReadFrame {
        #[source]
        source: FrameError,
    },

    /// A received frame's payload could not be deserialized.
    #[error("error unmarshalling array of [{len}] bytes: {source}")]
    Unmarshal {
        len: usize,
        #[source]
        source: CodecError,
    },

    /// The response sink failed or cannot stream.
    #[error(transparent)]
    Sink(#[from] SinkError),

    /// Reading a body or writing a response failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The request body exceeded the configured limit.
    #[error("request body exceeds {max} bytes")]
    BodyTooLarge { max: usize },

    /// A response without the error header and with a non-success status.
    #[error("unexpected API response: {status_line}")]
    UnexpectedStatus {
        status: StatusCode,
        status_line: String,
    },

    /// A response carried the error header but its body could not be decoded.
    #[error(
        "response has linkerd-error header [{header}], but response body didn't contain a structured error: {source}"
    )]
    MalformedErrorBody {
        header: String,
        #[source]
        source: Box<ProtoError>,
    },

    /// Errors raised by application code.
    #[error(transparent)]
    Other(BoxError),
}

impl ProtoError {
    /// Attach an HTTP status to `err`.
    pub fn with_status(status: StatusCode, err: impl Into<ProtoError>) -> Self {
        ProtoError::Http {
            status,
            source: Box::new(err.into()),
        }
    }

    /// Shorthand for a `400 Bad Request` error.
    pub fn bad_request(err: impl Into<ProtoError>) -> Self {
        Self::with_status(crate::protocol::BAD_REQUEST_STATUS, err)
    }

    /// Wrap an application error.
    pub fn other(err: impl Into<BoxError>) -> Self {
        ProtoError::Opaque(Cause::Other(err.into()))
    }

    /// An error as decoded from a peer's error body.
    pub fn remote(message: impl Into<String>) -> Self {
        ProtoError::Remote {
            message: message.into(),
        }
    }

    /// The attached HTTP status, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ProtoError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The peer's message, if this error came from an error body.
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            ProtoError::Remote { message } => Some(message),
            _ => None,
        }
    }

    /// The underlying cause, looking through any attached status.
    pub fn cause(&self) -> Option<&Cause> {
        match self {
            ProtoError::Http { source, .. } => source.cause(),
            ProtoError::Remote { .. } => None,
            ProtoError::Opaque(cause) => Some(cause),
        }
    }

    /// True when a frame ended before its declared length.
    pub fn is_short_read(&self) -> bool {
        match self.cause() {
            Some(Cause::Frame(err)) | Some(Cause::ReadFrame { source: err }) => {
                err.is_short_read()
            }
            _ => false,
        }
    }

    /// True when a streaming response was requested on a sink that cannot flush.
    pub fn is_streaming_unsupported(&self) -> bool {
        matches!(
            self.cause(),
            Some(Cause::Sink(SinkError::StreamingUnsupported))
        )
    }
}

impl From<FrameError> for ProtoError {
    fn from(err: FrameError) -> Self {
        ProtoError::Opaque(Cause::Frame(err))
    }
}

impl From<CodecError> for ProtoError {
    fn from(err: CodecError) -> Self {
        ProtoError::Opaque(Cause::Codec(err))
    }
}

impl From<SinkError> for ProtoError {
    fn from(err: SinkError) -> Self {
        ProtoError::Opaque(Cause::Sink(err))
    }
}

impl From<std::io::Error> for ProtoError {
    fn from(err: std::io::Error) -> Self {
        ProtoError::Opaque(Cause::Io(err))
    }
}

pub type Result<T> = std::result::Result<T, ProtoError>;

#[cfg(test)]
mod tests {
    use httpframe_frame::ReadStage;

    use super::*;

    #[test]
    fn http_error_display_names_code_and_cause() {
        let err = ProtoError::bad_request(ProtoError::other("bad field"));
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            err.to_string(),
            "http error, status code [400], wrapped error is: bad field"
        );
    }

    #[test]
    fn remote_displays_message_verbatim() {
        let err = ProtoError::remote("pod not found");
        assert_eq!(err.to_string(), "pod not found");
        assert_eq!(err.remote_message(), Some("pod not found"));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn other_is_transparent() {
        assert_eq!(ProtoError::other("boom").to_string(), "boom");
    }

    #[test]
    fn predicates_look_through_status() {
        let short = FrameError::ShortRead {
            stage: ReadStage::Payload,
            expected: 10,
            received: 3,
        };
        let err = ProtoError::with_status(StatusCode::BAD_GATEWAY, short);
        assert!(err.is_short_read());
        assert!(!err.is_streaming_unsupported());

        let err: ProtoError = SinkError::StreamingUnsupported.into();
        assert!(err.is_streaming_unsupported());
        assert_eq!(err.to_string(), "streaming not supported by this writer");
    }

    #[test]
    fn read_context_keeps_short_read_visible() {
        let err = ProtoError::from(Cause::ReadFrame {
            source: FrameError::ShortRead {
                stage: ReadStage::Header,
                expected: 4,
                received: 1,
            },
        });
        assert!(err.is_short_read());
        assert!(err
            .to_string()
            .starts_with("error reading byte stream header: short read"));
    }

    #[test]
    fn source_chain_is_exposed() {
        use std::error::Error;

        let err = ProtoError::bad_request(ProtoError::other("inner"));
        let source = err.source().expect("http error has a source");
        assert_eq!(source.to_string(), "inner");
    }
}
