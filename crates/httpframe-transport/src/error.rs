/// Errors that can occur on a response sink.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The sink cannot flush, so it cannot carry a chunked stream.
    #[error("streaming not supported by this writer")]
    StreamingUnsupported,

    /// An I/O error occurred while writing the response body.
    #[error("response I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SinkError>;
