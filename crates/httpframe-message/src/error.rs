/// Errors that can occur while converting messages to and from bytes.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// JSON encoding or decoding failed.
    #[error("json codec error: {0}")]
    Json(#[from] serde_json::Error),

    /// Protobuf decoding failed.
    #[cfg(feature = "prost")]
    #[error("protobuf decode error: {0}")]
    Protobuf(#[from] prost::DecodeError),
}

pub type Result<T> = std::result::Result<T, CodecError>;
