use std::fmt;

/// Which part of a frame was being read when the stream ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStage {
    /// The 4-byte length prefix.
    Header,
    /// The payload announced by the prefix.
    Payload,
}

impl fmt::Display for ReadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadStage::Header => f.write_str("message length"),
            ReadStage::Payload => f.write_str("message payload"),
        }
    }
}

/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The stream ended before the frame was complete.
    #[error("short read while reading {stage}: expected {expected} bytes, got {received}")]
    ShortRead {
        stage: ReadStage,
        expected: usize,
        received: usize,
    },

    /// The payload exceeds the configured maximum size.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sink accepted zero bytes mid-frame.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

impl FrameError {
    /// True for either flavour of truncated frame.
    pub fn is_short_read(&self) -> bool {
        matches!(self, FrameError::ShortRead { .. })
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
