use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::message::Message;

/// Body of an error response: a single human-readable message.
///
/// Encoded as JSON, `{"error":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StructuredError {
    #[serde(default)]
    pub error: String,
}

impl StructuredError {
    /// Create an error payload carrying `error`.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl Message for StructuredError {
    fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
