use crate::error::Result;

/// A value that can be serialized to and from a byte payload.
pub trait Message: Sized {
    /// Serialize into a fresh buffer.
    fn to_bytes(&self) -> Result<Vec<u8>>;

    /// Deserialize from exactly `bytes`.
    fn from_bytes(bytes: &[u8]) -> Result<Self>;
}

/// Raw payloads pass through untouched.
impl Message for Vec<u8> {
    fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.clone())
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bytes.to_vec())
    }
}
