use crate::error::Result;
use crate::message::Message;

/// Carries any prost message in protobuf wire encoding.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Proto<T>(pub T);

impl<T> Proto<T> {
    /// Unwrap the inner message.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: prost::Message + Default> Message for Proto<T> {
    fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.0.encode_to_vec())
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Proto(T::decode(bytes)?))
    }
}
