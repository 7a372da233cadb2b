use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::message::Message;

/// Carries any serde type as a JSON-encoded message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Unwrap the inner value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Json<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T> From<T> for Json<T> {
    fn from(value: T) -> Self {
        Json(value)
    }
}

impl<T: Serialize + DeserializeOwned> Message for Json<T> {
    fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.0)?)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Json(serde_json::from_slice(bytes)?))
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::error::CodecError;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Tap {
        method: String,
        path: String,
        latency_ms: u32,
    }

    #[test]
    fn serde_struct_roundtrip() {
        let event = Json(Tap {
            method: "GET".to_string(),
            path: "/api/v1/pods".to_string(),
            latency_ms: 12,
        });

        let bytes = event.to_bytes().unwrap();
        assert_eq!(
            std::str::from_utf8(&bytes).unwrap(),
            r#"{"method":"GET","path":"/api/v1/pods","latency_ms":12}"#
        );

        let decoded = Json::<Tap>::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, event);
        assert_eq!(decoded.latency_ms, 12);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = Json::<Tap>::from_bytes(b"{not json").unwrap_err();
        assert!(matches!(err, CodecError::Json(_)));
    }

    #[test]
    fn missing_field_is_an_error() {
        let err = Json::<Tap>::from_bytes(br#"{"method":"GET"}"#).unwrap_err();
        assert!(err.to_string().contains("missing field"));
    }
}
