//! Message serialization capability.
//!
//! The framing layer never looks inside a message; it only needs to turn one
//! into bytes and back. [`Message`] is that capability. Serde types plug in
//! through [`Json`], prost types through `Proto` (behind the `prost`
//! feature), and raw payloads through `Vec<u8>`.
//!
//! The one shape the protocol reserves for itself is [`StructuredError`].

pub mod error;
pub mod json;
pub mod message;
#[cfg(feature = "prost")]
pub mod proto;
pub mod structured;

pub use error::{CodecError, Result};
pub use json::Json;
pub use message::Message;
#[cfg(feature = "prost")]
pub use proto::Proto;
pub use structured::StructuredError;
