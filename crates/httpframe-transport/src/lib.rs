//! HTTP response sink abstraction.
//!
//! The HTTP server itself stays outside this workspace. Handlers hand us
//! something that implements [`ResponseSink`]; streaming handlers need the
//! stronger [`FlushSink`] capability, which is checked structurally through
//! [`ResponseSink::as_flushable`] by [`open_streaming`].

pub mod buffered;
pub mod error;
pub mod status;
pub mod streaming;
pub mod traits;
pub mod writer;

pub use buffered::BufferedResponse;
pub use error::{Result, SinkError};
pub use status::{status_line, status_text};
pub use streaming::{open_streaming, StreamingSink};
pub use traits::{FlushSink, ResponseSink};
pub use writer::WriterResponse;
