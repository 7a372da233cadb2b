use std::fmt;
use std::io;

use httpframe::frame::FrameError;
use httpframe::rpc::{Cause, ProtoError};

// Exit code constants aligned with rsfulmen/DDR-0002 semantics.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        io::ErrorKind::NotFound => USAGE,
        io::ErrorKind::BrokenPipe | io::ErrorKind::ConnectionReset => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::Io(source) => io_error(context, source),
        FrameError::ShortRead { .. } | FrameError::PayloadTooLarge { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        FrameError::ConnectionClosed => CliError::new(FAILURE, format!("{context}: {err}")),
    }
}

/// Exit code for an error reported by the read side of the error channel.
pub fn proto_exit_code(err: &ProtoError) -> i32 {
    match err {
        ProtoError::Http { source, .. } => proto_exit_code(source),
        ProtoError::Remote { .. } => FAILURE,
        ProtoError::Opaque(cause) => match cause {
            Cause::UnexpectedStatus { .. } => TRANSPORT_ERROR,
            Cause::ReadFrame {
                source: FrameError::Io(_),
            } => FAILURE,
            Cause::Frame(_)
            | Cause::ReadFrame { .. }
            | Cause::Codec(_)
            | Cause::Unmarshal { .. }
            | Cause::MalformedErrorBody { .. } => DATA_INVALID,
            Cause::BodyTooLarge { .. } => DATA_INVALID,
            Cause::Sink(_) | Cause::Io(_) => FAILURE,
            _ => INTERNAL,
        },
    }
}

pub fn proto_error(context: &str, err: ProtoError) -> CliError {
    match err {
        ProtoError::Opaque(Cause::Io(source)) => io_error(context, source),
        ProtoError::Opaque(Cause::Frame(source)) => frame_error(context, source),
        other => CliError::new(proto_exit_code(&other), format!("{context}: {other}")),
    }
}
