use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use http::StatusCode;
use httpframe::frame::DEFAULT_MAX_PAYLOAD;

use crate::exit::{io_error, CliResult};
use crate::output::OutputFormat;

pub mod check;
pub mod decode;
pub mod encode;
pub mod envinfo;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Frame payloads (or an error report) onto stdout.
    Encode(EncodeArgs),
    /// Read consecutive frames and print them.
    Decode(DecodeArgs),
    /// Run the client-side error check against a captured response.
    Check(CheckArgs),
    /// Show version information.
    Version(VersionArgs),
    /// Print build and environment diagnostics.
    Envinfo(EnvinfoArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args),
        Command::Decode(args) => decode::run(args, format),
        Command::Check(args) => check::run(args, format),
        Command::Version(args) => version::run(args),
        Command::Envinfo(args) => envinfo::run(args, format),
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Raw string payload; repeat to stream several frames.
    #[arg(long, conflicts_with_all = ["json", "file", "error"])]
    pub data: Vec<String>,
    /// JSON payload, re-serialized compactly.
    #[arg(long, conflicts_with_all = ["data", "file", "error"])]
    pub json: Option<String>,
    /// Read payload from file.
    #[arg(long, conflicts_with_all = ["data", "json", "error"])]
    pub file: Option<PathBuf>,
    /// Write a structured error report with this message instead of a payload.
    #[arg(long, value_name = "MESSAGE")]
    pub error: Option<String>,
    /// HTTP status to attach to --error.
    #[arg(long, requires = "error", value_parser = parse_status)]
    pub status: Option<StatusCode>,
    /// Use the streaming writer, flushing after every frame.
    #[arg(long)]
    pub stream: bool,
    /// Print the response status and headers to stderr.
    #[arg(long)]
    pub show_headers: bool,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Read frames from file instead of stdin.
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Exit after reading N frames.
    #[arg(long)]
    pub count: Option<usize>,
    /// Reject frames declaring more payload bytes than this.
    #[arg(long, env = "HTTPFRAME_MAX_PAYLOAD", default_value_t = DEFAULT_MAX_PAYLOAD)]
    pub max_payload: usize,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Response status code.
    #[arg(long, default_value = "200", value_parser = parse_status)]
    pub status: StatusCode,
    /// Value of the linkerd-error response header, if present.
    #[arg(long, value_name = "VALUE")]
    pub error_header: Option<String>,
    /// Read the response body from file instead of stdin.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

#[derive(Args, Debug, Default)]
pub struct EnvinfoArgs {}

fn parse_status(raw: &str) -> Result<StatusCode, String> {
    let code: u16 = raw
        .parse()
        .map_err(|_| format!("invalid status code: {raw}"))?;
    StatusCode::from_u16(code).map_err(|err| format!("invalid status code {code}: {err}"))
}

/// Open `path`, or stdin when no path is given.
pub fn open_input(path: Option<&Path>) -> CliResult<Box<dyn Read>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .map_err(|err| io_error(&format!("open {}", path.display()), err))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}
