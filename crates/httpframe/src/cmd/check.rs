use http::{HeaderMap, HeaderValue};
use httpframe::rpc::{check_error, Cause, MessageStream, ProtoError, ERROR_HEADER};
use serde::Serialize;

use crate::cmd::{open_input, CheckArgs};
use crate::exit::{frame_error, proto_exit_code, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_report, OutputFormat};

#[derive(Serialize)]
struct CheckReport {
    outcome: &'static str,
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    frames: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn run(args: CheckArgs, format: OutputFormat) -> CliResult<i32> {
    let mut headers = HeaderMap::new();
    if let Some(value) = &args.error_header {
        let value = HeaderValue::from_str(value)
            .map_err(|err| CliError::new(USAGE, format!("invalid --error-header: {err}")))?;
        headers.insert(ERROR_HEADER, value);
    }

    let mut body = open_input(args.file.as_deref())?;
    let status = args.status.as_u16();

    let (report, code) = match check_error(args.status, &headers, &mut body) {
        Ok(()) => {
            let mut frames = MessageStream::<_, Vec<u8>>::new(body);
            let mut count = 0u64;
            while frames
                .next_message()
                .map_err(|err| match err {
                    ProtoError::Opaque(Cause::ReadFrame { source }) => frame_error("decode body", source),
                    other => CliError::new(proto_exit_code(&other), format!("decode body: {other}")),
                })?
                .is_some()
            {
                count += 1;
            }
            let report = CheckReport {
                outcome: "ok",
                status,
                frames: Some(count),
                error: None,
            };
            (report, SUCCESS)
        }
        Err(err) => {
            let report = CheckReport {
                outcome: outcome_of(&err),
                status,
                frames: None,
                error: Some(err.to_string()),
            };
            (report, proto_exit_code(&err))
        }
    };

    let mut rows = vec![
        ("outcome", report.outcome.to_string()),
        ("status", report.status.to_string()),
    ];
    if let Some(frames) = report.frames {
        rows.push(("frames", frames.to_string()));
    }
    if let Some(error) = &report.error {
        rows.push(("error", error.clone()));
    }
    print_report(&report, &rows, format);

    Ok(code)
}

fn outcome_of(err: &ProtoError) -> &'static str {
    match err {
        ProtoError::Remote { .. } => "remote_error",
        ProtoError::Opaque(Cause::UnexpectedStatus { .. }) => "unexpected_status",
        ProtoError::Opaque(Cause::MalformedErrorBody { .. }) => "malformed_error_body",
        _ => "error",
    }
}
