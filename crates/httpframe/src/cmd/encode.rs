use std::io::{self, Read, Write};

use httpframe::message::Json;
use httpframe::rpc::{write_error, write_message, ProtoError, StreamingWriter};
use httpframe::transport::{status_line, WriterResponse};

use crate::cmd::{open_input, EncodeArgs};
use crate::exit::{io_error, proto_error, CliError, CliResult, DATA_INVALID, SUCCESS};

enum Payloads {
    Raw(Vec<Vec<u8>>),
    Json(serde_json::Value),
}

pub fn run(args: EncodeArgs) -> CliResult<i32> {
    let stdout = io::stdout();
    let mut rsp = WriterResponse::new(stdout.lock());

    if let Some(message) = &args.error {
        let err = match args.status {
            Some(status) => ProtoError::with_status(status, ProtoError::other(message.clone())),
            None => ProtoError::other(message.clone()),
        };
        write_error(&mut rsp, err);
    } else {
        match collect_payloads(&args)? {
            Payloads::Json(value) => write_one(&mut rsp, &Json(value), args.stream)?,
            Payloads::Raw(frames) if frames.len() == 1 && !args.stream => {
                write_message(&mut rsp, &frames[0]).map_err(|err| proto_error("encode", err))?;
            }
            Payloads::Raw(frames) => stream_all(&mut rsp, &frames)?,
        }
    }

    rsp.get_mut()
        .flush()
        .map_err(|err| io_error("flush stdout", err))?;
    if args.show_headers {
        print_head(&rsp);
    }
    Ok(SUCCESS)
}

fn collect_payloads(args: &EncodeArgs) -> CliResult<Payloads> {
    if !args.data.is_empty() {
        return Ok(Payloads::Raw(
            args.data.iter().map(|d| d.as_bytes().to_vec()).collect(),
        ));
    }

    if let Some(json) = &args.json {
        let value = serde_json::from_str(json)
            .map_err(|err| CliError::new(DATA_INVALID, format!("invalid --json payload: {err}")))?;
        return Ok(Payloads::Json(value));
    }

    let mut input = open_input(args.file.as_deref())?;
    let mut payload = Vec::new();
    input
        .read_to_end(&mut payload)
        .map_err(|err| io_error("read payload", err))?;
    Ok(Payloads::Raw(vec![payload]))
}

fn write_one<W: Write>(
    rsp: &mut WriterResponse<W>,
    msg: &Json<serde_json::Value>,
    stream: bool,
) -> CliResult<()> {
    let result = if stream {
        StreamingWriter::open(rsp).and_then(|mut writer| writer.send_and_flush(msg))
    } else {
        write_message(rsp, msg)
    };
    result.map_err(|err| proto_error("encode", err))
}

fn stream_all<W: Write>(rsp: &mut WriterResponse<W>, frames: &[Vec<u8>]) -> CliResult<()> {
    let mut writer = StreamingWriter::open(rsp).map_err(|err| proto_error("open stream", err))?;
    for frame in frames {
        writer
            .send_and_flush(frame)
            .map_err(|err| proto_error("encode", err))?;
    }
    tracing::debug!(frames = writer.frames_written(), "streamed payloads");
    Ok(())
}

fn print_head<W: Write>(rsp: &WriterResponse<W>) {
    eprintln!("HTTP/1.1 {}", status_line(rsp.status()));
    for (name, value) in rsp.headers() {
        eprintln!("{}: {}", name, String::from_utf8_lossy(value.as_bytes()));
    }
}
