use httpframe::frame::{FrameConfig, FrameReader};

use crate::cmd::{open_input, DecodeArgs};
use crate::exit::{frame_error, CliResult, SUCCESS};
use crate::output::{print_frame, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let input = open_input(args.file.as_deref())?;
    let config = FrameConfig {
        max_payload_size: args.max_payload,
    };
    let mut reader = FrameReader::with_config(input, config);

    while args.count.is_none_or(|limit| (reader.frames_read() as usize) < limit) {
        let Some(payload) = reader
            .next_frame()
            .map_err(|err| frame_error("decode", err))?
        else {
            break;
        };
        print_frame(reader.frames_read(), &payload, format);
    }

    tracing::debug!(frames = reader.frames_read(), "decode finished");
    Ok(SUCCESS)
}
