use std::fs;

use aqnode_codec::{decode_uplink, raw_fields};

use crate::cmd::DecodeArgs;
use crate::exit::{codec_error, io_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_raw_fields, print_reading, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let payload = resolve_payload(&args)?;

    if args.raw_fields {
        let fields = raw_fields(&payload).map_err(|err| codec_error("decode failed", err))?;
        print_raw_fields(&fields, format);
        return Ok(SUCCESS);
    }

    let reading =
        decode_uplink(args.fport, &payload).map_err(|err| codec_error("decode failed", err))?;
    print_reading(&reading, format);

    Ok(SUCCESS)
}

fn resolve_payload(args: &DecodeArgs) -> CliResult<Vec<u8>> {
    if let Some(hex_input) = &args.hex {
        let compact: String = hex_input.split_whitespace().collect();
        return hex::decode(&compact)
            .map_err(|err| CliError::new(USAGE, format!("--hex is not valid hex: {err}")));
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    Err(CliError::new(USAGE, "a payload is required (--hex or --file)"))
}
