//! New record command
//!
//! Usage: uplink-cli new --payload <TEXT> --apid <N|0xN> [--bytes <HEX>] [--format json|msgpack]

use clap::Args;
use uplink_meta::{log_op_end, log_op_error, log_op_start, CommandMetadata, Settings};

use super::{decode_hex, parse_apid_arg, render, FormatArg};

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Human-readable command text
    #[arg(long)]
    pub payload: String,

    /// Command opcode, decimal or 0x hex
    #[arg(long, value_parser = parse_apid_arg)]
    pub apid: u32,

    /// Encoded command bytes as hex
    #[arg(long)]
    pub bytes: Option<String>,

    /// Virtual channel (default from settings)
    #[arg(long)]
    pub vcid: Option<u8>,

    #[arg(long, default_value_t = 1)]
    pub sequence: u32,

    #[arg(long, default_value_t = 1)]
    pub total: u32,

    /// Output encoding (default from settings)
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,
}

pub fn execute(args: NewArgs, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    log_op_start!("cli_new", apid = args.apid);
    let start = std::time::Instant::now();

    let format = args.format.map_or(settings.wire.format, Into::into);
    let result = (|| -> uplink_meta::Result<(CommandMetadata, String)> {
        let mut builder = CommandMetadata::builder()
            .with_defaults(&settings.defaults)
            .payload_string(args.payload)
            .apid(args.apid)
            .sequence(args.sequence)
            .total(args.total);
        if let Some(vcid) = args.vcid {
            builder = builder.vcid(vcid);
        }
        if let Some(text) = args.bytes.as_deref() {
            builder = builder.payload_bytes(decode_hex("payload_bytes", text)?);
        }
        let record = builder.build()?;
        let rendered = render(&record.marshal()?, format)?;
        Ok((record, rendered))
    })();

    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok((record, _)) => log_op_end!("cli_new", duration_ms = elapsed, record = record),
        Err(e) => log_op_error!("cli_new", e.clone(), duration_ms = elapsed),
    }

    let (_, rendered) = result?;
    println!("{}", rendered);
    Ok(())
}
