//! Decode command
//!
//! Usage: uplink-cli decode <HEX>
//!
//! Reads a hex-encoded MessagePack mapping, validates it as a record and
//! prints the record's canonical mapping as JSON.

use clap::Args;
use uplink_meta::codec::from_msgpack;
use uplink_meta::{log_op_end, log_op_error, log_op_start, unmarshal};

use super::decode_hex;

#[derive(Debug, Args)]
pub struct DecodeArgs {
    /// MessagePack bytes as hex
    pub hex: String,
}

pub fn execute(args: DecodeArgs) -> Result<(), Box<dyn std::error::Error>> {
    log_op_start!("cli_decode");
    let start = std::time::Instant::now();

    let result = (|| -> uplink_meta::Result<String> {
        let bytes = decode_hex("hex", &args.hex)?;
        let record = unmarshal(&from_msgpack(&bytes)?)?;
        tracing::debug!(uid = %record.uid(), "decoded record");
        Ok(record.marshal()?.to_string())
    })();

    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok(_) => log_op_end!("cli_decode", duration_ms = elapsed),
        Err(e) => log_op_error!("cli_decode", e.clone(), duration_ms = elapsed),
    }

    println!("{}", result?);
    Ok(())
}
