//! Script expansion command
//!
//! Usage: uplink-cli script <FILE> [--format json|msgpack]
//!
//! Prints one record per line in script order.

use clap::Args;
use std::path::PathBuf;
use uplink_meta::script::{expand_script_with, parse_script_text};
use uplink_meta::time::SystemClock;
use uplink_meta::{log_op_end, log_op_error, log_op_start, Settings};

use super::{render, FormatArg};

#[derive(Debug, Args)]
pub struct ScriptArgs {
    /// CL script: one `APID PAYLOAD` pair per line
    pub file: PathBuf,

    /// Output encoding (default from settings)
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,
}

pub fn execute(args: ScriptArgs, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    log_op_start!("cli_script", file = %args.file.display());
    let start = std::time::Instant::now();

    let format = args.format.map_or(settings.wire.format, Into::into);
    let result = (|| -> uplink_meta::Result<Vec<String>> {
        let text = std::fs::read_to_string(&args.file)?;
        let entries = parse_script_text(&text)?;
        let records = expand_script_with(entries, &settings.defaults, &SystemClock)?;
        records
            .iter()
            .map(|record| render(&record.marshal()?, format))
            .collect()
    })();

    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok(lines) => log_op_end!("cli_script", duration_ms = elapsed, records = lines.len()),
        Err(e) => log_op_error!("cli_script", e.clone(), duration_ms = elapsed),
    }

    for line in result? {
        println!("{}", line);
    }
    Ok(())
}
