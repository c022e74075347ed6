//! Current GPS time command

use clap::Args;
use uplink_meta::time::{now_gps, now_gps_timestamp};
use uplink_meta::{log_op_end, log_op_start};

#[derive(Debug, Args)]
pub struct NowArgs {
    /// Print seconds since the GPS epoch instead of ISO text
    #[arg(long)]
    pub gps_seconds: bool,
}

pub fn execute(args: NowArgs) -> Result<(), Box<dyn std::error::Error>> {
    log_op_start!("cli_now", gps_seconds = args.gps_seconds);
    let start = std::time::Instant::now();

    let text = if args.gps_seconds {
        format!("{:.9}", now_gps().gps_seconds())
    } else {
        now_gps_timestamp(true).to_string()
    };

    log_op_end!("cli_now", duration_ms = start.elapsed().as_millis() as u64);
    println!("{}", text);
    Ok(())
}
