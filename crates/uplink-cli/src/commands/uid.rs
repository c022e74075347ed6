//! Unique id command
//!
//! Prints a fresh command uid, the same kind every record is minted with.

use uplink_meta::{log_op_end, log_op_start, new_unique_id};

pub fn execute() -> Result<(), Box<dyn std::error::Error>> {
    log_op_start!("cli_uid");
    let start = std::time::Instant::now();

    let uid = new_unique_id();

    log_op_end!(
        "cli_uid",
        duration_ms = start.elapsed().as_millis() as u64,
        uid = %uid
    );
    println!("{}", uid);
    Ok(())
}
