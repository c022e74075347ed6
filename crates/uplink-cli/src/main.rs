//! Uplink metadata CLI
//!
//! Command-line access to record construction, the wire codec and the GPS clock

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uplink_meta::Settings;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "uplink-cli")]
#[command(about = "Uplink command metadata tools", long_about = None)]
struct Cli {
    /// Settings file (default: $UPLINK_META_CONFIG, else built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build a record and print its canonical mapping
    New(commands::new::NewArgs),
    /// Expand a CL script into sibling records
    Script(commands::script::ScriptArgs),
    /// Print the current GPS timestamp
    Now(commands::now::NowArgs),
    /// Print a new unique command id
    Uid,
    /// Decode a hex-encoded MessagePack record
    Decode(commands::decode::DecodeArgs),
}

fn load_settings(path: Option<&PathBuf>) -> uplink_meta::Result<Settings> {
    match path {
        Some(path) => Settings::from_path(path),
        None => Settings::from_env(),
    }
}

fn main() {
    let cli = Cli::parse();

    let settings = match load_settings(cli.config.as_ref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    settings.init_logging();

    let result = match cli.command {
        Commands::New(args) => commands::new::execute(args, &settings),
        Commands::Script(args) => commands::script::execute(args, &settings),
        Commands::Now(args) => commands::now::execute(args),
        Commands::Uid => commands::uid::execute(),
        Commands::Decode(args) => commands::decode::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
