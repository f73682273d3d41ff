// Keytidy Formatter CLI
// In-place re-indenter for ZMK keymap source files

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;

use keytidy_core::{format_file, FormatOutcome};

/// Conservative formatter for ZMK/Zephyr devicetree keymap files
#[derive(Parser, Debug)]
#[command(name = "keytidy-format")]
#[command(about = "Re-indent a ZMK keymap file in place", long_about = None)]
struct Args {
    /// Keymap file to format
    keymap: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    match format_file(&args.keymap) {
        Ok(FormatOutcome::Rewritten) => {
            println!("Formatted: {}", args.keymap.display());
            ExitCode::SUCCESS
        }
        Ok(FormatOutcome::Unchanged) => {
            println!("No changes needed: {}", args.keymap.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(2)
        }
    }
}
