// Keytidy Annotator CLI
// Post-processes keymap-drawer YAML: display labels plus behavior tags
// scanned from the keymap source

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;

use keytidy_core::{scan_layer_tags_file, Diagram, KEYMAP_SOURCE};

/// Prettify custom ZMK behaviors and macros that keymap-drawer leaves as
/// raw strings, and tag key positions with their binding behaviors
#[derive(Parser, Debug)]
#[command(name = "keytidy-annotate")]
#[command(about = "Post-process a keymap-drawer YAML file in place", long_about = None)]
struct Args {
    /// Diagram document to rewrite
    diagram: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> anyhow::Result<()> {
    let mut diagram = Diagram::from_yaml_path(&args.diagram)?;

    diagram.remap_labels();

    let tags = scan_layer_tags_file(Path::new(KEYMAP_SOURCE));
    log::debug!("scanned tags for {} layer(s)", tags.len());
    diagram.apply_tags(&tags);

    diagram.save(&args.diagram)?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    match run(&args) {
        Ok(()) => {
            println!("Post-processed: {}", args.diagram.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["keytidy-annotate", "keymap.yaml"]);

        assert_eq!(args.diagram, PathBuf::from("keymap.yaml"));
        assert!(!args.verbose);
    }

    #[test]
    fn test_args_verbose_flag() {
        let args = Args::parse_from(["keytidy-annotate", "-v", "keymap.yaml"]);

        assert!(args.verbose);
    }

    #[test]
    fn test_args_require_diagram_path() {
        assert!(Args::try_parse_from(["keytidy-annotate"]).is_err());
    }

    #[test]
    fn test_run_reports_missing_document() {
        let args = Args {
            diagram: PathBuf::from("/nonexistent/keymap.yaml"),
            verbose: false,
        };
        assert!(run(&args).is_err());
    }
}
