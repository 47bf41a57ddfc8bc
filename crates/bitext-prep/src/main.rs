//! `bitext-prep` prepares a parallel corpus from a yaml config.
mod logging;

use std::path::PathBuf;

use bitext::pipeline::{PreprocessConfig, Preprocessor};
use clap::Parser;

use crate::logging::LogArgs;

/// Prepare a parallel corpus for sequence-to-sequence training.
#[derive(clap::Parser, Debug)]
#[command(version)]
pub struct Args {
    /// Path to the config file.
    #[arg(long, default_value = "./config/config.yaml")]
    config: PathBuf,

    /// Run every stage, but write no artifacts.
    #[arg(long)]
    dry_run: bool,

    #[clap(flatten)]
    logging: LogArgs,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    args.logging.setup_logging()?;

    log::info!("config: {}", args.config.display());
    let config = PreprocessConfig::load(&args.config)?;
    let preprocessor = Preprocessor::new(config)?;

    let report = if args.dry_run {
        let raw = preprocessor.load_raw()?;
        preprocessor.prepare(raw)?.report
    } else {
        preprocessor.run()?
    };

    print!("{report}");
    Ok(())
}
