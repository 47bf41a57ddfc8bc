//! # Logging
//!
//! `bitext-prep` logs the pipeline stages of the `bitext` library to stderr.

use stderrlog::{LogLevelNum, Timestamp};

/// The verbosity used without `-v`; info.
pub const DEFAULT_VERBOSITY: u8 = 3;

/// Logging setup arg group.
#[derive(clap::Args, Debug)]
pub struct LogArgs {
    /// Silence log messages.
    #[clap(short, long)]
    pub quiet: bool,

    /// Raise the log level from info (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, default_value = None)]
    verbose: Option<u8>,

    /// Enable timestamped logging.
    #[clap(short, long)]
    pub ts: bool,
}

impl LogArgs {
    /// The selected verbosity; each `-v` raises the default by one.
    pub fn verbosity(&self) -> u8 {
        DEFAULT_VERBOSITY.saturating_add(self.verbose.unwrap_or_default())
    }

    /// Install the stderr logger for `bitext` and this binary.
    pub fn setup_logging(&self) -> Result<(), Box<dyn std::error::Error>> {
        let log_level = match self.verbosity() {
            0 => LogLevelNum::Off,
            1 => LogLevelNum::Error,
            2 => LogLevelNum::Warn,
            3 => LogLevelNum::Info,
            4 => LogLevelNum::Debug,
            _ => LogLevelNum::Trace,
        };

        stderrlog::new()
            .module("bitext")
            .module(module_path!())
            .quiet(self.quiet)
            .verbosity(log_level)
            .timestamp(if self.ts {
                Timestamp::Second
            } else {
                Timestamp::Off
            })
            .init()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(clap::Parser, Debug)]
    struct TestArgs {
        #[clap(flatten)]
        logging: LogArgs,
    }

    fn verbosity(args: &[&str]) -> u8 {
        let args = std::iter::once("bitext-prep").chain(args.iter().copied());
        TestArgs::parse_from(args).logging.verbosity()
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(verbosity(&[]), DEFAULT_VERBOSITY);
        assert_eq!(verbosity(&["-v"]), 4);
        assert_eq!(verbosity(&["-vv"]), 5);
    }

    #[test]
    fn test_quiet_and_timestamps() {
        let args = TestArgs::parse_from(["bitext-prep", "-q", "--ts"]);
        assert!(args.logging.quiet);
        assert!(args.logging.ts);
    }
}
