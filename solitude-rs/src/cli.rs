//! Command-line argument parsing.
//!
//! Usage:
//!   solitude [-c <cmd>]... [-f <rc> | --no-config] [-s KEY=VALUE]... [-vq] <FILE>

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::ConfigFile;
use crate::logger::LogLevel;

/// Run a solitude script.
#[derive(Parser, Debug)]
#[command(name = "solitude", version, about, long_about = None)]
pub struct CliArgs {
    /// Script file to run
    #[arg(value_name = "FILE")]
    pub script: PathBuf,

    /// Run a command line before the script (repeatable)
    #[arg(short = 'c', long = "command", value_name = "CMD", allow_hyphen_values = true)]
    pub commands: Vec<String>,

    /// Read settings from this rc file instead of searching for one
    #[arg(short = 'f', long = "config", value_name = "FILE", conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Ignore any rc file
    #[arg(long)]
    pub no_config: bool,

    /// Override a setting, e.g. `--set max_vars=500` (repeatable)
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE")]
    pub settings: Vec<String>,

    /// More logging on stderr (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl CliArgs {
    pub fn config_file(&self) -> ConfigFile {
        match (&self.config, self.no_config) {
            (Some(path), _) => ConfigFile::Explicit(path.clone()),
            (None, true) => ConfigFile::Skip,
            (None, false) => ConfigFile::Search,
        }
    }

    pub fn log_level(&self) -> LogLevel {
        LogLevel::from_verbosity(self.verbose, self.quiet)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
