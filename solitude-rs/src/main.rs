use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::{info, warn};

use solitude::cli::CliArgs;
use solitude::config::{find_user_config, Config, ConfigFile, Limits};
use solitude::logger;
use solitude::script::Interpreter;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    logger::init_with_level(args.log_level());

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("solitude: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<()> {
    let limits = load_limits(args)?;
    let mut interp = Interpreter::stdio(limits);

    // ── Startup commands (-c) ─────────────────────────────────────────────────
    for (i, cmd) in args.commands.iter().enumerate() {
        interp.run_line(i + 1, cmd).context("running startup command")?;
    }

    // ── Script ────────────────────────────────────────────────────────────────
    let summary = interp.exec_file(&args.script)?;
    info!(lines = summary.lines, errors = summary.errors, "script finished");
    Ok(())
}

/// Defaults, then the rc file, then `--set` overrides.
fn load_limits(args: &CliArgs) -> Result<Limits> {
    let path = match args.config_file() {
        ConfigFile::Skip => None,
        ConfigFile::Explicit(path) => Some((path, true)),
        ConfigFile::Search => find_user_config().map(|p| (p, false)),
    };

    let mut limits = match path {
        None => Limits::default(),
        Some((path, explicit)) => match Config::load_file(&path) {
            Ok((config, errors)) => {
                for e in errors {
                    warn!("{}: {e}", path.display());
                }
                config.limits
            }
            Err(e) if explicit => {
                return Err(e).with_context(|| format!("can't read config {}", path.display()));
            }
            Err(e) => {
                warn!("{}: {e}", path.display());
                Limits::default()
            }
        },
    };

    for setting in &args.settings {
        limits
            .apply_assignment(setting)
            .map_err(|msg| anyhow!(msg))
            .with_context(|| format!("bad --set {setting}"))?;
    }
    Ok(limits)
}
