//! `.solituderc` configuration file parser.
//!
//! The rc file only tunes the interpreter's capacity limits:
//!
//! | Directive | Action |
//! |-----------|--------|
//! | `/set <key>=<value>` or `/set <key> <value>` | set a limit |
//! | Lines starting with `;` | comment, ignored |
//! | Any other `/command` | silently skipped |
//!
//! Recognised keys are `max_name_len`, `max_value_len`, `max_body_len`,
//! `max_vars`, `max_funcs` and `max_line_len`.

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use thiserror::Error;
use tracing::{debug, info};

// ── Limits ────────────────────────────────────────────────────────────────────

/// Capacity limits for the symbol tables and the interpolation buffer.
///
/// Lengths are in bytes of UTF-8 text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Longest variable or function name.
    pub max_name_len: usize,
    /// Longest stored variable value.
    pub max_value_len: usize,
    /// Longest stored function body.
    pub max_body_len: usize,
    /// Maximum number of variables.
    pub max_vars: usize,
    /// Maximum number of functions.
    pub max_funcs: usize,
    /// Largest interpolated line.
    pub max_line_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_name_len: 64,
            max_value_len: 256,
            max_body_len: 1024,
            max_vars: 100,
            max_funcs: 10,
            max_line_len: 512,
        }
    }
}

impl Limits {
    pub const KEYS: &'static [&'static str] = &[
        "max_name_len",
        "max_value_len",
        "max_body_len",
        "max_vars",
        "max_funcs",
        "max_line_len",
    ];

    /// Set one limit by key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        let slot = match key {
            "max_name_len" => &mut self.max_name_len,
            "max_value_len" => &mut self.max_value_len,
            "max_body_len" => &mut self.max_body_len,
            "max_vars" => &mut self.max_vars,
            "max_funcs" => &mut self.max_funcs,
            "max_line_len" => &mut self.max_line_len,
            _ => {
                return Err(format!(
                    "unknown setting `{key}` (expected one of: {})",
                    Self::KEYS.join(", ")
                ))
            }
        };
        *slot = value
            .trim()
            .parse()
            .map_err(|_| format!("`{key}` needs a non-negative integer, got `{value}`"))?;
        Ok(())
    }

    /// Apply a `key=value` assignment (the `--set` command-line form).
    pub fn apply_assignment(&mut self, assignment: &str) -> Result<(), String> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| format!("expected KEY=VALUE, got `{assignment}`"))?;
        self.set(key.trim(), value)
    }
}

// ── Config file ───────────────────────────────────────────────────────────────

/// A non-fatal error encountered while loading a config file.
#[derive(Debug, Error)]
#[error("line {line}: {message}")]
pub struct ConfigError {
    pub line: usize,
    pub message: String,
}

/// Parsed rc file.
#[derive(Debug, Default)]
pub struct Config {
    pub limits: Limits,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config string.
    ///
    /// Returns the config and a list of problems on recognised lines; those
    /// lines leave their limit at the default.
    pub fn load_str(s: &str) -> (Self, Vec<ConfigError>) {
        let mut config = Config::new();
        let mut errors = Vec::new();

        for (i, raw) in s.lines().enumerate() {
            let lineno = i + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with(';') {
                continue;
            }

            let Some(rest) = line.strip_prefix('/') else { continue };

            let (cmd, args) = rest
                .split_once(|c: char| c.is_ascii_whitespace())
                .unwrap_or((rest, ""));

            if cmd != "set" {
                debug!(line = lineno, cmd, "skipping config directive");
                continue;
            }

            if let Err(message) = parse_set(args.trim(), &mut config.limits) {
                errors.push(ConfigError { line: lineno, message });
            }
        }

        (config, errors)
    }

    /// Read and parse a config file from disk.
    pub fn load_file(path: &Path) -> std::io::Result<(Self, Vec<ConfigError>)> {
        let s = std::fs::read_to_string(path)?;
        info!(path = %path.display(), "loading config");
        Ok(Self::load_str(&s))
    }
}

/// `/set key=value` or `/set key value`.
fn parse_set(args: &str, limits: &mut Limits) -> Result<(), String> {
    if args.is_empty() {
        return Err("set: requires a setting name".into());
    }
    let (key, value) = match args.split_once('=') {
        Some((k, v)) => (k.trim(), v.trim()),
        None => args
            .split_once(|c: char| c.is_ascii_whitespace())
            .map(|(k, v)| (k, v.trim()))
            .ok_or_else(|| format!("set: `{args}` has no value"))?,
    };
    limits.set(key, value)
}

// ── Path helpers ──────────────────────────────────────────────────────────────

/// How to choose the config file.
#[derive(Debug, Default, PartialEq, Eq)]
pub enum ConfigFile {
    /// Search `~/.solituderc`, then `./.solituderc` (default).
    #[default]
    Search,
    /// `--no-config`: use built-in defaults.
    Skip,
    /// `--config <file>`: load this specific file.
    Explicit(PathBuf),
}

const RC_NAME: &str = ".solituderc";

/// Return the first existing rc file: `~/.solituderc`, then `./.solituderc`.
pub fn find_user_config() -> Option<PathBuf> {
    let home = BaseDirs::new().map(|d| d.home_dir().join(RC_NAME));
    home.into_iter()
        .chain(std::iter::once(PathBuf::from(RC_NAME)))
        .find(|p| p.is_file())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
