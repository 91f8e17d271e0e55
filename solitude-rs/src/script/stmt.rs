//! Line classification and script splitting.
//!
//! A script is a sequence of lines and every line is one command.  The form
//! is decided by prefix, checked in this order (first match wins):
//!
//! | Prefix / shape       | Command                                     |
//! |----------------------|---------------------------------------------|
//! | empty line           | nothing                                     |
//! | `.`                  | comment                                     |
//! | `var NAME=VALUE`     | assignment (split on the first `=`)         |
//! | `-NAME`              | delete variable                             |
//! | `if EXPR`            | print a fixed message when EXPR is non-zero |
//! | `func NAME BODY…`    | define function                             |
//! | `call NAME`          | expand and print function body              |
//! | `input NAME[ -> P]`  | prompt and read one line into NAME          |
//! | anything else        | print the line                              |
//!
//! Because `-` is checked before the fallback, `-5 apples` is always a
//! deletion of a variable named `5 apples`, never text.
//!
//! Lines between two `...` lines are a block comment and never reach the
//! classifier; see [`script_lines`].

use crate::error::ScriptError;

/// Block comment delimiter (a line consisting of exactly this).
pub const BLOCK_COMMENT: &str = "...";

/// One classified script line, borrowing from the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// Empty line.
    Blank,
    /// `.` comment.
    Comment,
    /// `var name=value`; `value` is still raw text.
    Assign { name: &'a str, value: &'a str },
    /// `-name`
    Delete { name: &'a str },
    /// `if cond`, where `cond` is the first whitespace-delimited token (may be empty).
    If { cond: &'a str },
    /// `func name body…`; `body` runs to end of line, unexpanded.
    Func { name: &'a str, body: &'a str },
    /// `call name`
    Call { name: &'a str },
    /// `input name [-> prompt]`
    Input { name: &'a str, prompt: Option<&'a str> },
    /// Anything else: literal text to display.
    Print(&'a str),
}

impl Command<'_> {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Command::Blank => "blank",
            Command::Comment => "comment",
            Command::Assign { .. } => "var",
            Command::Delete { .. } => "delete",
            Command::If { .. } => "if",
            Command::Func { .. } => "func",
            Command::Call { .. } => "call",
            Command::Input { .. } => "input",
            Command::Print(_) => "print",
        }
    }
}

// ── Classifier ────────────────────────────────────────────────────────────────

/// Classify one line (without its trailing newline).
pub fn parse_line(line: &str) -> Result<Command<'_>, ScriptError> {
    if line.is_empty() {
        return Ok(Command::Blank);
    }
    if line.starts_with('.') {
        return Ok(Command::Comment);
    }
    if let Some(rest) = line.strip_prefix("var ") {
        return parse_assign(rest);
    }
    if let Some(rest) = line.strip_prefix('-') {
        let name = required(rest.trim(), "-")?;
        return Ok(Command::Delete { name });
    }
    if let Some(rest) = line.strip_prefix("if ") {
        let (cond, _) = first_token(rest);
        return Ok(Command::If { cond });
    }
    if let Some(rest) = line.strip_prefix("func ") {
        let (name, body) = first_token(rest);
        let name = required(name, "func")?;
        return Ok(Command::Func { name, body: body.trim_start() });
    }
    if let Some(rest) = line.strip_prefix("call ") {
        let (name, _) = first_token(rest);
        return Ok(Command::Call { name: required(name, "call")? });
    }
    if let Some(rest) = line.strip_prefix("input ") {
        let (name, rest) = first_token(rest);
        let name = required(name, "input")?;
        let prompt = rest
            .trim_start()
            .strip_prefix("->")
            .map(str::trim_start)
            .filter(|p| !p.is_empty());
        return Ok(Command::Input { name, prompt });
    }
    Ok(Command::Print(line))
}

/// `name=value`, split on the first `=`; both sides trimmed and non-empty.
fn parse_assign(rest: &str) -> Result<Command<'_>, ScriptError> {
    let (name, value) = rest.split_once('=').ok_or(ScriptError::MalformedAssignment)?;
    let (name, value) = (name.trim(), value.trim());
    if name.is_empty() || value.is_empty() {
        return Err(ScriptError::MalformedAssignment);
    }
    Ok(Command::Assign { name, value })
}

/// Split off the first whitespace-delimited token, returning it and the rest.
fn first_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    s.split_once(char::is_whitespace).unwrap_or((s, ""))
}

fn required<'a>(name: &'a str, command: &'static str) -> Result<&'a str, ScriptError> {
    if name.is_empty() {
        Err(ScriptError::MissingName { command })
    } else {
        Ok(name)
    }
}

// ── Script splitting ──────────────────────────────────────────────────────────

/// Split a script into `(line_number, line)` pairs, dropping block comments.
///
/// Line numbers are 1-based and refer to the original source.  A `...` line
/// opens a block that the next `...` line closes; an unclosed block runs to
/// the end of the script.  Both `\n` and `\r\n` endings are accepted.
pub fn script_lines(src: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut in_block = false;
    src.lines().enumerate().filter_map(move |(i, line)| {
        if line.trim() == BLOCK_COMMENT {
            in_block = !in_block;
            return None;
        }
        (!in_block).then_some((i + 1, line))
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
