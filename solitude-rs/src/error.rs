//! Script-level error taxonomy.
//!
//! Every error here except [`ScriptError::FileOpen`] and [`ScriptError::Io`]
//! is *line-local*: the interpreter reports it, abandons the rest of the
//! offending line, and carries on with the next one.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

// ── TableKind ─────────────────────────────────────────────────────────────────

/// Which symbol table an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Variable,
    Function,
}

impl TableKind {
    fn plural(self) -> &'static str {
        match self {
            TableKind::Variable => "variables",
            TableKind::Function => "functions",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TableKind::Variable => "variable",
            TableKind::Function => "function",
        })
    }
}

// ── ScriptError ───────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ScriptError {
    /// `$name` interpolation or `-name` deletion of an unknown variable.
    #[error("Undefined variable {0}")]
    UndefinedVariable(String),

    /// `call name` of an unknown function.
    #[error("Undefined function {0}")]
    UndefinedFunction(String),

    /// Table full and the name is new.
    #[error("Too many {} (limit {limit})", kind.plural())]
    CapacityExceeded { kind: TableKind, limit: usize },

    #[error("{kind} name `{name}` is longer than {limit} bytes")]
    NameTooLong { kind: TableKind, name: String, limit: usize },

    #[error("value of {kind} `{name}` is longer than {limit} bytes")]
    ValueTooLong { kind: TableKind, name: String, limit: usize },

    /// `var` line without a usable `name=value` split.
    #[error("Invalid variable declaration format")]
    MalformedAssignment,

    /// A command that takes a name was given none.
    #[error("`{command}` needs a name")]
    MissingName { command: &'static str },

    /// Interpolated text outgrew the working buffer.
    #[error("expanded text is longer than {limit} bytes")]
    BufferOverflow { limit: usize },

    /// `input` hit end of stream (or the read itself failed).
    #[error("could not read input for {0}")]
    InputRead(String),

    #[error("Could not open file {}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing to the output or diagnostics stream failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ScriptError {
    /// Fatal errors end the run instead of being reported per line.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ScriptError::FileOpen { .. } | ScriptError::Io(_))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_messages() {
        assert_eq!(
            ScriptError::UndefinedVariable("name".into()).to_string(),
            "Undefined variable name"
        );
        assert_eq!(
            ScriptError::UndefinedFunction("greet".into()).to_string(),
            "Undefined function greet"
        );
    }

    #[test]
    fn capacity_message_names_table() {
        let e = ScriptError::CapacityExceeded { kind: TableKind::Function, limit: 10 };
        assert_eq!(e.to_string(), "Too many functions (limit 10)");
    }

    #[test]
    fn fatality() {
        assert!(!ScriptError::MalformedAssignment.is_fatal());
        assert!(ScriptError::Io(io::Error::other("pipe")).is_fatal());
        let open = ScriptError::FileOpen {
            path: PathBuf::from("nope.sol"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(open.is_fatal());
        assert_eq!(open.to_string(), "Could not open file nope.sol");
    }
}
