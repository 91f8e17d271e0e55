//! Solitude: a line-oriented scripting micro-language.
//!
//! Scripts are read one line at a time; each line assigns, deletes, tests,
//! defines or calls a function, reads input, or prints itself.  See
//! [`script`] for the language and [`script::Interpreter`] for running it.

pub mod cli;
pub mod config;
pub mod error;
pub mod func;
pub mod logger;
pub mod script;
pub mod table;
pub mod var;

pub use config::Limits;
pub use error::ScriptError;
pub use script::Interpreter;
