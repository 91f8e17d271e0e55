//! The solitude scripting language.
//!
//! - `$name` variable interpolation ([`expand`])
//! - left-to-right arithmetic ([`expr`])
//! - `\033` / `\xHH` display escapes ([`escape`])
//! - the per-line command grammar ([`stmt`])
//! - the [`Interpreter`] that ties them together
//!
//! # Quick start
//!
//! ```rust
//! use std::io::Cursor;
//! use solitude::config::Limits;
//! use solitude::script::Interpreter;
//!
//! let mut interp = Interpreter::with_io(Limits::default(), Cursor::new(Vec::new()), Vec::new(), Vec::new());
//! interp.exec_script("var x=6\nvar y=$x*7\nanswer: $y").unwrap();
//! assert_eq!(interp.output().as_slice(), b"answer: 42.000000\n");
//! ```

pub mod escape;
pub mod expand;
pub mod expr;
pub mod interp;
pub mod stmt;

// Re-exports for convenience.
pub use interp::{Interpreter, RunSummary};
pub use stmt::{parse_line, Command};
