//! User-defined functions.
//!
//! A function is a name bound to a raw, unexpanded body.  `$name` references
//! in the body are resolved fresh on every call, so a call reflects the
//! variables as they are *at call time*, and a body mentioning an undefined
//! variable only fails when it is called.
//!
//! Bodies are never executed as commands, only expanded, so calls cannot nest
//! and there is no call stack.

use crate::config::Limits;
use crate::error::{ScriptError, TableKind};
use crate::script::expand::{expand, VarLookup};
use crate::table::BoundedTable;

/// Name → body function store.
#[derive(Debug, Clone)]
pub struct FuncStore {
    funcs: BoundedTable,
}

impl Default for FuncStore {
    fn default() -> Self {
        Self::new(&Limits::default())
    }
}

impl FuncStore {
    /// A store bounded by `limits`.
    ///
    /// Bodies are capped at the smaller of `max_body_len` and `max_line_len`:
    /// a call always expands the body into one line, so a longer body could
    /// be defined but never called.
    pub fn new(limits: &Limits) -> Self {
        Self {
            funcs: BoundedTable::new(
                TableKind::Function,
                limits.max_funcs,
                limits.max_name_len,
                limits.max_body_len.min(limits.max_line_len),
            ),
        }
    }

    /// Define (or redefine) a function.
    pub fn define(&mut self, name: &str, body: impl Into<String>) -> Result<(), ScriptError> {
        self.funcs.insert(name, body)
    }

    /// The stored, unexpanded body.
    pub fn body(&self, name: &str) -> Option<&str> {
        self.funcs.get(name)
    }

    /// Expand a copy of `name`'s body against `vars`.
    ///
    /// The stored body is left as defined.  `limit` bounds the expanded text
    /// just as it does for any other interpolated line.
    pub fn invoke(&self, name: &str, vars: &dyn VarLookup, limit: usize) -> Result<String, ScriptError> {
        let body = self
            .body(name)
            .ok_or_else(|| ScriptError::UndefinedFunction(name.to_owned()))?;
        expand(body, vars, limit)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.funcs.contains(name)
    }

    pub fn len(&self) -> usize {
        self.funcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.funcs.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
