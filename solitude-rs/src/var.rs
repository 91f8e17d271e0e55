//! Global variable store.
//!
//! Every value is text, numbers included: arithmetic results are formatted
//! before they are stored.  Definition order is observable (deletion keeps the
//! survivors in order), so the store is backed by a [`BoundedTable`].

use crate::config::Limits;
use crate::error::{ScriptError, TableKind};
use crate::table::BoundedTable;

/// Name → text variable store.
#[derive(Debug, Clone)]
pub struct VarStore {
    vars: BoundedTable,
}

impl Default for VarStore {
    fn default() -> Self {
        Self::new(&Limits::default())
    }
}

impl VarStore {
    pub fn new(limits: &Limits) -> Self {
        Self {
            vars: BoundedTable::new(
                TableKind::Variable,
                limits.max_vars,
                limits.max_name_len,
                limits.max_value_len,
            ),
        }
    }

    /// Set (or overwrite) a variable.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), ScriptError> {
        self.vars.insert(name, value)
    }

    /// Get the text value of a variable.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name)
    }

    /// Remove a variable, returning its last value.
    pub fn delete(&mut self, name: &str) -> Result<String, ScriptError> {
        self.vars
            .remove(name)
            .ok_or_else(|| ScriptError::UndefinedVariable(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains(name)
    }

    /// Iterate over all variables in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.names()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
