//! Insertion-ordered, capacity-bounded name → text table.
//!
//! Both symbol tables ([`VarStore`](crate::var::VarStore) and
//! [`FuncStore`](crate::func::FuncStore)) are thin wrappers around this type.
//! Lookups are hashed; iteration and removal keep definition order.

use indexmap::IndexMap;

use crate::error::{ScriptError, TableKind};

#[derive(Debug, Clone)]
pub struct BoundedTable {
    kind: TableKind,
    entries: IndexMap<String, String>,
    max_entries: usize,
    max_name_len: usize,
    max_value_len: usize,
}

impl BoundedTable {
    pub fn new(kind: TableKind, max_entries: usize, max_name_len: usize, max_value_len: usize) -> Self {
        Self {
            kind,
            entries: IndexMap::new(),
            max_entries,
            max_name_len,
            max_value_len,
        }
    }

    /// Overwrite `name` in place, or append it if new.
    ///
    /// On error the table is left exactly as it was.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) -> Result<(), ScriptError> {
        let value = value.into();
        if value.len() > self.max_value_len {
            return Err(ScriptError::ValueTooLong {
                kind: self.kind,
                name: name.to_owned(),
                limit: self.max_value_len,
            });
        }
        if let Some(slot) = self.entries.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        if name.len() > self.max_name_len {
            return Err(ScriptError::NameTooLong {
                kind: self.kind,
                name: name.to_owned(),
                limit: self.max_name_len,
            });
        }
        if self.entries.len() >= self.max_entries {
            return Err(ScriptError::CapacityExceeded { kind: self.kind, limit: self.max_entries });
        }
        self.entries.insert(name.to_owned(), value);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Remove `name`, shifting later entries down.  Returns the old value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Entries in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
