//! `$name` variable interpolation.
//!
//! | Sequence                   | Meaning                                   |
//! |----------------------------|-------------------------------------------|
//! | `$name`                    | Value of variable `name`                  |
//! | `$` not before a letter    | Literal `$`                               |
//!
//! A name is one ASCII letter followed by ASCII letters and digits; the
//! longest such run is taken, so `$ab1c` always refers to `ab1c`.  Values are
//! copied verbatim and never re-scanned, so a value containing `$x` comes out
//! as the two characters `$x`.

use tracing::trace;

use crate::error::ScriptError;
use crate::var::VarStore;

// ── VarLookup ─────────────────────────────────────────────────────────────────

/// Read-only variable access used by [`expand`].
pub trait VarLookup {
    fn lookup(&self, name: &str) -> Option<&str>;
}

impl VarLookup for VarStore {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name)
    }
}

// ── Expansion ─────────────────────────────────────────────────────────────────

/// Expand every `$name` in `src`, returning the new text.
///
/// Fails on the first undefined name, or when the result would be longer than
/// `limit` bytes.  `src` itself is never touched, so on failure the caller
/// still holds the original text.
pub fn expand(src: &str, ctx: &dyn VarLookup, limit: usize) -> Result<String, ScriptError> {
    if !src.contains('$') {
        return bounded(src.to_owned(), limit);
    }

    let mut out = String::with_capacity(src.len());
    let mut chars = src.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        if ch != '$' || !matches!(chars.peek(), Some(&(_, c)) if is_ident_start(c)) {
            out.push(ch);
            check_len(&out, limit)?;
            continue;
        }

        let name_start = start + 1;
        let mut name_end = name_start;
        while let Some(&(i, c)) = chars.peek() {
            if !is_ident_continue(c) {
                break;
            }
            name_end = i + c.len_utf8();
            chars.next();
        }
        let name = &src[name_start..name_end];

        let value = ctx
            .lookup(name)
            .ok_or_else(|| ScriptError::UndefinedVariable(name.to_owned()))?;
        out.push_str(value);
        check_len(&out, limit)?;
    }

    trace!(src, expanded = %out, "interpolated");
    Ok(out)
}

fn bounded(s: String, limit: usize) -> Result<String, ScriptError> {
    check_len(&s, limit)?;
    Ok(s)
}

fn check_len(s: &str, limit: usize) -> Result<(), ScriptError> {
    if s.len() > limit {
        Err(ScriptError::BufferOverflow { limit })
    } else {
        Ok(())
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
