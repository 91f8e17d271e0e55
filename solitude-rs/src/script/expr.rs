//! Left-to-right arithmetic.
//!
//! There is no precedence and there are no parentheses: an accumulator starts
//! at `0` with a pending `+`, every number is folded in with the pending
//! operator, and every operator character replaces the pending one.
//! `2+3*4` is therefore `(2+3)*4 = 20`.
//!
//! Anything that is neither a number nor one of `+ - * /` is skipped, so
//! `x > 5` evaluates to `5` and text with no digits evaluates to `0`.
//! Division follows IEEE rules (`1/0` is `inf`).

use tracing::trace;

// ── Op ────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    pub fn from_byte(b: u8) -> Option<Op> {
        match b {
            b'+' => Some(Op::Add),
            b'-' => Some(Op::Sub),
            b'*' => Some(Op::Mul),
            b'/' => Some(Op::Div),
            _ => None,
        }
    }

    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Op::Add => lhs + rhs,
            Op::Sub => lhs - rhs,
            Op::Mul => lhs * rhs,
            Op::Div => lhs / rhs,
        }
    }
}

/// Returns `true` if `s` contains any operator character.
///
/// This is the test an assignment uses to decide whether its value is
/// arithmetic.
pub fn has_operator(s: &str) -> bool {
    s.bytes().any(|b| Op::from_byte(b).is_some())
}

/// Render a number the way assignments store it: six decimal places.
pub fn format_number(n: f64) -> String {
    format!("{n:.6}")
}

// ── Evaluation ────────────────────────────────────────────────────────────────

/// Evaluate `src` strictly left to right.
///
/// A `-` is read as a sign when an operand is expected (at the start or right
/// after an operator) and a digit follows; anywhere else it is subtraction.
pub fn eval_str(src: &str) -> f64 {
    let bytes = src.as_bytes();
    let mut acc = 0.0;
    let mut pending = Op::Add;
    let mut want_operand = true;
    let mut pos = 0;

    while pos < bytes.len() {
        let b = bytes[pos];
        if b.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        let signed = b == b'-' && want_operand && starts_number(bytes, pos + 1);
        if signed || starts_number(bytes, pos) {
            let (n, end) = scan_number(src, pos);
            acc = pending.apply(acc, n);
            want_operand = false;
            pos = end;
        } else if let Some(op) = Op::from_byte(b) {
            pending = op;
            want_operand = true;
            pos += 1;
        } else {
            pos += 1;
        }
    }

    trace!(src, result = acc, "evaluated");
    acc
}

/// A number begins with a digit, or a `.` followed by a digit.
fn starts_number(bytes: &[u8], pos: usize) -> bool {
    match bytes.get(pos) {
        Some(b) if b.is_ascii_digit() => true,
        Some(b'.') => bytes.get(pos + 1).is_some_and(u8::is_ascii_digit),
        _ => false,
    }
}

/// Scan `[-]digits[.digits][e[+-]digits]` starting at `start`.
///
/// The caller guarantees at least one digit is present, so the slice always
/// parses.
fn scan_number(src: &str, start: usize) -> (f64, usize) {
    let bytes = src.as_bytes();
    let mut end = start;
    if bytes.get(end) == Some(&b'-') {
        end += 1;
    }
    end = skip_digits(bytes, end);
    if bytes.get(end) == Some(&b'.') {
        end = skip_digits(bytes, end + 1);
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        if bytes.get(exp).is_some_and(u8::is_ascii_digit) {
            end = skip_digits(bytes, exp);
        }
    }
    let n = src[start..end].parse().unwrap_or(0.0);
    (n, end)
}

fn skip_digits(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    pos
}

// ── Tests ─────────────────────────────────────────────────────────────────────
