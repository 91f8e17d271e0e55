//! Script interpreter.
//!
//! The [`Interpreter`] owns both symbol tables and the three streams a script
//! talks to: interactive input, program output and diagnostics.  It executes
//! one line at a time; nothing carries over between lines except the
//! variables and functions.
//!
//! Errors on a line are written to the diagnostics stream as `Error: …` and
//! the run continues with the next line.  Only failing to write to a stream
//! stops a run.

use std::io::{self, BufRead, Stderr, StdinLock, Stdout, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::config::Limits;
use crate::error::ScriptError;
use crate::func::FuncStore;
use crate::var::VarStore;
use super::{
    escape::decode_escapes,
    expand::expand,
    expr::{eval_str, format_number, has_operator},
    stmt::{parse_line, script_lines, Command},
};

/// Printed when an `if` condition is non-zero.
pub const CONDITION_MET: &str = "Condition met, execute next line";

/// Line and error counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Lines handed to the dispatcher (block comments excluded).
    pub lines: usize,
    /// Lines that reported an error.
    pub errors: usize,
}

// ── Interpreter ───────────────────────────────────────────────────────────────

pub struct Interpreter<R, W, E> {
    vars: VarStore,
    funcs: FuncStore,
    limits: Limits,
    input: R,
    output: W,
    diagnostics: E,
    summary: RunSummary,
}

impl Interpreter<StdinLock<'static>, Stdout, Stderr> {
    /// An interpreter wired to the process's stdin, stdout and stderr.
    pub fn stdio(limits: Limits) -> Self {
        Self::with_io(limits, io::stdin().lock(), io::stdout(), io::stderr())
    }
}

impl<R: BufRead, W: Write, E: Write> Interpreter<R, W, E> {
    pub fn with_io(limits: Limits, input: R, output: W, diagnostics: E) -> Self {
        Self {
            vars: VarStore::new(&limits),
            funcs: FuncStore::new(&limits),
            limits,
            input,
            output,
            diagnostics,
            summary: RunSummary::default(),
        }
    }

    pub fn vars(&self) -> &VarStore {
        &self.vars
    }

    pub fn funcs(&self) -> &FuncStore {
        &self.funcs
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn diagnostics(&self) -> &E {
        &self.diagnostics
    }

    /// Counts accumulated since construction.
    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Consume the interpreter, returning the output and diagnostics streams.
    pub fn into_streams(self) -> (W, E) {
        (self.output, self.diagnostics)
    }

    // ── Running ───────────────────────────────────────────────────────────────

    /// Read a script file and run every line of it.
    pub fn exec_file(&mut self, path: &Path) -> Result<RunSummary, ScriptError> {
        let raw = std::fs::read(path).map_err(|source| ScriptError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), bytes = raw.len(), "loading script");
        let src = String::from_utf8_lossy(&raw);
        self.exec_script(&src)
    }

    /// Run every line of `src`, reporting line errors as they happen.
    ///
    /// Returns the counts for this script only; a fatal error stops the run.
    pub fn exec_script(&mut self, src: &str) -> Result<RunSummary, ScriptError> {
        let before = self.summary;
        for (lineno, line) in script_lines(src) {
            self.run_line(lineno, line)?;
        }
        self.output.flush()?;
        Ok(RunSummary {
            lines: self.summary.lines - before.lines,
            errors: self.summary.errors - before.errors,
        })
    }

    /// Execute one line, reporting a line-level error instead of returning it.
    pub fn run_line(&mut self, lineno: usize, line: &str) -> Result<(), ScriptError> {
        self.summary.lines += 1;
        let result = parse_line(line).and_then(|cmd| {
            debug!(line = lineno, kind = cmd.kind(), "dispatch");
            self.dispatch(cmd)
        });
        match result {
            Ok(()) => Ok(()),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                debug!(line = lineno, error = %e, "line failed");
                self.summary.errors += 1;
                self.report(&e)
            }
        }
    }

    /// Execute one line and return its error, if any.
    pub fn exec_line(&mut self, line: &str) -> Result<(), ScriptError> {
        let cmd = parse_line(line)?;
        self.dispatch(cmd)
    }

    fn dispatch(&mut self, cmd: Command<'_>) -> Result<(), ScriptError> {
        match cmd {
            Command::Blank | Command::Comment => Ok(()),
            Command::Assign { name, value } => self.assign(name, value),
            Command::Delete { name } => self.vars.delete(name).map(drop),
            Command::If { cond } => self.test_condition(cond),
            Command::Func { name, body } => self.funcs.define(name, body),
            Command::Call { name } => self.call(name),
            Command::Input { name, prompt } => self.read_input(name, prompt),
            Command::Print(text) => self.print(text),
        }
    }

    fn report(&mut self, err: &ScriptError) -> Result<(), ScriptError> {
        self.output.flush()?;
        writeln!(self.diagnostics, "Error: {err}")?;
        self.diagnostics.flush()?;
        Ok(())
    }

    // ── Commands ──────────────────────────────────────────────────────────────

    fn expand(&self, text: &str) -> Result<String, ScriptError> {
        expand(text, &self.vars, self.limits.max_line_len)
    }

    fn assign(&mut self, name: &str, raw: &str) -> Result<(), ScriptError> {
        let mut value = self.expand(raw)?;
        if has_operator(&value) {
            value = format_number(eval_str(&value));
        }
        self.vars.set(name, value)
    }

    fn test_condition(&mut self, cond: &str) -> Result<(), ScriptError> {
        let cond = self.expand(cond)?;
        if eval_str(&cond) != 0.0 {
            writeln!(self.output, "{CONDITION_MET}")?;
        }
        Ok(())
    }

    fn call(&mut self, name: &str) -> Result<(), ScriptError> {
        let text = self.funcs.invoke(name, &self.vars, self.limits.max_line_len)?;
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    fn read_input(&mut self, name: &str, prompt: Option<&str>) -> Result<(), ScriptError> {
        let prompt = match prompt {
            Some(p) => decode_escapes(&self.expand(p)?),
            None => format!("Enter value for {name}: ").into_bytes(),
        };
        self.output.write_all(&prompt)?;
        self.output.flush()?;

        let mut buf = String::new();
        match self.input.read_line(&mut buf) {
            Ok(0) => return Err(ScriptError::InputRead(name.to_owned())),
            Ok(_) => {}
            Err(e) => {
                debug!(error = %e, "input read failed");
                return Err(ScriptError::InputRead(name.to_owned()));
            }
        }
        let value = buf
            .strip_suffix('\n')
            .map(|v| v.strip_suffix('\r').unwrap_or(v))
            .unwrap_or(&buf);
        self.vars.set(name, value)
    }

    fn print(&mut self, text: &str) -> Result<(), ScriptError> {
        let text = self.expand(text)?;
        let mut bytes = decode_escapes(&text);
        bytes.push(b'\n');
        self.output.write_all(&bytes)?;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    type TestInterp = Interpreter<Cursor<Vec<u8>>, Vec<u8>, Vec<u8>>;

    fn interp_with_input(input: &str) -> TestInterp {
        Interpreter::with_io(
            Limits::default(),
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            Vec::new(),
        )
    }

    fn run(src: &str) -> TestInterp {
        let mut interp = interp_with_input("");
        interp.exec_script(src).expect("run failed");
        interp
    }

    fn stdout(interp: &TestInterp) -> String {
        String::from_utf8_lossy(interp.output()).into_owned()
    }

    fn stderr(interp: &TestInterp) -> String {
        String::from_utf8_lossy(interp.diagnostics()).into_owned()
    }

    #[test]
    fn exec_line_returns_the_error() {
        let mut interp = interp_with_input("");
        let err = interp.exec_line("call ghost").unwrap_err();
        assert!(matches!(err, ScriptError::UndefinedFunction(n) if n == "ghost"));
        assert_eq!(stderr(&interp), "");
        assert_eq!(interp.summary(), RunSummary::default());
    }

    #[test]
    fn print_plain_line() {
        assert_eq!(stdout(&run("Hello")), "Hello\n");
    }

    #[test]
    fn end_to_end_arithmetic() {
        let interp = run("var x=10\nvar y=$x*2\nResult: $y");
        assert_eq!(stdout(&interp), "Result: 20.000000\n");
        assert_eq!(interp.vars().get("x"), Some("10"));
    }

    #[test]
    fn assignment_reduces_interpolated_expression() {
        let interp = run("var a=7\nvar b=$a+$a");
        assert_eq!(interp.vars().get("b"), Some("14.000000"));
    }

    #[test]
    fn assignment_without_operator_stays_text() {
        let interp = run("var greeting=Hello there");
        assert_eq!(interp.vars().get("greeting"), Some("Hello there"));
    }

    #[test]
    fn negative_literal_assignment_is_numeric() {
        let interp = run("var n=-5");
        assert_eq!(interp.vars().get("n"), Some("-5.000000"));
    }

    #[test]
    fn repeated_assignment() {
        let interp = run("var a=5\nvar a=5");
        assert_eq!(interp.vars().len(), 1);
        assert_eq!(interp.vars().get("a"), Some("5"));
    }

    #[test]
    fn malformed_assignment_reported() {
        let interp = run("var broken\nstill running");
        assert_eq!(stderr(&interp), "Error: Invalid variable declaration format\n");
        assert_eq!(stdout(&interp), "still running\n");
        assert_eq!(interp.summary(), RunSummary { lines: 2, errors: 1 });
    }

    #[test]
    fn delete_and_order() {
        let interp = run("var a=1\nvar b=2\nvar c=3\n-b");
        assert_eq!(interp.vars().names().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn delete_undefined_reported() {
        let interp = run("-ghost");
        assert_eq!(stderr(&interp), "Error: Undefined variable ghost\n");
        assert!(interp.vars().is_empty());
    }

    #[test]
    fn undefined_variable_in_text_prints_nothing() {
        let interp = run("Hi $who\nnext");
        assert_eq!(stdout(&interp), "next\n");
        assert_eq!(stderr(&interp), "Error: Undefined variable who\n");
    }

    #[test]
    fn undefined_variable_in_assignment_keeps_old_value() {
        let interp = run("var a=1\nvar a=$nope");
        assert_eq!(interp.vars().get("a"), Some("1"));
    }

    #[test]
    fn if_prints_message_when_true() {
        assert_eq!(stdout(&run("if 1")), format!("{CONDITION_MET}\n"));
        assert_eq!(stdout(&run("if 0")), "");
        assert_eq!(stdout(&run("if 2-2")), "");
    }

    #[test]
    fn if_interpolates_condition() {
        assert_eq!(stdout(&run("var a=3\nif $a-1")), format!("{CONDITION_MET}\n"));
        assert_eq!(stdout(&run("var a=3\nif $a-3")), "");
    }

    #[test]
    fn if_does_not_skip_next_line() {
        let interp = run("if 0\nafter");
        assert_eq!(stdout(&interp), "after\n");
    }

    #[test]
    fn function_call_before_and_after_var() {
        let interp = run("func greet print($name)\ncall greet\nvar name=World\ncall greet");
        assert_eq!(interp.funcs().body("greet"), Some("print($name)"));
        assert_eq!(stdout(&interp), "print(World)\n");
        assert_eq!(stderr(&interp), "Error: Undefined variable name\n");
    }

    #[test]
    fn function_call_does_not_decode_escapes() {
        let interp = run(r"func raw a\x41b
call raw");
        assert_eq!(stdout(&interp), "a\\x41b\n");
    }

    #[test]
    fn call_undefined_function() {
        let interp = run("call nothing");
        assert_eq!(stdout(&interp), "");
        assert_eq!(stderr(&interp), "Error: Undefined function nothing\n");
    }

    #[test]
    fn print_decodes_escapes_after_interpolation() {
        let interp = run(r"var esc=\033
$esc[1mBold\x21");
        assert_eq!(interp.output().as_slice(), b"\x1b[1mBold!\n");
    }

    #[test]
    fn input_with_prompt() {
        let mut interp = interp_with_input("Alice\n");
        interp.exec_script("input who -> Name? \nHi $who").unwrap();
        assert_eq!(stdout(&interp), "Name? Hi Alice\n");
        assert_eq!(interp.vars().get("who"), Some("Alice"));
    }

    #[test]
    fn input_prompt_is_interpolated_and_decoded() {
        let mut interp = interp_with_input("z\n");
        interp.exec_script("var who=Ada\ninput n -> Hi $who\\x21 \n$n").unwrap();
        assert_eq!(stdout(&interp), "Hi Ada! z\n");
        assert_eq!(interp.vars().get("n"), Some("z"));
    }

    #[test]
    fn input_prompt_with_undefined_variable_reads_nothing() {
        let mut interp = interp_with_input("z\n");
        interp.exec_script("input n -> Hi $who: \ninput m").unwrap();
        assert_eq!(stderr(&interp), "Error: Undefined variable who\n");
        assert!(!interp.vars().contains("n"));
        assert_eq!(interp.vars().get("m"), Some("z"));
        assert_eq!(stdout(&interp), "Enter value for m: ");
    }

    #[test]
    fn input_default_prompt_and_crlf() {
        let mut interp = interp_with_input("42\r\n");
        interp.exec_script("input n").unwrap();
        assert_eq!(stdout(&interp), "Enter value for n: ");
        assert_eq!(interp.vars().get("n"), Some("42"));
    }

    #[test]
    fn input_is_not_evaluated() {
        let mut interp = interp_with_input("1+1\n");
        interp.exec_script("input n").unwrap();
        assert_eq!(interp.vars().get("n"), Some("1+1"));
    }

    #[test]
    fn input_at_eof() {
        let mut interp = interp_with_input("");
        let summary = interp.exec_script("input n\nafter").unwrap();
        assert_eq!(summary, RunSummary { lines: 2, errors: 1 });
        assert!(!interp.vars().contains("n"));
        assert_eq!(stderr(&interp), "Error: could not read input for n\n");
        assert_eq!(stdout(&interp), "Enter value for n: after\n");
    }

    #[test]
    fn variable_capacity() {
        let limits = Limits { max_vars: 2, ..Limits::default() };
        let mut interp = Interpreter::with_io(limits, Cursor::new(Vec::new()), Vec::new(), Vec::new());
        interp.exec_script("var a=1\nvar b=2\nvar c=3\nvar a=9").unwrap();
        assert_eq!(stderr(&interp), "Error: Too many variables (limit 2)\n");
        assert_eq!(interp.vars().get("a"), Some("9"));
        assert!(!interp.vars().contains("c"));
    }

    #[test]
    fn overflow_reported_not_truncated() {
        let limits = Limits { max_line_len: 8, ..Limits::default() };
        let mut interp = Interpreter::with_io(limits, Cursor::new(Vec::new()), Vec::new(), Vec::new());
        interp.exec_script("var a=12345\n$a$a").unwrap();
        assert_eq!(stdout(&interp), "");
        assert_eq!(stderr(&interp), "Error: expanded text is longer than 8 bytes\n");
    }

    #[test]
    fn block_comment_skipped() {
        let interp = run("one\n...\ntwo\n...\nthree");
        assert_eq!(stdout(&interp), "one\nthree\n");
        assert_eq!(interp.summary().lines, 3);
    }

    #[test]
    fn comments_and_blanks() {
        let interp = run(". comment\n\n.\nvisible");
        assert_eq!(stdout(&interp), "visible\n");
        assert_eq!(stderr(&interp), "");
    }

    #[test]
    fn missing_file_is_fatal() {
        let mut interp = interp_with_input("");
        let err = interp.exec_file(Path::new("/definitely/not/here.sol")).unwrap_err();
        assert!(matches!(err, ScriptError::FileOpen { .. }));
    }

    #[test]
    fn exec_file_runs_script() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"var n=2\nvar m=$n*$n\nm=$m\n").unwrap();
        let mut interp = interp_with_input("");
        let summary = interp.exec_file(f.path()).unwrap();
        assert_eq!(summary, RunSummary { lines: 3, errors: 0 });
        assert_eq!(stdout(&interp), "m=4.000000\n");
    }

    #[test]
    fn separate_runs_report_separate_counts() {
        let mut interp = interp_with_input("");
        interp.exec_script("-x").unwrap();
        let second = interp.exec_script("ok").unwrap();
        assert_eq!(second, RunSummary { lines: 1, errors: 0 });
        assert_eq!(interp.summary(), RunSummary { lines: 2, errors: 1 });
    }
}
