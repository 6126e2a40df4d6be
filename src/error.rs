use std::fmt;

use crate::token::Token;

/// The three diagnostic kinds a run can surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Error,
    ParserError,
    RuntimeError,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Kind::Error => write!(f, "Error"),
            Kind::ParserError => write!(f, "ParserError"),
            Kind::RuntimeError => write!(f, "RuntimeError"),
        }
    }
}

/// An error raised while evaluating the program: a type mismatch, an
/// undefined name, a bad call, and so on. Carries the token closest to the
/// fault so the reporter can point at a line.
#[derive(Debug, Clone)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl RuntimeError {
    pub fn new(token: Token, message: impl Into<String>) -> Self {
        RuntimeError { token, message: message.into() }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RuntimeError {}

/// Sink for every diagnostic the scanner, parser, resolver, and evaluator
/// produce. Threaded by mutable reference rather than kept as global state,
/// so a REPL (or a test) can run the pipeline repeatedly in one process
/// without one run's errors bleeding into the next.
#[derive(Debug, Default)]
pub struct Reporter {
    had_error: bool,
    had_runtime_error: bool,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// Clears both flags. Used by the REPL between lines so a mistake on
    /// one line doesn't block the next.
    pub fn reset(&mut self) {
        self.had_error = false;
        self.had_runtime_error = false;
    }

    fn emit(&mut self, line: usize, kind: Kind, message: &str) {
        eprintln!("[line {line}] {kind}: {message}");
    }

    pub fn scan_error(&mut self, line: usize, message: &str) {
        self.emit(line, Kind::Error, message);
        self.had_error = true;
    }

    pub fn parse_error(&mut self, token: &Token, message: &str) {
        self.emit(token.location.line, Kind::ParserError, message);
        self.had_error = true;
    }

    /// Resolver errors are static: they prevent evaluation from ever
    /// starting, so they count toward `had_error` (the parse-failure exit
    /// path) rather than `had_runtime_error`, even though their message is
    /// worded as a runtime error.
    pub fn resolve_error(&mut self, token: &Token, message: &str) {
        self.emit(token.location.line, Kind::RuntimeError, message);
        self.had_error = true;
    }

    pub fn runtime_error(&mut self, error: &RuntimeError) {
        self.emit(error.token.location.line, Kind::RuntimeError, &error.message);
        self.had_runtime_error = true;
    }
}
