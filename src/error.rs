use std::sync::atomic::{AtomicBool, Ordering};

use crate::token::{Token, Type};

static HAD_PARSE_ERROR: AtomicBool = AtomicBool::new(false);
static HAD_RUNTIME_ERROR: AtomicBool = AtomicBool::new(false);

/// Checks if a scan or parse error occurred.
pub fn had_parse_error() -> bool {
    HAD_PARSE_ERROR.load(Ordering::SeqCst)
}

/// Checks if a runtime error occurred.
pub fn had_runtime_error() -> bool {
    HAD_RUNTIME_ERROR.load(Ordering::SeqCst)
}

/// Resets both error flags. Called at the start of each REPL iteration.
pub fn reset() {
    HAD_PARSE_ERROR.store(false, Ordering::SeqCst);
    HAD_RUNTIME_ERROR.store(false, Ordering::SeqCst);
}

/// Every error kind implements this trait to report itself to the reporter.
pub trait Error {
    /// Prints the diagnostic and flips the relevant process-wide flag.
    fn throw(&self);
}

/// An error raised while scanning source text into tokens.
#[derive(Debug)]
pub struct ScanError {
    pub line: u32,
    pub message: String,
}

impl Error for ScanError {
    fn throw(&self) {
        eprintln!("[line {}] Error: {}", self.line, self.message);
        HAD_PARSE_ERROR.store(true, Ordering::SeqCst);
    }
}

/// An error raised while parsing tokens into an AST.
#[derive(Debug)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl ParseError {
    /// The `WHERE` clause of the reported diagnostic: empty for scanner
    /// errors (not produced by this type), "at end" at EOF, or
    /// "at 'lexeme'" otherwise.
    fn location(&self) -> String {
        if self.token.r#type == Type::EOF {
            "at end".to_string()
        } else {
            format!("at '{}'", self.token.lexeme)
        }
    }
}

impl Error for ParseError {
    fn throw(&self) {
        eprintln!("[line {}] Error {}: {}", self.token.line, self.location(), self.message);
        HAD_PARSE_ERROR.store(true, Ordering::SeqCst);
    }
}

/// An error raised while evaluating the AST.
#[derive(Debug)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl Error for RuntimeError {
    fn throw(&self) {
        eprintln!("{}", self.message);
        eprintln!("[line {}]", self.token.line);
        HAD_RUNTIME_ERROR.store(true, Ordering::SeqCst);
    }
}
