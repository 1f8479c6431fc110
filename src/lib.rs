#![allow(clippy::needless_return)]

//! Lox is a dynamically typed, C-like scripting language, implemented here
//! as a tree-walking interpreter. Lox has lexical block scoping and
//! variables, but — unlike the language described in the book this crate's
//! grammar is drawn from — no functions, classes, or control flow; this is
//! a deliberately small core (see the module docs on [`parser`] and
//! [`interpreter`] for the exact grammar supported).
//!
//! ## Scanning
//! The first step in the interpreter is scanning. Scanning is the process
//! of converting a string of characters into a list of tokens. A token is
//! a single unit of a programming language. For example, the string
//! `1 + 2` would be converted into the following tokens:
//! ```text
//! [Number(1), Plus, Number(2)]
//! ```
//! The scanner is implemented in the [`scanner`](scanner) module on top of
//! `peekmore`'s two-character lookahead iterator over the source text. It
//! reports syntax errors in the source code as a [`ScanError`](error::ScanError)
//! — trivial problems like an unterminated string or comment, or an
//! unexpected character. Scan errors are reported as soon as they are
//! encountered, so the scanner keeps going and can surface more than one
//! error per run.
//!
//! ## Parsing
//! The second step is parsing: converting the token list into an abstract
//! syntax tree. The parser is implemented in the [`parser`](parser) module
//! as a recursive-descent parser. [`Expressions`](expr::Expr) are pieces of
//! code that produce a [`Value`](value::Value); [`Statements`](stmt::Stmt)
//! perform side effects instead — a variable declaration or a `print`.
//!
//! The parser reports syntax errors as a [`ParseError`](error::ParseError).
//! Unlike the scanner, it catches errors that span multiple tokens, and it
//! keeps parsing past one using panic-mode synchronization, so a source
//! file with several mistakes gets them all reported in a single run.
//!
//! ## Interpreting
//! The final step is interpreting: walking the AST and evaluating it. The
//! interpreter is implemented in the [`interpreter`](interpreter) module.
//! It reports type errors, undefined/uninitialized variables, and division
//! by zero as a [`RuntimeError`](error::RuntimeError) — these can only be
//! caught at runtime, since Lox is dynamically typed. The interpreter also
//! owns the [`Environment`](environment::Environment) chain that gives Lox
//! its lexical block scoping.

use std::io::{self, Write};
use std::{fs, process};

pub mod ast;
pub mod environment;
pub mod error;
pub mod expr;
pub mod interpreter;
pub mod parser;
pub mod scanner;
pub mod stmt;
pub mod token;
pub mod value;

use interpreter::Interpreter;
use parser::Parser;
use scanner::Scanner;

/// The batch/REPL driver. Owns the interpreter so state (variables defined
/// at the top level) persists across REPL lines and across the statements
/// of a single file.
pub struct Lox<W: Write> {
    interpreter: Interpreter<W>,
}

impl<W: Write> Lox<W> {
    pub fn new(output: W) -> Self {
        Lox { interpreter: Interpreter::new(output) }
    }

    /// Runs a complete source file and exits the process with the code
    /// dictated by which error flags got set — runtime errors take
    /// priority over parse errors if somehow both occurred.
    pub fn run_file(&mut self, path: &str) {
        let contents = fs::read_to_string(path).expect("should have been able to read the file");

        self.run(&contents);

        if error::had_runtime_error() {
            process::exit(70);
        }
        if error::had_parse_error() {
            process::exit(65);
        }
    }

    /// Runs a complete program without touching the process' exit code —
    /// the entry point used by in-process tests that want to inspect
    /// output or the error flags directly instead of spawning a binary.
    pub fn run_str(&mut self, source: &str) {
        self.run(source);
    }

    /// Runs a single chunk of source as a full program: scan, parse, and
    /// — if nothing went wrong so far — interpret. Used by `run_file` and,
    /// as a fallback, by the REPL when a line isn't a bare expression.
    fn run(&mut self, source: &str) {
        let tokens = Scanner::new(source).scan_tokens();

        if error::had_parse_error() {
            return;
        }

        let statements = Parser::new(tokens).parse();

        if error::had_parse_error() {
            return;
        }

        self.interpreter.interpret(&statements);
    }

    /// Runs one REPL line. A bare expression (no declarations, no trailing
    /// semicolon needed) is echoed; anything else falls back to full
    /// statement parsing. Error flags are reset first, so each line starts
    /// clean regardless of what the previous one did.
    pub fn run_repl_line(&mut self, line: &str) {
        error::reset();

        let tokens = Scanner::new(line).scan_tokens();
        if error::had_parse_error() {
            return;
        }

        match Parser::new(tokens.clone()).parse_expression() {
            Ok(stmt) => {
                if error::had_parse_error() {
                    return;
                }
                self.interpreter.interpret(std::slice::from_ref(&stmt));
                self.interpreter.echo_last_result();
            },
            Err(_) => {
                let statements = Parser::new(tokens).parse();
                if error::had_parse_error() {
                    return;
                }
                self.interpreter.interpret(&statements);
            },
        }
    }
}

impl Lox<io::Stdout> {
    pub fn new_stdout() -> Self {
        Lox::new(io::stdout())
    }
}
