#![allow(clippy::needless_return)]

//! Rocks is a programming language written in Rust. It is a dynamically typed language with
//! lexical scoping and first-class functions. Rocks is a tree-walk interpreter with a hand-written
//! recursive descent parser. Rocks is a hobby project and is not intended for production use.
//!
//! Rocks is a dynamically typed language. This means that the type of a variable is determined at
//! runtime. This is in contrast to statically typed languages, where the type of a variable is
//! determined at compile time. Dynamically typed languages are often easier to use, but are
//! generally slower than statically typed languages.
//!
//! Rocks is a tree-walk interpreter. This means that the interpreter walks the abstract syntax tree
//! (AST) and evaluates each node. This is in contrast to a compiler, which would convert the AST
//! into bytecode or machine code. Tree-walk interpreters are generally easier to implement than
//! compilers, but are generally slower than compilers.
//!
//! Rocks is a hobby project and is not intended for production use. The goal of this project is to
//! learn more about programming languages and interpreters. This project is inspired by the
//! [Crafting Interpreters](https://craftinginterpreters.com/) book by Bob Nystrom.
//!
//! ## Scanning
//! The first step in the interpreter is scanning. Scanning is the process of converting a string of
//! characters into a list of tokens. A token is a single unit of a programming language. For
//! example, the string `1 + 2` would be converted into the following tokens:
//! ```text
//! [Number(1), Plus, Number(2)]
//! ```
//! The scanner is implemented in the [`scanner`](scanner) module as a cursor over the characters in
//! the source code. Scanner errors (an unterminated string, an unexpected byte) are reported through
//! the shared [`Reporter`](error::Reporter) but do not stop scanning, so later errors in the same
//! source are still surfaced in one run.
//!
//! ## Parsing
//! The second step in the interpreter is parsing. Parsing is the process of converting a list of
//! tokens into an abstract syntax tree (AST). The parser is implemented in the [`parser`](parser)
//! module as a recursive descent parser. The parser transforms the list of tokens into expressions
//! and statements. [`Expressions`](expr::Expr) are pieces of code that produce a value, specifically
//! an [`Object`](object::Object). Objects are an umbrella term for all types of values in Rocks
//! including literals, functions, classes and instances. [`Statements`](stmt::Stmt) are pieces of
//! code that do not produce a value but instead perform some action, modifying the state of the
//! program through side-effects. For example, a variable declaration or an if clause would be
//! classified as statements.
//!
//! The parser reports syntax errors via the same [`Reporter`](error::Reporter) and recovers using
//! panic-mode synchronization, so a single run can surface more than one error.
//!
//! ## Resolving
//! The third step in the interpreter is resolving. Resolving is the process of statically analyzing
//! the AST to determine the scope of each variable. While this requires a pre-pass of the AST, it
//! is necessary to construct robust lexical scoping. The resolver is implemented in the
//! [`resolver`](resolver) module as a tree-walk over the AST. The resolver is run after the parser
//! because it requires the AST to be fully constructed. These errors are syntactically valid but
//! semantically invalid and therefore cannot be caught by the scanner or the parser. For example,
//! the following expression is valid Rocks syntax but it is semantically invalid because the
//! variable `a` is defined twice in the same scope:
//! ```text
//! {
//!    var a = 1;
//!    var a = 2;
//! }
//! ```
//!
//! ## Interpreting
//! The final step in the interpreter is interpreting. Interpreting is the process of evaluating the
//! AST. The interpreter is implemented in the [`interpreter`](interpreter) module as a tree-walk
//! interpreter. Thanks to all the previous steps, the interpreter is able to evaluate the AST and
//! produce a result. While the scanner, the parser and the resolver try to catch as many errors as
//! possible before running the code, most errors can only be caught at runtime. For example, the
//! following expression is valid Rocks syntax but it is semantically invalid because it tries to
//! read an undefined property:
//! ```text
//! var a = "123";
//! print a.length;
//! ```
//! The interpreter is also responsible for managing the environment, a chain of frames mapping
//! variable names to values (see the [`environment`](environment) module).

use std::io::{self, Write};
use std::path::Path;
use std::{fs, process};

pub mod ast;
pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;

use error::Reporter;
use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

const HISTORY_FILE: &str = ".rocks_history";

/// Top-level driver: owns the long-lived interpreter and diagnostics
/// reporter and orchestrates one run of the scanner/parser/resolver/
/// evaluator pipeline per source string.
#[allow(non_camel_case_types)]
pub struct rocks {
    interpreter: Interpreter,
    reporter: Reporter,
}

impl rocks {
    pub fn new() -> Self {
        rocks { interpreter: Interpreter::new(), reporter: Reporter::new() }
    }

    /// Builds a driver whose `print` output goes to `output` instead of the
    /// process's real standard output, so integration tests can capture and
    /// assert on it directly rather than shelling out to the built binary.
    pub fn new_with_output(output: Box<dyn Write>) -> Self {
        rocks { interpreter: Interpreter::with_output(output), reporter: Reporter::new() }
    }

    /// Runs a source string against the persistent interpreter and reporter,
    /// exposing both for tests that want to assert on diagnostics without
    /// going through a file or the REPL.
    pub fn run_source(&mut self, source: &str) {
        self.run(source);
    }

    pub fn had_error(&self) -> bool {
        self.reporter.had_error()
    }

    pub fn had_runtime_error(&self) -> bool {
        self.reporter.had_runtime_error()
    }

    /// Reads and runs a whole file, exiting the process with 65 on a
    /// static (scan/parse/resolve) error or 70 on a runtime error.
    pub fn run_file(&mut self, path: impl AsRef<Path>) {
        let contents = fs::read_to_string(path).expect("should be able to read the script file");

        self.run(&contents);

        if self.reporter.had_error() {
            process::exit(65);
        }
        if self.reporter.had_runtime_error() {
            process::exit(70);
        }
    }

    /// Runs an interactive read-eval-print loop over standard input using
    /// `rustyline` for line editing and history, persisting history
    /// best-effort across invocations via a file under the user's home
    /// directory.
    pub fn run_prompt(&mut self) {
        let mut editor = rustyline::DefaultEditor::new().expect("should be able to start the line editor");
        let history_path = home::home_dir().map(|home| home.join(HISTORY_FILE));

        if let Some(path) = &history_path {
            let _ = editor.load_history(path);
        }

        loop {
            let line = match editor.readline("> ") {
                Ok(line) => line,
                Err(_) => break,
            };

            let _ = editor.add_history_entry(line.as_str());

            if let Some(value) = self.run_repl_line(&line) {
                println!("{value}");
            }

            self.reporter.reset();
        }

        if let Some(path) = &history_path {
            let _ = editor.save_history(path);
        }
    }

    fn run(&mut self, source: &str) {
        let Some(statements) = self.parse(source) else { return };

        if let Err(error) = self.interpreter.interpret(&statements) {
            self.reporter.runtime_error(&error);
        }
    }

    fn run_repl_line(&mut self, source: &str) -> Option<String> {
        let statements = self.parse(source)?;

        match self.interpreter.interpret_repl(&statements) {
            Ok(Some(value)) => Some(value.to_string()),
            Ok(None) => None,
            Err(error) => {
                self.reporter.runtime_error(&error);
                None
            }
        }
    }

    fn parse(&mut self, source: &str) -> Option<Vec<stmt::Stmt>> {
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens(&mut self.reporter);

        if self.reporter.had_error() {
            return None;
        }

        let mut parser = Parser::new(tokens, &mut self.reporter);
        let statements = parser.parse();

        if self.reporter.had_error() {
            return None;
        }

        let mut resolver = Resolver::new(&mut self.interpreter, &mut self.reporter);
        resolver.resolve(&statements);

        if self.reporter.had_error() {
            return None;
        }

        Some(statements)
    }
}

impl Default for rocks {
    fn default() -> Self {
        Self::new()
    }
}

/// Used only by the thin CLI shell in `main.rs` to flush a usage message
/// before exiting on misuse (more than one script argument).
pub fn print_usage() {
    let _ = writeln!(io::stderr(), "Usage: rocks [script]");
}
