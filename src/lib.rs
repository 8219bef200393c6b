//! Slate is a small dynamically-typed, class-based scripting language with
//! lexical scoping, first-class functions and single inheritance,
//! interpreted by walking its syntax tree. The pipeline runs in four
//! stages, each one a module of this crate:
//!
//! ## Scanning
//! The [`scanner`] turns source text into a flat vector of [`token`]s,
//! each carrying its raw lexeme and a line number for diagnostics. Lexical
//! mistakes (an unterminated string, a stray character) are collected as
//! [`ScanError`](error::ScanError)s rather than stopping the scan, so one
//! run reports every such problem in a file.
//!
//! ## Parsing
//! The [`parser`] is a hand-written recursive descent parser producing
//! [`expr`]essions and [`stmt`]s. It owns the grammar's precedence and
//! associativity, rewrites `for` loops into equivalent `while` loops, and
//! recovers from syntax errors by synchronizing at statement boundaries so
//! that several [`ParseError`](error::ParseError)s can surface together.
//!
//! ## Resolving
//! The [`resolver`] is a static pass over the finished tree. It binds
//! every variable use to the scope that declares it, recording the scope
//! distance in a side table keyed by node identity, and rejects code that
//! is grammatical but scope-broken: reading a local inside its own
//! initializer, `return` at the top level, `this` or `super` where they
//! mean nothing. Those are [`ResolveError`](error::ResolveError)s, and
//! they also all surface in a single pass.
//!
//! ## Interpreting
//! The [`interpreter`] walks the resolved tree against a chain of
//! [`environment`]s, evaluating expressions into [`value`]s: numbers,
//! strings, booleans, `nil`, and the compound kinds backed by
//! [`function`]s and [`class`]es. Faults that only execution can discover,
//! like calling a number or adding a string to a boolean, become
//! [`RuntimeError`](error::RuntimeError)s and abort the program with its
//! source line.
//!
//! The [`Slate`] driver ties the stages together for both entry points: a
//! script run from a file, and an interactive prompt that keeps its
//! globals (and the closures built over them) alive between lines.

use std::fs;
use std::io::{self, Write};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;
pub mod value;

use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;
use stmt::Stmt;

/// How a run ended. The binary maps these onto exit codes: 0 for
/// [`Success`](Outcome::Success), 65 for [`CompileError`](Outcome::CompileError),
/// 70 for [`RuntimeError`](Outcome::RuntimeError).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Outcome {
    Success,
    CompileError,
    RuntimeError,
}

/// The interpreter driver. Owns the [`Interpreter`] so that globals and
/// resolved closures survive across REPL lines, and writes program output
/// to the writer it was constructed over (tests pass a buffer, the binary
/// passes stdout). Diagnostics go to stderr.
pub struct Slate<'a> {
    interpreter: Interpreter<'a>,
    next_id: usize,
}

impl<'a> Slate<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        Slate {
            interpreter: Interpreter::new(out),
            next_id: 0,
        }
    }

    /// Interprets a script file.
    pub fn run_file(&mut self, path: &str) -> io::Result<Outcome> {
        let source = fs::read_to_string(path)?;
        Ok(self.run(&source, false))
    }

    /// Runs the interactive prompt until end-of-input or interrupt.
    /// History persists in `~/.slate_history` when a home directory exists.
    pub fn run_prompt(&mut self) {
        let mut editor = match DefaultEditor::new() {
            Ok(editor) => editor,
            Err(error) => {
                eprintln!("Could not start the prompt: {error}");
                return;
            }
        };

        let history = home::home_dir().map(|dir| dir.join(".slate_history"));
        if let Some(path) = &history {
            let _ = editor.load_history(path);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }

                    let _ = editor.add_history_entry(&line);
                    self.run(&line, true);
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(error) => {
                    eprintln!("Could not read line: {error}");
                    break;
                }
            }
        }

        if let Some(path) = &history {
            let _ = editor.save_history(path);
        }
    }

    /// Runs one source unit through the pipeline. Each stage's errors are
    /// printed to stderr and stop the pipeline before the next stage. In
    /// interactive mode a lone expression statement echoes its value.
    fn run(&mut self, source: &str, interactive: bool) -> Outcome {
        let (tokens, scan_errors) = Scanner::new(source).scan_tokens();
        if !scan_errors.is_empty() {
            for error in &scan_errors {
                eprintln!("{error}");
            }
            return Outcome::CompileError;
        }

        let mut parser = Parser::new(tokens, self.next_id);
        let statements = parser.parse();
        self.next_id = parser.id_watermark();

        let parse_errors = parser.take_errors();
        if !parse_errors.is_empty() {
            for error in &parse_errors {
                eprintln!("{error}");
            }
            return Outcome::CompileError;
        }

        let (table, resolve_errors) = Resolver::new().resolve(&statements);
        if !resolve_errors.is_empty() {
            for error in &resolve_errors {
                eprintln!("{error}");
            }
            return Outcome::CompileError;
        }

        self.interpreter.apply_resolutions(table);

        if interactive {
            if let [Stmt::Expression { expr }] = statements.as_slice() {
                return match self.interpreter.interpret_expression(expr) {
                    Ok(()) => Outcome::Success,
                    Err(error) => {
                        eprintln!("{error}");
                        Outcome::RuntimeError
                    }
                };
            }
        }

        match self.interpreter.interpret(&statements) {
            Ok(()) => Outcome::Success,
            Err(error) => {
                eprintln!("{error}");
                Outcome::RuntimeError
            }
        }
    }
}
