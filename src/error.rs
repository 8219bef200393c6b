use std::fmt::{self, Display};

use crate::token::{Token, TokenKind};
use crate::value::Value;

/// An error produced while scanning source text into tokens.
///
/// Scan errors are trivial lexical problems: an unterminated string, a
/// character the language has no use for. The scanner keeps going after
/// reporting one so that a single run surfaces every lexical mistake.
#[derive(Debug)]
pub struct ScanError {
    pub line: usize,
    pub message: String,
}

impl Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[line {}] Error: {}", self.line, self.message)
    }
}

/// An error produced while parsing tokens into an AST.
///
/// The parser synchronizes at statement boundaries after reporting one of
/// these, so several syntax errors can be reported in a single run.
#[derive(Debug)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_at(f, &self.token, &self.message)
    }
}

/// An error produced by the static resolution pass: syntactically valid
/// code that misuses scopes, `this`, `super` or `return`.
#[derive(Debug)]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_at(f, &self.token, &self.message)
    }
}

fn write_at(f: &mut fmt::Formatter, token: &Token, message: &str) -> fmt::Result {
    if token.kind == TokenKind::Eof {
        write!(f, "[line {}] Error at end: {}", token.line, message)
    } else {
        write!(f, "[line {}] Error at '{}': {}", token.line, token.lexeme, message)
    }
}

/// An error raised during evaluation. Carries the token nearest to the
/// fault (an operator, a call's closing paren, a property name) so the
/// diagnostic can point at a source line.
#[derive(Debug)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl RuntimeError {
    pub fn new(token: &Token, message: impl Into<String>) -> Self {
        RuntimeError { token: token.clone(), message: message.into() }
    }
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[line {}] Runtime error: {}", self.token.line, self.message)
    }
}

/// The evaluator's non-local exit channel.
///
/// Both `return` and runtime errors unwind through every active block and
/// call via the `Err` arm of `Result`, which lets `?` pop environments on
/// the way out. A `Return` is caught at the nearest function call boundary;
/// an `Error` propagates to the top level.
#[derive(Debug)]
pub enum Unwind {
    Return(Value),
    Error(RuntimeError),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}
