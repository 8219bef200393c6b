use std::str::Chars;

use peekmore::{PeekMore, PeekMoreIterator};
use substring::Substring;

use crate::error::ScanError;
use crate::literal::Literal;
use crate::token::{Token, TokenKind};

/// Converts source text into a vector of tokens.
///
/// The scanner is a single pass over the character stream with one
/// character of lookahead (two for the decimal point of a number). It
/// collects every lexical error it encounters instead of stopping at the
/// first one; the caller decides that compilation failed.
pub struct Scanner<'a> {
    source: &'a str,
    chars: PeekMoreIterator<Chars<'a>>,
    tokens: Vec<Token>,
    errors: Vec<ScanError>,
    /// Char offset of the first character of the token being scanned.
    start: usize,
    /// Char offset one past the last consumed character.
    current: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Scanner<'a> {
        Scanner {
            source,
            chars: source.chars().peekmore(),
            tokens: Vec::new(),
            errors: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
        }
    }

    /// Scans the whole source, returning the tokens (always terminated by
    /// an `Eof` token) and every lexical error encountered.
    pub fn scan_tokens(mut self) -> (Vec<Token>, Vec<ScanError>) {
        loop {
            self.start = self.current;
            let Some(c) = self.advance() else { break };
            self.scan_token(c);
        }

        self.tokens.push(Token::new(TokenKind::Eof, String::new(), None, self.line));

        (self.tokens, self.errors)
    }

    /// Consumes and returns the next character.
    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c.is_some() {
            self.current += 1;
        }
        c
    }

    /// Looks at the next character without consuming it.
    fn peek(&mut self) -> Option<char> {
        self.chars.reset_cursor();
        self.chars.peek().copied()
    }

    /// Looks two characters ahead without consuming anything.
    fn peek_second(&mut self) -> Option<char> {
        self.chars.reset_cursor();
        let c = self.chars.peek_next().copied();
        self.chars.reset_cursor();
        c
    }

    /// Consumes the next character if it matches `expected`.
    fn advance_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            return true;
        }
        false
    }

    /// The source slice of the token currently being scanned.
    fn lexeme(&self) -> &str {
        self.source.substring(self.start, self.current)
    }

    fn add_token(&mut self, kind: TokenKind, literal: Option<Literal>) {
        let lexeme = self.lexeme().to_string();
        self.tokens.push(Token::new(kind, lexeme, literal, self.line));
    }

    fn error(&mut self, line: usize, message: impl Into<String>) {
        self.errors.push(ScanError { line, message: message.into() });
    }

    fn scan_token(&mut self, c: char) {
        match c {
            '(' => self.add_token(TokenKind::LeftParen, None),
            ')' => self.add_token(TokenKind::RightParen, None),
            '{' => self.add_token(TokenKind::LeftBrace, None),
            '}' => self.add_token(TokenKind::RightBrace, None),
            ',' => self.add_token(TokenKind::Comma, None),
            '.' => self.add_token(TokenKind::Dot, None),
            '-' => self.add_token(TokenKind::Minus, None),
            '+' => self.add_token(TokenKind::Plus, None),
            ';' => self.add_token(TokenKind::Semicolon, None),
            '*' => self.add_token(TokenKind::Star, None),

            '!' => {
                let kind = if self.advance_if('=') { TokenKind::BangEqual } else { TokenKind::Bang };
                self.add_token(kind, None);
            }
            '=' => {
                let kind = if self.advance_if('=') { TokenKind::EqualEqual } else { TokenKind::Equal };
                self.add_token(kind, None);
            }
            '<' => {
                let kind = if self.advance_if('=') { TokenKind::LessEqual } else { TokenKind::Less };
                self.add_token(kind, None);
            }
            '>' => {
                let kind = if self.advance_if('=') { TokenKind::GreaterEqual } else { TokenKind::Greater };
                self.add_token(kind, None);
            }

            '/' => {
                if self.advance_if('/') {
                    // A comment runs up to, but not including, the newline;
                    // the main loop counts the line break.
                    while self.peek().map_or(false, |c| c != '\n') {
                        self.advance();
                    }
                } else {
                    self.add_token(TokenKind::Slash, None);
                }
            }

            ' ' | '\r' | '\t' => {}

            '\n' => self.line += 1,

            '"' => self.string(),

            c if c.is_ascii_digit() => self.number(),

            c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),

            _ => self.error(self.line, format!("Unexpected character '{c}'.")),
        }
    }

    /// Scans a string literal. The opening quote has been consumed.
    ///
    /// Strings may span lines. The only escapes are `\"` and `\\`; any
    /// other backslash is kept verbatim.
    fn string(&mut self) {
        let opening_line = self.line;
        let mut value = String::new();

        loop {
            match self.advance() {
                None => {
                    self.error(opening_line, "Unterminated string.");
                    return;
                }
                Some('"') => break,
                Some('\\') => match self.peek() {
                    Some('"') => {
                        self.advance();
                        value.push('"');
                    }
                    Some('\\') => {
                        self.advance();
                        value.push('\\');
                    }
                    _ => value.push('\\'),
                },
                Some('\n') => {
                    self.line += 1;
                    value.push('\n');
                }
                Some(c) => value.push(c),
            }
        }

        // The literal carries the decoded text; the lexeme keeps the quotes.
        self.add_token(TokenKind::String, Some(Literal::String(value)));
    }

    /// Scans a number literal. The first digit has been consumed.
    ///
    /// A decimal point is only part of the number when a digit follows it,
    /// so `123.` scans as the number `123` followed by a `.` token.
    fn number(&mut self) {
        while self.peek().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_second().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();

            while self.peek().map_or(false, |c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let value: f64 = self.lexeme().parse().expect("scanned digits form a valid number");
        self.add_token(TokenKind::Number, Some(Literal::Number(value)));
    }

    /// Scans an identifier or keyword. The first character has been consumed.
    fn identifier(&mut self) {
        while self.peek().map_or(false, |c| c.is_ascii_alphanumeric() || c == '_') {
            self.advance();
        }

        let kind = match self.lexeme() {
            "and" => TokenKind::And,
            "class" => TokenKind::Class,
            "else" => TokenKind::Else,
            "false" => TokenKind::False,
            "for" => TokenKind::For,
            "fun" => TokenKind::Fun,
            "if" => TokenKind::If,
            "nil" => TokenKind::Nil,
            "or" => TokenKind::Or,
            "print" => TokenKind::Print,
            "return" => TokenKind::Return,
            "super" => TokenKind::Super,
            "this" => TokenKind::This,
            "true" => TokenKind::True,
            "var" => TokenKind::Var,
            "while" => TokenKind::While,
            _ => TokenKind::Identifier,
        };

        self.add_token(kind, None);
    }
}
