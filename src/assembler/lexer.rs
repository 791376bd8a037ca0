//! This lexer scans DCPU-16 source text.
//!
//! Unlike a classic tokenizer it does not produce a token stream: each
//! scanning function looks at the input starting from a byte offset and
//! reports what it found there, leaving the choice of rule to the parser.
use regex::Regex;

use super::error::{Construct, ErrorKind, ParseError, SourceLocation};
use super::parser::Parsed;

#[derive(Copy, Clone, Debug)]
pub struct Lexer<'a> {
    /// Input string to process.
    src: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Lexer { src }
    }

    /// The input from `pos` onwards. Offsets past the end yield "".
    fn rest(&self, pos: usize) -> &'a str {
        self.src.get(pos..).unwrap_or("")
    }

    pub fn is_at_end(&self, pos: usize) -> bool {
        pos >= self.src.len()
    }

    pub fn peek(&self, pos: usize) -> Option<char> {
        self.rest(pos).chars().next()
    }

    pub fn starts_with(&self, pos: usize, c: char) -> bool {
        self.peek(pos) == Some(c)
    }

    /// Skips whitespace (newlines included) and `;` comments.
    /// Returns the offset of the first significant character.
    pub fn skip_trivia(&self, pos: usize) -> usize {
        lazy_static! {
            static ref TRIVIA: Regex = Regex::new(r"^(?:\s|;[^\n]*)*").unwrap();
        }
        TRIVIA.find(self.rest(pos)).map_or(pos, |m| pos + m.end())
    }

    /// Matches a letter followed by any run of letters and digits.
    pub fn identifier(&self, pos: usize) -> Option<&'a str> {
        lazy_static! {
            static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9]*").unwrap();
        }
        IDENTIFIER.find(self.rest(pos)).map(|m| m.as_str())
    }

    /// Matches a non-empty run of letters and digits, as used by label names.
    pub fn word(&self, pos: usize) -> Option<&'a str> {
        lazy_static! {
            static ref WORD: Regex = Regex::new(r"^[A-Za-z0-9]+").unwrap();
        }
        WORD.find(self.rest(pos)).map(|m| m.as_str())
    }

    /// Matches a 16-bit numeric literal, hexadecimal (`0x` prefix) or decimal.
    ///
    /// The hexadecimal form must be tried first: its leading `0` is also a
    /// valid decimal literal.
    pub fn number(&self, pos: usize) -> Parsed<u16> {
        lazy_static! {
            static ref HEX_LITERAL: Regex = Regex::new(r"^0x[A-Za-z0-9]*").unwrap();
            static ref DECIMAL_LITERAL: Regex = Regex::new(r"^[0-9]+").unwrap();
        }
        let rest = self.rest(pos);

        if let Some(m) = HEX_LITERAL.find(rest) {
            let literal = m.as_str();
            let digits = &literal[2..];
            if digits.is_empty() {
                return Parsed::Failed(self.unexpected(pos + 2, "hexadecimal digits after `0x`"));
            }
            if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
                return Parsed::Failed(self.error(pos, ErrorKind::InvalidHexDigit(literal.to_owned())));
            }
            // Only overflow is left once every digit is known to be valid.
            return match u16::from_str_radix(digits, 16) {
                Ok(value) => Parsed::Matched(value, pos + literal.len()),
                Err(_) => Parsed::Failed(self.error(pos, ErrorKind::NumericRange(literal.to_owned()))),
            };
        }

        if let Some(m) = DECIMAL_LITERAL.find(rest) {
            let literal = m.as_str();
            return match literal.parse::<u16>() {
                Ok(value) => Parsed::Matched(value, pos + literal.len()),
                Err(_) => Parsed::Failed(self.error(pos, ErrorKind::NumericRange(literal.to_owned()))),
            };
        }

        Parsed::NoMatch
    }

    /// Matches a double-quoted string literal on a single line. The quotes are
    /// not part of the returned text and no escapes are recognised.
    pub fn string_literal(&self, pos: usize) -> Parsed<&'a str> {
        lazy_static! {
            static ref STRING_LITERAL: Regex = Regex::new(r#"^"[^"\n]*""#).unwrap();
        }
        if !self.starts_with(pos, '"') {
            return Parsed::NoMatch;
        }
        match STRING_LITERAL.find(self.rest(pos)) {
            Some(m) => {
                let text = m.as_str();
                Parsed::Matched(&text[1..text.len() - 1], pos + m.end())
            }
            None => {
                // The closing quote was expected at the end of the line.
                let body = &self.rest(pos)[1..];
                let end = pos + 1 + body.find('\n').unwrap_or_else(|| body.len());
                Parsed::Failed(self.error(end, ErrorKind::Unterminated {
                    construct: Construct::StringLiteral,
                    expected: "closing `\"` before end of line",
                }))
            }
        }
    }

    /// Human readable description of the character at `pos`.
    pub fn describe(&self, pos: usize) -> String {
        match self.peek(pos) {
            None => "end of input".to_owned(),
            Some('\n') => "newline".to_owned(),
            Some(c) => format!("`{}`", c),
        }
    }

    pub fn location(&self, pos: usize) -> SourceLocation {
        SourceLocation::locate(self.src, pos)
    }

    pub fn error(&self, pos: usize, kind: ErrorKind) -> ParseError {
        ParseError::new(kind, self.location(pos))
    }

    /// A lexical failure: `expected` was wanted but something else was found.
    pub fn unexpected(&self, pos: usize, expected: &'static str) -> ParseError {
        self.error(pos, ErrorKind::Unexpected { expected, found: self.describe(pos) })
    }
}
