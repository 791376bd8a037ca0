//! Parse failures. Every failure carries the location it occurred at and
//! aborts the whole parse.
use std::fmt;

use thiserror::Error;

/// A position in the source text.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct SourceLocation {
    /// Offset from the start of input, in bytes.
    pub offset: usize,
    /// Line number, starting at 1.
    pub line: usize,
    /// Column within the line in characters, starting at 1.
    pub column: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl SourceLocation {
    /// Locates a byte offset within `src`. Offsets past the end clamp to the end.
    pub fn locate(src: &str, offset: usize) -> Self {
        let mut offset = offset.min(src.len());
        while !src.is_char_boundary(offset) {
            offset -= 1;
        }
        let before = &src[..offset];
        let line = before.matches('\n').count() + 1;
        let column = before.rsplit('\n').next().unwrap_or("").chars().count() + 1;
        SourceLocation { offset, line, column }
    }
}

/// Constructs that must be closed once opened.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Construct {
    StringLiteral,
    AddressOf,
    DataList,
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Construct::StringLiteral => write!(f, "string literal"),
            Construct::AddressOf     => write!(f, "address-of expression"),
            Construct::DataList      => write!(f, "data list"),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum ErrorKind {
    /// No rule matched at this position.
    #[error("expected {expected}, found {found}")]
    Unexpected { expected: &'static str, found: String },

    #[error("numeric literal `{0}` does not fit in 16 bits (expected 0..=65535)")]
    NumericRange(String),

    #[error("hexadecimal literal `{0}` contains a non-hex digit")]
    InvalidHexDigit(String),

    #[error("unknown mnemonic `{0}`")]
    UnknownMnemonic(String),

    #[error("unterminated {construct}: expected {expected}")]
    Unterminated { construct: Construct, expected: &'static str },

    #[error("unexpected trailing input: found {found}")]
    TrailingInput { found: String },
}

#[derive(Clone, PartialEq, Eq, Debug, Error)]
#[error("{location}: {kind}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub location: SourceLocation,
}

impl ParseError {
    pub fn new(kind: ErrorKind, location: SourceLocation) -> Self {
        ParseError { kind, location }
    }

    /// Byte offset of the failure.
    pub fn offset(&self) -> usize {
        self.location.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate() {
        let src = "set a, 1\n  add b, 2\n";
        assert_eq!(SourceLocation::locate(src, 0), SourceLocation { offset: 0, line: 1, column: 1 });
        assert_eq!(SourceLocation::locate(src, 4), SourceLocation { offset: 4, line: 1, column: 5 });
        assert_eq!(SourceLocation::locate(src, 9), SourceLocation { offset: 9, line: 2, column: 1 });
        assert_eq!(SourceLocation::locate(src, 11), SourceLocation { offset: 11, line: 2, column: 3 });
        assert_eq!(SourceLocation::locate(src, 500), SourceLocation { offset: 20, line: 3, column: 1 });
        assert_eq!(SourceLocation::locate("", 0), SourceLocation { offset: 0, line: 1, column: 1 });
    }

    #[test]
    fn test_locate_multibyte() {
        // 'é' is two bytes but one column.
        let src = "dat \"é\", x";
        assert_eq!(SourceLocation::locate(src, 9).column, 9);
        assert_eq!(SourceLocation::locate(src, 6).offset, 5);
    }

    #[test]
    fn test_display() {
        let err = ParseError::new(
            ErrorKind::UnknownMnemonic("xyz".to_owned()),
            SourceLocation { offset: 12, line: 3, column: 4 },
        );
        assert_eq!(err.to_string(), "3:4: unknown mnemonic `xyz`");
        assert_eq!(err.offset(), 12);

        let err = ParseError::new(
            ErrorKind::Unterminated { construct: Construct::AddressOf, expected: "`]`" },
            SourceLocation { offset: 0, line: 1, column: 1 },
        );
        assert_eq!(err.to_string(), "1:1: unterminated address-of expression: expected `]`");

        let err = ParseError::new(
            ErrorKind::NumericRange("0x10000".to_owned()),
            SourceLocation { offset: 0, line: 1, column: 1 },
        );
        assert_eq!(err.to_string(), "1:1: numeric literal `0x10000` does not fit in 16 bits (expected 0..=65535)");
    }
}
