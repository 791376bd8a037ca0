//! The Assembler module is in charge of taking a
//! DCPU-16 source file and producing a Program from the
//! AST submodule.
//!
//! It does this with a character-level scanner and an
//! ordered-choice recursive descent parser.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod mnemonic;
pub mod parser;

use self::ast::{Expression, Program, Statement};
use self::error::ParseError;

/// Parses a complete source file. The whole input must be consumed.
pub fn parse(src: &str) -> Result<Program, ParseError> {
    parser::Parser::new(src).program()
}

/// Parses a single statement, allowing surrounding whitespace and comments.
pub fn parse_statement(src: &str) -> Result<Statement, ParseError> {
    parser::Parser::new(src).statement()
}

/// Parses a single operand expression spanning the whole input.
pub fn parse_expression(src: &str) -> Result<Expression, ParseError> {
    parser::Parser::new(src).expression()
}
