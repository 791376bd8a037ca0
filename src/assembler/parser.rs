//! The Parser module walks the source text with the Lexer
//! and converts it into an AST.
//!
//! ```text
//! program     ::= { label | statement }
//! label       ::= ":" word
//! statement   ::= data | binary | unary
//! data        ::= "dat" WS item { "," item }
//! item        ::= string | number
//! binary      ::= mnemonic WS expression "," expression
//! unary       ::= mnemonic WS expression
//! expression  ::= address_of | sum
//! address_of  ::= "[" sum "]"
//! sum         ::= base [ "+" base ]
//! base        ::= identifier | number
//! ```
//!
//! Every rule either consumes input or fails, and alternatives are tried in
//! the order listed. A rule that has consumed input and then fails reports
//! its failure instead of letting the next alternative run.
use super::ast::*;
use super::error::{Construct, ErrorKind, ParseError};
use super::lexer::Lexer;
use super::mnemonic::{self, Arity};

/// Outcome of a single grammar rule at some offset.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Parsed<T> {
    /// The rule matched; the second field is the offset just past the match.
    Matched(T, usize),
    /// The rule does not apply here and consumed nothing.
    NoMatch,
    /// The rule committed to the input and then hit an error.
    Failed(ParseError),
}

impl<T> Parsed<T> {
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Parsed<U> {
        match self {
            Parsed::Matched(value, next) => Parsed::Matched(f(value), next),
            Parsed::NoMatch => Parsed::NoMatch,
            Parsed::Failed(err) => Parsed::Failed(err),
        }
    }

    /// Ordered choice: `f` only runs when this rule did not apply at all.
    pub fn or_else<F: FnOnce() -> Parsed<T>>(self, f: F) -> Parsed<T> {
        match self {
            Parsed::NoMatch => f(),
            other => other,
        }
    }

    /// Turns a missing match into the error built by `f`.
    pub fn required<F: FnOnce() -> ParseError>(self, f: F) -> Result<(T, usize), ParseError> {
        match self {
            Parsed::Matched(value, next) => Ok((value, next)),
            Parsed::NoMatch => Err(f()),
            Parsed::Failed(err) => Err(err),
        }
    }
}

impl<T> From<Result<(T, usize), ParseError>> for Parsed<T> {
    fn from(result: Result<(T, usize), ParseError>) -> Self {
        match result {
            Ok((value, next)) => Parsed::Matched(value, next),
            Err(err) => Parsed::Failed(err),
        }
    }
}

type RuleResult<T> = Result<(T, usize), ParseError>;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a str) -> Self {
        Parser { lexer: Lexer::new(src) }
    }

    /// Parses the whole input as a sequence of statements.
    pub fn program(&self) -> Result<Program, ParseError> {
        let mut statements = Vec::new();
        let mut pos = self.lexer.skip_trivia(0);

        while !self.lexer.is_at_end(pos) {
            let (statement, next) = self.line(pos)
                .required(|| self.lexer.unexpected(pos, "a label, instruction or data directive"))?;
            let next = self.boundary(next)?;
            trace!("{}: {}", self.lexer.location(pos), statement);
            statements.push(statement);
            pos = self.lexer.skip_trivia(next);
        }

        debug!("parsed {} statement(s)", statements.len());
        Ok(Program::new(statements))
    }

    /// Parses exactly one statement, optionally surrounded by trivia.
    pub fn statement(&self) -> Result<Statement, ParseError> {
        let pos = self.lexer.skip_trivia(0);
        let (statement, next) = self.line(pos)
            .required(|| self.lexer.unexpected(pos, "a label, instruction or data directive"))?;
        let next = self.lexer.skip_trivia(self.boundary(next)?);
        self.end_of_input(next)?;
        Ok(statement)
    }

    /// Parses exactly one expression covering the whole input.
    pub fn expression(&self) -> Result<Expression, ParseError> {
        let (expression, next) = self.operand(0)?;
        self.end_of_input(next)?;
        Ok(expression)
    }

    fn end_of_input(&self, pos: usize) -> Result<(), ParseError> {
        if self.lexer.is_at_end(pos) {
            Ok(())
        } else {
            Err(self.lexer.error(pos, ErrorKind::TrailingInput { found: self.lexer.describe(pos) }))
        }
    }

    /// A statement must be followed by whitespace, a comment or the end of input.
    fn boundary(&self, pos: usize) -> Result<usize, ParseError> {
        match self.lexer.peek(pos) {
            None => Ok(pos),
            Some(c) if c.is_whitespace() || c == ';' => Ok(pos),
            Some(_) => Err(self.lexer.error(pos, ErrorKind::TrailingInput { found: self.lexer.describe(pos) })),
        }
    }

    fn line(&self, pos: usize) -> Parsed<Statement> {
        self.label(pos).or_else(|| self.generic_statement(pos))
    }

    fn label(&self, pos: usize) -> Parsed<Statement> {
        if !self.lexer.starts_with(pos, ':') {
            return Parsed::NoMatch;
        }
        match self.lexer.word(pos + 1) {
            Some(name) => Parsed::Matched(Statement::Label { name: name.to_owned() }, pos + 1 + name.len()),
            None => Parsed::Failed(self.lexer.unexpected(pos + 1, "a label name")),
        }
    }

    fn generic_statement(&self, pos: usize) -> Parsed<Statement> {
        self.data_directive(pos)
            .or_else(|| self.instruction(pos, Arity::Binary))
            .or_else(|| self.instruction(pos, Arity::Unary))
            .or_else(|| self.unknown_word(pos))
    }

    /// Requires at least one whitespace character or comment at `pos`.
    fn whitespace(&self, pos: usize, expected: &'static str) -> Result<usize, ParseError> {
        let next = self.lexer.skip_trivia(pos);
        if next == pos {
            Err(self.lexer.unexpected(pos, expected))
        } else {
            Ok(next)
        }
    }

    // MARK: - Data directives

    fn data_directive(&self, pos: usize) -> Parsed<Statement> {
        match self.lexer.identifier(pos) {
            Some(word) if word.eq_ignore_ascii_case(mnemonic::DAT) => self.data_items(pos + word.len()).into(),
            _ => Parsed::NoMatch,
        }
    }

    fn data_items(&self, pos: usize) -> RuleResult<Statement> {
        let mut pos = self.whitespace(pos, "whitespace after `dat`")?;
        let mut items = Vec::new();

        loop {
            let (item, next) = self.data_item(pos).required(|| {
                if items.is_empty() {
                    self.lexer.unexpected(pos, "a string or numeric data item")
                } else {
                    // A trailing `,` leaves the list open.
                    self.lexer.error(pos, ErrorKind::Unterminated {
                        construct: Construct::DataList,
                        expected: "a data item after `,`",
                    })
                }
            })?;
            items.push(item);

            // Trivia after the last item belongs to the program, not to the directive.
            let comma = self.lexer.skip_trivia(next);
            if !self.lexer.starts_with(comma, ',') {
                return Ok((Statement::DataDirective { items }, next));
            }
            pos = self.lexer.skip_trivia(comma + 1);
        }
    }

    fn data_item(&self, pos: usize) -> Parsed<DataItem> {
        self.lexer.string_literal(pos)
            .map(|text| DataItem::StringLiteral(text.to_owned()))
            .or_else(|| self.lexer.number(pos).map(DataItem::NumericValue))
    }

    // MARK: - Instructions

    /// A three letter word from the mnemonic table of the given arity.
    fn mnemonic(&self, pos: usize, arity: Arity) -> Option<&'a str> {
        self.lexer.identifier(pos)
            .filter(|word| word.len() == 3 && word.chars().all(|c| c.is_ascii_alphabetic()))
            .filter(|word| mnemonic::arity(word) == Some(arity))
    }

    fn instruction(&self, pos: usize, arity: Arity) -> Parsed<Statement> {
        match self.mnemonic(pos, arity) {
            Some(name) => self.operands(name, pos + name.len(), arity).into(),
            None => Parsed::NoMatch,
        }
    }

    fn operands(&self, name: &str, pos: usize, arity: Arity) -> RuleResult<Statement> {
        let pos = self.whitespace(pos, "whitespace after mnemonic")?;
        let mnemonic = name.to_owned();

        match arity {
            Arity::Unary => {
                let (operand, next) = self.operand(pos)?;
                Ok((Statement::UnaryInstruction { mnemonic, operand }, next))
            }
            Arity::Binary => {
                let (destination, next) = self.operand(pos)?;
                let comma = self.lexer.skip_trivia(next);
                if !self.lexer.starts_with(comma, ',') {
                    return Err(self.lexer.unexpected(comma, "`,` between operands"));
                }
                let (source, next) = self.operand(self.lexer.skip_trivia(comma + 1))?;
                Ok((Statement::BinaryInstruction { mnemonic, destination, source }, next))
            }
        }
    }

    /// Reports words in mnemonic position that no statement rule accepted.
    fn unknown_word(&self, pos: usize) -> Parsed<Statement> {
        match self.lexer.identifier(pos) {
            Some(word) if word.len() == 3 && word.chars().all(|c| c.is_ascii_alphabetic()) => {
                Parsed::Failed(self.lexer.error(pos, ErrorKind::UnknownMnemonic(word.to_owned())))
            }
            Some(_) => Parsed::Failed(self.lexer.unexpected(pos, "a three-letter mnemonic")),
            None => Parsed::NoMatch,
        }
    }

    // MARK: - Expressions

    fn operand(&self, pos: usize) -> RuleResult<Expression> {
        self.expression_at(pos).required(|| self.lexer.unexpected(pos, "an operand"))
    }

    fn expression_at(&self, pos: usize) -> Parsed<Expression> {
        self.address_of(pos).or_else(|| self.sum(pos))
    }

    fn address_of(&self, pos: usize) -> Parsed<Expression> {
        if !self.lexer.starts_with(pos, '[') {
            return Parsed::NoMatch;
        }
        self.address_of_inner(pos + 1).into()
    }

    fn address_of_inner(&self, pos: usize) -> RuleResult<Expression> {
        let (inner, next) = self.sum(pos).required(|| self.unclosed_bracket(pos, "an identifier or number after `[`"))?;
        if !self.lexer.starts_with(next, ']') {
            return Err(self.lexer.error(next, ErrorKind::Unterminated {
                construct: Construct::AddressOf,
                expected: "`]`",
            }));
        }
        Ok((Expression::address_of(inner), next + 1))
    }

    fn unclosed_bracket(&self, pos: usize, expected: &'static str) -> ParseError {
        if self.lexer.is_at_end(pos) || self.lexer.starts_with(pos, '\n') {
            self.lexer.error(pos, ErrorKind::Unterminated { construct: Construct::AddressOf, expected })
        } else {
            self.lexer.unexpected(pos, expected)
        }
    }

    /// A base expression, optionally followed by `+` and a second one.
    fn sum(&self, pos: usize) -> Parsed<Expression> {
        match self.base(pos) {
            Parsed::Matched(left, next) if self.lexer.starts_with(next, '+') => self.sum_right(left, next + 1).into(),
            other => other,
        }
    }

    fn sum_right(&self, left: Expression, pos: usize) -> RuleResult<Expression> {
        let (right, next) = self.base(pos)
            .required(|| self.lexer.unexpected(pos, "an identifier or number after `+`"))?;
        if self.lexer.starts_with(next, '+') {
            return Err(self.lexer.unexpected(next, "end of expression (sums take exactly two terms)"));
        }
        Ok((Expression::sum(left, right), next))
    }

    fn base(&self, pos: usize) -> Parsed<Expression> {
        match self.lexer.identifier(pos) {
            Some(name) => Parsed::Matched(Expression::identifier(name), pos + name.len()),
            None => self.lexer.number(pos).map(Expression::NumericLiteral),
        }
    }
}
