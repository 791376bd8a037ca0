//! This AST describes a parsed DCPU-16 source file (no preprocessor functions).
//!
//! Statements appear in the order they were written; that order is the
//! emission order for the encoder.
//! Comments are prefixed with semicolons (;) and are single-line only.
//! Mnemonics and the `dat` keyword are case-insensitive, identifiers are not.
//!
//! Supported statement shapes:
//!
//! ```nasm
//! :label              ; Declares a position named `label`
//! SET b, a            ; Binary instruction, b is the destination
//! JSR a               ; Unary instruction
//! DAT "text", 0x20, 0 ; Raw data, strings and 16-bit values
//! ```
//!
//! Operands:
//!
//! ```nasm
//! set a, 12          ; decimal
//! set a, 0x1000      ; hexadecimal
//! set a, loop        ; identifier (register or label)
//! set [0x8000+i], a  ; address-of, with an optional two-term sum inside
//! ```

use std::fmt;

/// An instruction operand.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Expression {
    /// A register or label reference.
    Identifier(String),
    NumericLiteral(u16),
    /// The memory location computed by the inner expression.
    AddressOf(Box<Expression>),
    /// Exactly two terms; longer sums are rejected by the parser.
    Sum(Box<Expression>, Box<Expression>),
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Expression::*;
        match self {
            Identifier(name)   => write!(f, "{}", name),
            NumericLiteral(n)  => write!(f, "0x{:04x}", n),
            AddressOf(inner)   => write!(f, "[{}]", inner),
            Sum(left, right)   => write!(f, "{}+{}", left, right),
        }
    }
}

impl Expression {
    pub fn identifier<S: Into<String>>(name: S) -> Self {
        Expression::Identifier(name.into())
    }

    pub fn address_of(inner: Expression) -> Self {
        Expression::AddressOf(Box::new(inner))
    }

    pub fn sum(left: Expression, right: Expression) -> Self {
        Expression::Sum(Box::new(left), Box::new(right))
    }
}

/// One element of a `dat` directive.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum DataItem {
    /// Raw text between double quotes. Escapes are not processed.
    StringLiteral(String),
    NumericValue(u16),
}

impl fmt::Display for DataItem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DataItem::StringLiteral(text) => write!(f, "\"{}\"", text),
            DataItem::NumericValue(n)     => write!(f, "0x{:04x}", n),
        }
    }
}

impl DataItem {
    /// Number of words the encoder reserves for this item.
    /// Strings take one word per character (not byte) plus one.
    pub fn word_len(&self) -> usize {
        match self {
            DataItem::StringLiteral(text) => 1 + text.chars().count(),
            DataItem::NumericValue(_)     => 1,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Statement {
    Label {
        name: String,
    },
    UnaryInstruction {
        mnemonic: String,
        operand: Expression,
    },
    /// `mnemonic destination, source`. The destination is the `b` operand
    /// and the source the `a` operand in DCPU-16 terms.
    BinaryInstruction {
        mnemonic: String,
        destination: Expression,
        source: Expression,
    },
    DataDirective {
        items: Vec<DataItem>,
    },
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Statement::*;
        match self {
            Label { name } => write!(f, ":{}", name),
            UnaryInstruction { mnemonic, operand } => write!(f, "{} {}", mnemonic, operand),
            BinaryInstruction { mnemonic, destination, source } => {
                write!(f, "{} {}, {}", mnemonic, destination, source)
            }
            DataDirective { items } => {
                write!(f, "dat ")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

impl Statement {
    /// Short name of the statement shape, used in listings.
    pub fn kind(&self) -> &'static str {
        match self {
            Statement::Label { .. }             => "label",
            Statement::UnaryInstruction { .. }  => "unary",
            Statement::BinaryInstruction { .. } => "binary",
            Statement::DataDirective { .. }     => "data",
        }
    }

    /// Total word length of a data directive. Instruction lengths depend on
    /// operand encoding and are left to the encoder.
    pub fn data_word_len(&self) -> Option<usize> {
        match self {
            Statement::DataDirective { items } => Some(items.iter().map(DataItem::word_len).sum()),
            _ => None,
        }
    }
}

/// A parsed source file. Statements are kept in source order and are never
/// modified after parsing.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Program {
    statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Program { statements }
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn into_statements(self) -> Vec<Statement> {
        self.statements
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for statement in &self.statements {
            writeln!(f, "{}", statement)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_expression() {
        assert_eq!(Expression::identifier("a").to_string(), "a");
        assert_eq!(Expression::NumericLiteral(0xbeef).to_string(), "0xbeef");
        assert_eq!(Expression::NumericLiteral(1).to_string(), "0x0001");
        assert_eq!(
            Expression::address_of(Expression::sum(
                Expression::NumericLiteral(0x8000),
                Expression::identifier("i"),
            )).to_string(),
            "[0x8000+i]"
        );
        assert_eq!(Expression::address_of(Expression::identifier("data")).to_string(), "[data]");
    }

    #[test]
    fn test_display_statement() {
        let label = Statement::Label { name: "loop".to_owned() };
        assert_eq!(label.to_string(), ":loop");

        let unary = Statement::UnaryInstruction {
            mnemonic: "jsr".to_owned(),
            operand: Expression::identifier("print"),
        };
        assert_eq!(unary.to_string(), "jsr print");

        let binary = Statement::BinaryInstruction {
            mnemonic: "SET".to_owned(),
            destination: Expression::identifier("PC"),
            source: Expression::identifier("end"),
        };
        assert_eq!(binary.to_string(), "SET PC, end");

        let data = Statement::DataDirective {
            items: vec![
                DataItem::StringLiteral("Hello world!".to_owned()),
                DataItem::NumericValue(0),
            ],
        };
        assert_eq!(data.to_string(), "dat \"Hello world!\", 0x0000");
    }

    #[test]
    fn test_display_program() {
        let program = Program::new(vec![
            Statement::Label { name: "end".to_owned() },
            Statement::BinaryInstruction {
                mnemonic: "sub".to_owned(),
                destination: Expression::identifier("PC"),
                source: Expression::NumericLiteral(1),
            },
        ]);
        assert_eq!(program.to_string(), ":end\nsub PC, 0x0001\n");
        assert_eq!(Program::default().to_string(), "");
    }

    #[test]
    fn test_word_len() {
        assert_eq!(DataItem::NumericValue(0xFFFF).word_len(), 1);
        assert_eq!(DataItem::StringLiteral(String::new()).word_len(), 1);
        assert_eq!(DataItem::StringLiteral("Hi".to_owned()).word_len(), 3);
        assert_eq!(DataItem::StringLiteral("é".to_owned()).word_len(), 2);

        let data = Statement::DataDirective {
            items: vec![
                DataItem::StringLiteral("Hello world!".to_owned()),
                DataItem::NumericValue(0),
            ],
        };
        assert_eq!(data.data_word_len(), Some(14));
        assert_eq!(Statement::Label { name: "a".to_owned() }.data_word_len(), None);
    }

    #[test]
    fn test_program_preserves_order() {
        let statements: Vec<Statement> = (0..16)
            .map(|i| Statement::Label { name: format!("l{}", i) })
            .collect();
        let program = Program::new(statements.clone());
        assert_eq!(program.len(), 16);
        assert_eq!(program.statements(), statements.as_slice());
        assert_eq!(program.iter().cloned().collect::<Vec<_>>(), statements);
        assert_eq!(program.into_statements(), statements);
    }
}
