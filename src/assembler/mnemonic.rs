//! The fixed DCPU-16 mnemonic tables.
use std::collections::HashSet;

/// Number of operands an instruction takes.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Arity {
    Unary,
    Binary,
}

lazy_static! {
    static ref BINARY: HashSet<&'static str> = [
        "SET", "ADD", "SUB", "MUL", "MLI", "DIV", "DVI", "MOD", "MDI",
        "AND", "BOR", "XOR", "SHR", "ASR", "SHL",
        "IFB", "IFC", "IFE", "IFN", "IFG", "IFA", "IFL", "IFU",
        "ADX", "SBX", "STI", "STD",
    ].iter().cloned().collect();

    static ref UNARY: HashSet<&'static str> = [
        "JSR", "INT", "IAG", "IAS", "RFI", "IAQ", "HWN", "HWQ", "HWI",
    ].iter().cloned().collect();
}

/// The data directive keyword. Not a mnemonic of either table.
pub const DAT: &str = "DAT";

/// Looks up a mnemonic, ignoring case.
pub fn arity(mnemonic: &str) -> Option<Arity> {
    let upper = mnemonic.to_ascii_uppercase();
    if BINARY.contains(upper.as_str()) {
        Some(Arity::Binary)
    } else if UNARY.contains(upper.as_str()) {
        Some(Arity::Unary)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity() {
        assert_eq!(arity("SET"), Some(Arity::Binary));
        assert_eq!(arity("set"), Some(Arity::Binary));
        assert_eq!(arity("IfE"), Some(Arity::Binary));
        assert_eq!(arity("std"), Some(Arity::Binary));
        assert_eq!(arity("JSR"), Some(Arity::Unary));
        assert_eq!(arity("hwi"), Some(Arity::Unary));

        assert_eq!(arity("xyz"), None);
        assert_eq!(arity("dat"), None);
        assert_eq!(arity("SE"), None);
        assert_eq!(arity("SETX"), None);
        assert_eq!(arity(""), None);
    }

    #[test]
    fn test_tables_are_disjoint() {
        assert_eq!(BINARY.len(), 27);
        assert_eq!(UNARY.len(), 9);
        assert!(BINARY.is_disjoint(&*UNARY));
        assert!(!BINARY.contains(DAT) && !UNARY.contains(DAT));
        for m in BINARY.iter().chain(UNARY.iter()) {
            assert_eq!(m.len(), 3);
            assert!(m.chars().all(|c| c.is_ascii_uppercase()));
        }
    }
}
