//! Front end for a DCPU-16 style assembler: turns source text into an
//! ordered list of statements. Encoding and linking live elsewhere.
#[macro_use] extern crate log;
#[macro_use] extern crate lazy_static;

pub mod assembler;

pub use assembler::{parse, parse_expression, parse_statement};
