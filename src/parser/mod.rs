//! C expression parser
//!
//! This module transforms a token stream into an expression tree:
//! - [`parse`]: Parser struct, helper methods, and error types
//! - [`expressions`]: one parse method per grammar production
//!
//! # Supported Grammar
//!
//! The full C expression grammar, primary through comma/assignment:
//! - Primary: literals, identifiers, parenthesized expressions
//! - Postfix chains: `[]`, `.`, `->`, `()`, `++`, `--`
//! - Prefix unary: `& * + - ~ ! ++ --`
//! - Casts and compound literals: `(type)expr`, `(type){ ... }`
//! - The ten binary arithmetic levels, `&&`, `||`, `? :`
//! - The full assignment operator family and the comma operator
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent with precedence climbing for the binary
//! arithmetic band. One token of lookahead, no backtracking; the cast vs.
//! parenthesized-expression ambiguity is resolved by asking the
//! [type layer](crate::types) whether the identifier after `(` names a type.

pub mod expressions;
pub mod parse;
