//! # Introduction
//!
//! cexparse is the expression front-end of a C compiler: it turns source
//! text (or a pre-lexed token stream) into an abstract syntax tree that
//! encodes the grammar, precedence, and associativity of the C expression
//! language, from primary expressions up through the comma operator.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → Expr tree → eval / gen
//! ```
//!
//! 1. [`lexer`] — tokenises expression source text.
//! 2. [`parser`] — recursive descent with precedence climbing; builds one
//!    [`ast::Expr`] tree per expression, or fails with a positioned
//!    syntax error and no partial tree.
//! 3. [`eval`] — constant folding over finished trees; fails with "not a
//!    constant expression" instead of guessing.
//! 4. [`gen`] — the code generation contract; no backend is attached yet.
//!
//! [`types`] is the seam to the type layer: the parser asks it whether an
//! identifier names a type when disambiguating casts and compound literals
//! from parenthesized expressions, and stores the opaque descriptors it
//! mints.
//!
//! ## Scope
//!
//! Statements, declarations, preprocessing, and type resolution are the
//! enclosing compiler's business. Trees are immutable after construction
//! and exclusively owned; independent parses may run on separate threads.
//!
//! ```
//! use cexparse::parser::parse::Parser;
//! use cexparse::types::TypeTable;
//!
//! let types = TypeTable::with_builtins();
//! let expr = Parser::parse_all("(int)x + 2 * 3", &types).unwrap();
//! assert!(expr.eval().is_err()); // 'x' is not a constant
//! ```

pub mod ast;
pub mod eval;
pub mod gen;
pub mod lexer;
pub mod parser;
pub mod types;
