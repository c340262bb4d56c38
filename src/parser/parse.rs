//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing
//! infrastructure: error types, token-window helpers, and the session
//! entry points. The grammar productions themselves live in
//! [`expressions`](super::expressions) as further `impl Parser` blocks,
//! so each file extends the parser with related functionality while
//! sharing the same token cursor.
//!
//! # Failure Semantics
//!
//! The first token that matches no alternative of the current production
//! aborts the whole expression with a [`ParseError`]; no partial trees are
//! returned and no resynchronization is attempted. Recovery, if any, is the
//! enclosing statement or declaration parser's decision.

use crate::ast::{Expr, ExprKind, SourceLocation};
use crate::lexer::{LexError, Lexer, Token};
use crate::types::TypeLookup;
use thiserror::Error;
use tracing::trace;

/// Parser error type
///
/// Every variant carries the source position of the offending token so a
/// front-end can format a compiler error message; the parser itself never
/// prints or logs diagnostics.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// Current token matches no alternative of the current production.
    #[error(
        "syntax error at line {}, column {}: expected {expected}, found {found}",
        .location.line,
        .location.column
    )]
    UnexpectedToken {
        expected: String,
        found: String,
        location: SourceLocation,
    },

    /// The tree left of an assignment operator does not reduce through the
    /// unary-expression grammar.
    #[error(
        "syntax error at line {}, column {}: {kind} is not a valid assignment target",
        .location.line,
        .location.column
    )]
    InvalidAssignmentTarget {
        kind: ExprKind,
        location: SourceLocation,
    },

    /// A parenthesized window had to denote a type name, but the type layer
    /// could not mint a descriptor for it. Reported at the opening
    /// parenthesis.
    #[error(
        "syntax error at line {}, column {}: '{name}' does not name a type",
        .location.line,
        .location.column
    )]
    UnknownTypeName {
        name: String,
        location: SourceLocation,
    },

    /// Tokenization failed before parsing began.
    #[error(transparent)]
    Lex(#[from] LexError),
}

impl ParseError {
    /// Source position the error refers to.
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::UnexpectedToken { location, .. }
            | ParseError::InvalidAssignmentTarget { location, .. }
            | ParseError::UnknownTypeName { location, .. } => *location,
            ParseError::Lex(err) => err.location,
        }
    }
}

/// Recursive descent parser for the C expression grammar.
///
/// One parse session consumes one token stream and produces one tree per
/// entry-point call. Sessions share nothing: independent parses may run on
/// separate threads with their own streams and type tables. The type layer
/// is consulted only for cast/compound-literal disambiguation.
pub struct Parser<'t> {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    pub(crate) types: &'t dyn TypeLookup,
}

impl<'t> Parser<'t> {
    /// Tokenize `source` and prepare a parse session.
    pub fn new(source: &str, types: &'t dyn TypeLookup) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Ok(Self::from_tokens(tokens, types))
    }

    /// Prepare a parse session over an already materialized token stream.
    pub fn from_tokens(mut tokens: Vec<Token>, types: &'t dyn TypeLookup) -> Self {
        // The cursor helpers rely on a trailing Eof sentinel.
        if !matches!(tokens.last(), Some(Token::Eof(_))) {
            let location = tokens
                .last()
                .map(Token::location)
                .unwrap_or(SourceLocation::new(1, 1));
            tokens.push(Token::Eof(location));
        }
        trace!(tokens = tokens.len(), "starting parse session");
        Self {
            tokens,
            position: 0,
            types,
        }
    }

    // ===== Helper methods =====

    pub(crate) fn match_token(&mut self, token: &Token) -> bool {
        if std::mem::discriminant(self.peek())
            == std::mem::discriminant(token)
        {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(token)
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub fn is_at_end(&self) -> bool {
        matches!(self.peek(), Token::Eof(_))
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position - 1]
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location()
    }

    /// Build an [`ParseError::UnexpectedToken`] at the current token.
    pub(crate) fn syntax_error(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: self.peek().to_string(),
            location: self.current_location(),
        }
    }

    pub(crate) fn expect_token(
        &mut self,
        token: &Token,
        expected: &str,
    ) -> Result<(), ParseError> {
        if self.check(token) {
            self.advance();
            Ok(())
        } else {
            Err(self.syntax_error(expected))
        }
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::RParen(self.current_location()),
            &format!("')' {ctx}"),
        )
    }

    pub(crate) fn expect_rbracket(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::RBracket(self.current_location()),
            &format!("']' {ctx}"),
        )
    }

    pub(crate) fn expect_lbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::LBrace(self.current_location()),
            &format!("'{{' {ctx}"),
        )
    }

    pub(crate) fn expect_rbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::RBrace(self.current_location()),
            &format!("'}}' {ctx}"),
        )
    }

    pub(crate) fn expect_colon(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::Colon(self.current_location()),
            &format!("':' {ctx}"),
        )
    }

    pub(crate) fn expect_identifier(
        &mut self,
        ctx: &str,
    ) -> Result<Token, ParseError> {
        if matches!(self.peek(), Token::Ident(..)) {
            Ok(self.advance().clone())
        } else {
            Err(self.syntax_error(&format!("an identifier {ctx}")))
        }
    }

    /// Parse `source` as a single full expression, requiring the entire
    /// token stream to be consumed.
    pub fn parse_all(
        source: &str,
        types: &'t dyn TypeLookup,
    ) -> Result<Expr, ParseError> {
        let mut parser = Parser::new(source, types)?;
        let expr = parser.parse_expression()?;
        if !parser.is_at_end() {
            return Err(parser.syntax_error("end of expression"));
        }
        Ok(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Primary;
    use crate::types::TypeTable;

    #[test]
    fn test_parse_identifier() {
        let types = TypeTable::new();
        let expr = Parser::parse_all("x", &types).unwrap();

        match expr {
            Expr::Primary(Primary::Factor(Token::Ident(name, _))) => {
                assert_eq!(name, "x");
            }
            other => panic!("Expected primary identifier, got {:?}", other),
        }
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let types = TypeTable::new();
        let err = Parser::parse_all("a b", &types).unwrap_err();

        match err {
            ParseError::UnexpectedToken { expected, .. } => {
                assert_eq!(expected, "end of expression");
            }
            other => panic!("Expected unexpected-token error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_tokens_appends_eof() {
        let types = TypeTable::new();
        let tokens = vec![Token::Ident(
            "x".to_string(),
            SourceLocation::new(1, 1),
        )];
        let mut parser = Parser::from_tokens(tokens, &types);
        let expr = parser.parse_expression().unwrap();

        assert_eq!(expr.kind(), ExprKind::Primary);
        assert!(parser.is_at_end());
    }

    #[test]
    fn test_empty_input_is_syntax_error() {
        let types = TypeTable::new();
        let err = Parser::parse_all("", &types).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_lex_error_converts() {
        let types = TypeTable::new();
        let err = Parser::parse_all("a @ b", &types).unwrap_err();
        assert!(matches!(err, ParseError::Lex(_)));
    }
}
