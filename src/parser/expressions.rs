//! Expression parsing implementation
//!
//! One method per grammar production, from `parse_expression` (comma
//! operator) down to `parse_primary`, with the ten binary arithmetic
//! levels collapsed into a single precedence-climbing method.
//!
//! # Precedence and Associativity
//!
//! Binding strength is resolved entirely here, via the static
//! [`binary_precedence`] table; nodes store only the operator token.
//! Binary arithmetic, `&&`, `||`, and the comma operator are
//! left-associative; assignment and the conditional operator are
//! right-associative.
//!
//! # Assignment Without Backtracking
//!
//! `parse_assignment` parses a conditional-expression first and, only when
//! an assignment operator follows, reinterprets the already-built tree as
//! the assignment target. Trees that do not reduce through the unary
//! grammar are rejected at that point.
//!
//! All parsing methods are implemented as methods on the [`Parser`] struct.

use crate::ast::{Expr, InitializerList, Primary};
use crate::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

/// Binding strengths for the precedence-climbing band; higher binds
/// tighter. `&&` and `||` sit below this band and keep their own
/// productions because their short-circuit semantics get distinct node
/// kinds.
fn binary_precedence(token: &Token) -> Option<u8> {
    let precedence = match token {
        Token::Star(_) | Token::Slash(_) | Token::Percent(_) => 10,
        Token::Plus(_) | Token::Minus(_) => 9,
        Token::LtLt(_) | Token::GtGt(_) => 8,
        Token::Lt(_) | Token::Le(_) | Token::Gt(_) | Token::Ge(_) => 7,
        Token::EqEq(_) | Token::NotEq(_) => 6,
        Token::Amp(_) => 5,
        Token::Caret(_) => 4,
        Token::Pipe(_) => 3,
        _ => return None,
    };
    Some(precedence)
}

impl Parser<'_> {
    /// Parse a full expression including comma chains (top-level entry
    /// point).
    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_assignment()?;

        loop {
            let location = self.current_location();
            if !self.match_token(&Token::Comma(location)) {
                break;
            }
            let right = self.parse_assignment()?;
            left = Expr::Comma {
                left: Box::new(left),
                right: Box::new(right),
                location,
            };
        }

        Ok(left)
    }

    /// Parse an assignment-expression (right-associative).
    pub fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_conditional()?;

        if self.peek().is_assignment_op() {
            let op = self.advance().clone();
            if !expr.is_unary_expression() {
                return Err(ParseError::InvalidAssignmentTarget {
                    kind: expr.kind(),
                    location: expr.location(),
                });
            }
            let value = self.parse_assignment()?;
            return Ok(Expr::Assignment {
                op,
                target: Box::new(expr),
                value: Box::new(value),
            });
        }

        Ok(expr)
    }

    /// Parse a constant-expression.
    ///
    /// Grammatically this is a conditional-expression; callers that need a
    /// compile-time value (array sizes, case labels) parse with this entry
    /// point and then [`eval`](Expr::eval) the result.
    pub fn parse_constant_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_conditional()
    }

    /// Parse conditional: condition ? true_expr : false_expr
    ///
    /// The false branch is itself a conditional-expression, so chains
    /// associate to the right. Without `?` the logical-OR operand is
    /// returned unchanged.
    fn parse_conditional(&mut self) -> Result<Expr, ParseError> {
        let condition = self.parse_logical_or()?;

        let location = self.current_location();
        if self.match_token(&Token::Question(location)) {
            let true_expr = self.parse_expression()?;
            self.expect_colon("in conditional expression")?;
            let false_expr = self.parse_conditional()?;

            return Ok(Expr::Conditional {
                condition: Box::new(condition),
                true_expr: Box::new(true_expr),
                false_expr: Box::new(false_expr),
                location,
            });
        }

        Ok(condition)
    }

    /// Parse logical OR (||)
    fn parse_logical_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_logical_and()?;

        loop {
            let location = self.current_location();
            if !self.match_token(&Token::OrOr(location)) {
                break;
            }
            let right = self.parse_logical_and()?;
            left = Expr::LogicalOr {
                left: Box::new(left),
                right: Box::new(right),
                location,
            };
        }

        Ok(left)
    }

    /// Parse logical AND (&&)
    fn parse_logical_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_binary(0)?;

        loop {
            let location = self.current_location();
            if !self.match_token(&Token::AndAnd(location)) {
                break;
            }
            let right = self.parse_binary(0)?;
            left = Expr::LogicalAnd {
                left: Box::new(left),
                right: Box::new(right),
                location,
            };
        }

        Ok(left)
    }

    /// Parse the binary arithmetic band by precedence climbing.
    ///
    /// While the next operator binds at least as tightly as `min_prec`,
    /// consume it and parse the right-hand side one level tighter; the
    /// folded node becomes the new left operand, giving left associativity.
    fn parse_binary(&mut self, min_prec: u8) -> Result<Expr, ParseError> {
        let mut left = self.parse_cast()?;

        loop {
            let Some(precedence) = binary_precedence(self.peek()) else {
                break;
            };
            if precedence < min_prec {
                break;
            }

            let op = self.advance().clone();
            let right = self.parse_binary(precedence + 1)?;
            left = Expr::Arithmetic {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Parse cast: `(type)expr`, or compound literal: `(type){ ... }`
    ///
    /// A `(` opens a cast only when the type layer recognizes the next
    /// identifier as a type name; otherwise this falls through to the
    /// unary production and the `(` is a parenthesized expression.
    fn parse_cast(&mut self) -> Result<Expr, ParseError> {
        let location = self.current_location();
        if self.check(&Token::LParen(location)) {
            let type_name = match self.peek_ahead(1) {
                Some(Token::Ident(name, _)) if self.types.is_type_name(name) => {
                    Some(name.clone())
                }
                _ => None,
            };

            if let Some(name) = type_name {
                self.advance(); // consume '('
                self.advance(); // consume type name
                let mut pointer_depth = 0;
                while self.match_token(&Token::Star(self.current_location())) {
                    pointer_depth += 1;
                }
                let target = self
                    .types
                    .describe(&name, pointer_depth)
                    .ok_or(ParseError::UnknownTypeName { name, location })?;
                self.expect_rparen("after type name")?;

                if self.check(&Token::LBrace(self.current_location())) {
                    let initializer = self.parse_initializer_list()?;
                    // A compound literal heads a postfix chain, so trailing
                    // []/./->/()/++/-- still apply to it.
                    return self.parse_postfix_chain(Expr::CompoundLiteral {
                        target,
                        initializer,
                        location,
                    });
                }

                let operand = self.parse_cast()?;
                return Ok(Expr::Cast {
                    target,
                    operand: Box::new(operand),
                    location,
                });
            }
        }

        self.parse_unary()
    }

    /// Parse unary: prefix `& * + - ~ ! ++ --`
    ///
    /// `!` gets its own node kind; `++`/`--` recurse into unary while the
    /// plain operators take a cast-expression, per the C grammar.
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Token::Bang(_) => {
                let op = self.advance().clone();
                let operand = self.parse_cast()?;
                Ok(Expr::LogicalNot {
                    op,
                    operand: Box::new(operand),
                })
            }
            Token::Amp(_)
            | Token::Star(_)
            | Token::Plus(_)
            | Token::Minus(_)
            | Token::Tilde(_) => {
                let op = self.advance().clone();
                let operand = self.parse_cast()?;
                Ok(Expr::Unary {
                    op,
                    operand: Box::new(operand),
                })
            }
            Token::PlusPlus(_) | Token::MinusMinus(_) => {
                let op = self.advance().clone();
                let operand = self.parse_unary()?;
                Ok(Expr::Unary {
                    op,
                    operand: Box::new(operand),
                })
            }
            _ => self.parse_postfix(),
        }
    }

    /// Parse postfix chains: `[] . -> () ++ --`
    ///
    /// Built iteratively so earlier postfixes nest as the base of later
    /// ones: `a[0].b` is a member access whose base is an array access.
    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_primary()?;
        self.parse_postfix_chain(base)
    }

    /// Absorb trailing postfix operators onto an already parsed base.
    fn parse_postfix_chain(&mut self, mut expr: Expr) -> Result<Expr, ParseError> {
        loop {
            let location = self.current_location();

            if self.match_token(&Token::LBracket(location)) {
                let index = self.parse_expression()?;
                self.expect_rbracket("after array index")?;
                expr = Expr::ArrayAccess {
                    base: Box::new(expr),
                    index: Box::new(index),
                    location,
                };
            } else if self.check(&Token::Dot(location))
                || self.check(&Token::Arrow(location))
            {
                let op = self.advance().clone();
                let member = self.expect_identifier("after member access")?;
                expr = Expr::StructAccess {
                    base: Box::new(expr),
                    op,
                    member,
                };
            } else if self.match_token(&Token::LParen(location)) {
                // Zero arguments stores None, never an empty list node.
                let args = if self.check(&Token::RParen(location)) {
                    None
                } else {
                    Some(Box::new(self.parse_argument_list()?))
                };
                self.expect_rparen("after function arguments")?;
                expr = Expr::FunctionCall {
                    base: Box::new(expr),
                    args,
                    location,
                };
            } else if self.check(&Token::PlusPlus(location))
                || self.check(&Token::MinusMinus(location))
            {
                let op = self.advance().clone();
                expr = Expr::Postfix {
                    base: Box::new(expr),
                    op,
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Parse an argument-expression-list as a chain of list links, each
    /// holding one assignment-expression and a reference to the previous
    /// link. The first link has no previous.
    fn parse_argument_list(&mut self) -> Result<Expr, ParseError> {
        let first = self.parse_assignment()?;
        let mut list = Expr::ArgumentList {
            previous: None,
            argument: Box::new(first),
        };

        while self.match_token(&Token::Comma(self.current_location())) {
            let argument = self.parse_assignment()?;
            list = Expr::ArgumentList {
                previous: Some(Box::new(list)),
                argument: Box::new(argument),
            };
        }

        Ok(list)
    }

    /// Parse the initializer list of a compound literal:
    /// `{ assignment-expression, ... }` with an optional trailing comma.
    fn parse_initializer_list(&mut self) -> Result<InitializerList, ParseError> {
        let location = self.current_location();
        self.expect_lbrace("to open initializer list")?;

        let mut items = Vec::new();
        if !self.check(&Token::RBrace(self.current_location())) {
            loop {
                items.push(self.parse_assignment()?);
                if !self.match_token(&Token::Comma(self.current_location())) {
                    break;
                }
                if self.check(&Token::RBrace(self.current_location())) {
                    break; // trailing comma
                }
            }
        }
        self.expect_rbrace("to close initializer list")?;

        Ok(InitializerList { items, location })
    }

    /// Parse primary: literal or identifier token, or `(` expression `)`
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Token::IntLiteral(..)
            | Token::CharLiteral(..)
            | Token::StringLiteral(..)
            | Token::Ident(..) => {
                let factor = self.advance().clone();
                Ok(Expr::Primary(Primary::Factor(factor)))
            }
            Token::LParen(_) => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect_rparen("after expression")?;
                Ok(Expr::Primary(Primary::Grouped(Box::new(inner))))
            }
            _ => Err(self.syntax_error("an expression")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ExprKind;
    use crate::types::TypeTable;

    fn parse(source: &str) -> Expr {
        let types = TypeTable::with_builtins();
        Parser::parse_all(source, &types).unwrap()
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        let expr = parse("a + b * c");

        match expr {
            Expr::Arithmetic { op, left, right } => {
                assert!(matches!(op, Token::Plus(_)));
                assert_eq!(left.kind(), ExprKind::Primary);
                match *right {
                    Expr::Arithmetic { op, .. } => {
                        assert!(matches!(op, Token::Star(_)));
                    }
                    other => panic!("Expected multiplication, got {:?}", other),
                }
            }
            other => panic!("Expected addition at root, got {:?}", other),
        }
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        let expr = parse("a - b - c");

        match expr {
            Expr::Arithmetic { op, left, right } => {
                assert!(matches!(op, Token::Minus(_)));
                assert_eq!(left.kind(), ExprKind::Arithmetic);
                assert_eq!(right.kind(), ExprKind::Primary);
            }
            other => panic!("Expected subtraction at root, got {:?}", other),
        }
    }

    #[test]
    fn test_assignment_is_right_associative() {
        let expr = parse("a = b = c");

        match expr {
            Expr::Assignment { op, target, value } => {
                assert!(matches!(op, Token::Eq(_)));
                assert_eq!(target.kind(), ExprKind::Primary);
                assert_eq!(value.kind(), ExprKind::Assignment);
            }
            other => panic!("Expected assignment at root, got {:?}", other),
        }
    }

    #[test]
    fn test_conditional_chains_into_false_branch() {
        let expr = parse("a ? b : c ? d : e");

        match expr {
            Expr::Conditional { false_expr, .. } => {
                assert_eq!(false_expr.kind(), ExprKind::Conditional);
            }
            other => panic!("Expected conditional at root, got {:?}", other),
        }
    }

    #[test]
    fn test_postfix_chain_nesting() {
        // FunctionCall wrapping StructAccess wrapping ArrayAccess
        let expr = parse("a[0].b(1, 2)");

        let Expr::FunctionCall { base, args, .. } = expr else {
            panic!("Expected function call at root");
        };
        let arguments = args.expect("call has arguments");
        assert_eq!(arguments.arguments().len(), 2);

        let Expr::StructAccess { base, member, .. } = *base else {
            panic!("Expected member access as call base");
        };
        assert!(matches!(member, Token::Ident(ref s, _) if s == "b"));

        assert_eq!(base.kind(), ExprKind::ArrayAccess);
    }

    #[test]
    fn test_zero_argument_call_has_absent_list() {
        let Expr::FunctionCall { args, .. } = parse("f()") else {
            panic!("Expected function call");
        };
        assert!(args.is_none());

        let Expr::FunctionCall { args, .. } = parse("f(x)") else {
            panic!("Expected function call");
        };
        let list = args.expect("one-argument call has a list");
        assert_eq!(list.arguments().len(), 1);
    }

    #[test]
    fn test_argument_list_preserves_order() {
        let Expr::FunctionCall { args, .. } = parse("f(x, y, z)") else {
            panic!("Expected function call");
        };
        let list = args.unwrap();
        let names: Vec<String> = list
            .arguments()
            .iter()
            .map(|arg| match arg {
                Expr::Primary(Primary::Factor(Token::Ident(name, _))) => {
                    name.clone()
                }
                other => panic!("Expected identifier argument, got {:?}", other),
            })
            .collect();
        assert_eq!(names, ["x", "y", "z"]);
    }

    #[test]
    fn test_cast_vs_parenthesized_expression() {
        let cast = parse("(int)x");
        match cast {
            Expr::Cast { target, operand, .. } => {
                assert_eq!(target.name(), "int");
                assert_eq!(operand.kind(), ExprKind::Primary);
            }
            other => panic!("Expected cast, got {:?}", other),
        }

        // 'y' is not registered as a type, so this is a grouped primary.
        let grouped = parse("(y)");
        assert!(matches!(grouped, Expr::Primary(Primary::Grouped(_))));
    }

    #[test]
    fn test_nested_casts() {
        let expr = parse("(int)(char)x");

        let Expr::Cast { operand, .. } = expr else {
            panic!("Expected outer cast");
        };
        assert_eq!(operand.kind(), ExprKind::Cast);
    }

    #[test]
    fn test_pointer_cast() {
        let Expr::Cast { target, .. } = parse("(char **)p") else {
            panic!("Expected cast");
        };
        assert_eq!(target.name(), "char");
        assert_eq!(target.pointer_depth(), 2);
    }

    #[test]
    fn test_compound_literal() {
        let mut types = TypeTable::with_builtins();
        types.register("Point");
        let expr = Parser::parse_all("(Point){1, 2}", &types).unwrap();

        match expr {
            Expr::CompoundLiteral { target, initializer, .. } => {
                assert_eq!(target.name(), "Point");
                assert_eq!(initializer.items.len(), 2);
            }
            other => panic!("Expected compound literal, got {:?}", other),
        }
    }

    #[test]
    fn test_compound_literal_trailing_comma() {
        let types = TypeTable::with_builtins();
        let expr = Parser::parse_all("(int){1, 2, 3,}", &types).unwrap();

        let Expr::CompoundLiteral { initializer, .. } = expr else {
            panic!("Expected compound literal");
        };
        assert_eq!(initializer.items.len(), 3);
    }

    #[test]
    fn test_logical_not_is_distinct_from_unary() {
        let expr = parse("!x");
        assert_eq!(expr.kind(), ExprKind::LogicalNot);

        let expr = parse("-x");
        assert_eq!(expr.kind(), ExprKind::Unary);
    }

    #[test]
    fn test_logical_operators_keep_own_kinds() {
        let expr = parse("a && b || c");

        let Expr::LogicalOr { left, .. } = expr else {
            panic!("Expected || at root");
        };
        assert_eq!(left.kind(), ExprKind::LogicalAnd);
    }

    #[test]
    fn test_bitwise_precedence_order() {
        // & binds tighter than ^, which binds tighter than |
        let expr = parse("a | b ^ c & d");

        let Expr::Arithmetic { op, right, .. } = expr else {
            panic!("Expected arithmetic at root");
        };
        assert!(matches!(op, Token::Pipe(_)));
        let Expr::Arithmetic { op, right, .. } = *right else {
            panic!("Expected ^ under |");
        };
        assert!(matches!(op, Token::Caret(_)));
        let Expr::Arithmetic { op, .. } = *right else {
            panic!("Expected & under ^");
        };
        assert!(matches!(op, Token::Amp(_)));
    }

    #[test]
    fn test_comma_chain_is_left_associative() {
        let expr = parse("a, b, c");

        let Expr::Comma { left, right, .. } = expr else {
            panic!("Expected comma at root");
        };
        assert_eq!(left.kind(), ExprKind::Comma);
        assert_eq!(right.kind(), ExprKind::Primary);
    }

    #[test]
    fn test_compound_assignment_operators() {
        for source in [
            "a += b", "a -= b", "a *= b", "a /= b", "a %= b", "a <<= b",
            "a >>= b", "a &= b", "a |= b", "a ^= b",
        ] {
            let expr = parse(source);
            assert_eq!(expr.kind(), ExprKind::Assignment, "for {source}");
        }
    }

    #[test]
    fn test_assignment_target_must_be_unary() {
        let types = TypeTable::new();
        let err = Parser::parse_all("a + b = c", &types).unwrap_err();

        match err {
            ParseError::InvalidAssignmentTarget { kind, .. } => {
                assert_eq!(kind, ExprKind::Arithmetic);
            }
            other => panic!("Expected invalid-target error, got {:?}", other),
        }
    }

    #[test]
    fn test_deref_target_is_assignable() {
        let expr = parse("*p = 1");
        assert_eq!(expr.kind(), ExprKind::Assignment);
    }

    #[test]
    fn test_missing_operand_reports_position() {
        let types = TypeTable::new();
        let err = Parser::parse_all("a +", &types).unwrap_err();

        match err {
            ParseError::UnexpectedToken { expected, location, .. } => {
                assert_eq!(expected, "an expression");
                // Position immediately after the '+'
                assert_eq!(location.line, 1);
                assert_eq!(location.column, 4);
            }
            other => panic!("Expected unexpected-token error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_colon_in_conditional() {
        let types = TypeTable::new();
        let err = Parser::parse_all("a ? b", &types).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_prefix_increment_of_postfix_chain() {
        let expr = parse("++a[0]");

        let Expr::Unary { op, operand } = expr else {
            panic!("Expected unary at root");
        };
        assert!(matches!(op, Token::PlusPlus(_)));
        assert_eq!(operand.kind(), ExprKind::ArrayAccess);
    }

    #[test]
    fn test_postfix_increment() {
        let expr = parse("a++");

        let Expr::Postfix { base, op } = expr else {
            panic!("Expected postfix at root");
        };
        assert!(matches!(op, Token::PlusPlus(_)));
        assert_eq!(base.kind(), ExprKind::Primary);
    }

    #[test]
    fn test_address_of_binds_before_binary_and() {
        let expr = parse("&a & b");

        let Expr::Arithmetic { op, left, .. } = expr else {
            panic!("Expected binary & at root");
        };
        assert!(matches!(op, Token::Amp(_)));
        assert_eq!(left.kind(), ExprKind::Unary);
    }

    #[test]
    fn test_determinism() {
        let types = TypeTable::with_builtins();
        let source = "f(a[i] * 2, (int)b) + c ? d : e, g = h";
        let first = Parser::parse_all(source, &types).unwrap();
        let second = Parser::parse_all(source, &types).unwrap();
        assert_eq!(first, second);
    }
}
