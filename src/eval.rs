//! Compile-time constant evaluation for expression trees
//!
//! [`Expr::eval`] attempts to fold a subtree to a single integer value.
//! It succeeds only when every reachable leaf is itself a compile-time
//! constant; anything else reports [`EvalError::NotConstant`] rather than
//! guessing. "Reachable" matters for the short-circuit and conditional
//! operators: the untaken operand of `&&`, `||`, and `? :` need not be
//! constant, matching their structural evaluation order.
//!
//! Side-effecting forms (assignment, increment/decrement, function calls)
//! always fail, regardless of operand constancy. All arithmetic uses
//! checked math: overflow and division by zero are distinct errors, never
//! panics or wrapped values.
//!
//! An eval failure is a semantic outcome returned to the caller of `eval`;
//! it is never a parse error and never propagates through unrelated calls.

use crate::ast::{Expr, ExprKind, Primary, SourceLocation};
use crate::lexer::Token;
use thiserror::Error;

/// Errors reported by constant evaluation.
#[derive(Debug, Clone, Error)]
pub enum EvalError {
    /// A reachable leaf is not a compile-time constant, or the expression
    /// uses a form that can never appear in a constant expression.
    #[error(
        "not a constant expression: {kind} at line {}, column {}",
        .location.line,
        .location.column
    )]
    NotConstant {
        kind: ExprKind,
        location: SourceLocation,
    },

    /// Checked arithmetic overflowed during folding.
    #[error(
        "integer overflow in constant '{operation}' at line {}, column {}",
        .location.line,
        .location.column
    )]
    Overflow {
        operation: String,
        location: SourceLocation,
    },

    /// Division or modulo by a zero constant.
    #[error(
        "division by zero in constant expression at line {}, column {}",
        .location.line,
        .location.column
    )]
    DivisionByZero { location: SourceLocation },
}

fn overflow(operation: &str, location: SourceLocation) -> EvalError {
    EvalError::Overflow {
        operation: operation.to_string(),
        location,
    }
}

impl Expr {
    /// Attempt to fold this subtree to a single constant value.
    pub fn eval(&self) -> Result<i64, EvalError> {
        match self {
            Expr::Primary(Primary::Factor(Token::IntLiteral(value, _))) => {
                Ok(*value)
            }
            Expr::Primary(Primary::Factor(Token::CharLiteral(value, _))) => {
                Ok(i64::from(*value))
            }
            Expr::Primary(Primary::Grouped(inner)) => inner.eval(),

            // The type layer is opaque here, so a cast folds to its
            // operand's value.
            Expr::Cast { operand, .. } => operand.eval(),

            Expr::LogicalNot { operand, .. } => {
                Ok(i64::from(operand.eval()? == 0))
            }

            Expr::Unary { op, operand } => match op {
                Token::Minus(loc) => operand
                    .eval()?
                    .checked_neg()
                    .ok_or_else(|| overflow("-", *loc)),
                Token::Plus(_) => operand.eval(),
                Token::Tilde(_) => Ok(!operand.eval()?),
                // Address-of, dereference, and prefix ++/-- never fold.
                _ => self.not_constant(),
            },

            Expr::Arithmetic { op, left, right } => {
                let left = left.eval()?;
                let right = right.eval()?;
                fold_binary(op, left, right)
            }

            // Left operand first; the untaken side need not be constant.
            Expr::LogicalAnd { left, right, .. } => {
                if left.eval()? == 0 {
                    Ok(0)
                } else {
                    Ok(i64::from(right.eval()? != 0))
                }
            }
            Expr::LogicalOr { left, right, .. } => {
                if left.eval()? != 0 {
                    Ok(1)
                } else {
                    Ok(i64::from(right.eval()? != 0))
                }
            }

            Expr::Conditional {
                condition,
                true_expr,
                false_expr,
                ..
            } => {
                if condition.eval()? != 0 {
                    true_expr.eval()
                } else {
                    false_expr.eval()
                }
            }

            // Identifiers and string literals, side-effecting forms
            // (assignment, increment/decrement, calls), member and array
            // access, argument lists, comma chains, and compound literals
            // are never compile-time constants.
            _ => self.not_constant(),
        }
    }

    fn not_constant(&self) -> Result<i64, EvalError> {
        Err(EvalError::NotConstant {
            kind: self.kind(),
            location: self.location(),
        })
    }
}

/// Fold one operator from the binary arithmetic band over two constants.
fn fold_binary(op: &Token, left: i64, right: i64) -> Result<i64, EvalError> {
    let location = op.location();
    match op {
        Token::Plus(_) => left
            .checked_add(right)
            .ok_or_else(|| overflow("+", location)),
        Token::Minus(_) => left
            .checked_sub(right)
            .ok_or_else(|| overflow("-", location)),
        Token::Star(_) => left
            .checked_mul(right)
            .ok_or_else(|| overflow("*", location)),
        Token::Slash(_) => {
            if right == 0 {
                return Err(EvalError::DivisionByZero { location });
            }
            left.checked_div(right)
                .ok_or_else(|| overflow("/", location))
        }
        Token::Percent(_) => {
            if right == 0 {
                return Err(EvalError::DivisionByZero { location });
            }
            left.checked_rem(right)
                .ok_or_else(|| overflow("%", location))
        }
        Token::LtLt(_) => {
            if !(0..64).contains(&right) {
                return Err(overflow("<<", location));
            }
            left.checked_shl(right as u32)
                .ok_or_else(|| overflow("<<", location))
        }
        Token::GtGt(_) => {
            if !(0..64).contains(&right) {
                return Err(overflow(">>", location));
            }
            left.checked_shr(right as u32)
                .ok_or_else(|| overflow(">>", location))
        }
        Token::Lt(_) => Ok(i64::from(left < right)),
        Token::Le(_) => Ok(i64::from(left <= right)),
        Token::Gt(_) => Ok(i64::from(left > right)),
        Token::Ge(_) => Ok(i64::from(left >= right)),
        Token::EqEq(_) => Ok(i64::from(left == right)),
        Token::NotEq(_) => Ok(i64::from(left != right)),
        Token::Amp(_) => Ok(left & right),
        Token::Caret(_) => Ok(left ^ right),
        Token::Pipe(_) => Ok(left | right),
        // The parser only builds Arithmetic nodes from the band above.
        other => Err(EvalError::NotConstant {
            kind: ExprKind::Arithmetic,
            location: other.location(),
        }),
    }
}
