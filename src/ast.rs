// AST (Abstract Syntax Tree) definitions for the C expression grammar

use crate::lexer::Token;
use crate::types::TypeDescriptor;
use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Tag identifying the concrete grammar production a node was built by.
///
/// Later passes dispatch on this tag instead of re-inspecting node payloads.
/// The tag of a node never changes once the node is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprKind {
    Primary,
    Postfix,
    ArrayAccess,
    StructAccess,
    FunctionCall,
    ArgumentList,
    Unary,
    Cast,
    LogicalNot,
    Arithmetic,
    LogicalAnd,
    LogicalOr,
    Conditional,
    Assignment,
    Comma,
    CompoundLiteral,
}

impl fmt::Display for ExprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExprKind::Primary => "primary expression",
            ExprKind::Postfix => "postfix expression",
            ExprKind::ArrayAccess => "array access",
            ExprKind::StructAccess => "member access",
            ExprKind::FunctionCall => "function call",
            ExprKind::ArgumentList => "argument list",
            ExprKind::Unary => "unary expression",
            ExprKind::Cast => "cast expression",
            ExprKind::LogicalNot => "logical not",
            ExprKind::Arithmetic => "arithmetic expression",
            ExprKind::LogicalAnd => "logical AND",
            ExprKind::LogicalOr => "logical OR",
            ExprKind::Conditional => "conditional expression",
            ExprKind::Assignment => "assignment",
            ExprKind::Comma => "comma expression",
            ExprKind::CompoundLiteral => "compound literal",
        };
        f.write_str(name)
    }
}

/// The two alternatives of a primary expression.
///
/// Exactly one is ever present: either a single literal/identifier token or
/// one parenthesized sub-expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    Factor(Token),
    Grouped(Box<Expr>),
}

/// Handle to a parsed initializer list, stored by compound literals.
///
/// The initializer sub-grammar belongs to the declaration layer; expression
/// parsing only records the resulting list of assignment expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct InitializerList {
    pub items: Vec<Expr>,
    pub location: SourceLocation,
}

/// AST nodes for the C expression grammar, one variant per production.
///
/// Ownership is strictly top-down: a parent owns its operand subtrees via
/// `Box`, no node is shared between two parents, and the recursive descent
/// grammar makes cycles impossible. Nodes are immutable after construction;
/// the parser production that builds a node is its only mutation point.
///
/// Operator-carrying variants store the original [`Token`] so diagnostics
/// keep the exact source position, and so the operator token alone
/// determines the semantic operation (precedence is resolved entirely
/// inside the parser and never re-derived from the tree).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal/identifier token, or a parenthesized sub-expression.
    Primary(Primary),
    /// Trailing `++`/`--` applied to a postfix chain.
    Postfix { base: Box<Expr>, op: Token },
    /// `base[index]`
    ArrayAccess {
        base: Box<Expr>,
        index: Box<Expr>,
        location: SourceLocation,
    },
    /// `base.member` or `base->member`; `op` is the access operator token
    /// and `member` is always an identifier token.
    StructAccess {
        base: Box<Expr>,
        op: Token,
        member: Token,
    },
    /// `base(args)`. A call with zero arguments stores `None`, never an
    /// empty list node.
    FunctionCall {
        base: Box<Expr>,
        args: Option<Box<Expr>>,
        location: SourceLocation,
    },
    /// One link of an argument list chain; `previous` is absent for the
    /// first argument. Chain traversal order is evaluation order.
    ArgumentList {
        previous: Option<Box<Expr>>,
        argument: Box<Expr>,
    },
    /// Prefix `& * + - ~ ++ --` applied to an operand.
    Unary { op: Token, operand: Box<Expr> },
    /// `(type) operand`; the descriptor is an opaque handle minted by the
    /// type layer.
    Cast {
        target: TypeDescriptor,
        operand: Box<Expr>,
        location: SourceLocation,
    },
    /// `!operand`, kept distinct from [`Expr::Unary`] so later passes can
    /// treat logical negation specially without retesting the token.
    LogicalNot { op: Token, operand: Box<Expr> },
    /// Binary operator from the arithmetic precedence band. The operator
    /// token determines the operation; left and right are never absent.
    Arithmetic {
        op: Token,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `left && right`; short-circuit order is structural (left first).
    LogicalAnd {
        left: Box<Expr>,
        right: Box<Expr>,
        location: SourceLocation,
    },
    /// `left || right`; short-circuit order is structural (left first).
    LogicalOr {
        left: Box<Expr>,
        right: Box<Expr>,
        location: SourceLocation,
    },
    /// `condition ? true_expr : false_expr`. Only constructed when a `?`
    /// is present; a bare logical-OR operand stays as-is. The false branch
    /// is itself a conditional, giving right-associative chaining.
    Conditional {
        condition: Box<Expr>,
        true_expr: Box<Expr>,
        false_expr: Box<Expr>,
        location: SourceLocation,
    },
    /// `target op value` for the full assignment operator family. Only
    /// constructed when an assignment operator is present; a bare
    /// conditional operand stays as-is.
    Assignment {
        op: Token,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    /// `left, right`; left-associative chain.
    Comma {
        left: Box<Expr>,
        right: Box<Expr>,
        location: SourceLocation,
    },
    /// `(type){ initializer-list }`; both fields are mandatory.
    CompoundLiteral {
        target: TypeDescriptor,
        initializer: InitializerList,
        location: SourceLocation,
    },
}

impl Expr {
    /// Get the production tag of this node
    pub fn kind(&self) -> ExprKind {
        match self {
            Expr::Primary(_) => ExprKind::Primary,
            Expr::Postfix { .. } => ExprKind::Postfix,
            Expr::ArrayAccess { .. } => ExprKind::ArrayAccess,
            Expr::StructAccess { .. } => ExprKind::StructAccess,
            Expr::FunctionCall { .. } => ExprKind::FunctionCall,
            Expr::ArgumentList { .. } => ExprKind::ArgumentList,
            Expr::Unary { .. } => ExprKind::Unary,
            Expr::Cast { .. } => ExprKind::Cast,
            Expr::LogicalNot { .. } => ExprKind::LogicalNot,
            Expr::Arithmetic { .. } => ExprKind::Arithmetic,
            Expr::LogicalAnd { .. } => ExprKind::LogicalAnd,
            Expr::LogicalOr { .. } => ExprKind::LogicalOr,
            Expr::Conditional { .. } => ExprKind::Conditional,
            Expr::Assignment { .. } => ExprKind::Assignment,
            Expr::Comma { .. } => ExprKind::Comma,
            Expr::CompoundLiteral { .. } => ExprKind::CompoundLiteral,
        }
    }

    /// Get the source location of this node
    pub fn location(&self) -> SourceLocation {
        match self {
            Expr::Primary(Primary::Factor(tok)) => tok.location(),
            Expr::Primary(Primary::Grouped(inner)) => inner.location(),
            Expr::Postfix { op, .. } => op.location(),
            Expr::ArrayAccess { location, .. } => *location,
            Expr::StructAccess { op, .. } => op.location(),
            Expr::FunctionCall { location, .. } => *location,
            Expr::ArgumentList { argument, .. } => argument.location(),
            Expr::Unary { op, .. } => op.location(),
            Expr::Cast { location, .. } => *location,
            Expr::LogicalNot { op, .. } => op.location(),
            Expr::Arithmetic { op, .. } => op.location(),
            Expr::LogicalAnd { location, .. } => *location,
            Expr::LogicalOr { location, .. } => *location,
            Expr::Conditional { location, .. } => *location,
            Expr::Assignment { op, .. } => op.location(),
            Expr::Comma { location, .. } => *location,
            Expr::CompoundLiteral { location, .. } => *location,
        }
    }

    /// Flatten an argument list chain into evaluation (left-to-right) order.
    ///
    /// Any node that is not an [`Expr::ArgumentList`] link is treated as a
    /// single argument.
    pub fn arguments(&self) -> Vec<&Expr> {
        match self {
            Expr::ArgumentList { previous, argument } => {
                let mut items = previous
                    .as_deref()
                    .map(Expr::arguments)
                    .unwrap_or_default();
                items.push(argument);
                items
            }
            other => vec![other],
        }
    }

    /// Whether this tree reduces through the unary-expression grammar and
    /// can therefore serve as an assignment target.
    pub(crate) fn is_unary_expression(&self) -> bool {
        matches!(
            self.kind(),
            ExprKind::Primary
                | ExprKind::Postfix
                | ExprKind::ArrayAccess
                | ExprKind::StructAccess
                | ExprKind::FunctionCall
                | ExprKind::CompoundLiteral
                | ExprKind::Unary
                | ExprKind::LogicalNot
        )
    }
}
