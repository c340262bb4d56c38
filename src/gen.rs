//! Code generation contract for expression trees
//!
//! The node model defines the `gen` capability, but its body belongs to a
//! code-generation stage that does not exist yet. Calling [`Expr::gen`]
//! today reports [`GenError::Unsupported`] so callers can tell the missing
//! stage apart from a silent no-op. The interface is kept stable so a
//! backend can be attached later without touching the node model.

use crate::ast::{Expr, ExprKind, SourceLocation};
use thiserror::Error;

/// Errors reported by the code generation stage.
#[derive(Debug, Clone, Error)]
pub enum GenError {
    /// No backend implements lowering for this node kind yet.
    #[error(
        "code generation for {kind} is not yet supported (line {}, column {})",
        .location.line,
        .location.column
    )]
    Unsupported {
        kind: ExprKind,
        location: SourceLocation,
    },
}

impl Expr {
    /// Lower this node for the next compilation stage.
    ///
    /// Contract: callable on any fully constructed node; children must be
    /// generated before their parent (depth-first). Until a backend is
    /// attached, every kind reports [`GenError::Unsupported`].
    pub fn gen(&self) -> Result<(), GenError> {
        Err(GenError::Unsupported {
            kind: self.kind(),
            location: self.location(),
        })
    }
}
