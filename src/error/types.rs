use thiserror::Error;

use crate::toolkit::{Strategy, ToolkitError};

/// Unified result type for the crate.
pub type Result<T> = std::result::Result<T, ComposeError>;

/// Errors surfaced while composing containers or assembling plans.
#[derive(Debug, Error, PartialEq)]
pub enum ComposeError {
    /// A fixed-arity strategy received the wrong number of children.
    #[error("{strategy} takes exactly {expected} children, got {found}")]
    Arity {
        strategy: Strategy,
        expected: usize,
        found: usize,
    },
    /// A grid row does not match the width set by the first row.
    #[error("grid row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A split ratio fell outside the unit interval.
    #[error("split ratio {0} is outside 0.0..=1.0")]
    RatioOutOfRange(f32),
    /// A container was offered for reuse but arranges children differently.
    #[error("expected a {expected} container, got {found}")]
    StrategyMismatch { expected: Strategy, found: Strategy },
    /// A plan leaf referenced a name with no bound element.
    #[error("plan slot `{0}` has no bound element")]
    UnboundSlot(String),
    /// A plan's root was a bare slot instead of a container node.
    #[error("plan root must be a container node, got slot `{0}`")]
    SlotAtRoot(String),
    #[error(transparent)]
    Toolkit(#[from] ToolkitError),
}
