//! Error module orchestrator.
//!
//! Downstream crates and examples import error types from here while the
//! implementation details live in the private `types` module.

mod types;

pub use types::{ComposeError, Result};
