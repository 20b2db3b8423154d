//! Plan module orchestrator.
//!
//! Downstream crates and examples import plan types from here while the
//! implementation details live in the private `core` module.

mod core;

pub use core::{Bindings, Plan, TabPage, assemble};
