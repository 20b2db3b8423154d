//! Adapter seam between composition and a concrete widget toolkit.
//!
//! `mod.rs` acts as the orchestrator while implementation details live in
//! the private `core` module. The in-memory backend used by tests, benches,
//! and demos is exposed as the `headless` submodule.

mod core;
pub mod headless;

pub use core::{MarginSupport, Margins, Strategy, Toolkit, ToolkitError};
pub use headless::HeadlessToolkit;
