//! Compose module orchestrator.
//!
//! Downstream crates and examples import the constructors and the
//! `Container` type from here while the implementation details live in the
//! private `core` module. The session wrapper and audit hooks are named
//! submodules.

mod core;

pub mod audit;
pub mod session;

pub use core::{
    ColumnOptions, Container, DEFAULT_MARGIN, FlowOptions, GridOptions, RowOptions, SplitOptions,
    VSplitOptions, column, column_with, flow, flow_with, grid, grid_with, horizontal_split,
    horizontal_split_with, row, row_with, stack, tabs, vertical_split, vertical_split_with,
};

pub(crate) use core::{validate_ratio, validate_row_lengths};
