//! Composition of toolkit widgets into rows, columns, grids, stacks,
//! splits, flow layouts, and tab pages.
//!
//! Widgets are built elsewhere and handed in as opaque elements; the
//! constructors here create a container, adopt every child in order, and
//! configure margins, spacers, divider sizes, and page labels through an
//! injected [`Toolkit`] adapter. Containers nest by ordinary function
//! composition, and declarative [`Plan`] trees describe the same layouts
//! as data.

pub mod compose;
pub mod element;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod plan;
pub mod toolkit;

pub use compose::audit::{
    ComposeAudit, ComposeAuditEvent, ComposeAuditEventBuilder, ComposeAuditStage, NullComposeAudit,
};
pub use compose::session::{Composer, ComposerConfig};
pub use compose::{
    ColumnOptions, Container, DEFAULT_MARGIN, FlowOptions, GridOptions, RowOptions, SplitOptions,
    VSplitOptions, column, column_with, flow, flow_with, grid, grid_with, horizontal_split,
    horizontal_split_with, row, row_with, stack, tabs, vertical_split, vertical_split_with,
};
pub use element::{Axis, Child, ElementId, Spacer};
pub use error::{ComposeError, Result};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult, VecSink,
};
pub use metrics::{ComposeMetrics, MetricSnapshot};
pub use plan::{Bindings, Plan, TabPage, assemble};
pub use toolkit::{HeadlessToolkit, MarginSupport, Margins, Strategy, Toolkit, ToolkitError};
