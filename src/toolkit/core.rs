use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::element::{Child, ElementId};

/// Arrangement a container imposes on its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Row,
    Column,
    Grid,
    Stack,
    HorizontalSplit,
    VerticalSplit,
    Flow,
    Tabs,
}

impl Strategy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Strategy::Row => "row",
            Strategy::Column => "column",
            Strategy::Grid => "grid",
            Strategy::Stack => "stack",
            Strategy::HorizontalSplit => "horizontal_split",
            Strategy::VerticalSplit => "vertical_split",
            Strategy::Flow => "flow",
            Strategy::Tabs => "tabs",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outer padding of a container, one value per edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Margins {
    pub left: u16,
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
}

impl Margins {
    pub const fn new(left: u16, top: u16, right: u16, bottom: u16) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn uniform(value: u16) -> Self {
        Self::new(value, value, value, value)
    }
}

impl fmt::Display for Margins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Outcome of the single-value margin entry point.
///
/// Older toolkit generations expose a one-argument margin setter; newer
/// ones only take per-edge values. Adapters report which generation they
/// are so callers can fall back without treating the gap as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarginSupport {
    Applied,
    Unsupported,
}

/// Failure raised by a toolkit adapter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolkitError {
    #[error("unknown element {0}")]
    UnknownElement(ElementId),
    #[error("element {0} is not a container")]
    NotAContainer(ElementId),
    #[error("{operation} is not supported by {found} containers")]
    UnsupportedOperation {
        operation: &'static str,
        found: Strategy,
    },
    #[error("index {index} out of range for {len} children")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("adopting {0} would create a parent cycle")]
    ParentCycle(ElementId),
}

/// Adapter over a concrete widget toolkit.
///
/// Composition never talks to a toolkit directly; every construction step
/// goes through an injected `Toolkit` so the same layout code drives any
/// backend that can create containers, reparent elements, and maintain
/// ordered child lists. Query methods exist so callers and tests can
/// observe the structure that was built.
pub trait Toolkit {
    /// Creates an empty container arranged by `strategy`.
    fn create_container(&mut self, strategy: Strategy) -> ElementId;

    /// Moves `element` under `new_parent`, detaching it from any previous
    /// parent first. An element has at most one parent at a time and can
    /// never become its own ancestor.
    fn reparent(&mut self, element: ElementId, new_parent: ElementId) -> Result<(), ToolkitError>;

    /// Appends `child` to the container's ordered child list. Widget
    /// children are adopted by the container as part of the append.
    fn append_child(&mut self, container: ElementId, child: Child) -> Result<(), ToolkitError>;

    /// Places `widget` in the given grid cell. Also appends it to the
    /// container's child list in call order.
    fn place_in_cell(
        &mut self,
        container: ElementId,
        widget: ElementId,
        row: usize,
        col: usize,
    ) -> Result<(), ToolkitError>;

    /// Appends `widget` as a labelled page of a tabbed container.
    fn insert_page(
        &mut self,
        container: ElementId,
        widget: ElementId,
        label: &str,
    ) -> Result<(), ToolkitError>;

    /// Single-value margin setter from older toolkit generations.
    ///
    /// The default implementation reports [`MarginSupport::Unsupported`];
    /// adapters for toolkits that still carry the call override it.
    fn set_margin(
        &mut self,
        _container: ElementId,
        _margin: u16,
    ) -> Result<MarginSupport, ToolkitError> {
        Ok(MarginSupport::Unsupported)
    }

    /// Per-edge margin setter. Every toolkit generation supports this.
    fn set_contents_margins(
        &mut self,
        container: ElementId,
        margins: Margins,
    ) -> Result<(), ToolkitError>;

    /// Assigns relative pane sizes to a split container.
    fn set_split_sizes(
        &mut self,
        container: ElementId,
        sizes: &[u16],
    ) -> Result<(), ToolkitError>;

    /// Selects which page of a stack container is visible.
    fn set_current_index(
        &mut self,
        container: ElementId,
        index: usize,
    ) -> Result<(), ToolkitError>;

    fn parent_of(&self, element: ElementId) -> Result<Option<ElementId>, ToolkitError>;

    fn children_of(&self, container: ElementId) -> Result<Vec<Child>, ToolkitError>;

    fn margins_of(&self, container: ElementId) -> Result<Margins, ToolkitError>;

    fn cell_occupant(
        &self,
        container: ElementId,
        row: usize,
        col: usize,
    ) -> Result<Option<ElementId>, ToolkitError>;

    fn split_sizes(&self, container: ElementId) -> Result<Vec<u16>, ToolkitError>;

    fn current_index(&self, container: ElementId) -> Result<Option<usize>, ToolkitError>;

    fn page_label(&self, container: ElementId, index: usize) -> Result<String, ToolkitError>;
}
