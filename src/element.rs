use std::fmt;

/// Opaque handle to a toolkit-managed widget.
///
/// Handles are issued by the active [`Toolkit`](crate::toolkit::Toolkit)
/// implementation. The composer never looks inside an element; it only
/// reparents it and inserts it into container child lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Axis along which a spacer absorbs extra space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Expanding blank space inserted into a container as a layout item
/// rather than a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spacer {
    pub width_hint: u16,
    pub height_hint: u16,
    pub expands: Axis,
}

impl Spacer {
    pub const fn new(width_hint: u16, height_hint: u16, expands: Axis) -> Self {
        Self {
            width_hint,
            height_hint,
            expands,
        }
    }

    /// The spacer appended at the end of a row when trailing space is
    /// requested: absorbs horizontal slack, keeps a minimal height.
    pub const fn row_trailing() -> Self {
        Self::new(40, 20, Axis::Horizontal)
    }

    /// Column counterpart of [`Spacer::row_trailing`].
    pub const fn column_trailing() -> Self {
        Self::new(20, 40, Axis::Vertical)
    }
}

/// A single entry in a container's child list.
///
/// Containers accept either real widgets or layout items (spacers). The
/// distinction is made by the caller up front instead of being discovered
/// by the toolkit at insertion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Child {
    Widget(ElementId),
    Spacer(Spacer),
}

impl Child {
    /// The widget handle, if this child is a widget.
    pub fn widget(self) -> Option<ElementId> {
        match self {
            Child::Widget(id) => Some(id),
            Child::Spacer(_) => None,
        }
    }

    pub fn is_spacer(self) -> bool {
        matches!(self, Child::Spacer(_))
    }
}

impl From<ElementId> for Child {
    fn from(id: ElementId) -> Self {
        Child::Widget(id)
    }
}

impl From<Spacer> for Child {
    fn from(spacer: Spacer) -> Self {
        Child::Spacer(spacer)
    }
}
