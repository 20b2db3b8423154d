use crate::element::{Child, ElementId, Spacer};
use crate::error::{ComposeError, Result};
use crate::toolkit::{MarginSupport, Margins, Strategy, Toolkit};

/// Outer margin applied to row, column, grid, and flow containers unless
/// overridden through the options.
pub const DEFAULT_MARGIN: u16 = 2;

/// Handle to a composed container: the toolkit element plus the strategy
/// it was built with.
///
/// Containers convert into [`Child`] so any composed container can be
/// nested inside another constructor call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Container {
    id: ElementId,
    strategy: Strategy,
}

impl Container {
    pub(crate) fn new(id: ElementId, strategy: Strategy) -> Self {
        Self { id, strategy }
    }

    pub fn id(self) -> ElementId {
        self.id
    }

    pub fn strategy(self) -> Strategy {
        self.strategy
    }

    /// Switches which page of a stack container is visible. Out-of-range
    /// indices propagate the toolkit's index error unchanged.
    pub fn set_visible_index(self, toolkit: &mut impl Toolkit, index: usize) -> Result<()> {
        self.require_strategy(Strategy::Stack)?;
        toolkit.set_current_index(self.id, index)?;
        Ok(())
    }

    /// Index of the currently visible stack page, `None` for an empty
    /// stack.
    pub fn visible_index(self, toolkit: &impl Toolkit) -> Result<Option<usize>> {
        self.require_strategy(Strategy::Stack)?;
        Ok(toolkit.current_index(self.id)?)
    }

    /// The widget currently shown by a stack container.
    pub fn visible_child(self, toolkit: &impl Toolkit) -> Result<Option<ElementId>> {
        self.require_strategy(Strategy::Stack)?;
        let Some(index) = toolkit.current_index(self.id)? else {
            return Ok(None);
        };
        let children = toolkit.children_of(self.id)?;
        Ok(children.get(index).and_then(|child| child.widget()))
    }

    fn require_strategy(self, expected: Strategy) -> Result<()> {
        if self.strategy == expected {
            Ok(())
        } else {
            Err(ComposeError::StrategyMismatch {
                expected,
                found: self.strategy,
            })
        }
    }
}

impl From<Container> for Child {
    fn from(container: Container) -> Self {
        Child::Widget(container.id)
    }
}

/// Options for [`row`] construction.
#[derive(Debug, Clone, Copy)]
pub struct RowOptions {
    /// Outer margin, applied uniformly.
    pub margin: u16,
    /// Append [`Spacer::row_trailing`] after the last child so the row
    /// packs left instead of stretching its children.
    pub trailing_spacer: bool,
    /// Fill this container instead of creating a new one. Must be a row.
    pub existing: Option<Container>,
}

impl Default for RowOptions {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            trailing_spacer: false,
            existing: None,
        }
    }
}

impl RowOptions {
    pub fn with_margin(mut self, margin: u16) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_trailing_spacer(mut self) -> Self {
        self.trailing_spacer = true;
        self
    }

    pub fn with_existing(mut self, container: Container) -> Self {
        self.existing = Some(container);
        self
    }
}

/// Options for [`column`] construction. The trailing spacer is the
/// vertical [`Spacer::column_trailing`].
#[derive(Debug, Clone, Copy)]
pub struct ColumnOptions {
    pub margin: u16,
    pub trailing_spacer: bool,
    pub existing: Option<Container>,
}

impl Default for ColumnOptions {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            trailing_spacer: false,
            existing: None,
        }
    }
}

impl ColumnOptions {
    pub fn with_margin(mut self, margin: u16) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_trailing_spacer(mut self) -> Self {
        self.trailing_spacer = true;
        self
    }

    pub fn with_existing(mut self, container: Container) -> Self {
        self.existing = Some(container);
        self
    }
}

/// Options for [`grid`] construction.
#[derive(Debug, Clone, Copy)]
pub struct GridOptions {
    pub margin: u16,
    /// Accept rows of unequal length and place them as-is. Off by
    /// default: uneven rows are rejected with the offending row index.
    pub ragged: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            ragged: false,
        }
    }
}

impl GridOptions {
    pub fn with_margin(mut self, margin: u16) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_ragged(mut self) -> Self {
        self.ragged = true;
        self
    }
}

/// Options for [`horizontal_split`] construction.
#[derive(Debug, Clone, Copy)]
pub struct SplitOptions {
    /// Fraction of the width given to the left pane, `0.0..=1.0`. Pane
    /// sizes are `[trunc(ratio * 100), 100 - trunc(ratio * 100)]`.
    pub ratio: f32,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self { ratio: 0.5 }
    }
}

impl SplitOptions {
    pub fn with_ratio(mut self, ratio: f32) -> Self {
        self.ratio = ratio;
        self
    }
}

/// Options for [`vertical_split`] construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct VSplitOptions {
    /// Append both panes to this split instead of creating a new one,
    /// building a chain of three or more panes across calls.
    pub existing: Option<Container>,
}

impl VSplitOptions {
    pub fn with_existing(mut self, container: Container) -> Self {
        self.existing = Some(container);
        self
    }
}

/// Options for [`flow`] construction.
#[derive(Debug, Clone, Copy)]
pub struct FlowOptions {
    pub margin: u16,
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
        }
    }
}

impl FlowOptions {
    pub fn with_margin(mut self, margin: u16) -> Self {
        self.margin = margin;
        self
    }
}

/// What a constructor did, for session-level observability.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Composed {
    pub(crate) container: Container,
    pub(crate) children: usize,
    pub(crate) margin_fallback: bool,
    pub(crate) reused: bool,
}

/// Arranges `children` along the horizontal axis.
pub fn row(toolkit: &mut impl Toolkit, children: &[Child]) -> Result<Container> {
    row_with(toolkit, children, RowOptions::default())
}

pub fn row_with(
    toolkit: &mut impl Toolkit,
    children: &[Child],
    options: RowOptions,
) -> Result<Container> {
    Ok(compose_row(toolkit, children, &options)?.container)
}

/// Arranges `children` along the vertical axis.
pub fn column(toolkit: &mut impl Toolkit, children: &[Child]) -> Result<Container> {
    column_with(toolkit, children, ColumnOptions::default())
}

pub fn column_with(
    toolkit: &mut impl Toolkit,
    children: &[Child],
    options: ColumnOptions,
) -> Result<Container> {
    Ok(compose_column(toolkit, children, &options)?.container)
}

/// Places element `(i, j)` of `rows` in grid cell `(i, j)`. Rows must all
/// have the length of the first row unless raggedness is opted into.
pub fn grid(toolkit: &mut impl Toolkit, rows: &[Vec<ElementId>]) -> Result<Container> {
    grid_with(toolkit, rows, GridOptions::default())
}

pub fn grid_with(
    toolkit: &mut impl Toolkit,
    rows: &[Vec<ElementId>],
    options: GridOptions,
) -> Result<Container> {
    Ok(compose_grid(toolkit, rows, &options)?.container)
}

/// Layers `children` on top of each other, one visible at a time. The
/// first child starts visible; switch pages with
/// [`Container::set_visible_index`].
pub fn stack(toolkit: &mut impl Toolkit, children: &[ElementId]) -> Result<Container> {
    Ok(compose_stack(toolkit, children)?.container)
}

/// Places `left` and `right` side by side with a draggable divider, split
/// evenly.
pub fn horizontal_split(
    toolkit: &mut impl Toolkit,
    left: ElementId,
    right: ElementId,
) -> Result<Container> {
    horizontal_split_with(toolkit, left, right, SplitOptions::default())
}

pub fn horizontal_split_with(
    toolkit: &mut impl Toolkit,
    left: ElementId,
    right: ElementId,
    options: SplitOptions,
) -> Result<Container> {
    Ok(compose_horizontal_split(toolkit, left, right, &options)?.container)
}

/// Places `top` above `bottom` with a draggable divider.
pub fn vertical_split(
    toolkit: &mut impl Toolkit,
    top: ElementId,
    bottom: ElementId,
) -> Result<Container> {
    vertical_split_with(toolkit, top, bottom, VSplitOptions::default())
}

pub fn vertical_split_with(
    toolkit: &mut impl Toolkit,
    top: ElementId,
    bottom: ElementId,
    options: VSplitOptions,
) -> Result<Container> {
    Ok(compose_vertical_split(toolkit, top, bottom, &options)?.container)
}

/// Arranges `children` left to right, wrapping onto new lines when the
/// container runs out of width.
pub fn flow(toolkit: &mut impl Toolkit, children: &[Child]) -> Result<Container> {
    flow_with(toolkit, children, FlowOptions::default())
}

pub fn flow_with(
    toolkit: &mut impl Toolkit,
    children: &[Child],
    options: FlowOptions,
) -> Result<Container> {
    Ok(compose_flow(toolkit, children, &options)?.container)
}

/// Puts each `(element, label)` pair into one selectable page, in order.
pub fn tabs(toolkit: &mut impl Toolkit, pages: &[(ElementId, &str)]) -> Result<Container> {
    Ok(compose_tabs(toolkit, pages)?.container)
}

pub(crate) fn compose_row(
    toolkit: &mut impl Toolkit,
    children: &[Child],
    options: &RowOptions,
) -> Result<Composed> {
    compose_axis(
        toolkit,
        Strategy::Row,
        children,
        options.margin,
        options.trailing_spacer.then(Spacer::row_trailing),
        options.existing,
    )
}

pub(crate) fn compose_column(
    toolkit: &mut impl Toolkit,
    children: &[Child],
    options: &ColumnOptions,
) -> Result<Composed> {
    compose_axis(
        toolkit,
        Strategy::Column,
        children,
        options.margin,
        options.trailing_spacer.then(Spacer::column_trailing),
        options.existing,
    )
}

pub(crate) fn compose_grid(
    toolkit: &mut impl Toolkit,
    rows: &[Vec<ElementId>],
    options: &GridOptions,
) -> Result<Composed> {
    validate_row_lengths(rows, options.ragged)?;
    let container = Container::new(toolkit.create_container(Strategy::Grid), Strategy::Grid);
    let margin_fallback = apply_margin(toolkit, container.id, options.margin)?;
    let mut placed = 0;
    for (i, cells) in rows.iter().enumerate() {
        for (j, &element) in cells.iter().enumerate() {
            toolkit.place_in_cell(container.id, element, i, j)?;
            placed += 1;
        }
    }
    Ok(Composed {
        container,
        children: placed,
        margin_fallback,
        reused: false,
    })
}

pub(crate) fn compose_stack(
    toolkit: &mut impl Toolkit,
    children: &[ElementId],
) -> Result<Composed> {
    let container = Container::new(toolkit.create_container(Strategy::Stack), Strategy::Stack);
    for &child in children {
        toolkit.append_child(container.id, Child::Widget(child))?;
    }
    if !children.is_empty() {
        toolkit.set_current_index(container.id, 0)?;
    }
    Ok(Composed {
        container,
        children: children.len(),
        margin_fallback: false,
        reused: false,
    })
}

pub(crate) fn compose_horizontal_split(
    toolkit: &mut impl Toolkit,
    left: ElementId,
    right: ElementId,
    options: &SplitOptions,
) -> Result<Composed> {
    validate_ratio(options.ratio)?;
    let container = Container::new(
        toolkit.create_container(Strategy::HorizontalSplit),
        Strategy::HorizontalSplit,
    );
    for pane in [left, right] {
        toolkit.reparent(pane, container.id)?;
        toolkit.append_child(container.id, Child::Widget(pane))?;
    }
    let first = (options.ratio * 100.0) as u16;
    toolkit.set_split_sizes(container.id, &[first, 100 - first])?;
    Ok(Composed {
        container,
        children: 2,
        margin_fallback: false,
        reused: false,
    })
}

pub(crate) fn compose_vertical_split(
    toolkit: &mut impl Toolkit,
    top: ElementId,
    bottom: ElementId,
    options: &VSplitOptions,
) -> Result<Composed> {
    let (container, reused) = new_or_reused(toolkit, Strategy::VerticalSplit, options.existing)?;
    for pane in [top, bottom] {
        toolkit.reparent(pane, container.id)?;
        toolkit.append_child(container.id, Child::Widget(pane))?;
    }
    Ok(Composed {
        container,
        children: 2,
        margin_fallback: false,
        reused,
    })
}

pub(crate) fn compose_flow(
    toolkit: &mut impl Toolkit,
    children: &[Child],
    options: &FlowOptions,
) -> Result<Composed> {
    let container = Container::new(toolkit.create_container(Strategy::Flow), Strategy::Flow);
    let margin_fallback = apply_margin(toolkit, container.id, options.margin)?;
    for &child in children {
        toolkit.append_child(container.id, child)?;
    }
    Ok(Composed {
        container,
        children: children.len(),
        margin_fallback,
        reused: false,
    })
}

pub(crate) fn compose_tabs(
    toolkit: &mut impl Toolkit,
    pages: &[(ElementId, &str)],
) -> Result<Composed> {
    let container = Container::new(toolkit.create_container(Strategy::Tabs), Strategy::Tabs);
    for &(element, label) in pages {
        toolkit.insert_page(container.id, element, label)?;
    }
    Ok(Composed {
        container,
        children: pages.len(),
        margin_fallback: false,
        reused: false,
    })
}

fn compose_axis(
    toolkit: &mut impl Toolkit,
    strategy: Strategy,
    children: &[Child],
    margin: u16,
    trailing: Option<Spacer>,
    existing: Option<Container>,
) -> Result<Composed> {
    let (container, reused) = new_or_reused(toolkit, strategy, existing)?;
    let margin_fallback = apply_margin(toolkit, container.id, margin)?;
    for &child in children {
        if let Child::Widget(widget) = child {
            toolkit.reparent(widget, container.id)?;
        }
        toolkit.append_child(container.id, child)?;
    }
    if let Some(spacer) = trailing {
        toolkit.append_child(container.id, Child::Spacer(spacer))?;
    }
    Ok(Composed {
        container,
        children: children.len(),
        margin_fallback,
        reused,
    })
}

fn new_or_reused(
    toolkit: &mut impl Toolkit,
    strategy: Strategy,
    existing: Option<Container>,
) -> Result<(Container, bool)> {
    match existing {
        Some(container) if container.strategy == strategy => Ok((container, true)),
        Some(container) => Err(ComposeError::StrategyMismatch {
            expected: strategy,
            found: container.strategy,
        }),
        None => Ok((
            Container::new(toolkit.create_container(strategy), strategy),
            false,
        )),
    }
}

/// Applies a uniform margin through the single-value entry point, falling
/// back to per-edge margins when the toolkit does not carry it. Returns
/// whether the fallback was taken.
pub(crate) fn apply_margin(
    toolkit: &mut impl Toolkit,
    container: ElementId,
    margin: u16,
) -> Result<bool> {
    match toolkit.set_margin(container, margin)? {
        MarginSupport::Applied => Ok(false),
        MarginSupport::Unsupported => {
            toolkit.set_contents_margins(container, Margins::uniform(margin))?;
            Ok(true)
        }
    }
}

/// Rejects rows that do not match the width set by the first row, naming
/// the first offending row.
pub(crate) fn validate_row_lengths<T>(rows: &[Vec<T>], ragged: bool) -> Result<()> {
    if ragged {
        return Ok(());
    }
    let Some(first) = rows.first() else {
        return Ok(());
    };
    let expected = first.len();
    for (row, cells) in rows.iter().enumerate().skip(1) {
        if cells.len() != expected {
            return Err(ComposeError::RaggedGrid {
                row,
                expected,
                found: cells.len(),
            });
        }
    }
    Ok(())
}

pub(crate) fn validate_ratio(ratio: f32) -> Result<()> {
    if ratio.is_finite() && (0.0..=1.0).contains(&ratio) {
        Ok(())
    } else {
        Err(ComposeError::RatioOutOfRange(ratio))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::{HeadlessToolkit, ToolkitError};

    fn widgets(toolkit: &mut HeadlessToolkit, labels: &[&str]) -> Vec<ElementId> {
        labels
            .iter()
            .map(|label| toolkit.create_widget(*label))
            .collect()
    }

    fn as_children(elements: &[ElementId]) -> Vec<Child> {
        elements.iter().copied().map(Child::Widget).collect()
    }

    #[test]
    fn row_preserves_child_order_and_parents() {
        let mut toolkit = HeadlessToolkit::new();
        let elements = widgets(&mut toolkit, &["a", "b", "c"]);
        let children = as_children(&elements);

        let container = row(&mut toolkit, &children).unwrap();

        assert_eq!(container.strategy(), Strategy::Row);
        assert_eq!(toolkit.children_of(container.id()).unwrap(), children);
        for element in elements {
            assert_eq!(toolkit.parent_of(element).unwrap(), Some(container.id()));
        }
    }

    #[test]
    fn row_margin_defaults_to_two() {
        let mut toolkit = HeadlessToolkit::new();
        let container = row(&mut toolkit, &[]).unwrap();
        assert_eq!(
            toolkit.margins_of(container.id()).unwrap(),
            Margins::uniform(DEFAULT_MARGIN)
        );
    }

    #[test]
    fn margin_option_reaches_the_toolkit() {
        let mut toolkit = HeadlessToolkit::new();
        let container =
            row_with(&mut toolkit, &[], RowOptions::default().with_margin(10)).unwrap();
        assert_eq!(
            toolkit.margins_of(container.id()).unwrap(),
            Margins::uniform(10)
        );
    }

    #[test]
    fn margin_falls_back_to_per_edge_values() {
        let mut toolkit = HeadlessToolkit::new().with_legacy_margin(false);
        let container =
            row_with(&mut toolkit, &[], RowOptions::default().with_margin(10)).unwrap();
        assert_eq!(
            toolkit.margins_of(container.id()).unwrap(),
            Margins::uniform(10)
        );
    }

    #[test]
    fn trailing_spacer_lands_after_the_children() {
        let mut toolkit = HeadlessToolkit::new();
        let elements = widgets(&mut toolkit, &["only"]);
        let container = row_with(
            &mut toolkit,
            &as_children(&elements),
            RowOptions::default().with_trailing_spacer(),
        )
        .unwrap();

        let children = toolkit.children_of(container.id()).unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0], Child::Widget(elements[0]));
        assert_eq!(children[1], Child::Spacer(Spacer::row_trailing()));
    }

    #[test]
    fn column_uses_the_vertical_spacer() {
        let mut toolkit = HeadlessToolkit::new();
        let container = column_with(
            &mut toolkit,
            &[],
            ColumnOptions::default().with_trailing_spacer(),
        )
        .unwrap();

        assert_eq!(
            toolkit.children_of(container.id()).unwrap(),
            vec![Child::Spacer(Spacer::column_trailing())]
        );
    }

    #[test]
    fn composing_twice_moves_children_to_the_new_container() {
        let mut toolkit = HeadlessToolkit::new();
        let elements = widgets(&mut toolkit, &["shared"]);
        let children = as_children(&elements);

        let first = row(&mut toolkit, &children).unwrap();
        let second = row(&mut toolkit, &children).unwrap();

        assert_eq!(toolkit.parent_of(elements[0]).unwrap(), Some(second.id()));
        assert!(toolkit.children_of(first.id()).unwrap().is_empty());
    }

    #[test]
    fn row_fills_an_existing_container() {
        let mut toolkit = HeadlessToolkit::new();
        let shell = row(&mut toolkit, &[]).unwrap();
        let elements = widgets(&mut toolkit, &["late"]);

        let filled = row_with(
            &mut toolkit,
            &as_children(&elements),
            RowOptions::default().with_existing(shell),
        )
        .unwrap();

        assert_eq!(filled.id(), shell.id());
        assert_eq!(
            toolkit.children_of(shell.id()).unwrap(),
            as_children(&elements)
        );
    }

    #[test]
    fn reuse_rejects_a_container_of_another_strategy() {
        let mut toolkit = HeadlessToolkit::new();
        let stackish = stack(&mut toolkit, &[]).unwrap();

        let err = row_with(
            &mut toolkit,
            &[],
            RowOptions::default().with_existing(stackish),
        )
        .unwrap_err();

        assert_eq!(
            err,
            ComposeError::StrategyMismatch {
                expected: Strategy::Row,
                found: Strategy::Stack,
            }
        );
    }

    #[test]
    fn a_container_cannot_be_composed_into_itself() {
        let mut toolkit = HeadlessToolkit::new();
        let shell = row(&mut toolkit, &[]).unwrap();

        let err = row_with(
            &mut toolkit,
            &[shell.into()],
            RowOptions::default().with_existing(shell),
        )
        .unwrap_err();

        assert_eq!(
            err,
            ComposeError::Toolkit(ToolkitError::ParentCycle(shell.id()))
        );
    }

    #[test]
    fn grid_places_elements_by_cell() {
        let mut toolkit = HeadlessToolkit::new();
        let elements = widgets(&mut toolkit, &["a", "b", "c", "d"]);
        let rows = vec![
            vec![elements[0], elements[1]],
            vec![elements[2], elements[3]],
        ];

        let container = grid(&mut toolkit, &rows).unwrap();

        assert_eq!(
            toolkit.cell_occupant(container.id(), 0, 1).unwrap(),
            Some(elements[1])
        );
        assert_eq!(
            toolkit.cell_occupant(container.id(), 1, 0).unwrap(),
            Some(elements[2])
        );
        assert_eq!(toolkit.parent_of(elements[3]).unwrap(), Some(container.id()));
    }

    #[test]
    fn grid_rejects_ragged_rows_by_default() {
        let mut toolkit = HeadlessToolkit::new();
        let elements = widgets(&mut toolkit, &["a", "b", "c"]);
        let rows = vec![vec![elements[0], elements[1]], vec![elements[2]]];
        let before = toolkit.element_count();

        let err = grid(&mut toolkit, &rows).unwrap_err();

        assert_eq!(
            err,
            ComposeError::RaggedGrid {
                row: 1,
                expected: 2,
                found: 1,
            }
        );
        assert_eq!(toolkit.element_count(), before);
        assert_eq!(toolkit.parent_of(elements[2]).unwrap(), None);
    }

    #[test]
    fn ragged_grid_opt_in_places_uneven_rows() {
        let mut toolkit = HeadlessToolkit::new();
        let elements = widgets(&mut toolkit, &["a", "b", "c"]);
        let rows = vec![vec![elements[0], elements[1]], vec![elements[2]]];

        let container = grid_with(&mut toolkit, &rows, GridOptions::default().with_ragged())
            .unwrap();

        assert_eq!(
            toolkit.cell_occupant(container.id(), 1, 0).unwrap(),
            Some(elements[2])
        );
        assert_eq!(toolkit.cell_occupant(container.id(), 1, 1).unwrap(), None);
    }

    #[test]
    fn stack_starts_on_the_first_page() {
        let mut toolkit = HeadlessToolkit::new();
        let elements = widgets(&mut toolkit, &["a", "b", "c"]);

        let container = stack(&mut toolkit, &elements).unwrap();

        assert_eq!(container.visible_index(&toolkit).unwrap(), Some(0));
        assert_eq!(
            container.visible_child(&toolkit).unwrap(),
            Some(elements[0])
        );
    }

    #[test]
    fn set_visible_index_switches_the_page() {
        let mut toolkit = HeadlessToolkit::new();
        let elements = widgets(&mut toolkit, &["a", "b", "c"]);
        let container = stack(&mut toolkit, &elements).unwrap();

        container.set_visible_index(&mut toolkit, 1).unwrap();

        assert_eq!(
            container.visible_child(&toolkit).unwrap(),
            Some(elements[1])
        );
    }

    #[test]
    fn empty_stack_has_no_visible_child() {
        let mut toolkit = HeadlessToolkit::new();
        let container = stack(&mut toolkit, &[]).unwrap();
        assert_eq!(container.visible_index(&toolkit).unwrap(), None);
        assert_eq!(container.visible_child(&toolkit).unwrap(), None);
    }

    #[test]
    fn visible_index_rejects_other_strategies() {
        let mut toolkit = HeadlessToolkit::new();
        let container = row(&mut toolkit, &[]).unwrap();

        let err = container.set_visible_index(&mut toolkit, 0).unwrap_err();
        assert_eq!(
            err,
            ComposeError::StrategyMismatch {
                expected: Strategy::Stack,
                found: Strategy::Row,
            }
        );
    }

    #[test]
    fn horizontal_split_defaults_to_even_panes() {
        let mut toolkit = HeadlessToolkit::new();
        let elements = widgets(&mut toolkit, &["left", "right"]);

        let container = horizontal_split(&mut toolkit, elements[0], elements[1]).unwrap();

        assert_eq!(toolkit.split_sizes(container.id()).unwrap(), vec![50, 50]);
        assert_eq!(toolkit.parent_of(elements[0]).unwrap(), Some(container.id()));
        assert_eq!(toolkit.parent_of(elements[1]).unwrap(), Some(container.id()));
    }

    #[test]
    fn horizontal_split_truncates_the_ratio() {
        let mut toolkit = HeadlessToolkit::new();
        let elements = widgets(&mut toolkit, &["left", "right"]);

        let container = horizontal_split_with(
            &mut toolkit,
            elements[0],
            elements[1],
            SplitOptions::default().with_ratio(0.3),
        )
        .unwrap();

        assert_eq!(toolkit.split_sizes(container.id()).unwrap(), vec![30, 70]);
    }

    #[test]
    fn out_of_range_ratio_creates_nothing() {
        let mut toolkit = HeadlessToolkit::new();
        let elements = widgets(&mut toolkit, &["left", "right"]);
        let before = toolkit.element_count();

        let err = horizontal_split_with(
            &mut toolkit,
            elements[0],
            elements[1],
            SplitOptions::default().with_ratio(1.5),
        )
        .unwrap_err();

        assert_eq!(err, ComposeError::RatioOutOfRange(1.5));
        assert_eq!(toolkit.element_count(), before);
        assert_eq!(toolkit.parent_of(elements[0]).unwrap(), None);
    }

    #[test]
    fn vertical_split_chains_into_an_existing_container() {
        let mut toolkit = HeadlessToolkit::new();
        let elements = widgets(&mut toolkit, &["a", "b", "c", "d"]);

        let chain = vertical_split(&mut toolkit, elements[0], elements[1]).unwrap();
        let extended = vertical_split_with(
            &mut toolkit,
            elements[2],
            elements[3],
            VSplitOptions::default().with_existing(chain),
        )
        .unwrap();

        assert_eq!(extended.id(), chain.id());
        assert_eq!(
            toolkit.children_of(chain.id()).unwrap(),
            as_children(&elements)
        );
    }

    #[test]
    fn vertical_split_reuse_rejects_horizontal_containers() {
        let mut toolkit = HeadlessToolkit::new();
        let elements = widgets(&mut toolkit, &["a", "b", "c", "d"]);
        let horizontal = horizontal_split(&mut toolkit, elements[0], elements[1]).unwrap();

        let err = vertical_split_with(
            &mut toolkit,
            elements[2],
            elements[3],
            VSplitOptions::default().with_existing(horizontal),
        )
        .unwrap_err();

        assert_eq!(
            err,
            ComposeError::StrategyMismatch {
                expected: Strategy::VerticalSplit,
                found: Strategy::HorizontalSplit,
            }
        );
    }

    #[test]
    fn flow_applies_margin_and_keeps_order() {
        let mut toolkit = HeadlessToolkit::new();
        let elements = widgets(&mut toolkit, &["a", "b"]);
        let children = as_children(&elements);

        let container = flow_with(
            &mut toolkit,
            &children,
            FlowOptions::default().with_margin(4),
        )
        .unwrap();

        assert_eq!(container.strategy(), Strategy::Flow);
        assert_eq!(toolkit.children_of(container.id()).unwrap(), children);
        assert_eq!(
            toolkit.margins_of(container.id()).unwrap(),
            Margins::uniform(4)
        );
    }

    #[test]
    fn tabs_record_labels_in_order() {
        let mut toolkit = HeadlessToolkit::new();
        let elements = widgets(&mut toolkit, &["first", "second"]);

        let container = tabs(
            &mut toolkit,
            &[(elements[0], "One"), (elements[1], "Two")],
        )
        .unwrap();

        assert_eq!(toolkit.page_label(container.id(), 0).unwrap(), "One");
        assert_eq!(toolkit.page_label(container.id(), 1).unwrap(), "Two");
        assert_eq!(
            toolkit.children_of(container.id()).unwrap(),
            as_children(&elements)
        );
    }

    #[test]
    fn containers_nest_through_child_conversion() {
        let mut toolkit = HeadlessToolkit::new();
        let elements = widgets(&mut toolkit, &["editor", "console", "side"]);

        let inner = column(
            &mut toolkit,
            &[Child::Widget(elements[0]), Child::Widget(elements[1])],
        )
        .unwrap();
        let outer = row(
            &mut toolkit,
            &[inner.into(), Child::Widget(elements[2])],
        )
        .unwrap();

        assert_eq!(toolkit.parent_of(inner.id()).unwrap(), Some(outer.id()));
        assert_eq!(toolkit.parent_of(elements[0]).unwrap(), Some(inner.id()));
        assert_eq!(
            toolkit.children_of(outer.id()).unwrap(),
            vec![Child::Widget(inner.id()), Child::Widget(elements[2])]
        );
    }
}
