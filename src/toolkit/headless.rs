use std::collections::HashMap;
use std::fmt::Write as _;

use crate::element::{Child, ElementId};
use crate::toolkit::core::{MarginSupport, Margins, Strategy, Toolkit, ToolkitError};

#[derive(Debug, Clone)]
struct ContainerState {
    strategy: Strategy,
    children: Vec<Child>,
    margins: Margins,
    cells: HashMap<(usize, usize), ElementId>,
    split_sizes: Vec<u16>,
    current_index: Option<usize>,
    page_labels: Vec<String>,
}

impl ContainerState {
    fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            children: Vec::new(),
            margins: Margins::default(),
            cells: HashMap::new(),
            split_sizes: Vec::new(),
            current_index: None,
            page_labels: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct ElementRecord {
    label: String,
    parent: Option<ElementId>,
    container: Option<ContainerState>,
}

/// In-memory toolkit backed by an element arena.
///
/// No real windowing system is involved; the arena records the same
/// structure a native backend would build (parents, ordered child lists,
/// margins, grid cells, split sizes, page labels) so compositions can be
/// inspected and asserted on. The single-value margin setter is enabled
/// by default and can be switched off to exercise the per-edge fallback.
#[derive(Debug)]
pub struct HeadlessToolkit {
    elements: HashMap<ElementId, ElementRecord>,
    next_id: u64,
    legacy_margin: bool,
}

impl Default for HeadlessToolkit {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessToolkit {
    pub fn new() -> Self {
        Self {
            elements: HashMap::new(),
            next_id: 0,
            legacy_margin: true,
        }
    }

    /// Toggles the single-value margin entry point. Disabling it makes the
    /// adapter behave like a toolkit generation that only exposes per-edge
    /// margins.
    pub fn with_legacy_margin(mut self, enabled: bool) -> Self {
        self.legacy_margin = enabled;
        self
    }

    /// Creates a leaf widget with a human-readable label.
    pub fn create_widget(&mut self, label: impl Into<String>) -> ElementId {
        self.allocate(label.into(), None)
    }

    pub fn label_of(&self, element: ElementId) -> Option<&str> {
        self.elements
            .get(&element)
            .map(|record| record.label.as_str())
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn contains(&self, element: ElementId) -> bool {
        self.elements.contains_key(&element)
    }

    /// Renders the subtree rooted at `root` as an indented listing, one
    /// element per line. Useful for demos and debugging assertions.
    pub fn outline(&self, root: ElementId) -> String {
        let mut out = String::new();
        self.outline_into(root, 0, &mut out);
        out
    }

    fn outline_into(&self, element: ElementId, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        let Some(record) = self.elements.get(&element) else {
            let _ = writeln!(out, "{indent}<unknown {element}>");
            return;
        };
        match &record.container {
            Some(state) => {
                let _ = writeln!(out, "{indent}{}", state.strategy);
                for child in &state.children {
                    match child {
                        Child::Widget(id) => self.outline_into(*id, depth + 1, out),
                        Child::Spacer(_) => {
                            let pad = "  ".repeat(depth + 1);
                            let _ = writeln!(out, "{pad}spacer");
                        }
                    }
                }
            }
            None => {
                let _ = writeln!(out, "{indent}{:?}", record.label);
            }
        }
    }

    fn allocate(&mut self, label: String, container: Option<ContainerState>) -> ElementId {
        let id = ElementId::from_raw(self.next_id);
        self.next_id += 1;
        self.elements.insert(
            id,
            ElementRecord {
                label,
                parent: None,
                container,
            },
        );
        id
    }

    fn record(&self, element: ElementId) -> Result<&ElementRecord, ToolkitError> {
        self.elements
            .get(&element)
            .ok_or(ToolkitError::UnknownElement(element))
    }

    fn state(&self, container: ElementId) -> Result<&ContainerState, ToolkitError> {
        self.record(container)?
            .container
            .as_ref()
            .ok_or(ToolkitError::NotAContainer(container))
    }

    fn state_mut(&mut self, container: ElementId) -> Result<&mut ContainerState, ToolkitError> {
        self.elements
            .get_mut(&container)
            .ok_or(ToolkitError::UnknownElement(container))?
            .container
            .as_mut()
            .ok_or(ToolkitError::NotAContainer(container))
    }

    fn state_expecting(
        &self,
        container: ElementId,
        strategies: &[Strategy],
        operation: &'static str,
    ) -> Result<&ContainerState, ToolkitError> {
        let state = self.state(container)?;
        if strategies.contains(&state.strategy) {
            Ok(state)
        } else {
            Err(ToolkitError::UnsupportedOperation {
                operation,
                found: state.strategy,
            })
        }
    }

    fn state_mut_expecting(
        &mut self,
        container: ElementId,
        strategies: &[Strategy],
        operation: &'static str,
    ) -> Result<&mut ContainerState, ToolkitError> {
        self.state_expecting(container, strategies, operation)?;
        self.state_mut(container)
    }

    /// Removes `widget` from its current parent's bookkeeping, leaving it
    /// parentless. Safe to call on elements that have no parent.
    fn detach(&mut self, widget: ElementId) {
        let Some(parent) = self.elements.get(&widget).and_then(|record| record.parent) else {
            return;
        };
        if let Some(state) = self
            .elements
            .get_mut(&parent)
            .and_then(|record| record.container.as_mut())
        {
            let position = state
                .children
                .iter()
                .position(|child| child.widget() == Some(widget));
            if let Some(position) = position {
                state.children.remove(position);
                if state.strategy == Strategy::Tabs && position < state.page_labels.len() {
                    state.page_labels.remove(position);
                }
                if state.strategy == Strategy::Stack {
                    let len = state.children.len();
                    state.current_index = match state.current_index {
                        Some(_) if len == 0 => None,
                        Some(index) if position < index => Some(index - 1),
                        Some(index) if index >= len => Some(len - 1),
                        other => other,
                    };
                }
            }
            state.cells.retain(|_, occupant| *occupant != widget);
        }
        if let Some(record) = self.elements.get_mut(&widget) {
            record.parent = None;
        }
    }

    /// Detaches `widget` from any previous parent and records `container`
    /// as the new one. The caller is responsible for child-list entry.
    ///
    /// Adoptions that would make `widget` its own ancestor are rejected,
    /// keeping the element tree a forest.
    fn adopt(&mut self, container: ElementId, widget: ElementId) -> Result<(), ToolkitError> {
        self.record(widget)?;
        if self.would_cycle(container, widget) {
            return Err(ToolkitError::ParentCycle(widget));
        }
        self.detach(widget);
        if let Some(record) = self.elements.get_mut(&widget) {
            record.parent = Some(container);
        }
        Ok(())
    }

    /// True when `widget` is `container` itself or one of its ancestors.
    fn would_cycle(&self, container: ElementId, widget: ElementId) -> bool {
        let mut cursor = Some(container);
        while let Some(element) = cursor {
            if element == widget {
                return true;
            }
            cursor = self.elements.get(&element).and_then(|record| record.parent);
        }
        false
    }
}

impl Toolkit for HeadlessToolkit {
    fn create_container(&mut self, strategy: Strategy) -> ElementId {
        self.allocate(
            strategy.as_str().to_string(),
            Some(ContainerState::new(strategy)),
        )
    }

    fn reparent(&mut self, element: ElementId, new_parent: ElementId) -> Result<(), ToolkitError> {
        self.record(new_parent)?;
        self.adopt(new_parent, element)
    }

    fn append_child(&mut self, container: ElementId, child: Child) -> Result<(), ToolkitError> {
        self.state(container)?;
        if let Child::Widget(widget) = child {
            self.adopt(container, widget)?;
        }
        let state = self.state_mut(container)?;
        state.children.push(child);
        if state.strategy == Strategy::Stack
            && state.current_index.is_none()
            && !child.is_spacer()
        {
            state.current_index = Some(state.children.len() - 1);
        }
        Ok(())
    }

    fn place_in_cell(
        &mut self,
        container: ElementId,
        widget: ElementId,
        row: usize,
        col: usize,
    ) -> Result<(), ToolkitError> {
        self.state_expecting(container, &[Strategy::Grid], "place_in_cell")?;
        self.adopt(container, widget)?;
        let state = self.state_mut(container)?;
        state.children.push(Child::Widget(widget));
        state.cells.insert((row, col), widget);
        Ok(())
    }

    fn insert_page(
        &mut self,
        container: ElementId,
        widget: ElementId,
        label: &str,
    ) -> Result<(), ToolkitError> {
        self.state_expecting(container, &[Strategy::Tabs], "insert_page")?;
        self.adopt(container, widget)?;
        let state = self.state_mut(container)?;
        state.children.push(Child::Widget(widget));
        state.page_labels.push(label.to_string());
        Ok(())
    }

    fn set_margin(
        &mut self,
        container: ElementId,
        margin: u16,
    ) -> Result<MarginSupport, ToolkitError> {
        self.state(container)?;
        if !self.legacy_margin {
            return Ok(MarginSupport::Unsupported);
        }
        self.state_mut(container)?.margins = Margins::uniform(margin);
        Ok(MarginSupport::Applied)
    }

    fn set_contents_margins(
        &mut self,
        container: ElementId,
        margins: Margins,
    ) -> Result<(), ToolkitError> {
        self.state_mut(container)?.margins = margins;
        Ok(())
    }

    fn set_split_sizes(
        &mut self,
        container: ElementId,
        sizes: &[u16],
    ) -> Result<(), ToolkitError> {
        let state = self.state_mut_expecting(
            container,
            &[Strategy::HorizontalSplit, Strategy::VerticalSplit],
            "set_split_sizes",
        )?;
        state.split_sizes = sizes.to_vec();
        Ok(())
    }

    fn set_current_index(
        &mut self,
        container: ElementId,
        index: usize,
    ) -> Result<(), ToolkitError> {
        let state = self.state_mut_expecting(container, &[Strategy::Stack], "set_current_index")?;
        let len = state.children.len();
        if index >= len {
            return Err(ToolkitError::IndexOutOfRange { index, len });
        }
        state.current_index = Some(index);
        Ok(())
    }

    fn parent_of(&self, element: ElementId) -> Result<Option<ElementId>, ToolkitError> {
        Ok(self.record(element)?.parent)
    }

    fn children_of(&self, container: ElementId) -> Result<Vec<Child>, ToolkitError> {
        Ok(self.state(container)?.children.clone())
    }

    fn margins_of(&self, container: ElementId) -> Result<Margins, ToolkitError> {
        Ok(self.state(container)?.margins)
    }

    fn cell_occupant(
        &self,
        container: ElementId,
        row: usize,
        col: usize,
    ) -> Result<Option<ElementId>, ToolkitError> {
        let state = self.state_expecting(container, &[Strategy::Grid], "cell_occupant")?;
        Ok(state.cells.get(&(row, col)).copied())
    }

    fn split_sizes(&self, container: ElementId) -> Result<Vec<u16>, ToolkitError> {
        let state = self.state_expecting(
            container,
            &[Strategy::HorizontalSplit, Strategy::VerticalSplit],
            "split_sizes",
        )?;
        Ok(state.split_sizes.clone())
    }

    fn current_index(&self, container: ElementId) -> Result<Option<usize>, ToolkitError> {
        let state = self.state_expecting(container, &[Strategy::Stack], "current_index")?;
        Ok(state.current_index)
    }

    fn page_label(&self, container: ElementId, index: usize) -> Result<String, ToolkitError> {
        let state = self.state_expecting(container, &[Strategy::Tabs], "page_label")?;
        state
            .page_labels
            .get(index)
            .cloned()
            .ok_or(ToolkitError::IndexOutOfRange {
                index,
                len: state.page_labels.len(),
            })
    }
}
