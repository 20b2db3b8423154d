use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::compose::{
    ColumnOptions, Container, FlowOptions, GridOptions, RowOptions, SplitOptions, column_with,
    flow_with, grid_with, horizontal_split_with, row_with, stack, tabs, validate_ratio,
    validate_row_lengths, vertical_split,
};
use crate::element::{Child, ElementId};
use crate::error::{ComposeError, Result};
use crate::toolkit::{Strategy, Toolkit};

/// Names pre-built widgets for [`assemble`] to resolve plan slots against.
pub type Bindings = HashMap<String, ElementId>;

fn default_margin() -> u16 {
    crate::compose::DEFAULT_MARGIN
}

fn default_ratio() -> f32 {
    0.5
}

/// Declarative description of a layout, independent of any toolkit.
///
/// Interior nodes mirror the constructors one to one; `Slot` leaves name
/// widgets that exist outside the plan. Plans serialize to JSON and back,
/// so a layout can live in configuration while the widgets live in code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    /// A pre-built widget, resolved by name through the bindings.
    Slot(String),
    Row {
        children: Vec<Plan>,
        #[serde(default = "default_margin")]
        margin: u16,
        #[serde(default)]
        trailing_spacer: bool,
    },
    Column {
        children: Vec<Plan>,
        #[serde(default = "default_margin")]
        margin: u16,
        #[serde(default)]
        trailing_spacer: bool,
    },
    Grid {
        rows: Vec<Vec<Plan>>,
        #[serde(default = "default_margin")]
        margin: u16,
        #[serde(default)]
        ragged: bool,
    },
    Stack {
        children: Vec<Plan>,
    },
    HorizontalSplit {
        children: Vec<Plan>,
        #[serde(default = "default_ratio")]
        ratio: f32,
    },
    VerticalSplit {
        children: Vec<Plan>,
    },
    Flow {
        children: Vec<Plan>,
        #[serde(default = "default_margin")]
        margin: u16,
    },
    Tabs {
        pages: Vec<TabPage>,
    },
}

/// One labelled page of a [`Plan::Tabs`] node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabPage {
    pub label: String,
    pub child: Plan,
}

impl Plan {
    pub fn slot(name: impl Into<String>) -> Self {
        Plan::Slot(name.into())
    }
}

/// Builds the container tree a plan describes, resolving slots through
/// `bindings`.
///
/// The whole plan is validated up front: fixed-arity splits with the
/// wrong child count, out-of-range ratios, ragged grid rows, and unbound
/// slot names are all rejected before any container is created or any
/// widget reparented.
pub fn assemble(
    toolkit: &mut impl Toolkit,
    plan: &Plan,
    bindings: &Bindings,
) -> Result<Container> {
    if let Plan::Slot(name) = plan {
        return Err(ComposeError::SlotAtRoot(name.clone()));
    }
    validate(plan, bindings)?;
    build(toolkit, plan, bindings)
}

fn validate(plan: &Plan, bindings: &Bindings) -> Result<()> {
    match plan {
        Plan::Slot(name) => {
            if bindings.contains_key(name) {
                Ok(())
            } else {
                Err(ComposeError::UnboundSlot(name.clone()))
            }
        }
        Plan::Row { children, .. }
        | Plan::Column { children, .. }
        | Plan::Stack { children }
        | Plan::Flow { children, .. } => validate_each(children, bindings),
        Plan::Grid { rows, ragged, .. } => {
            validate_row_lengths(rows, *ragged)?;
            for row in rows {
                validate_each(row, bindings)?;
            }
            Ok(())
        }
        Plan::HorizontalSplit { children, ratio } => {
            require_arity(Strategy::HorizontalSplit, children.len())?;
            validate_ratio(*ratio)?;
            validate_each(children, bindings)
        }
        Plan::VerticalSplit { children } => {
            require_arity(Strategy::VerticalSplit, children.len())?;
            validate_each(children, bindings)
        }
        Plan::Tabs { pages } => {
            for page in pages {
                validate(&page.child, bindings)?;
            }
            Ok(())
        }
    }
}

fn validate_each(children: &[Plan], bindings: &Bindings) -> Result<()> {
    for child in children {
        validate(child, bindings)?;
    }
    Ok(())
}

fn require_arity(strategy: Strategy, found: usize) -> Result<()> {
    if found == 2 {
        Ok(())
    } else {
        Err(ComposeError::Arity {
            strategy,
            expected: 2,
            found,
        })
    }
}

fn build(toolkit: &mut impl Toolkit, plan: &Plan, bindings: &Bindings) -> Result<Container> {
    match plan {
        Plan::Slot(name) => Err(ComposeError::SlotAtRoot(name.clone())),
        Plan::Row {
            children,
            margin,
            trailing_spacer,
        } => {
            let children = elements_as_children(toolkit, children, bindings)?;
            let mut options = RowOptions::default().with_margin(*margin);
            if *trailing_spacer {
                options = options.with_trailing_spacer();
            }
            row_with(toolkit, &children, options)
        }
        Plan::Column {
            children,
            margin,
            trailing_spacer,
        } => {
            let children = elements_as_children(toolkit, children, bindings)?;
            let mut options = ColumnOptions::default().with_margin(*margin);
            if *trailing_spacer {
                options = options.with_trailing_spacer();
            }
            column_with(toolkit, &children, options)
        }
        Plan::Grid {
            rows,
            margin,
            ragged,
        } => {
            let mut cells = Vec::with_capacity(rows.len());
            for row in rows {
                let mut resolved = Vec::with_capacity(row.len());
                for cell in row {
                    resolved.push(element_for(toolkit, cell, bindings)?);
                }
                cells.push(resolved);
            }
            let mut options = GridOptions::default().with_margin(*margin);
            if *ragged {
                options = options.with_ragged();
            }
            grid_with(toolkit, &cells, options)
        }
        Plan::Stack { children } => {
            let mut resolved = Vec::with_capacity(children.len());
            for child in children {
                resolved.push(element_for(toolkit, child, bindings)?);
            }
            stack(toolkit, &resolved)
        }
        Plan::HorizontalSplit { children, ratio } => {
            let left = element_for(toolkit, &children[0], bindings)?;
            let right = element_for(toolkit, &children[1], bindings)?;
            horizontal_split_with(
                toolkit,
                left,
                right,
                SplitOptions::default().with_ratio(*ratio),
            )
        }
        Plan::VerticalSplit { children } => {
            let top = element_for(toolkit, &children[0], bindings)?;
            let bottom = element_for(toolkit, &children[1], bindings)?;
            vertical_split(toolkit, top, bottom)
        }
        Plan::Flow { children, margin } => {
            let children = elements_as_children(toolkit, children, bindings)?;
            flow_with(
                toolkit,
                &children,
                FlowOptions::default().with_margin(*margin),
            )
        }
        Plan::Tabs { pages } => {
            let mut resolved = Vec::with_capacity(pages.len());
            for page in pages {
                let element = element_for(toolkit, &page.child, bindings)?;
                resolved.push((element, page.label.as_str()));
            }
            tabs(toolkit, &resolved)
        }
    }
}

fn element_for(toolkit: &mut impl Toolkit, plan: &Plan, bindings: &Bindings) -> Result<ElementId> {
    match plan {
        Plan::Slot(name) => bindings
            .get(name)
            .copied()
            .ok_or_else(|| ComposeError::UnboundSlot(name.clone())),
        _ => Ok(build(toolkit, plan, bindings)?.id()),
    }
}

fn elements_as_children(
    toolkit: &mut impl Toolkit,
    plans: &[Plan],
    bindings: &Bindings,
) -> Result<Vec<Child>> {
    plans
        .iter()
        .map(|plan| element_for(toolkit, plan, bindings).map(Child::Widget))
        .collect()
}
