//! Reorder engine
//!
//! Turns a drop reported by the drag gesture into a move on the list model.
//!
//! ```text
//! DropResult ──from_drop──▶ ReorderCommand ──apply_reorder──▶ ListModel
//!  (containers, indices)     (scope, from, to)                (one move)
//! ```
//!
//! Product lines live in the container `products`; a line's variant rows
//! live in `variants-<line id>`. A drop is only accepted inside the container
//! it started from, so variants never leave their product and never join the
//! top-level list.

use crate::list::{LineId, ListModel};
use std::str::FromStr;

/// Container id of the top-level product list
pub const PRODUCTS_CONTAINER: &str = "products";

const VARIANTS_CONTAINER_PREFIX: &str = "variants-";

/// Kind of item being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Product,
    Variant,
}

/// A position inside a drop container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropLocation {
    pub container: String,
    pub index: usize,
}

impl DropLocation {
    #[must_use]
    pub fn new(container: impl Into<String>, index: usize) -> Self {
        Self {
            container: container.into(),
            index,
        }
    }
}

/// What the drag gesture reports when an item is released
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropResult {
    pub kind: DragKind,
    pub source: DropLocation,
    /// `None` when released outside any container
    pub destination: Option<DropLocation>,
}

/// Container id holding the variant rows of `line`
#[must_use]
pub fn variants_container(line: &LineId) -> String {
    format!("{VARIANTS_CONTAINER_PREFIX}{line}")
}

/// Which sequence a reorder applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderScope {
    /// The top-level list of product lines
    Product,
    /// The variant rows of one line
    Variant(LineId),
}

/// A single move within one sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderCommand {
    pub scope: ReorderScope,
    pub source: usize,
    pub destination: usize,
}

impl ReorderCommand {
    /// Interpret a drop
    ///
    /// Returns `None` for drops that must not change anything: released
    /// outside a container, moved to another container, dropped back on its
    /// own slot, or a container that does not match the dragged kind.
    #[must_use]
    pub fn from_drop(drop: &DropResult) -> Option<Self> {
        let destination = drop.destination.as_ref()?;
        if destination.container != drop.source.container {
            return None;
        }
        if destination.index == drop.source.index {
            return None;
        }

        let scope = match drop.kind {
            DragKind::Product if drop.source.container == PRODUCTS_CONTAINER => ReorderScope::Product,
            DragKind::Variant => {
                let line = drop
                    .source
                    .container
                    .strip_prefix(VARIANTS_CONTAINER_PREFIX)
                    .and_then(|id| LineId::from_str(id).ok())?;
                ReorderScope::Variant(line)
            }
            DragKind::Product => return None,
        };

        Some(Self {
            scope,
            source: drop.source.index,
            destination: destination.index,
        })
    }
}

/// Remove the element at `from`, then insert it at `to` in the shortened
/// sequence
///
/// Out-of-range indices and same-index moves leave `items` untouched.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from == to || from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

impl ListModel {
    /// Apply one reorder as a single move
    ///
    /// A variant reorder naming a line that no longer exists is a no-op.
    pub fn apply_reorder(&mut self, command: &ReorderCommand) -> bool {
        match command.scope {
            ReorderScope::Product => {
                move_item(self.lines_mut(), command.source, command.destination)
            }
            ReorderScope::Variant(line) => self
                .line_mut(&line)
                .is_some_and(|l| move_item(&mut l.variants, command.source, command.destination)),
        }
    }

    /// Interpret and apply a drop in one step
    pub fn apply_drop(&mut self, drop: &DropResult) -> bool {
        ReorderCommand::from_drop(drop).is_some_and(|command| self.apply_reorder(&command))
    }
}
