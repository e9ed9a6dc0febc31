//! Expansion state machine.
//!
//! Single-node toggling plus the bulk operations. The `expanded` flag is
//! itself the presentation attribute: the snapshot in [`crate::nav`]
//! exposes it per row, and flipping it is a plain data mutation that never
//! dispatches further events.

use crate::node::{NodeId, Tree};
use canopy_core::Command;

impl Tree {
    /// Set or toggle a node's expansion.
    ///
    /// `Some(v)` forces the flag to `v`; `None` flips the current value.
    /// Returns `true` when the flag was applied (even if the forced value
    /// equals the current one). Leaves and unknown ids are a no-op
    /// returning `false`.
    pub fn set_expanded(&mut self, id: NodeId, value: Option<bool>) -> bool {
        self.set_expanded_from(id, value, "api")
    }

    pub(crate) fn set_expanded_from(
        &mut self,
        id: NodeId,
        value: Option<bool>,
        source: &str,
    ) -> bool {
        #[cfg(not(feature = "tracing"))]
        let _ = source;
        let Some(node) = self.get_mut(id) else {
            return false;
        };
        if node.is_leaf() {
            return false;
        }
        let next = value.unwrap_or(!node.expanded);
        node.expanded = next;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "tree.toggle",
            action = if next { "expand" } else { "collapse" },
            source,
            label = node.label(),
        );
        true
    }

    /// Expand every branch node, root included.
    pub fn expand_all(&mut self) {
        for node in &mut self.nodes {
            if !node.is_leaf() {
                node.expanded = true;
            }
        }
    }

    /// Collapse every branch node except the root, which is forced open:
    /// collapsing it would hide the entire tree.
    pub fn collapse_all(&mut self) {
        let root = self.root();
        for node in &mut self.nodes {
            if node.is_leaf() {
                continue;
            }
            node.expanded = node.id() == root;
        }
    }

    /// Dispatch one of the discrete bulk commands.
    pub fn apply_command(&mut self, command: Command) {
        match command {
            Command::ExpandAll => self.expand_all(),
            Command::CollapseAll => self.collapse_all(),
            Command::Reset => self.reset(),
        }
    }
}
