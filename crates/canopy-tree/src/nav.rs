//! Keyboard navigation and the visible-row snapshot.
//!
//! Navigation operates on the visible sequence: the pre-order list of nodes
//! not hidden by the filter and not under a collapsed ancestor. Focus moves
//! through that sequence clamped at both ends; activation keys drive the
//! expansion state machine. Handlers return `true` when they consumed the
//! event, so the host can suppress its default input behavior.

use crate::node::{NodeId, Tree};
use canopy_core::{KeyCode, KeyEvent, Modifiers};

/// One entry of the visible sequence, carrying everything the external
/// presentation layer needs to draw the row: depth for indentation,
/// expansion/ARIA state, the match highlight, and focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRow {
    /// The node this row presents.
    pub id: NodeId,
    /// Depth below the root (root is 0).
    pub depth: usize,
    /// Expanded state; always `false` for leaves.
    pub expanded: bool,
    /// Leaf/branch classification.
    pub is_leaf: bool,
    /// Whether the node matched the active query.
    pub matched: bool,
    /// Whether the node holds input focus.
    pub focused: bool,
}

impl Tree {
    /// The visible sequence in presentation order.
    ///
    /// Pre-order from the root, skipping nodes the filter hid and never
    /// descending into a collapsed branch. Empty only when a filter hid the
    /// root (a zero-match query).
    #[must_use]
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let mut rows = Vec::new();
        self.push_visible(self.root(), 0, &mut rows);
        rows
    }

    fn push_visible(&self, id: NodeId, depth: usize, rows: &mut Vec<VisibleRow>) {
        let Some(node) = self.get(id) else {
            return;
        };
        if !node.is_visible() {
            return;
        }
        rows.push(VisibleRow {
            id,
            depth,
            expanded: node.is_expanded(),
            is_leaf: node.is_leaf(),
            matched: node.is_match(),
            focused: self.focused == Some(id),
        });
        if node.is_expanded() {
            for &child in node.children() {
                self.push_visible(child, depth + 1, rows);
            }
        }
    }

    /// The node holding input focus, if any.
    #[must_use]
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Focus a node directly. Unknown ids are ignored and return `false`.
    pub fn set_focus(&mut self, id: NodeId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.focused = Some(id);
        true
    }

    /// Handle a key event directed at the focused node.
    ///
    /// Returns `true` when the event was consumed; the host should then
    /// suppress its default handling. Events with Ctrl/Alt/Super held are
    /// never consumed, and neither are keys outside the navigation set.
    ///
    /// - `Enter` / `Space`: toggle the focused node (no-op on leaves, but
    ///   still consumed)
    /// - `Right`: force the focused node expanded
    /// - `Left`: force the focused node collapsed
    /// - `Down` / `Up`: move focus through the visible sequence, clamped at
    ///   the boundaries
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key
            .modifiers
            .intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::SUPER)
        {
            return false;
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                let Some(id) = self.focused else {
                    return false;
                };
                self.set_expanded_from(id, None, "keyboard");
                true
            }
            KeyCode::Right => {
                let Some(id) = self.focused else {
                    return false;
                };
                self.set_expanded_from(id, Some(true), "keyboard");
                true
            }
            KeyCode::Left => {
                let Some(id) = self.focused else {
                    return false;
                };
                self.set_expanded_from(id, Some(false), "keyboard");
                true
            }
            KeyCode::Down => self.move_focus(1),
            KeyCode::Up => self.move_focus(-1),
            _ => false,
        }
    }

    /// Handle a click on a node's label: focuses the node and toggles its
    /// expansion, exactly like the activation key. Clicks that do not
    /// resolve to a known node are silently ignored.
    pub fn handle_click(&mut self, id: NodeId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.focused = Some(id);
        self.set_expanded_from(id, None, "mouse");
        true
    }

    fn move_focus(&mut self, step: isize) -> bool {
        let rows = self.visible_rows();
        if rows.is_empty() {
            return false;
        }
        let current = self
            .focused
            .and_then(|id| rows.iter().position(|row| row.id == id));
        let next = match current {
            Some(index) => {
                if step > 0 {
                    (index + 1).min(rows.len() - 1)
                } else {
                    index.saturating_sub(1)
                }
            }
            None => 0,
        };
        self.focused = Some(rows[next].id);
        #[cfg(feature = "tracing")]
        if let Some(node) = self.get(rows[next].id) {
            tracing::debug!(message = "tree.focus", visible_index = next, label = node.label());
        }
        true
    }

    /// Whether a node is currently part of the visible sequence: it
    /// survived the filter and no ancestor is collapsed or hidden.
    pub(crate) fn in_visible_sequence(&self, id: NodeId) -> bool {
        let Some(node) = self.get(id) else {
            return false;
        };
        if !node.is_visible() {
            return false;
        }
        let mut cursor = node.parent();
        while let Some(ancestor_id) = cursor {
            let Some(ancestor) = self.get(ancestor_id) else {
                return false;
            };
            if !ancestor.is_expanded() || !ancestor.is_visible() {
                return false;
            }
            cursor = ancestor.parent();
        }
        true
    }

    /// Drop focus if the focused node left the visible sequence.
    pub(crate) fn sync_focus(&mut self) {
        if let Some(id) = self.focused
            && !self.in_visible_sequence(id)
        {
            self.focused = None;
        }
    }
}
