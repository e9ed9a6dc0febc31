//! Filter engine.
//!
//! One synchronous pass over the whole tree per query change. Matching is
//! case-insensitive substring containment against each node's searchable
//! text. Visibility is "self-match or descendant match", computed with an
//! explicit bottom-up fold instead of per-node subtree scans, and the path
//! to every match is forced open so a match can never hide.

use crate::node::Tree;
#[cfg(feature = "tracing")]
use web_time::Instant;

impl Tree {
    /// Run a filter pass for `query`.
    ///
    /// An empty or whitespace-only query deactivates filtering: every node
    /// becomes visible, every branch expands, and no match flags remain.
    /// The pass is idempotent: re-running it with the same query leaves the
    /// tree in the same state.
    pub fn apply_filter(&mut self, query: &str) {
        #[cfg(feature = "tracing")]
        let filter_start = Instant::now();
        #[cfg(feature = "tracing")]
        let filter_span = tracing::debug_span!(
            "tree.filter",
            total_nodes = self.nodes.len(),
            match_count = tracing::field::Empty,
            visible_count = tracing::field::Empty,
            filter_duration_us = tracing::field::Empty,
        );
        #[cfg(feature = "tracing")]
        let _filter_guard = filter_span.enter();

        // Reset: no matches, everything visible. This also clears the
        // match-highlight state, which is the self_match flag itself.
        for node in &mut self.nodes {
            node.self_match = false;
            node.visible = true;
        }

        let trimmed = query.trim();
        if trimmed.is_empty() {
            self.query = None;
            self.expand_all();
            #[cfg(feature = "tracing")]
            self.record_filter_metrics(&filter_span, filter_start);
            return;
        }
        let needle = trimmed.to_lowercase();

        for node in &mut self.nodes {
            node.self_match = node.searchable_text().to_lowercase().contains(&needle);
        }

        // Bottom-up fold. The arena orders parents before children, so one
        // reverse scan folds each subtree's matches into its parent.
        let mut descendant_match = vec![false; self.nodes.len()];
        for index in (0..self.nodes.len()).rev() {
            let node = &self.nodes[index];
            if (node.self_match || descendant_match[index])
                && let Some(parent) = node.parent()
            {
                descendant_match[parent.0] = true;
            }
        }

        for (index, node) in self.nodes.iter_mut().enumerate() {
            node.visible = node.self_match || descendant_match[index];
        }

        // A visible branch opens exactly when something below it matched; a
        // branch that only matched itself stays closed (its own row already
        // satisfies the query).
        for (index, node) in self.nodes.iter_mut().enumerate() {
            if node.visible && !node.is_leaf() {
                node.expanded = descendant_match[index];
            }
        }

        // Re-assert the path to every match unconditionally. Runs last so
        // it overrides whatever the local expansion step decided.
        for index in 0..self.nodes.len() {
            if !self.nodes[index].self_match {
                continue;
            }
            let mut cursor = self.nodes[index].parent();
            while let Some(id) = cursor {
                let ancestor = &mut self.nodes[id.0];
                if !ancestor.is_leaf() {
                    ancestor.expanded = true;
                }
                ancestor.visible = true;
                cursor = ancestor.parent();
            }
        }

        self.query = Some(needle);
        self.sync_focus();

        #[cfg(feature = "tracing")]
        self.record_filter_metrics(&filter_span, filter_start);
    }

    /// Clear the active query: equivalent to filtering with an empty query.
    pub fn reset(&mut self) {
        self.apply_filter("");
    }

    /// The normalized active query, or `None` when no filter is active.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    #[cfg(feature = "tracing")]
    fn record_filter_metrics(&self, span: &tracing::Span, start: Instant) {
        let match_count = self.nodes.iter().filter(|n| n.is_match()).count();
        let visible_count = self.nodes.iter().filter(|n| n.is_visible()).count();
        let elapsed_us = start.elapsed().as_micros() as u64;
        span.record("match_count", match_count as u64);
        span.record("visible_count", visible_count as u64);
        span.record("filter_duration_us", elapsed_us);
        tracing::debug!(
            message = "tree.metrics",
            filter_duration_us = elapsed_us,
            total_nodes = self.nodes.len(),
            match_count,
            visible_count
        );
    }
}
