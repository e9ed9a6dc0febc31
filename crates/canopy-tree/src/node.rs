//! Node model.
//!
//! Nodes live in an arena owned by [`Tree`]: a flat `Vec<Node>` indexed by
//! [`NodeId`]. Parent links are ids, not owning pointers, so ancestor walks
//! never fight the borrow checker and the structure is acyclic by
//! construction. Nodes are created once from a [`NodeSpec`] hierarchy at
//! load time and never removed, so ids stay stable for the whole session.

use std::fmt;

/// Stable, opaque identity of a node within its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

/// A single node: identity, classification, hierarchy links, and the
/// mutable interaction state the widget drives.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    label: String,
    detail: Option<String>,
    is_leaf: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Whether this branch is expanded (ignored for leaves).
    pub(crate) expanded: bool,
    /// Whether this node's own text matched the active filter query.
    pub(crate) self_match: bool,
    /// Whether this node survives the active filter (always true without one).
    pub(crate) visible: bool,
}

impl Node {
    /// Stable identity of this node.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Optional secondary display text.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Whether this node is a leaf. Leaves never have children and are
    /// never expandable.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.is_leaf
    }

    /// Parent id, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child ids in presentation order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether this node is expanded. Meaningless for leaves.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Whether this node's own text matched the active query.
    ///
    /// This is the match-highlight presentation attribute; it is cleared at
    /// the start of every filter pass.
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.self_match
    }

    /// Whether this node survives the active filter.
    ///
    /// `true` for every node when no query is active. Note this is distinct
    /// from being hidden under a collapsed ancestor, which only affects the
    /// visible sequence.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The text the filter matches against: label plus detail, joined with
    /// a space. Derived on demand, never cached.
    #[must_use]
    pub fn searchable_text(&self) -> String {
        match &self.detail {
            Some(detail) => format!("{} {}", self.label, detail),
            None => self.label.clone(),
        }
    }
}

/// Builder for the initial node hierarchy.
///
/// The external tree source assembles a `NodeSpec` and hands it to
/// [`Tree::new`], which flattens it into the arena. Branches start
/// expanded; use [`NodeSpec::collapsed`] to override.
#[derive(Debug, Clone)]
pub struct NodeSpec {
    label: String,
    detail: Option<String>,
    is_leaf: bool,
    expanded: bool,
    children: Vec<NodeSpec>,
}

impl NodeSpec {
    /// Create a branch node spec. Branches may have children and carry
    /// expansion state.
    #[must_use]
    pub fn branch(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            detail: None,
            is_leaf: false,
            expanded: true,
            children: Vec::new(),
        }
    }

    /// Create a leaf node spec. Leaves never have children.
    #[must_use]
    pub fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            detail: None,
            is_leaf: true,
            expanded: false,
            children: Vec::new(),
        }
    }

    /// Set secondary display text, included in the searchable text.
    #[must_use]
    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Add a child spec.
    ///
    /// # Panics
    ///
    /// Panics when called on a leaf spec. A leaf with children is a
    /// malformed input from the tree-building collaborator, caught at
    /// construction rather than tolerated at runtime.
    #[must_use]
    pub fn child(mut self, node: NodeSpec) -> Self {
        assert!(
            !self.is_leaf,
            "cannot attach a child to leaf node {:?}",
            self.label
        );
        self.children.push(node);
        self
    }

    /// Set children from a vec.
    ///
    /// # Panics
    ///
    /// Panics when called on a leaf spec with a non-empty vec.
    #[must_use]
    pub fn children(mut self, nodes: Vec<NodeSpec>) -> Self {
        assert!(
            !self.is_leaf || nodes.is_empty(),
            "cannot attach children to leaf node {:?}",
            self.label
        );
        self.children = nodes;
        self
    }

    /// Start this branch collapsed. No effect on leaves.
    #[must_use]
    pub fn collapsed(mut self) -> Self {
        self.expanded = false;
        self
    }
}

/// An owned tree widget instance: the node arena plus interaction state.
///
/// Constructed once from a [`NodeSpec`] hierarchy; all mutation happens in
/// place through the expansion, navigation, and filter entry points. Every
/// operation is synchronous and bounded by the node count, and multiple
/// independent `Tree` values can coexist.
#[derive(Debug, Clone)]
pub struct Tree {
    pub(crate) nodes: Vec<Node>,
    root: NodeId,
    pub(crate) focused: Option<NodeId>,
    /// Normalized active query, `None` when no filter is active.
    pub(crate) query: Option<String>,
}

impl Tree {
    /// Build a tree from its root spec.
    #[must_use]
    pub fn new(root: NodeSpec) -> Self {
        let mut nodes = Vec::new();
        let root_id = intern(&mut nodes, root, None);
        Self {
            nodes,
            root: root_id,
            focused: None,
            query: None,
        }
    }

    /// Id of the root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node. Unknown ids resolve to `None`; callers treat that as
    /// a silent no-op.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Iterate over all node ids in arena order (parents before children).
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }
}

/// Flatten a spec subtree into the arena. Parents are pushed before their
/// children, so arena indices are topologically ordered; the filter's
/// bottom-up fold relies on that.
fn intern(nodes: &mut Vec<Node>, spec: NodeSpec, parent: Option<NodeId>) -> NodeId {
    let id = NodeId(nodes.len());
    nodes.push(Node {
        id,
        label: spec.label,
        detail: spec.detail,
        is_leaf: spec.is_leaf,
        parent,
        children: Vec::new(),
        expanded: !spec.is_leaf && spec.expanded,
        self_match: false,
        visible: true,
    });
    for child in spec.children {
        let child_id = intern(nodes, child, Some(id));
        nodes[id.0].children.push(child_id);
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Tree {
        Tree::new(
            NodeSpec::branch("root")
                .child(
                    NodeSpec::branch("a")
                        .child(NodeSpec::leaf("a1"))
                        .child(NodeSpec::leaf("a2")),
                )
                .child(NodeSpec::leaf("b")),
        )
    }

    #[test]
    fn spec_builder_basics() {
        let tree = Tree::new(NodeSpec::branch("root"));
        let root = tree.get(tree.root()).unwrap();
        assert_eq!(root.label(), "root");
        assert!(root.children().is_empty());
        assert!(!root.is_leaf());
        assert!(root.is_expanded());
    }

    #[test]
    fn arena_wiring() {
        let tree = sample_tree();
        let root = tree.get(tree.root()).unwrap();
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.parent(), None);

        let a = tree.get(root.children()[0]).unwrap();
        assert_eq!(a.label(), "a");
        assert_eq!(a.parent(), Some(tree.root()));
        assert_eq!(a.children().len(), 2);

        let a1 = tree.get(a.children()[0]).unwrap();
        assert_eq!(a1.label(), "a1");
        assert!(a1.is_leaf());
        assert_eq!(a1.parent(), Some(a.id()));
    }

    #[test]
    fn arena_order_parents_first() {
        let tree = sample_tree();
        for id in tree.ids() {
            let node = tree.get(id).unwrap();
            if let Some(parent) = node.parent() {
                assert!(parent.0 < id.0);
            }
        }
    }

    #[test]
    fn leaves_never_expanded() {
        let tree = sample_tree();
        let root = tree.get(tree.root()).unwrap();
        let b = tree.get(root.children()[1]).unwrap();
        assert!(b.is_leaf());
        assert!(!b.is_expanded());
    }

    #[test]
    fn collapsed_spec_starts_collapsed() {
        let tree = Tree::new(
            NodeSpec::branch("root").child(NodeSpec::branch("a").collapsed()),
        );
        let root = tree.get(tree.root()).unwrap();
        let a = tree.get(root.children()[0]).unwrap();
        assert!(!a.is_expanded());
        assert!(root.is_expanded());
    }

    #[test]
    fn searchable_text_joins_label_and_detail() {
        let tree = Tree::new(
            NodeSpec::branch("root")
                .child(NodeSpec::leaf("config").detail("3 files")),
        );
        let root = tree.get(tree.root()).unwrap();
        let leaf = tree.get(root.children()[0]).unwrap();
        assert_eq!(leaf.searchable_text(), "config 3 files");
        assert_eq!(root.searchable_text(), "root");
    }

    #[test]
    #[should_panic(expected = "cannot attach a child to leaf node")]
    fn leaf_child_panics() {
        let _ = NodeSpec::leaf("file").child(NodeSpec::leaf("impossible"));
    }

    #[test]
    #[should_panic(expected = "cannot attach children to leaf node")]
    fn leaf_children_vec_panics() {
        let _ = NodeSpec::leaf("file").children(vec![NodeSpec::leaf("impossible")]);
    }

    #[test]
    fn unknown_id_resolves_to_none() {
        let tree = sample_tree();
        assert!(tree.get(NodeId(tree.len())).is_none());
    }

    #[test]
    fn all_nodes_visible_initially() {
        let tree = sample_tree();
        assert!(tree.ids().all(|id| tree.get(id).unwrap().is_visible()));
        assert!(tree.ids().all(|id| !tree.get(id).unwrap().is_match()));
    }

    #[test]
    fn node_id_display() {
        assert_eq!(NodeId(3).to_string(), "Node(3)");
    }
}
