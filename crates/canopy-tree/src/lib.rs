#![forbid(unsafe_code)]

//! Interactive tree widget core.
//!
//! Holds a hierarchical node model, an expansion state machine, keyboard
//! navigation over the currently visible rows, and an incremental text
//! filter that keeps the ancestors of every match visible and expanded.
//!
//! Rendering is out of scope: the widget exposes its state as plain data
//! ([`Tree::visible_rows`] and per-node accessors) for an external
//! presentation layer to draw. Input arrives through four entry points:
//! [`Tree::handle_key`], [`Tree::handle_click`], [`Tree::apply_filter`],
//! and [`Tree::apply_command`].
//!
//! # Example
//!
//! ```
//! use canopy_tree::{NodeSpec, Tree};
//!
//! let mut tree = Tree::new(NodeSpec::branch("root")
//!     .child(NodeSpec::branch("src")
//!         .child(NodeSpec::leaf("main.rs"))
//!         .child(NodeSpec::leaf("lib.rs")))
//!     .child(NodeSpec::leaf("Cargo.toml")));
//!
//! tree.apply_filter("lib");
//! let rows: Vec<_> = tree.visible_rows();
//! assert_eq!(rows.len(), 3); // root, src, lib.rs
//! ```

pub mod expand;
pub mod filter;
pub mod nav;
pub mod node;

pub use nav::VisibleRow;
pub use node::{Node, NodeId, NodeSpec, Tree};
