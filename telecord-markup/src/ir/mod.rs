//! Formatting tree shared by the Discord parser and every tree renderer.
//!
//! The parser produces a [`nodes::Node`]; renderers consume it through the
//! [`visit::Visitor`] traversal, which rebuilds a node only when a child changed.

pub mod nodes;
pub mod visit;
