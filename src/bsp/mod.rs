// src/bsp/mod.rs
//! Binary space partition trees over integer rectangles.
//!
//! A [`Bsp`] starts as one leaf covering a region and is cut into two
//! children per split, either by hand (`split_once`) or recursively with a
//! random policy (`split_recursive`). Five traversal orders are provided;
//! the inverted level order visits every node after both its children and
//! is what the dungeon carver runs on.
pub mod bsp_node;
pub mod bsp_tree;
mod rect;
mod traversal;

pub use bsp_node::{Node, NodeId};
pub use bsp_tree::Bsp;
pub use rect::Rect;
pub(crate) use rect::span_overlap;
