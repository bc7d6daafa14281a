//! src/bsp/bsp_node.rs

use std::fmt;

use crate::bsp::Rect;

/// Handle to a node stored in a [`Bsp`](crate::bsp::Bsp) arena.
///
/// Handles stay valid until the node is removed by `remove_sons` on one of its
/// ancestors; after that the slot may be recycled by a later split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node in the BSP tree. Each node has:
/// - A rectangle `x, y, w, h` (the region, or after carving the room/bounding box).
/// - A split `position` and axis (`horizontal`), only meaningful once split.
/// - Its depth (`level`, the root is 0).
/// - Either no children (leaf) or exactly two, plus a back link to its parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub position: i32,   // Split coordinate, y when horizontal, x otherwise
    pub horizontal: bool, // Split axis
    pub level: i32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Option<(NodeId, NodeId)>,
}

impl Node {
    /// Create a detached leaf covering the given rect.
    pub(crate) fn leaf(x: i32, y: i32, w: i32, h: i32, level: i32, parent: Option<NodeId>) -> Self {
        Node {
            x,
            y,
            w,
            h,
            position: 0,
            horizontal: false,
            level,
            parent,
            children: None,
        }
    }

    /// Returns `true` if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn left(&self) -> Option<NodeId> {
        self.children.map(|(left, _)| left)
    }

    pub fn right(&self) -> Option<NodeId> {
        self.children.map(|(_, right)| right)
    }

    /// Non-owning link to the parent, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    pub(crate) fn set_rect(&mut self, rect: Rect) {
        self.x = rect.x;
        self.y = rect.y;
        self.w = rect.w;
        self.h = rect.h;
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        self.rect().contains(px, py)
    }

    /// Rects of the two halves produced by splitting this node at `position`.
    pub(crate) fn child_rects(&self, horizontal: bool, position: i32) -> (Rect, Rect) {
        if horizontal {
            (
                Rect::new(self.x, self.y, self.w, position - self.y),
                Rect::new(self.x, position, self.w, self.y + self.h - position),
            )
        } else {
            (
                Rect::new(self.x, self.y, position - self.x, self.h),
                Rect::new(position, self.y, self.x + self.w - position, self.h),
            )
        }
    }
}
