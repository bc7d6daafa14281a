// src/bsp/bsp_tree.rs

use std::ops::{Index, IndexMut};

use log::{debug, warn};

use crate::bsp::{Node, NodeId, Rect};
use crate::error::{DungeonError, Result};
use crate::random::RandomSource;

/// A binary space partition over an integer rectangle.
///
/// Nodes live in an arena and refer to each other by [`NodeId`]. A node owns
/// its two children: removing a subtree releases every slot below it, while
/// the `parent` link is a plain handle and never keeps anything alive.
#[derive(Debug, Clone)]
pub struct Bsp {
    nodes: Vec<Option<Node>>,
    free: Vec<usize>, // Recyclable slots left behind by remove_sons
    root: NodeId,
}

impl Bsp {
    /// Create a tree holding a single leaf covering `(x, y, w, h)`.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Bsp {
            nodes: vec![Some(Node::leaf(x, y, w, h, 0, None))],
            free: Vec::new(),
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.node(id).map_or(false, Node::is_leaf)
    }

    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(Node::left)
    }

    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(Node::right)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(Node::parent)
    }

    fn check(&self, id: NodeId) -> Result<&Node> {
        self.node(id).ok_or(DungeonError::UnknownNode(id))
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                NodeId(slot)
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    /// Split a node in two at `position`.
    ///
    /// A horizontal split cuts at row `position`, which must lie strictly
    /// inside `(y, y + h)`; a vertical split cuts at column `position`,
    /// strictly inside `(x, x + w)`. An already split node loses its previous
    /// children first.
    pub fn split_once(&mut self, id: NodeId, horizontal: bool, position: i32) -> Result<()> {
        let node = self.check(id)?;
        let (low, high) = if horizontal {
            (node.y, node.y + node.h)
        } else {
            (node.x, node.x + node.w)
        };
        if position <= low || position >= high {
            return Err(DungeonError::InvalidArgument(format!(
                "{} split position {} outside ({}, {}) for node {}",
                if horizontal { "horizontal" } else { "vertical" },
                position,
                low,
                high,
                node.rect()
            )));
        }

        self.remove_sons(id);
        let (left_rect, right_rect, level) = {
            let node = &mut self[id];
            node.horizontal = horizontal;
            node.position = position;
            let (l, r) = node.child_rects(horizontal, position);
            (l, r, node.level + 1)
        };
        let left = self.alloc(Node::leaf(left_rect.x, left_rect.y, left_rect.w, left_rect.h, level, Some(id)));
        let right = self.alloc(Node::leaf(right_rect.x, right_rect.y, right_rect.w, right_rect.h, level, Some(id)));
        self[id].children = Some((left, right));
        Ok(())
    }

    /// Recursively split a node `depth` times.
    ///
    /// Elongated nodes are cut across their long side: a node wider than
    /// `h * max_w_ratio` is split vertically, one taller than
    /// `w * max_h_ratio` horizontally. Children are never smaller than
    /// `min_w` x `min_h` along the split axis. Stops early, leaving a leaf,
    /// once a node is narrower than `2 * min_w` and shorter than `2 * min_h`.
    #[allow(clippy::too_many_arguments)]
    pub fn split_recursive<R: RandomSource + ?Sized>(
        &mut self,
        id: NodeId,
        rng: &mut R,
        depth: i32,
        min_w: i32,
        min_h: i32,
        max_w_ratio: f32,
        max_h_ratio: f32,
    ) -> Result<()> {
        let node = self.check(id)?;
        let (x, y, w, h) = (node.x, node.y, node.w, node.h);
        let (min_w2, min_h2) = (min_w.saturating_mul(2), min_h.saturating_mul(2));
        if depth <= 0 || (w < min_w2 && h < min_h2) {
            return Ok(());
        }

        // promote square rooms
        let horizontal = if h < min_h2 || w as f32 > h as f32 * max_w_ratio {
            false
        } else if w < min_w2 || h as f32 > w as f32 * max_h_ratio {
            true
        } else {
            rng.uniform_int(0, 1) == 0
        };

        let (start, extent, min_size) = if horizontal { (y, h, min_h) } else { (x, w, min_w) };
        let end = start.saturating_add(extent);
        let low = start.saturating_add(min_size).max(start + 1);
        let high = end.saturating_sub(min_size).min(end - 1);
        if low > high {
            warn!(
                "node {} {} cannot be split {} with minimum size {}",
                id,
                Rect::new(x, y, w, h),
                if horizontal { "horizontally" } else { "vertically" },
                min_size
            );
            return Ok(());
        }

        let position = rng.uniform_int(low, high);
        debug!(
            "split {} {} at {} ({})",
            id,
            Rect::new(x, y, w, h),
            position,
            if horizontal { "horizontal" } else { "vertical" }
        );
        self.split_once(id, horizontal, position)?;

        if let Some((left, right)) = self[id].children {
            self.split_recursive(left, rng, depth - 1, min_w, min_h, max_w_ratio, max_h_ratio)?;
            self.split_recursive(right, rng, depth - 1, min_w, min_h, max_w_ratio, max_h_ratio)?;
        }
        Ok(())
    }

    /// Destroy every descendant of a node, turning it back into a leaf.
    /// Does nothing on a leaf or an unknown handle.
    pub fn remove_sons(&mut self, id: NodeId) {
        let children = match self.node_mut(id) {
            Some(node) => node.children.take(),
            None => return,
        };
        if let Some((left, right)) = children {
            self.release(left);
            self.release(right);
        }
    }

    fn release(&mut self, id: NodeId) {
        self.remove_sons(id);
        if let Some(slot) = self.nodes.get_mut(id.0) {
            if slot.take().is_some() {
                self.free.push(id.0);
            }
        }
    }

    /// Move/scale a node to a new rect, carrying its subtree along.
    ///
    /// Each split keeps the same relative position along its axis, rounded to
    /// the nearest cell and clamped so every leaf keeps at least one cell.
    pub fn resize(&mut self, id: NodeId, x: i32, y: i32, w: i32, h: i32) -> Result<()> {
        self.check(id)?;
        let (min_w, min_h) = self.min_extent(id);
        if w < min_w || h < min_h {
            return Err(DungeonError::InvalidArgument(format!(
                "cannot resize node {} to {}x{}, its subtree needs at least {}x{}",
                id, w, h, min_w, min_h
            )));
        }
        self.resize_subtree(id, Rect::new(x, y, w, h));
        Ok(())
    }

    fn resize_subtree(&mut self, id: NodeId, rect: Rect) {
        let node = &mut self[id];
        let old = node.rect();
        node.set_rect(rect);
        let Some((left, right)) = node.children else {
            return;
        };
        let horizontal = node.horizontal;
        let (old_low, old_extent, new_low, new_extent) = if horizontal {
            (old.y, old.h, rect.y, rect.h)
        } else {
            (old.x, old.w, rect.x, rect.w)
        };
        let fraction = if old_extent > 0 {
            (node.position - old_low) as f64 / old_extent as f64
        } else {
            0.5
        };

        let axis = |(w, h): (i32, i32)| if horizontal { h } else { w };
        let left_min = axis(self.min_extent(left));
        let right_min = axis(self.min_extent(right));
        let target = new_low + (fraction * new_extent as f64).round() as i32;
        let position = target.clamp(new_low + left_min, new_low + new_extent - right_min);

        let node = &mut self[id];
        node.position = position;
        let (left_rect, right_rect) = node.child_rects(horizontal, position);
        self.resize_subtree(left, left_rect);
        self.resize_subtree(right, right_rect);
    }

    /// Smallest `(w, h)` a subtree can be squeezed into with one cell per leaf.
    fn min_extent(&self, id: NodeId) -> (i32, i32) {
        match self.node(id) {
            Some(Node {
                children: Some((left, right)),
                horizontal,
                ..
            }) => {
                let (lw, lh) = self.min_extent(*left);
                let (rw, rh) = self.min_extent(*right);
                if *horizontal {
                    (lw.max(rw), lh + rh)
                } else {
                    (lw + rw, lh.max(rh))
                }
            }
            _ => (1, 1),
        }
    }

    pub fn contains(&self, id: NodeId, px: i32, py: i32) -> bool {
        self.node(id).map_or(false, |node| node.contains(px, py))
    }

    /// Deepest node under `id` whose rect contains the point.
    ///
    /// On an unmodified partition this is always a leaf. After carving, when
    /// the point falls between the two children, the interior node itself is
    /// returned.
    pub fn find_node(&self, id: NodeId, px: i32, py: i32) -> Option<NodeId> {
        let node = self.node(id)?;
        if !node.contains(px, py) {
            return None;
        }
        if let Some((left, right)) = node.children {
            for child in [left, right] {
                if self.contains(child, px, py) {
                    return self.find_node(child, px, py);
                }
            }
        }
        Some(id)
    }

    /// Leaves under `id`, left to right.
    pub fn leaves(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            match self.node(current).map(|n| n.children) {
                Some(Some((left, right))) => {
                    stack.push(right);
                    stack.push(left);
                }
                Some(None) => out.push(current),
                None => {}
            }
        }
        out
    }

    /// Number of levels below `id` (0 for a leaf).
    pub fn depth(&self, id: NodeId) -> i32 {
        match self.node(id).and_then(|n| n.children) {
            Some((left, right)) => 1 + self.depth(left).max(self.depth(right)),
            None => 0,
        }
    }
}

impl Index<NodeId> for Bsp {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        match self.node(id) {
            Some(node) => node,
            None => panic!("BSP node {} does not exist", id),
        }
    }
}

impl IndexMut<NodeId> for Bsp {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        match self.node_mut(id) {
            Some(node) => node,
            None => panic!("BSP node {} does not exist", id),
        }
    }
}
