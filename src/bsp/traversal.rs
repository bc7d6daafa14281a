// src/bsp/traversal.rs
// Depth-first and breadth-first walks over a Bsp.
//
// Visitors receive the tree itself plus the id being visited, so they may
// mutate node geometry (the carver does) and read neighbours. Returning
// `false` aborts the walk, which then returns `false` as well.

use std::collections::VecDeque;

use crate::bsp::{Bsp, NodeId};

impl Bsp {
    /// Visit a node, then its left subtree, then its right subtree.
    pub fn traverse_pre_order<F>(&mut self, start: NodeId, mut visitor: F) -> bool
    where
        F: FnMut(&mut Bsp, NodeId) -> bool,
    {
        self.pre_order(start, &mut visitor)
    }

    /// Visit the left subtree, then the node, then the right subtree.
    pub fn traverse_in_order<F>(&mut self, start: NodeId, mut visitor: F) -> bool
    where
        F: FnMut(&mut Bsp, NodeId) -> bool,
    {
        self.in_order(start, &mut visitor)
    }

    /// Visit both subtrees before the node itself.
    pub fn traverse_post_order<F>(&mut self, start: NodeId, mut visitor: F) -> bool
    where
        F: FnMut(&mut Bsp, NodeId) -> bool,
    {
        self.post_order(start, &mut visitor)
    }

    /// Breadth-first: by increasing level, left to right within a level.
    pub fn traverse_level_order<F>(&mut self, start: NodeId, mut visitor: F) -> bool
    where
        F: FnMut(&mut Bsp, NodeId) -> bool,
    {
        let mut queue = VecDeque::from([start]);
        while let Some(id) = queue.pop_front() {
            if self.node(id).is_none() {
                continue;
            }
            if !visitor(self, id) {
                return false;
            }
            if let Some((left, right)) = self.node(id).and_then(|n| n.children) {
                queue.push_back(left);
                queue.push_back(right);
            }
        }
        true
    }

    /// Exact reverse of [`traverse_level_order`](Self::traverse_level_order).
    /// Every node is visited after both of its children.
    pub fn traverse_inverted_level_order<F>(&mut self, start: NodeId, mut visitor: F) -> bool
    where
        F: FnMut(&mut Bsp, NodeId) -> bool,
    {
        let order = self.level_order(start);
        for id in order.into_iter().rev() {
            if self.node(id).is_none() {
                continue;
            }
            if !visitor(self, id) {
                return false;
            }
        }
        true
    }

    /// Node ids under `start` in level order.
    pub fn level_order(&self, start: NodeId) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.len());
        if self.node(start).is_none() {
            return order;
        }
        order.push(start);
        let mut next = 0;
        while next < order.len() {
            if let Some((left, right)) = self.node(order[next]).and_then(|n| n.children) {
                order.push(left);
                order.push(right);
            }
            next += 1;
        }
        order
    }

    fn pre_order<F>(&mut self, id: NodeId, visitor: &mut F) -> bool
    where
        F: FnMut(&mut Bsp, NodeId) -> bool,
    {
        if self.node(id).is_none() {
            return true;
        }
        if !visitor(self, id) {
            return false;
        }
        if let Some(left) = self.left(id) {
            if !self.pre_order(left, visitor) {
                return false;
            }
        }
        if let Some(right) = self.right(id) {
            if !self.pre_order(right, visitor) {
                return false;
            }
        }
        true
    }

    fn in_order<F>(&mut self, id: NodeId, visitor: &mut F) -> bool
    where
        F: FnMut(&mut Bsp, NodeId) -> bool,
    {
        if self.node(id).is_none() {
            return true;
        }
        if let Some(left) = self.left(id) {
            if !self.in_order(left, visitor) {
                return false;
            }
        }
        if !visitor(self, id) {
            return false;
        }
        if let Some(right) = self.right(id) {
            if !self.in_order(right, visitor) {
                return false;
            }
        }
        true
    }

    fn post_order<F>(&mut self, id: NodeId, visitor: &mut F) -> bool
    where
        F: FnMut(&mut Bsp, NodeId) -> bool,
    {
        if self.node(id).is_none() {
            return true;
        }
        if let Some(left) = self.left(id) {
            if !self.post_order(left, visitor) {
                return false;
            }
        }
        if let Some(right) = self.right(id) {
            if !self.post_order(right, visitor) {
                return false;
            }
        }
        visitor(self, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Random;

    // root split once, then its left child split once:
    //
    //          root
    //        /      \
    //      a          b
    //    /   \
    //   c     d
    fn small_tree() -> (Bsp, [NodeId; 5]) {
        let mut bsp = Bsp::new(0, 0, 50, 50);
        let root = bsp.root();
        bsp.split_once(root, true, 25).unwrap();
        let a = bsp.left(root).unwrap();
        let b = bsp.right(root).unwrap();
        bsp.split_once(a, false, 20).unwrap();
        let c = bsp.left(a).unwrap();
        let d = bsp.right(a).unwrap();
        (bsp, [root, a, b, c, d])
    }

    fn collect(bsp: &mut Bsp, walk: fn(&mut Bsp, NodeId, &mut Vec<NodeId>) -> bool) -> Vec<NodeId> {
        let mut seen = Vec::new();
        let root = bsp.root();
        assert!(walk(bsp, root, &mut seen));
        seen
    }

    #[test]
    fn test_pre_order() {
        let (mut bsp, [root, a, b, c, d]) = small_tree();
        let seen = collect(&mut bsp, |bsp, start, seen| {
            bsp.traverse_pre_order(start, |_, id| {
                seen.push(id);
                true
            })
        });
        assert_eq!(seen, vec![root, a, c, d, b]);
    }

    #[test]
    fn test_in_order() {
        let (mut bsp, [root, a, b, c, d]) = small_tree();
        let seen = collect(&mut bsp, |bsp, start, seen| {
            bsp.traverse_in_order(start, |_, id| {
                seen.push(id);
                true
            })
        });
        assert_eq!(seen, vec![c, a, d, root, b]);
    }

    #[test]
    fn test_post_order() {
        let (mut bsp, [root, a, b, c, d]) = small_tree();
        let seen = collect(&mut bsp, |bsp, start, seen| {
            bsp.traverse_post_order(start, |_, id| {
                seen.push(id);
                true
            })
        });
        assert_eq!(seen, vec![c, d, a, b, root]);
    }

    #[test]
    fn test_level_order() {
        let (mut bsp, [root, a, b, c, d]) = small_tree();
        let seen = collect(&mut bsp, |bsp, start, seen| {
            bsp.traverse_level_order(start, |_, id| {
                seen.push(id);
                true
            })
        });
        assert_eq!(seen, vec![root, a, b, c, d]);
        assert_eq!(bsp.level_order(root), seen);
    }

    #[test]
    fn test_inverted_level_order() {
        let (mut bsp, [root, a, b, c, d]) = small_tree();
        let seen = collect(&mut bsp, |bsp, start, seen| {
            bsp.traverse_inverted_level_order(start, |_, id| {
                seen.push(id);
                true
            })
        });
        assert_eq!(seen, vec![d, c, b, a, root]);
    }

    #[test]
    fn test_level_orders_on_random_tree() {
        let mut rng = Random::new(42);
        let mut bsp = Bsp::new(0, 0, 80, 50);
        let root = bsp.root();
        bsp.split_recursive(root, &mut rng, 6, 4, 4, 1.5, 1.5).unwrap();

        let mut forward = Vec::new();
        bsp.traverse_level_order(root, |bsp, id| {
            forward.push((id, bsp[id].level));
            true
        });
        assert_eq!(forward.len(), bsp.len());
        assert!(forward.windows(2).all(|w| w[0].1 <= w[1].1));

        let mut backward = Vec::new();
        bsp.traverse_inverted_level_order(root, |bsp, id| {
            // children must already have been visited
            if let Some((left, right)) = bsp[id].children {
                assert!(backward.contains(&left) && backward.contains(&right));
            }
            backward.push(id);
            true
        });
        let reversed: Vec<_> = forward.iter().rev().map(|&(id, _)| id).collect();
        assert_eq!(backward, reversed);
    }

    #[test]
    fn test_abort_propagates() {
        let (mut bsp, [root, a, _b, c, _d]) = small_tree();

        let mut seen = Vec::new();
        let finished = bsp.traverse_pre_order(root, |_, id| {
            seen.push(id);
            id != c
        });
        assert!(!finished);
        assert_eq!(seen, vec![root, a, c]);

        let mut count = 0;
        assert!(!bsp.traverse_in_order(root, |_, _| {
            count += 1;
            false
        }));
        assert_eq!(count, 1);

        let mut count = 0;
        assert!(!bsp.traverse_post_order(root, |_, id| {
            count += 1;
            id != a
        }));
        assert_eq!(count, 3);

        let mut count = 0;
        assert!(!bsp.traverse_level_order(root, |_, id| {
            count += 1;
            id != a
        }));
        assert_eq!(count, 2);

        let mut count = 0;
        assert!(!bsp.traverse_inverted_level_order(root, |_, id| {
            count += 1;
            id != a
        }));
        assert_eq!(count, 4);
    }

    #[test]
    fn test_visitor_can_mutate_geometry() {
        let (mut bsp, [root, ..]) = small_tree();
        assert!(bsp.traverse_post_order(root, |bsp, id| {
            bsp[id].w -= 1;
            true
        }));
        assert_eq!(bsp[root].w, 49);
        assert_eq!(bsp[bsp.right(root).unwrap()].w, 49);
    }

    #[test]
    fn test_single_leaf() {
        let mut bsp = Bsp::new(0, 0, 3, 3);
        let root = bsp.root();
        let mut visits = 0;
        assert!(bsp.traverse_inverted_level_order(root, |bsp, id| {
            visits += 1;
            bsp.is_leaf(id)
        }));
        assert_eq!(visits, 1);
    }
}
