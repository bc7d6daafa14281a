// src/dungeon/carver.rs

use log::debug;
use serde::Serialize;

use crate::bsp::{span_overlap, Bsp, Node, NodeId, Rect};
use crate::error::{DungeonError, Result};
use crate::map::GridMap;
use crate::random::RandomSource;

/// Turns a split [`Bsp`] into rooms and corridors on a [`GridMap`].
///
/// Runs bottom-up over the tree. Every leaf is shrunk to a room and dug out;
/// every interior node is then resized to the bounding box of its children and
/// its two children are joined with a corridor. Afterwards all walkable cells
/// are connected and node rects describe the carved rooms, not the original
/// partition. `position`/`horizontal` keep their split-time values.
#[derive(Debug, Clone)]
pub struct DungeonCarver {
    pub min_room_size: i32,
    pub randomize_rooms: bool,
    pub keep_walls: bool, // Leave a one-cell wall between neighbouring rooms
}

/// What a carving pass produced.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CarveStats {
    pub rooms: usize,
    pub corridors: usize,
}

impl DungeonCarver {
    pub fn new(min_room_size: i32, randomize_rooms: bool, keep_walls: bool) -> Self {
        DungeonCarver {
            min_room_size,
            randomize_rooms,
            keep_walls,
        }
    }

    /// Carve the whole tree into `map`. The outermost ring of the map is
    /// never dug, so the level always has a solid border.
    pub fn carve<M, R>(&self, bsp: &mut Bsp, map: &mut M, rng: &mut R) -> Result<CarveStats>
    where
        M: GridMap + ?Sized,
        R: RandomSource + ?Sized,
    {
        if map.width() < 3 || map.height() < 3 {
            return Err(DungeonError::MapTooSmall {
                width: map.width(),
                height: map.height(),
            });
        }

        let mut stats = CarveStats::default();
        let root = bsp.root();
        bsp.traverse_inverted_level_order(root, |bsp, id| {
            if bsp.is_leaf(id) {
                if self.dig_room(&mut bsp[id], map, rng) {
                    stats.rooms += 1;
                }
            } else if self.connect_children(bsp, id, map, rng) {
                stats.corridors += 1;
            }
            true
        });
        Ok(stats)
    }

    /// Shrink a leaf to its room and dig it. The room never leaves the leaf's
    /// own rect; a leaf with no diggable cell (a one-cell strip on the map
    /// border) is left solid, collapses to an empty rect and returns `false`.
    fn dig_room<M, R>(&self, node: &mut Node, map: &mut M, rng: &mut R) -> bool
    where
        M: GridMap + ?Sized,
        R: RandomSource + ?Sized,
    {
        let (width, height) = (map.width(), map.height());
        let mut min_x = node.x + 1;
        let mut max_x = node.x + node.w - 1;
        let mut min_y = node.y + 1;
        let mut max_y = node.y + node.h - 1;
        if !self.keep_walls {
            if min_x > 1 {
                min_x -= 1;
            }
            if min_y > 1 {
                min_y -= 1;
            }
        }

        // keep walls on the map borders
        min_x = min_x.max(1);
        min_y = min_y.max(1);
        max_x = max_x.min(width - 2);
        max_y = max_y.min(height - 2);
        if min_x > max_x || min_y > max_y {
            debug!("leaf {} has no room for a room", node.rect());
            node.set_rect(Rect::new(node.x, node.y, 0, 0));
            return false;
        }

        if self.randomize_rooms {
            (min_x, max_x) = self.random_span(min_x, max_x, rng);
            (min_y, max_y) = self.random_span(min_y, max_y, rng);
        }

        node.set_rect(Rect::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1));
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                map.set_cell(x, y, true, true);
            }
        }
        true
    }

    /// Random sub-span of `[lo, hi]` at least `min_room_size` cells long.
    /// Spans that are already that short are kept whole.
    fn random_span<R: RandomSource + ?Sized>(&self, lo: i32, hi: i32, rng: &mut R) -> (i32, i32) {
        let size = self.min_room_size.max(1);
        if hi - lo + 1 <= size {
            return (lo, hi);
        }
        let start = rng.uniform_int(lo, hi - size + 1);
        let end = rng.uniform_int(start + size - 1, hi);
        (start, end)
    }

    /// Resize an interior node to its children and join them. Returns `false`
    /// when no corridor was needed because a child holds no room.
    fn connect_children<M, R>(&self, bsp: &mut Bsp, id: NodeId, map: &mut M, rng: &mut R) -> bool
    where
        M: GridMap + ?Sized,
        R: RandomSource + ?Sized,
    {
        let Some((left, right)) = bsp[id].children else {
            return false;
        };
        let l = bsp[left].rect();
        let r = bsp[right].rect();

        // resize the node to fit its sons
        let bounds = l.union(&r);
        bsp[id].set_rect(bounds);
        if l.is_empty() || r.is_empty() {
            return false;
        }

        let clip = Rect::new(0, 0, map.width(), map.height());
        let mut digger = Digger {
            map,
            bounds: intersection(&bounds, &clip),
        };

        if bsp[id].horizontal {
            // rooms stacked top/bottom: vertical corridor
            match span_overlap(l.x, l.right() - 1, r.x, r.right() - 1) {
                Some((lo, hi)) => {
                    let x = rng.uniform_int(lo, hi);
                    debug!("node {}: straight vertical corridor at x={}", id, x);
                    digger.vline_down(x, r.y);
                    digger.vline_up(x, r.y - 1);
                }
                None => {
                    let x1 = rng.uniform_int(l.x, l.right() - 1);
                    let x2 = rng.uniform_int(r.x, r.right() - 1);
                    let y = rng.uniform_int(l.bottom(), r.y);
                    debug!("node {}: Z corridor x={}..{} via y={}", id, x1, x2, y);
                    digger.vline_up(x1, y - 1);
                    digger.hline(x1, y, x2);
                    digger.vline_down(x2, y + 1);
                }
            }
        } else {
            // rooms side by side: horizontal corridor
            match span_overlap(l.y, l.bottom() - 1, r.y, r.bottom() - 1) {
                Some((lo, hi)) => {
                    let y = rng.uniform_int(lo, hi);
                    debug!("node {}: straight horizontal corridor at y={}", id, y);
                    digger.hline_left(r.x - 1, y);
                    digger.hline_right(r.x, y);
                }
                None => {
                    let y1 = rng.uniform_int(l.y, l.bottom() - 1);
                    let y2 = rng.uniform_int(r.y, r.bottom() - 1);
                    let x = rng.uniform_int(l.right(), r.x);
                    debug!("node {}: Z corridor y={}..{} via x={}", id, y1, y2, x);
                    digger.hline_left(x - 1, y1);
                    digger.vline(x, y1, y2);
                    digger.hline_right(x + 1, y2);
                }
            }
        }
        true
    }
}

fn intersection(a: &Rect, b: &Rect) -> Rect {
    let x = a.x.max(b.x);
    let y = a.y.max(b.y);
    Rect::new(x, y, (a.right().min(b.right()) - x).max(0), (a.bottom().min(b.bottom()) - y).max(0))
}

/// Line drawing confined to one node's bounds.
///
/// The `*_up`/`*_down`/`*_left`/`*_right` variants dig from a start cell until
/// they reach an already walkable cell or the edge of the bounds.
struct Digger<'a, M: GridMap + ?Sized> {
    map: &'a mut M,
    bounds: Rect,
}

impl<M: GridMap + ?Sized> Digger<'_, M> {
    fn dig(&mut self, x: i32, y: i32) {
        if self.bounds.contains(x, y) {
            self.map.set_cell(x, y, true, true);
        }
    }

    fn open(&self, x: i32, y: i32) -> bool {
        self.map.is_walkable(x, y)
    }

    fn vline(&mut self, x: i32, y1: i32, y2: i32) {
        for y in y1.min(y2)..=y1.max(y2) {
            self.dig(x, y);
        }
    }

    fn hline(&mut self, x1: i32, y: i32, x2: i32) {
        for x in x1.min(x2)..=x1.max(x2) {
            self.dig(x, y);
        }
    }

    fn vline_up(&mut self, x: i32, mut y: i32) {
        while self.bounds.contains(x, y) && !self.open(x, y) {
            self.dig(x, y);
            y -= 1;
        }
    }

    fn vline_down(&mut self, x: i32, mut y: i32) {
        while self.bounds.contains(x, y) && !self.open(x, y) {
            self.dig(x, y);
            y += 1;
        }
    }

    fn hline_left(&mut self, mut x: i32, y: i32) {
        while self.bounds.contains(x, y) && !self.open(x, y) {
            self.dig(x, y);
            x -= 1;
        }
    }

    fn hline_right(&mut self, mut x: i32, y: i32) {
        while self.bounds.contains(x, y) && !self.open(x, y) {
            self.dig(x, y);
            x += 1;
        }
    }
}
