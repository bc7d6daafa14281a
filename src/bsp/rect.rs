// src/bsp/rect.rs
// Integer rectangle helpers used by the BSP tree and the carver.

use std::fmt;

/// An axis-aligned integer rectangle. `(x, y)` is the top-left cell, `w`/`h`
/// are extents in cells, so the covered cells are `x..x + w` by `y..y + h`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    /// One past the last covered column.
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// One past the last covered row.
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn area(&self) -> i64 {
        self.w.max(0) as i64 * self.h.max(0) as i64
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    // Check if the rect covers a cell
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && py >= self.y && px < self.right() && py < self.bottom()
    }

    /// Smallest rect covering both `self` and `other`. Empty rects cover
    /// nothing and are ignored.
    pub fn union(&self, other: &Rect) -> Rect {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect {
            x,
            y,
            w: self.right().max(other.right()) - x,
            h: self.bottom().max(other.bottom()) - y,
        }
    }

    // Checks if two rects share at least one cell
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}x{})", self.x, self.y, self.w, self.h)
    }
}

/// Inclusive overlap of the cell spans `[a0, a1]` and `[b0, b1]`, if any.
pub(crate) fn span_overlap(a0: i32, a1: i32, b0: i32, b1: i32) -> Option<(i32, i32)> {
    let lo = a0.max(b0);
    let hi = a1.min(b1);
    if lo <= hi {
        Some((lo, hi))
    } else {
        None
    }
}
