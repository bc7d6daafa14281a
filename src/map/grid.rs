// src/map/grid.rs

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimal mutable grid the carver writes rooms and corridors into.
pub trait GridMap {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    fn set_cell(&mut self, x: i32, y: i32, walkable: bool, transparent: bool);
    fn is_walkable(&self, x: i32, y: i32) -> bool;
    fn is_transparent(&self, x: i32, y: i32) -> bool;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub walkable: bool,
    pub transparent: bool,
}

/// A dense, row-major grid of [`Cell`]s. New maps are entirely solid.
///
/// Deserializing checks that `cells` holds exactly `width * height` entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMap")]
pub struct Map {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

#[derive(Deserialize)]
struct RawMap {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl TryFrom<RawMap> for Map {
    type Error = String;

    fn try_from(raw: RawMap) -> Result<Self, Self::Error> {
        if raw.width < 0 || raw.height < 0 {
            return Err(format!("negative map size {}x{}", raw.width, raw.height));
        }
        let expected = (raw.width as usize).checked_mul(raw.height as usize);
        if expected != Some(raw.cells.len()) {
            return Err(format!(
                "{}x{} map needs {} cells, got {}",
                raw.width,
                raw.height,
                raw.width as u64 * raw.height as u64,
                raw.cells.len()
            ));
        }
        Ok(Map {
            width: raw.width,
            height: raw.height,
            cells: raw.cells,
        })
    }
}

impl Map {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Map {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    /// Reset every cell to the given properties.
    pub fn clear(&mut self, transparent: bool, walkable: bool) {
        self.cells.fill(Cell {
            walkable,
            transparent,
        });
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    pub fn walkable_count(&self) -> usize {
        self.cells.iter().filter(|c| c.walkable).count()
    }

    /// Number of walkable cells 4-connected to `(x, y)`, including itself.
    /// Returns 0 when the start cell is solid or off the map.
    pub fn flood_fill(&self, x: i32, y: i32) -> usize {
        let Some(start) = self.index(x, y) else {
            return 0;
        };
        if !self.cells[start].walkable {
            return 0;
        }

        let mut seen = vec![false; self.cells.len()];
        let mut queue = VecDeque::from([(x, y)]);
        seen[start] = true;
        let mut count = 0;
        while let Some((cx, cy)) = queue.pop_front() {
            count += 1;
            for (nx, ny) in [(cx - 1, cy), (cx + 1, cy), (cx, cy - 1), (cx, cy + 1)] {
                if let Some(i) = self.index(nx, ny) {
                    if !seen[i] && self.cells[i].walkable {
                        seen[i] = true;
                        queue.push_back((nx, ny));
                    }
                }
            }
        }
        count
    }

    /// `true` if every walkable cell can reach every other one.
    /// A map with no walkable cells counts as connected.
    pub fn is_connected(&self) -> bool {
        let Some(first) = self.cells.iter().position(|c| c.walkable) else {
            return true;
        };
        let x = (first % self.width as usize) as i32;
        let y = (first / self.width as usize) as i32;
        self.flood_fill(x, y) == self.walkable_count()
    }
}

impl GridMap for Map {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    // Writes outside the map are dropped
    fn set_cell(&mut self, x: i32, y: i32, walkable: bool, transparent: bool) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Cell {
                walkable,
                transparent,
            };
        }
    }

    fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).map_or(false, |c| c.walkable)
    }

    fn is_transparent(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).map_or(false, |c| c.transparent)
    }
}

/// ASCII dump: `#` for solid cells, `.` for walkable ones.
impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1) as usize) {
            for cell in row {
                f.write_str(if cell.walkable { "." } else { "#" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
