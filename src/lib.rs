// src/lib.rs
//! BSP dungeon toolkit: recursive rectangle partitioning, five traversal
//! orders, and a carver that turns a partition into connected rooms and
//! corridors on a grid map.

pub mod bsp;
pub mod config;
pub mod dungeon;
pub mod error;
pub mod map;
pub mod random;

pub use bsp::{Bsp, Node, NodeId, Rect};
pub use config::DungeonConfig;
pub use dungeon::{CarveStats, DungeonCarver, DungeonGenerator, GenerationStats};
pub use error::{DungeonError, Result};
pub use map::{Cell, GridMap, Map};
pub use random::{Random, RandomSource};
