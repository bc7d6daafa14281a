// src/dungeon/mod.rs
pub mod carver;
pub mod generator;

pub use carver::{CarveStats, DungeonCarver};
pub use generator::{DungeonGenerator, GenerationStats};
