// src/map/mod.rs
pub mod grid;

pub use grid::{Cell, GridMap, Map};
