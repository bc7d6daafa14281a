// src/dungeon/generator.rs

use std::time::Instant;

use log::{info, warn};
use serde::Serialize;

use crate::bsp::Bsp;
use crate::config::DungeonConfig;
use crate::dungeon::DungeonCarver;
use crate::error::{DungeonError, Result};
use crate::map::{GridMap, Map};
use crate::random::RandomSource;

/// Builds a complete level: wall fill, recursive split, then carving.
#[derive(Debug, Clone)]
pub struct DungeonGenerator {
    config: DungeonConfig,
}

#[derive(Default, Debug, Clone, Serialize)]
pub struct GenerationStats {
    pub generation_time_ms: f64,
    pub node_count: usize,
    pub room_count: usize,
    pub corridor_count: usize,
    pub walkable_cells: usize,
}

impl DungeonGenerator {
    pub fn new(config: DungeonConfig) -> Self {
        DungeonGenerator { config }
    }

    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    /// Fill `map` with a fresh dungeon and return the carved tree.
    ///
    /// The tree's root covers the whole map; after this call its node rects
    /// are the carved rooms and their bounding boxes.
    pub fn generate<R: RandomSource + ?Sized>(
        &self,
        map: &mut Map,
        rng: &mut R,
    ) -> Result<(Bsp, GenerationStats)> {
        self.config.validate()?;
        let (width, height) = (map.width(), map.height());
        if width < 3 || height < 3 {
            return Err(DungeonError::MapTooSmall { width, height });
        }

        let start = Instant::now();
        map.clear(false, false); // fill with walls

        let mut bsp = Bsp::new(0, 0, width, height);
        let root = bsp.root();
        let min_size = self.config.split_min_size();
        bsp.split_recursive(
            root,
            rng,
            self.config.bsp_depth,
            min_size,
            min_size,
            self.config.max_h_ratio,
            self.config.max_v_ratio,
        )?;

        let carver = DungeonCarver::new(
            self.config.min_room_size,
            self.config.random_rooms,
            self.config.keep_walls,
        );
        let carved = carver.carve(&mut bsp, map, rng)?;

        if !map.is_connected() {
            warn!("carved {}x{} map is not fully connected", width, height);
        }

        let stats = GenerationStats {
            generation_time_ms: start.elapsed().as_secs_f64() * 1000.0,
            node_count: bsp.len(),
            room_count: carved.rooms,
            corridor_count: carved.corridors,
            walkable_cells: map.walkable_count(),
        };
        info!(
            "generated {}x{} dungeon: {} rooms, {} corridors, {} walkable cells in {:.2} ms",
            width,
            height,
            stats.room_count,
            stats.corridor_count,
            stats.walkable_cells,
            stats.generation_time_ms
        );
        Ok((bsp, stats))
    }
}

impl Default for DungeonGenerator {
    fn default() -> Self {
        Self::new(DungeonConfig::default())
    }
}
