// src/config.rs

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DungeonError, Result};

/// Parameters for building and carving a BSP dungeon.
///
/// Every field has a default, so a partial JSON document such as
/// `{"bsp_depth": 5, "keep_walls": true}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    pub bsp_depth: i32,
    pub min_room_size: i32,
    pub random_rooms: bool,
    pub keep_walls: bool,
    pub max_h_ratio: f32,
    pub max_v_ratio: f32,
    pub seed: Option<u64>,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        DungeonConfig {
            bsp_depth: 8,
            min_room_size: 4,
            random_rooms: true,
            keep_walls: false,
            max_h_ratio: 1.5,
            max_v_ratio: 1.5,
            seed: None,
        }
    }
}

impl DungeonConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: DungeonConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.bsp_depth < 0 {
            return Err(DungeonError::InvalidConfig(format!(
                "bsp_depth must not be negative, got {}",
                self.bsp_depth
            )));
        }
        if self.min_room_size < 1 {
            return Err(DungeonError::InvalidConfig(format!(
                "min_room_size must be at least 1, got {}",
                self.min_room_size
            )));
        }
        for (name, ratio) in [("max_h_ratio", self.max_h_ratio), ("max_v_ratio", self.max_v_ratio)] {
            if !ratio.is_finite() || ratio <= 0.0 {
                return Err(DungeonError::InvalidConfig(format!(
                    "{} must be a positive number, got {}",
                    name, ratio
                )));
            }
        }
        Ok(())
    }

    /// Minimum node size handed to the splitter: a room plus, when walls are
    /// kept, the one-cell wall on its north/west side.
    pub fn split_min_size(&self) -> i32 {
        self.min_room_size + if self.keep_walls { 1 } else { 0 }
    }
}
