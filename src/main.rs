#![warn(non_snake_case)]
//! # bsp_dungeon demo driver
//!
//! Generates one dungeon and prints it as ASCII. An optional first argument
//! names a JSON config file (see `DungeonConfig`); without it the defaults are
//! used. Set `RUST_LOG=debug` to watch every split and corridor.

use std::env;
use std::error::Error;

use bsp_dungeon::{DungeonConfig, DungeonGenerator, Map, Random};
use log::info;

const MAP_WIDTH: i32 = 80;
const MAP_HEIGHT: i32 = 50;

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging.
    env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => {
            info!("Loading config from {}", path);
            DungeonConfig::load(&path)?
        }
        None => DungeonConfig::default(),
    };
    let seed = config.seed.unwrap_or_else(rand::random);
    info!("Generating {}x{} dungeon with seed {}", MAP_WIDTH, MAP_HEIGHT, seed);

    let mut map = Map::new(MAP_WIDTH, MAP_HEIGHT);
    let mut rng = Random::new(seed);
    let (_bsp, stats) = DungeonGenerator::new(config).generate(&mut map, &mut rng)?;

    info!("Stats: {}", serde_json::to_string(&stats)?);
    print!("{}", map);
    Ok(())
}
