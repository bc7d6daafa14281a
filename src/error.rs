// src/error.rs

use thiserror::Error;

use crate::bsp::NodeId;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, DungeonError>;

/// Errors surfaced by tree construction, carving and configuration.
#[derive(Debug, Error)]
pub enum DungeonError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("node {0} is not part of this tree")]
    UnknownNode(NodeId),
    #[error("map of {width}x{height} is too small to carve, need at least 3x3")]
    MapTooSmall { width: i32, height: i32 },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
