//! Shared constants, configuration and the core error type.

pub mod config;
pub mod constants;
pub mod error;

pub use config::{GameConfig, TerrainWeights};
pub use error::{GameError, Result, SpawnKind};
