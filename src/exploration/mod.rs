//! The overworld: map generation, movement and the entities roaming it.

pub mod generation;
pub mod logic;
pub mod types;

pub use logic::ExplorationModel;
pub use types::*;
