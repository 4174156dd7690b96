//! Turn-based battles between the party and an encounter's enemies.

pub mod logic;
pub mod types;

pub use logic::BattleEngine;
pub use types::*;
