//! Pause menu for browsing the party, their magic and the inventory.

pub mod logic;
pub mod types;

pub use logic::MenuModel;
pub use types::*;
