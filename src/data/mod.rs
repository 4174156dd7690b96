//! Reference data tables and the records built from them.

pub mod party;
pub mod reference;
pub mod tables;
pub mod types;

pub use party::{Inventory, InventoryEntry, Party};
pub use reference::ReferenceData;
pub use types::*;
