//! The persistent party roster and the item stock it carries.

use super::types::{Character, ItemDef};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub members: Vec<Character>,
}

impl Party {
    pub fn new(members: Vec<Character>) -> Self {
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Character> {
        self.members.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Character> {
        self.members.get_mut(index)
    }

    pub fn any_alive(&self) -> bool {
        self.members.iter().any(Character::is_alive)
    }

    pub fn living_indices(&self) -> Vec<usize> {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(|(i, _)| i)
            .collect()
    }

    /// First living member at or after `start`, wrapping around the roster.
    pub fn next_living_from(&self, start: usize) -> Option<usize> {
        let len = self.members.len();
        (0..len)
            .map(|offset| (start + offset) % len)
            .find(|&i| self.members[i].is_alive())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    pub item_id: String,
    pub name: String,
    pub description: String,
    pub quantity: u32,
}

/// Item stock in reference-table order. Items are never consumed; chests
/// only add to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    entries: Vec<InventoryEntry>,
}

impl Inventory {
    pub fn from_items(items: &[ItemDef]) -> Self {
        Self {
            entries: items
                .iter()
                .map(|item| InventoryEntry {
                    item_id: item.id.clone(),
                    name: item.name.clone(),
                    description: item.description.clone(),
                    quantity: item.quantity,
                })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    pub fn quantity(&self, item_id: &str) -> u32 {
        self.entries
            .iter()
            .find(|e| e.item_id == item_id)
            .map(|e| e.quantity)
            .unwrap_or(0)
    }

    /// Adds `amount` of an item, falling back to a bare entry named after the
    /// id when the item is missing from the reference table.
    pub fn add(&mut self, item_id: &str, amount: u32) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.item_id == item_id) {
            entry.quantity = entry.quantity.saturating_add(amount);
            return;
        }
        self.entries.push(InventoryEntry {
            item_id: item_id.to_string(),
            name: item_id.to_string(),
            description: String::new(),
            quantity: amount,
        });
    }
}
