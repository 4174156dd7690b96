//! Character, enemy, spell and item records.

use serde::{Deserialize, Serialize};

/// Numeric combat and progression attributes.
///
/// `hp <= max_hp` and `mp <= max_mp` hold after every mutation made through
/// the methods below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
    pub strength: u32,
    pub defense: u32,
    /// Carried for turn ordering but not consulted by the turn cycle.
    pub speed: u32,
    pub level: u32,
    pub exp: u32,
}

impl StatBlock {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    /// Deducts `cost` MP. Returns false and leaves MP untouched if short.
    pub fn spend_mp(&mut self, cost: u32) -> bool {
        if self.mp < cost {
            return false;
        }
        self.mp -= cost;
        true
    }

    pub fn restore_full(&mut self) {
        self.hp = self.max_hp;
        self.mp = self.max_mp;
    }

    /// Re-establishes the pool bounds after a direct field edit.
    pub fn clamp_pools(&mut self) {
        self.hp = self.hp.min(self.max_hp);
        self.mp = self.mp.min(self.max_mp);
    }
}

/// A party member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    pub stats: StatBlock,
    /// Presentation hint (colour), never interpreted by the simulation.
    pub sprite_color: String,
}

impl Character {
    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }
}

/// Immutable enemy record from the reference tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub id: String,
    pub name: String,
    pub stats: StatBlock,
    pub sprite_color: String,
    pub xp_reward: u32,
}

/// A live enemy inside one battle.
///
/// Fields are private: the only way to obtain one is
/// [`Enemy::from_template`], which copies the template and refills HP/MP,
/// so a battle can never write through to the shared tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    type_key: String,
    name: String,
    stats: StatBlock,
    sprite_color: String,
    xp_reward: u32,
}

impl Enemy {
    pub fn from_template(type_key: &str, template: &EnemyTemplate) -> Self {
        let mut stats = template.stats;
        stats.restore_full();
        Self {
            type_key: type_key.to_string(),
            name: template.name.clone(),
            stats,
            sprite_color: template.sprite_color.clone(),
            xp_reward: template.xp_reward,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.stats.take_damage(amount);
    }

    pub fn type_key(&self) -> &str {
        &self.type_key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }

    pub fn sprite_color(&self) -> &str {
        &self.sprite_color
    }

    pub fn xp_reward(&self) -> u32 {
        self.xp_reward
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Element {
    Fire,
    Ice,
    Storm,
    Lightning,
}

impl Element {
    pub fn name(&self) -> &'static str {
        match self {
            Element::Fire => "Fire",
            Element::Ice => "Ice",
            Element::Storm => "Storm",
            Element::Lightning => "Lightning",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagicSpell {
    pub id: String,
    pub name: String,
    pub mp_cost: u32,
    pub power: u32,
    pub element: Element,
    pub required_level: u32,
}

impl MagicSpell {
    pub fn is_known_at(&self, level: u32) -> bool {
        level >= self.required_level
    }
}

/// Spells available to a caster of the given level, in table order.
pub fn spells_for_level(spells: &[MagicSpell], level: u32) -> Vec<&MagicSpell> {
    spells.iter().filter(|s| s.is_known_at(level)).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Starting stock carried by the party.
    pub quantity: u32,
}
