//! Read-only tables handed to every component at construction.

use super::tables::{default_enemies, default_items, default_party, default_spells};
use super::types::{Character, Enemy, EnemyTemplate, ItemDef, MagicSpell};
use crate::core::error::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceData {
    /// Enemy templates keyed by type. Ordered so random picks are
    /// reproducible for a given seed.
    pub enemies: BTreeMap<String, EnemyTemplate>,
    pub party: Vec<Character>,
    pub spells: Vec<MagicSpell>,
    pub items: Vec<ItemDef>,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self {
            enemies: default_enemies()
                .into_iter()
                .map(|(key, template)| (key.to_string(), template))
                .collect(),
            party: default_party(),
            spells: default_spells(),
            items: default_items(),
        }
    }
}

impl ReferenceData {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let data: ReferenceData = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    pub fn enemy_keys(&self) -> Vec<&str> {
        self.enemies.keys().map(String::as_str).collect()
    }

    pub fn template(&self, key: &str) -> Result<&EnemyTemplate> {
        self.enemies
            .get(key)
            .ok_or_else(|| GameError::UnknownEnemyType(key.to_string()))
    }

    /// Fresh, fully healed enemy of the given type.
    pub fn spawn_enemy(&self, key: &str) -> Result<Enemy> {
        Ok(Enemy::from_template(key, self.template(key)?))
    }

    pub fn validate(&self) -> Result<()> {
        if self.party.is_empty() {
            return Err(GameError::InvalidReferenceData(
                "party roster is empty".to_string(),
            ));
        }
        if self.enemies.is_empty() {
            return Err(GameError::InvalidReferenceData(
                "enemy table is empty".to_string(),
            ));
        }

        check_unique("party member", self.party.iter().map(|c| c.id.as_str()))?;
        check_unique("spell", self.spells.iter().map(|s| s.id.as_str()))?;
        check_unique("item", self.items.iter().map(|i| i.id.as_str()))?;

        for member in &self.party {
            let s = &member.stats;
            if s.hp > s.max_hp || s.mp > s.max_mp {
                return Err(GameError::InvalidReferenceData(format!(
                    "party member '{}' starts above its max hp/mp",
                    member.id
                )));
            }
            if s.level == 0 {
                return Err(GameError::InvalidReferenceData(format!(
                    "party member '{}' has level 0",
                    member.id
                )));
            }
        }

        Ok(())
    }
}

fn check_unique<'a>(what: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(GameError::InvalidReferenceData(format!(
                "duplicate {} id '{}'",
                what, id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reference_data_is_valid() {
        let data = ReferenceData::default();
        assert!(data.validate().is_ok());
        assert_eq!(data.enemy_keys(), vec!["BAT", "DOG", "LION", "SLIME", "TIGER"]);
    }

    #[test]
    fn test_spawn_enemy_does_not_touch_template() {
        let data = ReferenceData::default();
        let enemy = data.spawn_enemy("SLIME").unwrap();
        assert_eq!(enemy.stats().hp, 200);
        assert_eq!(data.enemies["SLIME"].stats.hp, 50);
    }

    #[test]
    fn test_unknown_enemy_type() {
        let data = ReferenceData::default();
        assert!(matches!(
            data.spawn_enemy("DRAGON"),
            Err(GameError::UnknownEnemyType(key)) if key == "DRAGON"
        ));
    }

    #[test]
    fn test_rejects_duplicate_spell_ids() {
        let mut data = ReferenceData::default();
        let copy = data.spells[0].clone();
        data.spells.push(copy);
        assert!(matches!(
            data.validate(),
            Err(GameError::InvalidReferenceData(_))
        ));
    }

    #[test]
    fn test_rejects_empty_party() {
        let mut data = ReferenceData::default();
        data.party.clear();
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_json_round_trip_of_defaults() {
        let data = ReferenceData::default();
        let json = serde_json::to_string(&data).unwrap();
        let loaded = ReferenceData::from_json_str(&json).unwrap();
        assert_eq!(loaded, data);
    }
}
