//! Built-in reference tables used when no data file is supplied.

use super::types::*;

#[allow(clippy::too_many_arguments)]
fn stat_block(
    hp: u32,
    max_hp: u32,
    mp: u32,
    max_mp: u32,
    strength: u32,
    defense: u32,
    speed: u32,
    level: u32,
    exp: u32,
) -> StatBlock {
    StatBlock {
        hp,
        max_hp,
        mp,
        max_mp,
        strength,
        defense,
        speed,
        level,
        exp,
    }
}

fn member(id: &str, name: &str, stats: StatBlock, color: &str) -> Character {
    Character {
        id: id.to_string(),
        name: name.to_string(),
        stats,
        sprite_color: color.to_string(),
    }
}

fn enemy(id: &str, name: &str, stats: StatBlock, color: &str, xp_reward: u32) -> EnemyTemplate {
    EnemyTemplate {
        id: id.to_string(),
        name: name.to_string(),
        stats,
        sprite_color: color.to_string(),
        xp_reward,
    }
}

/// The starting party, in turn order.
pub fn default_party() -> Vec<Character> {
    vec![
        member("lukas", "Lukas", stat_block(100, 100, 20, 20, 10, 5, 8, 1, 0), "#3366cc"),
        member("theodor", "Theodor", stat_block(120, 120, 10, 10, 12, 8, 5, 1, 0), "#cc3333"),
        member("joy", "Joy", stat_block(80, 80, 50, 50, 6, 4, 10, 1, 0), "#ff66cc"),
        member("wilson", "Wilson", stat_block(90, 90, 30, 30, 9, 6, 7, 1, 0), "#33cc66"),
    ]
}

/// Enemy templates keyed by type. Stored hp is below max on purpose;
/// battles always start from a healed copy.
pub fn default_enemies() -> Vec<(&'static str, EnemyTemplate)> {
    vec![
        (
            "SLIME",
            enemy("slime", "Slime", stat_block(50, 200, 0, 0, 5, 2, 4, 1, 100), "#00ff00", 500),
        ),
        (
            "BAT",
            enemy("bat", "Bat", stat_block(20, 250, 0, 0, 4, 1, 12, 1, 100), "#9933ff", 800),
        ),
        (
            "LION",
            enemy("lion", "Lion", stat_block(30, 500, 0, 0, 15, 5, 9, 5, 100), "#cc9900", 250),
        ),
        (
            "TIGER",
            enemy("tiger", "Tiger", stat_block(60, 600, 0, 0, 18, 4, 11, 6, 0), "#ff9900", 300),
        ),
        (
            "DOG",
            enemy("dog", "Dog", stat_block(30, 300, 0, 0, 8, 3, 12, 3, 100), "#996633", 150),
        ),
    ]
}

/// Three tiers per element: (suffix, cost, power, level).
static SPELL_TIERS: [(&str, u32, u32, u32); 3] = [("I", 5, 15, 1), ("II", 15, 45, 5), ("III", 30, 100, 10)];

static SPELL_ELEMENTS: [Element; 4] = [
    Element::Fire,
    Element::Ice,
    Element::Storm,
    Element::Lightning,
];

pub fn default_spells() -> Vec<MagicSpell> {
    SPELL_ELEMENTS
        .iter()
        .flat_map(|element| {
            SPELL_TIERS
                .iter()
                .enumerate()
                .map(move |(tier, &(suffix, mp_cost, power, required_level))| MagicSpell {
                    id: format!("{}_{}", element.name().to_lowercase(), tier + 1),
                    name: format!("{} {}", element.name(), suffix),
                    mp_cost,
                    power,
                    element: *element,
                    required_level,
                })
        })
        .collect()
}

pub fn default_items() -> Vec<ItemDef> {
    let item = |id: &str, name: &str, description: &str, quantity: u32| ItemDef {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        quantity,
    };
    vec![
        item("potion", "Potion", "Restores 50 HP", 3),
        item("ether", "Ether", "Restores 20 MP", 1),
        item("phoenix_down", "Phoenix Down", "Revives KO", 1),
    ]
}
