//! Experience and level-up stat growth.
//!
//! Pure over a [`StatBlock`]: the caller hands in the block, the award and a
//! random source, and gets back the new block plus every growth roll made.

use crate::core::constants::*;
use crate::data::StatBlock;
use rand::Rng;

/// Stat increases granted by a single level gained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatGrowth {
    pub new_level: u32,
    pub max_hp: u32,
    pub max_mp: u32,
    pub strength: u32,
    pub defense: u32,
    pub speed: u32,
}

impl StatGrowth {
    pub fn roll(new_level: u32, rng: &mut impl Rng) -> Self {
        Self {
            new_level,
            strength: rng.gen_range(STAT_GROWTH_MIN..=STAT_GROWTH_MAX),
            defense: rng.gen_range(STAT_GROWTH_MIN..=STAT_GROWTH_MAX),
            speed: rng.gen_range(STAT_GROWTH_MIN..=STAT_GROWTH_MAX),
            max_hp: rng.gen_range(POOL_GROWTH_MIN..=POOL_GROWTH_MAX),
            max_mp: rng.gen_range(POOL_GROWTH_MIN..=POOL_GROWTH_MAX),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "HP+{} MP+{} Str+{} Def+{} Spd+{}",
            self.max_hp, self.max_mp, self.strength, self.defense, self.speed
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progression {
    pub stats: StatBlock,
    pub growths: Vec<StatGrowth>,
}

impl Progression {
    pub fn levels_gained(&self) -> u32 {
        u32::try_from(self.growths.len()).unwrap_or(u32::MAX)
    }
}

/// Experience needed to leave `level`.
pub fn xp_for_next_level(level: u32) -> u32 {
    level.saturating_mul(XP_PER_LEVEL)
}

/// Adds `award` experience and applies every level-up it pays for.
///
/// Each level costs `level * 100` of the current level, so the threshold is
/// re-read after every step. Every level gained rolls growth independently
/// and refills HP/MP to the new maximums. Level stops at [`MAX_LEVEL`].
pub fn apply_experience(stats: &StatBlock, award: u32, rng: &mut impl Rng) -> Progression {
    let mut stats = *stats;
    let mut growths = Vec::new();
    stats.exp = stats.exp.saturating_add(award);

    while stats.level < MAX_LEVEL && stats.exp >= xp_for_next_level(stats.level) {
        stats.exp -= xp_for_next_level(stats.level);
        stats.level += 1;

        let growth = StatGrowth::roll(stats.level, rng);
        stats.strength = stats.strength.saturating_add(growth.strength);
        stats.defense = stats.defense.saturating_add(growth.defense);
        stats.speed = stats.speed.saturating_add(growth.speed);
        stats.max_hp = stats.max_hp.saturating_add(growth.max_hp);
        stats.max_mp = stats.max_mp.saturating_add(growth.max_mp);
        stats.restore_full();
        growths.push(growth);
    }

    stats.clamp_pools();
    Progression { stats, growths }
}
