//! World generation settings.

use super::constants::*;
use super::error::{GameError, Result};
use serde::{Deserialize, Serialize};

/// Cumulative terrain draw probabilities for interior cells.
/// Whatever is left after mountain, forest and water becomes grass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainWeights {
    pub mountain: f64,
    pub forest: f64,
    pub water: f64,
}

impl Default for TerrainWeights {
    fn default() -> Self {
        Self {
            mountain: MOUNTAIN_CHANCE,
            forest: FOREST_CHANCE,
            water: WATER_CHANCE,
        }
    }
}

impl TerrainWeights {
    pub fn grass(&self) -> f64 {
        1.0 - self.mountain - self.forest - self.water
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub map_width: usize,
    pub map_height: usize,
    /// Row of the river band. `None` puts it in the middle of the map.
    pub river_row: Option<usize>,
    pub bridge_column: usize,
    pub terrain: TerrainWeights,
    pub enemy_count: usize,
    pub chest_count: usize,
    pub player_start: (usize, usize),
    /// RNG seed for the run (None = entropy)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_width: DEFAULT_MAP_WIDTH,
            map_height: DEFAULT_MAP_HEIGHT,
            river_row: None,
            bridge_column: DEFAULT_BRIDGE_COLUMN,
            terrain: TerrainWeights::default(),
            enemy_count: DEFAULT_ENEMY_COUNT,
            chest_count: DEFAULT_CHEST_COUNT,
            player_start: DEFAULT_PLAYER_START,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Row index the river is carved into.
    pub fn effective_river_row(&self) -> usize {
        self.river_row.unwrap_or(self.map_height / 2)
    }

    /// Bridge column clamped into the interior.
    pub fn effective_bridge_column(&self) -> usize {
        self.bridge_column.clamp(1, self.map_width.saturating_sub(2).max(1))
    }

    pub fn validate(&self) -> Result<()> {
        if self.map_width < MIN_MAP_WIDTH || self.map_height < MIN_MAP_HEIGHT {
            return Err(GameError::InvalidConfig(format!(
                "map must be at least {}x{}, got {}x{}",
                MIN_MAP_WIDTH, MIN_MAP_HEIGHT, self.map_width, self.map_height
            )));
        }

        // The river needs a bank row on each side that is not the border.
        let river = self.effective_river_row();
        if river < 2 || river + 2 >= self.map_height {
            return Err(GameError::InvalidConfig(format!(
                "river row {} leaves no bank inside a map of height {}",
                river, self.map_height
            )));
        }

        let w = self.terrain;
        let in_range = |p: f64| (0.0..=1.0).contains(&p);
        if !in_range(w.mountain) || !in_range(w.forest) || !in_range(w.water) || w.grass() < 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "terrain weights must be probabilities summing to at most 1.0: {:?}",
                w
            )));
        }

        let (px, py) = self.player_start;
        if px >= self.map_width || py >= self.map_height {
            return Err(GameError::InvalidConfig(format!(
                "player start ({}, {}) is outside the map",
                px, py
            )));
        }

        Ok(())
    }
}
