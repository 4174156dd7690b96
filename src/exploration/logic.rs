//! Overworld state: player movement, collisions and the entities on the map.

use super::generation::{ensure_capacity, generate_map, resolve_start, sample_free_cell};
use super::types::*;
use crate::core::config::GameConfig;
use crate::core::constants::*;
use crate::core::error::{GameError, Result, SpawnKind};
use crate::input::InputState;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use tracing::{debug, info};

pub const DEFAULT_NPC_NAME: &str = "Old Man";
pub const DEFAULT_NPC_DIALOG: &str = "Welcome to the big world! Avoid the deep vortex.";

#[derive(Debug, Clone)]
pub struct ExplorationModel {
    map: WorldMap,
    player: Position,
    enemies: Vec<SpawnedEnemy>,
    chests: Vec<Chest>,
    npcs: Vec<Npc>,
    next_spawn_id: u64,
    /// Seconds until the next step is allowed.
    move_timer: f64,
    /// Last thing worth showing on the HUD (chest loot, NPC dialog).
    message: Option<String>,
}

impl ExplorationModel {
    /// Generates a world and populates it. `enemy_keys` is the pool each
    /// roaming enemy's type is drawn from.
    pub fn generate(config: &GameConfig, enemy_keys: &[&str], rng: &mut impl Rng) -> Result<Self> {
        config.validate()?;
        if enemy_keys.is_empty() && config.enemy_count > 0 {
            return Err(GameError::InvalidReferenceData(
                "no enemy types to spawn".to_string(),
            ));
        }

        let map = generate_map(config, rng);
        let (sx, sy) = config.player_start;
        let player = resolve_start(&map, Position::new(sx, sy))?;
        let mut model = Self::from_parts(map, player);

        model.spawn_npc(DEFAULT_NPC_NAME, DEFAULT_NPC_DIALOG, rng)?;
        model.spawn_enemies(config.enemy_count, enemy_keys, rng)?;
        model.spawn_chests(config.chest_count, DEFAULT_CHEST_ITEM, rng)?;

        info!(
            width = config.map_width,
            height = config.map_height,
            enemies = model.enemies.len(),
            chests = model.chests.len(),
            "world generated"
        );
        Ok(model)
    }

    /// Empty world on a given map. Used by generation and by tests that need
    /// a hand-built layout.
    pub fn from_parts(map: WorldMap, player: Position) -> Self {
        Self {
            map,
            player,
            enemies: Vec::new(),
            chests: Vec::new(),
            npcs: Vec::new(),
            next_spawn_id: 0,
            move_timer: 0.0,
            message: None,
        }
    }

    fn occupied_cells(&self) -> HashSet<Position> {
        let mut occupied: HashSet<Position> = HashSet::new();
        occupied.insert(self.player);
        occupied.extend(self.enemies.iter().map(|e| e.position));
        occupied.extend(self.chests.iter().map(|c| c.position));
        occupied.extend(self.npcs.iter().map(|n| n.position));
        occupied
    }

    fn spawn_npc(&mut self, name: &str, dialog: &str, rng: &mut impl Rng) -> Result<()> {
        let occupied = self.occupied_cells();
        // Next to the starting cell when possible, like a greeter.
        let preferred = Position::new(self.player.x + 1, self.player.y + 1);
        let position = if self.map.is_walkable(preferred) && !occupied.contains(&preferred) {
            preferred
        } else {
            ensure_capacity(&self.map, &occupied, 1, SpawnKind::Npc)?;
            sample_free_cell(&self.map, &occupied, SpawnKind::Npc, rng)?
        };
        self.place_npc(position, name, dialog);
        Ok(())
    }

    fn spawn_enemies(&mut self, count: usize, keys: &[&str], rng: &mut impl Rng) -> Result<()> {
        let mut occupied = self.occupied_cells();
        ensure_capacity(&self.map, &occupied, count, SpawnKind::Enemy)?;
        for _ in 0..count {
            let position = sample_free_cell(&self.map, &occupied, SpawnKind::Enemy, rng)?;
            let key = keys.choose(rng).copied().unwrap_or_default();
            occupied.insert(position);
            self.place_enemy(position, key);
        }
        Ok(())
    }

    fn spawn_chests(&mut self, count: usize, item_id: &str, rng: &mut impl Rng) -> Result<()> {
        let mut occupied = self.occupied_cells();
        ensure_capacity(&self.map, &occupied, count, SpawnKind::Chest)?;
        for _ in 0..count {
            let position = sample_free_cell(&self.map, &occupied, SpawnKind::Chest, rng)?;
            occupied.insert(position);
            self.place_chest(position, item_id);
        }
        Ok(())
    }

    /// Adds a roaming enemy and returns its identity.
    pub fn place_enemy(&mut self, position: Position, enemy_key: &str) -> SpawnId {
        let id = SpawnId(self.next_spawn_id);
        self.next_spawn_id += 1;
        self.enemies.push(SpawnedEnemy {
            id,
            position,
            enemy_key: enemy_key.to_string(),
        });
        id
    }

    pub fn place_chest(&mut self, position: Position, item_id: &str) {
        self.chests.push(Chest {
            position,
            item_id: item_id.to_string(),
            opened: false,
        });
    }

    pub fn place_npc(&mut self, position: Position, name: &str, dialog: &str) {
        self.npcs.push(Npc {
            position,
            name: name.to_string(),
            dialog: dialog.to_string(),
        });
    }

    /// Removes the spawn with this identity. Returns false if it was
    /// already gone.
    pub fn remove_enemy(&mut self, id: SpawnId) -> bool {
        let before = self.enemies.len();
        self.enemies.retain(|e| e.id != id);
        let removed = self.enemies.len() != before;
        if removed {
            info!(spawn_id = id.0, "roaming enemy removed");
        }
        removed
    }

    /// Opens the chest at `pos` if it is still closed and returns its item.
    /// Opening an open chest gives nothing.
    pub fn open_chest_at(&mut self, pos: Position) -> Option<String> {
        let chest = self
            .chests
            .iter_mut()
            .find(|c| c.position == pos && !c.opened)?;
        chest.opened = true;
        Some(chest.item_id.clone())
    }

    /// Advances the movement timer and handles at most one step.
    pub fn update(&mut self, delta_time: f64, input: &InputState) -> Option<ExplorationEvent> {
        self.move_timer = (self.move_timer - delta_time.max(0.0)).max(0.0);
        if self.move_timer > 0.0 {
            return None;
        }
        let direction = Direction::from_input(input)?;
        self.step(direction)
    }

    fn step(&mut self, direction: Direction) -> Option<ExplorationEvent> {
        let target = self.player.step(direction)?;
        if !self.map.is_walkable(target) {
            return None;
        }

        if let Some(enemy) = self.enemy_at(target) {
            let event = ExplorationEvent::Encounter {
                enemy_key: enemy.enemy_key.clone(),
                spawn_id: enemy.id,
            };
            info!(enemy = %enemy.enemy_key, spawn_id = enemy.id.0, "encounter");
            self.move_timer = MOVE_DELAY_SECONDS;
            return Some(event);
        }

        if let Some(item_id) = self.open_chest_at(target) {
            info!(item = %item_id, x = target.x, y = target.y, "chest opened");
            self.message = Some(format!("Found a {}!", item_id));
            self.move_timer = CHEST_PAUSE_SECONDS;
            return Some(ExplorationEvent::ChestOpened {
                item_id,
                position: target,
            });
        }

        self.player = target;
        self.move_timer = MOVE_DELAY_SECONDS;
        debug!(x = target.x, y = target.y, "player moved");

        self.message = self
            .npc_at(target)
            .map(|npc| format!("{}: {}", npc.name, npc.dialog));
        None
    }

    pub fn enemy_at(&self, pos: Position) -> Option<&SpawnedEnemy> {
        self.enemies.iter().find(|e| e.position == pos)
    }

    pub fn chest_at(&self, pos: Position) -> Option<&Chest> {
        self.chests.iter().find(|c| c.position == pos)
    }

    pub fn npc_at(&self, pos: Position) -> Option<&Npc> {
        self.npcs.iter().find(|n| n.position == pos)
    }

    pub fn map(&self) -> &WorldMap {
        &self.map
    }

    pub fn player(&self) -> Position {
        self.player
    }

    pub fn enemies(&self) -> &[SpawnedEnemy] {
        &self.enemies
    }

    pub fn chests(&self) -> &[Chest] {
        &self.chests
    }

    pub fn npcs(&self) -> &[Npc] {
        &self.npcs
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn move_timer(&self) -> f64 {
        self.move_timer
    }
}
