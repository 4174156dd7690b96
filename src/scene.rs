//! Scene coordinator: owns the active mode and moves between them.
//!
//! Exactly one of exploration, battle or menu is active. The exploration
//! model, party and inventory outlive every mode switch; battles and menus
//! are created on entry and dropped on exit.

use crate::battle::{BattleEngine, BattleOutcome, BattleState};
use crate::core::config::GameConfig;
use crate::core::constants::MAX_REINFORCEMENTS;
use crate::core::error::Result;
use crate::data::{Enemy, Inventory, MagicSpell, Party, ReferenceData};
use crate::exploration::{ExplorationEvent, ExplorationModel, SpawnId};
use crate::input::InputState;
use crate::menu::{MenuEvent, MenuModel};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

/// Drawing surface for the three modes. The core only hands out state.
pub trait SceneRenderer {
    fn draw_exploration(&mut self, exploration: &ExplorationModel, party: &Party);
    fn draw_battle(&mut self, battle: &BattleEngine, party: &Party);
    fn draw_menu(&mut self, menu: &MenuModel, view: &MenuView<'_>);
}

/// Everything the pause menu displays.
#[derive(Debug, Clone, Copy)]
pub struct MenuView<'a> {
    pub party: &'a Party,
    pub spells: &'a [MagicSpell],
    pub inventory: &'a Inventory,
}

#[derive(Debug, Clone)]
pub struct ActiveBattle {
    pub engine: BattleEngine,
    /// Roaming enemy that started the fight; removed only on a win.
    pub spawn_id: SpawnId,
}

#[derive(Debug, Clone)]
pub enum Mode {
    Exploration,
    Battle(ActiveBattle),
    Menu(MenuModel),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Exploration,
    Battle,
    Menu,
}

/// Running tally of what happened this session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub encounters: u32,
    pub battles_won: u32,
    pub battles_fled: u32,
    pub battles_lost: u32,
    pub chests_opened: u32,
}

/// Builds the enemy line-up for an encounter: the roaming enemy's type plus
/// up to [`MAX_REINFORCEMENTS`] extra enemies of uniformly random types.
pub fn build_encounter(
    data: &ReferenceData,
    primary_key: &str,
    rng: &mut impl Rng,
) -> Result<Vec<Enemy>> {
    let mut enemies = vec![data.spawn_enemy(primary_key)?];
    let keys = data.enemy_keys();
    let reinforcements = rng.gen_range(0..=MAX_REINFORCEMENTS);
    for _ in 0..reinforcements {
        if let Some(key) = keys.choose(rng) {
            enemies.push(data.spawn_enemy(key)?);
        }
    }
    Ok(enemies)
}

pub struct Game<R: Rng> {
    mode: Mode,
    exploration: ExplorationModel,
    party: Party,
    inventory: Inventory,
    data: ReferenceData,
    rng: R,
    /// Toggle state last tick, for edge detection.
    toggle_was_down: bool,
    stats: RunStats,
}

impl<R: Rng> Game<R> {
    /// Validates the data, generates the world and starts in exploration.
    pub fn new(config: &GameConfig, data: ReferenceData, mut rng: R) -> Result<Self> {
        data.validate()?;
        let exploration = ExplorationModel::generate(config, &data.enemy_keys(), &mut rng)?;
        Self::with_world(exploration, data, rng)
    }

    /// Starts on an already built world.
    pub fn with_world(exploration: ExplorationModel, data: ReferenceData, rng: R) -> Result<Self> {
        data.validate()?;
        let party = Party::new(data.party.clone());
        let inventory = Inventory::from_items(&data.items);
        Ok(Self {
            mode: Mode::Exploration,
            exploration,
            party,
            inventory,
            data,
            rng,
            toggle_was_down: false,
            stats: RunStats::default(),
        })
    }

    /// Forwards one tick to the active mode and applies any transition it
    /// asks for. Negative deltas count as zero.
    pub fn update(&mut self, delta_time: f64, input: &InputState) -> Result<()> {
        let delta_time = delta_time.max(0.0);
        let toggle_pressed = input.toggle_menu && !self.toggle_was_down;
        self.toggle_was_down = input.toggle_menu;

        match self.mode {
            Mode::Exploration => self.update_exploration(delta_time, input, toggle_pressed),
            Mode::Battle(_) => self.update_battle(delta_time, input),
            Mode::Menu(_) => {
                self.update_menu(delta_time, input);
                Ok(())
            }
        }
    }

    fn update_exploration(
        &mut self,
        delta_time: f64,
        input: &InputState,
        toggle_pressed: bool,
    ) -> Result<()> {
        if toggle_pressed {
            info!("menu opened");
            self.mode = Mode::Menu(MenuModel::new());
            return Ok(());
        }
        match self.exploration.update(delta_time, input) {
            Some(ExplorationEvent::Encounter { enemy_key, spawn_id }) => {
                self.start_battle(&enemy_key, spawn_id)
            }
            Some(ExplorationEvent::ChestOpened { item_id, .. }) => {
                self.inventory.add(&item_id, 1);
                self.stats.chests_opened += 1;
                info!(item = %item_id, total = self.inventory.quantity(&item_id), "item added");
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn start_battle(&mut self, enemy_key: &str, spawn_id: SpawnId) -> Result<()> {
        let enemies = build_encounter(&self.data, enemy_key, &mut self.rng)?;
        info!(
            primary = enemy_key,
            enemies = enemies.len(),
            spawn_id = spawn_id.0,
            "battle started"
        );
        let engine = BattleEngine::new(enemies, &self.party);
        self.stats.encounters += 1;
        self.mode = Mode::Battle(ActiveBattle { engine, spawn_id });
        Ok(())
    }

    fn update_battle(&mut self, delta_time: f64, input: &InputState) -> Result<()> {
        let Mode::Battle(active) = &mut self.mode else {
            return Ok(());
        };
        let outcome = active.engine.update(
            &mut self.party,
            &self.data.spells,
            delta_time,
            input,
            &mut self.rng,
        )?;
        let Some(outcome) = outcome else {
            return Ok(());
        };
        let defeated = active.engine.state() == BattleState::Defeat;
        let spawn_id = active.spawn_id;
        self.end_battle(outcome, spawn_id, defeated);
        Ok(())
    }

    fn end_battle(&mut self, outcome: BattleOutcome, spawn_id: SpawnId, defeated: bool) {
        if outcome.won {
            self.exploration.remove_enemy(spawn_id);
            self.stats.battles_won += 1;
        } else if defeated {
            self.stats.battles_lost += 1;
        } else {
            self.stats.battles_fled += 1;
        }
        info!(won = outcome.won, "returning to exploration");
        self.mode = Mode::Exploration;
    }

    fn update_menu(&mut self, delta_time: f64, input: &InputState) {
        let Mode::Menu(menu) = &mut self.mode else {
            return;
        };
        let event = menu.update(
            delta_time,
            input,
            &self.party,
            &self.data.spells,
            &self.inventory,
        );
        if let Some(MenuEvent::Close) = event {
            info!("menu closed");
            self.mode = Mode::Exploration;
        }
    }

    /// Draws the active mode. The open menu is drawn over the world.
    pub fn render<T: SceneRenderer>(&self, renderer: &mut T) {
        match &self.mode {
            Mode::Exploration => renderer.draw_exploration(&self.exploration, &self.party),
            Mode::Battle(active) => renderer.draw_battle(&active.engine, &self.party),
            Mode::Menu(menu) => {
                renderer.draw_exploration(&self.exploration, &self.party);
                let view = MenuView {
                    party: &self.party,
                    spells: &self.data.spells,
                    inventory: &self.inventory,
                };
                renderer.draw_menu(menu, &view);
            }
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn mode_kind(&self) -> ModeKind {
        match self.mode {
            Mode::Exploration => ModeKind::Exploration,
            Mode::Battle(_) => ModeKind::Battle,
            Mode::Menu(_) => ModeKind::Menu,
        }
    }

    pub fn battle(&self) -> Option<&BattleEngine> {
        match &self.mode {
            Mode::Battle(active) => Some(&active.engine),
            _ => None,
        }
    }

    pub fn exploration(&self) -> &ExplorationModel {
        &self.exploration
    }

    pub fn party(&self) -> &Party {
        &self.party
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn data(&self) -> &ReferenceData {
        &self.data
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exploration::{Position, Terrain, WorldMap};
    use crate::input::Button;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
    }

    impl SceneRenderer for Recorder {
        fn draw_exploration(&mut self, _: &ExplorationModel, _: &Party) {
            self.calls.push("exploration");
        }
        fn draw_battle(&mut self, _: &BattleEngine, _: &Party) {
            self.calls.push("battle");
        }
        fn draw_menu(&mut self, _: &MenuModel, _: &MenuView<'_>) {
            self.calls.push("menu");
        }
    }

    fn field_with_slime() -> (ExplorationModel, SpawnId) {
        let mut map = WorldMap::filled(7, 7, Terrain::Grass);
        for pos in map.positions().collect::<Vec<_>>() {
            if map.is_border(pos) {
                map.set(pos, Terrain::Wall);
            }
        }
        let mut world = ExplorationModel::from_parts(map, Position::new(3, 3));
        let id = world.place_enemy(Position::new(3, 2), "SLIME");
        world.place_chest(Position::new(2, 3), "potion");
        (world, id)
    }

    /// Slimes with 1 HP and a party that cannot miss.
    fn easy_data() -> ReferenceData {
        let mut data = ReferenceData::default();
        data.enemies.retain(|key, _| key == "SLIME");
        for template in data.enemies.values_mut() {
            template.stats.max_hp = 1;
            template.stats.hp = 1;
        }
        for member in &mut data.party {
            member.stats.strength = 999;
        }
        data
    }

    fn game(data: ReferenceData) -> (Game<ChaCha8Rng>, SpawnId) {
        let (world, id) = field_with_slime();
        (Game::with_world(world, data, create_test_rng()).unwrap(), id)
    }

    #[test]
    fn test_starts_in_exploration() {
        let (game, _) = game(ReferenceData::default());
        assert_eq!(game.mode_kind(), ModeKind::Exploration);
        let mut recorder = Recorder::default();
        game.render(&mut recorder);
        assert_eq!(recorder.calls, vec!["exploration"]);
    }

    #[test]
    fn test_menu_opens_on_rising_edge_only() {
        let (mut game, _) = game(ReferenceData::default());
        let held = InputState::pressed(Button::ToggleMenu);
        game.update(0.016, &held).unwrap();
        assert_eq!(game.mode_kind(), ModeKind::Menu);

        let mut recorder = Recorder::default();
        game.render(&mut recorder);
        assert_eq!(recorder.calls, vec!["exploration", "menu"]);

        // Held through the open cooldown: the menu closes once, and the
        // still-held toggle does not reopen it.
        for _ in 0..20 {
            game.update(0.016, &held).unwrap();
        }
        assert_eq!(game.mode_kind(), ModeKind::Exploration);
        game.update(0.016, &held).unwrap();
        assert_eq!(game.mode_kind(), ModeKind::Exploration);

        game.update(0.016, &InputState::none()).unwrap();
        game.update(0.016, &held).unwrap();
        assert_eq!(game.mode_kind(), ModeKind::Menu);
    }

    #[test]
    fn test_won_battle_removes_that_enemy() {
        let (mut game, id) = game(easy_data());
        game.update(0.016, &InputState::pressed(Button::Up)).unwrap();
        assert_eq!(game.mode_kind(), ModeKind::Battle);
        assert_eq!(game.stats().encounters, 1);

        let confirm = InputState::pressed(Button::Confirm);
        for _ in 0..10 {
            if game.mode_kind() != ModeKind::Battle {
                break;
            }
            game.update(0.5, &confirm).unwrap();
        }
        assert_eq!(game.mode_kind(), ModeKind::Exploration);
        assert!(game.exploration().enemies().iter().all(|e| e.id != id));
        assert_eq!(game.stats().battles_won, 1);
        assert!(game.party().members.iter().all(|m| m.stats.level > 1));
    }

    #[test]
    fn test_fleeing_keeps_enemy() {
        let (mut game, id) = game(ReferenceData::default());
        game.update(0.016, &InputState::pressed(Button::Up)).unwrap();
        assert_eq!(game.mode_kind(), ModeKind::Battle);

        game.update(0.5, &InputState::pressed(Button::Up)).unwrap();
        game.update(0.5, &InputState::pressed(Button::Confirm)).unwrap();
        assert_eq!(game.mode_kind(), ModeKind::Exploration);
        assert_eq!(game.exploration().enemies()[0].id, id);
        assert_eq!(game.stats().battles_fled, 1);
        assert_eq!(game.exploration().player(), Position::new(3, 3));
    }

    #[test]
    fn test_chest_grants_item() {
        let (mut game, _) = game(ReferenceData::default());
        let before = game.inventory().quantity("potion");
        game.update(0.016, &InputState::pressed(Button::Left)).unwrap();
        assert_eq!(game.inventory().quantity("potion"), before + 1);
        assert_eq!(game.stats().chests_opened, 1);
        assert_eq!(game.mode_kind(), ModeKind::Exploration);
    }

    #[test]
    fn test_battle_render_and_negative_delta() {
        let (mut game, _) = game(ReferenceData::default());
        game.update(-3.0, &InputState::pressed(Button::Up)).unwrap();
        assert_eq!(game.mode_kind(), ModeKind::Battle);
        let mut recorder = Recorder::default();
        game.render(&mut recorder);
        assert_eq!(recorder.calls, vec!["battle"]);
        assert!(game.battle().is_some());
    }

    #[test]
    fn test_encounter_size_and_fresh_copies() {
        let data = ReferenceData::default();
        let mut rng = create_test_rng();
        for _ in 0..50 {
            let enemies = build_encounter(&data, "LION", &mut rng).unwrap();
            assert!((1..=1 + MAX_REINFORCEMENTS).contains(&enemies.len()));
            assert_eq!(enemies[0].type_key(), "LION");
            assert!(enemies.iter().all(|e| e.stats().hp == e.stats().max_hp));
        }
        assert!(build_encounter(&data, "DRAGON", &mut rng).is_err());
    }
}
