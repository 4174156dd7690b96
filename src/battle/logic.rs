//! Turn-based battle engine.
//!
//! The engine owns the encounter's enemies and borrows the party every tick,
//! so damage, MP costs and level-ups land directly on the persistent roster.
//! Party members act in roster order, skipping the fallen, then a single
//! enemy turn follows after a fixed delay.

use super::types::*;
use crate::core::constants::*;
use crate::core::error::{GameError, Result};
use crate::data::{spells_for_level, Character, Enemy, MagicSpell, Party};
use crate::input::InputState;
use crate::progression::apply_experience;
use rand::Rng;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct BattleEngine {
    enemies: Vec<Enemy>,
    state: BattleState,
    selected_option: usize,
    selected_spell: usize,
    /// Spells of the acting member, captured when the magic menu opens.
    available_spells: Vec<MagicSpell>,
    actor: usize,
    turn_timer: f64,
    input_cooldown: f64,
    log: BattleLog,
    finished: bool,
}

impl BattleEngine {
    /// Starts a battle against `enemies`. The party is only inspected to
    /// pick the first actor; with nobody standing the battle opens in defeat.
    pub fn new(enemies: Vec<Enemy>, party: &Party) -> Self {
        let (state, actor) = match party.next_living_from(0) {
            Some(actor) => (BattleState::PlayerTurn, actor),
            None => (BattleState::Defeat, 0),
        };
        Self {
            enemies,
            state,
            selected_option: 0,
            selected_spell: 0,
            available_spells: Vec::new(),
            actor,
            turn_timer: 0.0,
            input_cooldown: 0.0,
            log: BattleLog::default(),
            finished: false,
        }
    }

    /// Advances the battle by `delta_time` seconds.
    ///
    /// Returns the outcome on the tick the battle ends and `None` on every
    /// other tick, including all ticks after the end.
    pub fn update(
        &mut self,
        party: &mut Party,
        spells: &[MagicSpell],
        delta_time: f64,
        input: &InputState,
        rng: &mut impl Rng,
    ) -> Result<Option<BattleOutcome>> {
        if self.finished {
            return Ok(None);
        }
        let delta_time = delta_time.max(0.0);
        self.input_cooldown = (self.input_cooldown - delta_time).max(0.0);

        if self.state.is_terminal() {
            if self.input_cooldown > 0.0 || !input.confirm {
                return Ok(None);
            }
            let won = self.state == BattleState::Victory;
            return Ok(Some(self.finish(won)));
        }

        match self.state {
            BattleState::Victory | BattleState::Defeat => Ok(None),
            BattleState::EnemyTurn => {
                self.turn_timer += delta_time;
                if self.turn_timer >= ENEMY_TURN_DELAY_SECONDS {
                    self.turn_timer = 0.0;
                    self.enemy_attack(party, rng)?;
                }
                Ok(None)
            }
            BattleState::PlayerTurn => self.handle_command_input(party, spells, input, rng),
            BattleState::MagicMenu => {
                self.handle_magic_input(party, input, rng)?;
                Ok(None)
            }
        }
    }

    fn handle_command_input(
        &mut self,
        party: &mut Party,
        spells: &[MagicSpell],
        input: &InputState,
        rng: &mut impl Rng,
    ) -> Result<Option<BattleOutcome>> {
        if self.input_cooldown > 0.0 {
            return Ok(None);
        }
        let count = MenuOption::ALL.len();

        if input.down {
            self.selected_option = (self.selected_option + 1) % count;
            self.input_cooldown = BATTLE_NAV_COOLDOWN_SECONDS;
        } else if input.up {
            self.selected_option = (self.selected_option + count - 1) % count;
            self.input_cooldown = BATTLE_NAV_COOLDOWN_SECONDS;
        } else if input.confirm {
            self.input_cooldown = BATTLE_CONFIRM_COOLDOWN_SECONDS;
            match self.selected() {
                MenuOption::Fight => {
                    let damage = self.actor(party)?.stats.strength;
                    self.deal_damage(party, damage, rng)?;
                }
                MenuOption::Magic => self.open_magic_menu(party, spells)?,
                MenuOption::Item => {
                    warn!("item command refused in battle");
                    self.log.push("Items are not usable in battle.");
                }
                MenuOption::Run => {
                    info!("party ran from battle");
                    return Ok(Some(self.finish(false)));
                }
            }
        }
        Ok(None)
    }

    fn open_magic_menu(&mut self, party: &Party, spells: &[MagicSpell]) -> Result<()> {
        let level = self.actor(party)?.stats.level;
        self.available_spells = spells_for_level(spells, level)
            .into_iter()
            .cloned()
            .collect();
        if self.available_spells.is_empty() {
            warn!(level, "no spells known");
            self.log.push("No magic available!");
        } else {
            self.state = BattleState::MagicMenu;
            self.selected_spell = 0;
        }
        Ok(())
    }

    fn handle_magic_input(
        &mut self,
        party: &mut Party,
        input: &InputState,
        rng: &mut impl Rng,
    ) -> Result<()> {
        if self.input_cooldown > 0.0 {
            return Ok(());
        }
        let count = self.available_spells.len();

        if input.toggle_menu || count == 0 {
            self.state = BattleState::PlayerTurn;
            self.input_cooldown = BATTLE_CANCEL_COOLDOWN_SECONDS;
        } else if input.down {
            self.selected_spell = (self.selected_spell + 1) % count;
            self.input_cooldown = BATTLE_NAV_COOLDOWN_SECONDS;
        } else if input.up {
            self.selected_spell = (self.selected_spell + count - 1) % count;
            self.input_cooldown = BATTLE_NAV_COOLDOWN_SECONDS;
        } else if input.confirm {
            self.input_cooldown = SPELL_CONFIRM_COOLDOWN_SECONDS;
            let spell = self.available_spells[self.selected_spell % count].clone();
            self.cast_spell(party, &spell, rng)?;
        }
        Ok(())
    }

    fn cast_spell(&mut self, party: &mut Party, spell: &MagicSpell, rng: &mut impl Rng) -> Result<()> {
        let caster = self.actor_mut(party)?;
        if !caster.stats.spend_mp(spell.mp_cost) {
            warn!(spell = %spell.id, mp = caster.stats.mp, "not enough mp");
            self.log.push("Not enough MP!");
            self.state = BattleState::PlayerTurn;
            return Ok(());
        }
        let message = format!("{} casts {}!", caster.name, spell.name);
        self.log.push(message);
        self.deal_damage(party, spell.power, rng)
    }

    /// Hits the first enemy still standing, then either wins the battle or
    /// passes the turn on.
    fn deal_damage(&mut self, party: &mut Party, amount: u32, rng: &mut impl Rng) -> Result<()> {
        if let Some(target) = self.enemies.iter_mut().find(|e| e.is_alive()) {
            target.take_damage(amount);
            debug!(target = %target.name(), amount, hp = target.stats().hp, "enemy hit");
        }
        self.log.push(format!("Dealt {} damage!", amount));

        if self.enemies.iter().all(|e| !e.is_alive()) {
            self.resolve_victory(party, rng);
        } else {
            self.advance_turn(party);
        }
        Ok(())
    }

    fn advance_turn(&mut self, party: &Party) {
        let next = (self.actor + 1..party.len()).find(|&i| party.members[i].is_alive());
        match next {
            Some(index) => {
                self.actor = index;
                self.state = BattleState::PlayerTurn;
                debug!(actor = index, "next party member");
            }
            None => {
                self.actor = 0;
                self.turn_timer = 0.0;
                self.state = BattleState::EnemyTurn;
                debug!("enemy turn");
            }
        }
    }

    fn enemy_attack(&mut self, party: &mut Party, rng: &mut impl Rng) -> Result<()> {
        let living = party.living_indices();
        if living.is_empty() {
            self.enter_defeat();
            return Ok(());
        }
        let Some(attacker) = self.enemies.iter().find(|e| e.is_alive()) else {
            return Ok(());
        };
        let damage = attacker.stats().strength;

        let target_index = living[rng.gen_range(0..living.len())];
        let len = party.len();
        let target = party
            .get_mut(target_index)
            .ok_or(GameError::ActorOutOfRange {
                index: target_index,
                len,
            })?;
        target.stats.take_damage(damage);
        debug!(target = %target.name, damage, hp = target.stats.hp, "party member hit");
        self.log
            .push(format!("Enemy attacked {} for {}!", target.name, damage));
        if !target.is_alive() {
            self.log.push(format!("{} fell!", target.name));
        }

        match party.next_living_from(self.actor) {
            Some(index) => {
                self.actor = index;
                self.state = BattleState::PlayerTurn;
            }
            None => self.enter_defeat(),
        }
        Ok(())
    }

    fn enter_defeat(&mut self) {
        info!("party defeated");
        self.state = BattleState::Defeat;
        self.input_cooldown = BATTLE_CONFIRM_COOLDOWN_SECONDS;
    }

    /// Every living member receives the full XP total of the encounter.
    fn resolve_victory(&mut self, party: &mut Party, rng: &mut impl Rng) {
        self.state = BattleState::Victory;
        let total_xp: u32 = self.enemies.iter().map(|e| e.xp_reward()).sum();
        info!(xp = total_xp, enemies = self.enemies.len(), "victory");
        self.log.push(format!("Victory! Gained {} XP.", total_xp));

        for member in party.members.iter_mut().filter(|m| m.is_alive()) {
            let progression = apply_experience(&member.stats, total_xp, rng);
            for growth in &progression.growths {
                info!(member = %member.name, level = growth.new_level, "level up");
                self.log
                    .push(format!("{} grew to Level {}!", member.name, growth.new_level));
                self.log.push(growth.summary());
            }
            member.stats = progression.stats;
        }
    }

    fn finish(&mut self, won: bool) -> BattleOutcome {
        self.finished = true;
        info!(won, "battle finished");
        BattleOutcome { won }
    }

    fn actor<'p>(&self, party: &'p Party) -> Result<&'p Character> {
        party.get(self.actor).ok_or(GameError::ActorOutOfRange {
            index: self.actor,
            len: party.len(),
        })
    }

    fn actor_mut<'p>(&self, party: &'p mut Party) -> Result<&'p mut Character> {
        let len = party.len();
        party.get_mut(self.actor).ok_or(GameError::ActorOutOfRange {
            index: self.actor,
            len,
        })
    }

    pub fn selected(&self) -> MenuOption {
        MenuOption::ALL[self.selected_option % MenuOption::ALL.len()]
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn actor_index(&self) -> usize {
        self.actor
    }

    pub fn available_spells(&self) -> &[MagicSpell] {
        &self.available_spells
    }

    pub fn selected_spell(&self) -> usize {
        self.selected_spell
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Element, EnemyTemplate, StatBlock};
    use crate::input::Button;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Long enough to clear every input cooldown, short of the enemy delay.
    const STEP: f64 = 0.5;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn stats(hp: u32, mp: u32, strength: u32, level: u32) -> StatBlock {
        StatBlock {
            hp,
            max_hp: hp.max(1),
            mp,
            max_mp: mp.max(1),
            strength,
            defense: 1,
            speed: 1,
            level,
            exp: 0,
        }
    }

    fn hero(name: &str, hp: u32, mp: u32, strength: u32) -> Character {
        Character {
            id: name.to_lowercase(),
            name: name.to_string(),
            stats: stats(hp, mp, strength, 1),
            sprite_color: "white".to_string(),
        }
    }

    fn foe(name: &str, hp: u32, strength: u32, xp_reward: u32) -> Enemy {
        let template = EnemyTemplate {
            id: name.to_lowercase(),
            name: name.to_string(),
            stats: stats(hp, 0, strength, 1),
            sprite_color: "green".to_string(),
            xp_reward,
        };
        Enemy::from_template(&name.to_uppercase(), &template)
    }

    fn fire(mp_cost: u32, power: u32, required_level: u32) -> MagicSpell {
        MagicSpell {
            id: "fire_1".to_string(),
            name: "Fire".to_string(),
            mp_cost,
            power,
            element: Element::Fire,
            required_level,
        }
    }

    struct Fixture {
        engine: BattleEngine,
        party: Party,
        spells: Vec<MagicSpell>,
        rng: ChaCha8Rng,
    }

    impl Fixture {
        fn new(members: Vec<Character>, enemies: Vec<Enemy>, spells: Vec<MagicSpell>) -> Self {
            let party = Party::new(members);
            Self {
                engine: BattleEngine::new(enemies, &party),
                party,
                spells,
                rng: create_test_rng(),
            }
        }

        fn tick(&mut self, dt: f64, input: InputState) -> Result<Option<BattleOutcome>> {
            self.engine
                .update(&mut self.party, &self.spells, dt, &input, &mut self.rng)
        }

        fn press(&mut self, button: Button) -> Option<BattleOutcome> {
            self.tick(STEP, InputState::pressed(button)).unwrap()
        }

        fn idle(&mut self, dt: f64) -> Option<BattleOutcome> {
            self.tick(dt, InputState::none()).unwrap()
        }
    }

    #[test]
    fn test_lethal_fight_wins_and_shares_xp() {
        let mut f = Fixture::new(
            vec![hero("Ann", 50, 0, 30), hero("Bo", 0, 0, 5), hero("Cy", 40, 0, 5)],
            vec![foe("Slime", 20, 3, 60)],
            vec![],
        );
        assert_eq!(f.engine.state(), BattleState::PlayerTurn);
        assert_eq!(f.press(Button::Confirm), None);

        assert_eq!(f.engine.state(), BattleState::Victory);
        assert!(f.engine.log().contains("Dealt 30 damage!"));
        assert!(f.engine.log().contains("Victory! Gained 60 XP."));
        assert_eq!(f.party.members[0].stats.exp, 60);
        assert_eq!(f.party.members[1].stats.exp, 0);
        assert_eq!(f.party.members[2].stats.exp, 60);

        assert_eq!(f.press(Button::Confirm), Some(BattleOutcome { won: true }));
        assert_eq!(f.press(Button::Confirm), None);
        assert!(f.engine.is_finished());
    }

    #[test]
    fn test_victory_needs_every_enemy_down() {
        let mut f = Fixture::new(
            vec![hero("Ann", 50, 0, 10), hero("Bo", 50, 0, 10)],
            vec![foe("Slime", 10, 1, 20), foe("Bat", 5, 1, 15)],
            vec![],
        );
        f.press(Button::Confirm);
        assert!(!f.engine.enemies()[0].is_alive());
        assert_eq!(f.engine.state(), BattleState::PlayerTurn);
        assert_eq!(f.engine.actor_index(), 1);

        // Second strike goes to the first enemy still standing.
        f.press(Button::Confirm);
        assert!(!f.engine.enemies()[1].is_alive());
        assert_eq!(f.engine.state(), BattleState::Victory);
        assert!(f.engine.log().contains("Victory! Gained 35 XP."));
    }

    #[test]
    fn test_fallen_members_are_skipped() {
        let mut f = Fixture::new(
            vec![hero("Ann", 50, 0, 1), hero("Bo", 0, 0, 1), hero("Cy", 50, 0, 1)],
            vec![foe("Slime", 100, 1, 5)],
            vec![],
        );
        f.press(Button::Confirm);
        assert_eq!(f.engine.actor_index(), 2);
        f.press(Button::Confirm);
        assert_eq!(f.engine.state(), BattleState::EnemyTurn);
    }

    #[test]
    fn test_enemy_turn_waits_for_delay() {
        let mut f = Fixture::new(
            vec![hero("Ann", 50, 0, 1)],
            vec![foe("Slime", 100, 7, 5)],
            vec![],
        );
        f.press(Button::Confirm);
        assert_eq!(f.engine.state(), BattleState::EnemyTurn);

        f.idle(0.6);
        assert_eq!(f.party.members[0].stats.hp, 50);
        f.idle(0.6);
        assert_eq!(f.party.members[0].stats.hp, 43);
        assert!(f.engine.log().contains("Enemy attacked Ann for 7!"));
        assert_eq!(f.engine.state(), BattleState::PlayerTurn);
        assert_eq!(f.engine.actor_index(), 0);
    }

    #[test]
    fn test_full_party_defeat() {
        let mut f = Fixture::new(
            vec![hero("Ann", 5, 0, 1)],
            vec![foe("Tiger", 100, 30, 5)],
            vec![],
        );
        f.press(Button::Confirm);
        f.idle(ENEMY_TURN_DELAY_SECONDS);
        assert_eq!(f.engine.state(), BattleState::Defeat);
        assert!(f.engine.log().contains("Ann fell!"));
        assert_eq!(f.party.members[0].stats.hp, 0);

        // Confirm held through the defeat is not read straight away.
        assert_eq!(f.tick(0.0, InputState::pressed(Button::Confirm)).unwrap(), None);
        assert_eq!(f.press(Button::Confirm), Some(BattleOutcome { won: false }));
        assert_eq!(f.press(Button::Confirm), None);
    }

    #[test]
    fn test_run_reports_loss_once() {
        let mut f = Fixture::new(
            vec![hero("Ann", 50, 0, 1)],
            vec![foe("Slime", 100, 1, 5)],
            vec![],
        );
        f.press(Button::Up);
        assert_eq!(f.engine.selected(), MenuOption::Run);
        assert_eq!(f.press(Button::Confirm), Some(BattleOutcome { won: false }));
        assert!(f.engine.is_finished());
        assert_eq!(f.press(Button::Confirm), None);
        assert_eq!(f.idle(5.0), None);
    }

    #[test]
    fn test_insufficient_mp_changes_nothing_else() {
        let mut f = Fixture::new(
            vec![hero("Ann", 50, 3, 1), hero("Bo", 50, 0, 1)],
            vec![foe("Slime", 100, 1, 5)],
            vec![fire(10, 25, 1)],
        );
        f.press(Button::Down);
        f.press(Button::Confirm);
        assert_eq!(f.engine.state(), BattleState::MagicMenu);

        f.press(Button::Confirm);
        assert_eq!(f.engine.state(), BattleState::PlayerTurn);
        assert_eq!(f.engine.log().latest(), Some("Not enough MP!"));
        assert_eq!(f.party.members[0].stats.mp, 3);
        assert_eq!(f.engine.enemies()[0].stats().hp, 100);
        assert_eq!(f.engine.actor_index(), 0);
    }

    #[test]
    fn test_spell_spends_mp_and_damages() {
        let mut f = Fixture::new(
            vec![hero("Ann", 50, 20, 1), hero("Bo", 50, 0, 1)],
            vec![foe("Slime", 100, 1, 5)],
            vec![fire(6, 25, 1)],
        );
        f.press(Button::Down);
        f.press(Button::Confirm);
        f.press(Button::Confirm);
        assert_eq!(f.party.members[0].stats.mp, 14);
        assert_eq!(f.engine.enemies()[0].stats().hp, 75);
        assert!(f.engine.log().contains("Ann casts Fire!"));
        assert!(f.engine.log().contains("Dealt 25 damage!"));
        assert_eq!(f.engine.actor_index(), 1);
    }

    #[test]
    fn test_no_magic_available() {
        let mut f = Fixture::new(
            vec![hero("Ann", 50, 20, 1)],
            vec![foe("Slime", 100, 1, 5)],
            vec![fire(6, 25, 5)],
        );
        f.press(Button::Down);
        f.press(Button::Confirm);
        assert_eq!(f.engine.state(), BattleState::PlayerTurn);
        assert_eq!(f.engine.log().latest(), Some("No magic available!"));
    }

    #[test]
    fn test_magic_menu_cancel() {
        let mut f = Fixture::new(
            vec![hero("Ann", 50, 20, 1)],
            vec![foe("Slime", 100, 1, 5)],
            vec![fire(6, 25, 1)],
        );
        f.press(Button::Down);
        f.press(Button::Confirm);
        assert_eq!(f.engine.available_spells().len(), 1);
        f.press(Button::ToggleMenu);
        assert_eq!(f.engine.state(), BattleState::PlayerTurn);
        assert_eq!(f.party.members[0].stats.mp, 20);
    }

    #[test]
    fn test_item_keeps_turn() {
        let mut f = Fixture::new(
            vec![hero("Ann", 50, 0, 1), hero("Bo", 50, 0, 1)],
            vec![foe("Slime", 100, 1, 5)],
            vec![],
        );
        f.press(Button::Down);
        f.press(Button::Down);
        assert_eq!(f.engine.selected(), MenuOption::Item);
        f.press(Button::Confirm);
        assert_eq!(f.engine.log().latest(), Some("Items are not usable in battle."));
        assert_eq!(f.engine.actor_index(), 0);
        assert_eq!(f.engine.state(), BattleState::PlayerTurn);
    }

    #[test]
    fn test_cooldown_ignores_rapid_input() {
        let mut f = Fixture::new(
            vec![hero("Ann", 50, 0, 1)],
            vec![foe("Slime", 100, 1, 5)],
            vec![],
        );
        f.tick(0.0, InputState::pressed(Button::Down)).unwrap();
        f.tick(0.1, InputState::pressed(Button::Down)).unwrap();
        assert_eq!(f.engine.selected(), MenuOption::Magic);
        f.tick(0.15, InputState::pressed(Button::Down)).unwrap();
        assert_eq!(f.engine.selected(), MenuOption::Item);
    }

    #[test]
    fn test_level_up_logged() {
        let mut f = Fixture::new(
            vec![hero("Ann", 50, 0, 30)],
            vec![foe("Lion", 10, 1, 100)],
            vec![],
        );
        f.press(Button::Confirm);
        assert_eq!(f.party.members[0].stats.level, 2);
        assert_eq!(f.party.members[0].stats.exp, 0);
        assert!(f.engine.log().contains("Ann grew to Level 2!"));
        assert!(f.engine.log().latest().unwrap().starts_with("HP+"));
    }

    #[test]
    fn test_enemy_targeting_deterministic() {
        let run = |seed: u64| {
            let members = vec![hero("Ann", 500, 0, 1), hero("Bo", 500, 0, 1), hero("Cy", 500, 0, 1)];
            let mut f = Fixture::new(members, vec![foe("Dog", 1_000, 5, 5)], vec![]);
            f.rng = ChaCha8Rng::seed_from_u64(seed);
            for _ in 0..5 {
                for _ in 0..3 {
                    f.press(Button::Confirm);
                }
                f.idle(ENEMY_TURN_DELAY_SECONDS);
            }
            f.party
                .members
                .iter()
                .map(|m| m.stats.hp)
                .collect::<Vec<_>>()
        };
        let first = run(7);
        assert_eq!(first, run(7));
        assert_eq!(first.iter().map(|hp| 500 - hp).sum::<u32>(), 25);
    }

    #[test]
    fn test_no_living_member_starts_in_defeat() {
        let f = Fixture::new(vec![hero("Ann", 0, 0, 1)], vec![foe("Slime", 10, 1, 5)], vec![]);
        assert_eq!(f.engine.state(), BattleState::Defeat);
    }

    #[test]
    fn test_actor_outside_roster_errors() {
        let mut f = Fixture::new(
            vec![hero("Ann", 50, 0, 1), hero("Bo", 50, 0, 1)],
            vec![foe("Slime", 100, 1, 5)],
            vec![],
        );
        f.press(Button::Confirm);
        assert_eq!(f.engine.actor_index(), 1);
        f.party.members.truncate(1);
        let err = f
            .tick(STEP, InputState::pressed(Button::Confirm))
            .unwrap_err();
        assert!(matches!(err, GameError::ActorOutOfRange { index: 1, len: 1 }));
    }
}
