//! Integration test: battle flow
//!
//! Runs whole battles against the built-in tables: encounter building,
//! the turn cycle, victory rewards and the level-up cascade.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use riverlands::battle::{BattleEngine, BattleOutcome, BattleState};
use riverlands::data::{Party, ReferenceData};
use riverlands::input::{Button, InputState};
use riverlands::progression::{apply_experience, xp_for_next_level};
use riverlands::scene::build_encounter;

const STEP: f64 = 0.5;

fn create_test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(12345)
}

/// Holds confirm (FIGHT) until the battle reports an outcome.
fn fight_to_the_end(
    engine: &mut BattleEngine,
    party: &mut Party,
    data: &ReferenceData,
    rng: &mut ChaCha8Rng,
) -> BattleOutcome {
    let confirm = InputState::pressed(Button::Confirm);
    for _ in 0..10_000 {
        if let Some(outcome) = engine
            .update(party, &data.spells, STEP, &confirm, rng)
            .unwrap()
        {
            return outcome;
        }
    }
    panic!("battle never ended");
}

#[test]
fn test_default_party_beats_a_slime() {
    let data = ReferenceData::default();
    let mut party = Party::new(data.party.clone());
    let mut rng = create_test_rng();
    let enemies = vec![data.spawn_enemy("SLIME").unwrap()];

    let mut engine = BattleEngine::new(enemies, &party);
    let outcome = fight_to_the_end(&mut engine, &mut party, &data, &mut rng);

    assert_eq!(outcome, BattleOutcome { won: true });
    // 500 XP from level 1: 100 to reach level 2, 200 more to reach level 3.
    for member in party.members.iter().filter(|m| m.is_alive()) {
        assert_eq!((member.stats.level, member.stats.exp), (3, 200));
    }
    // Nothing more comes out of a finished battle.
    let again = engine
        .update(&mut party, &data.spells, STEP, &InputState::pressed(Button::Confirm), &mut rng)
        .unwrap();
    assert_eq!(again, None);
}

#[test]
fn test_templates_untouched_by_battle() {
    let data = ReferenceData::default();
    let before = data.clone();
    let mut party = Party::new(data.party.clone());
    let mut rng = create_test_rng();
    let enemies = build_encounter(&data, "DOG", &mut rng).unwrap();
    let mut engine = BattleEngine::new(enemies, &party);
    fight_to_the_end(&mut engine, &mut party, &data, &mut rng);
    assert_eq!(data, before);
}

#[test]
fn test_hopeless_battle_ends_in_defeat() {
    let mut data = ReferenceData::default();
    if let Some(tiger) = data.enemies.get_mut("TIGER") {
        tiger.stats.max_hp = 60_000;
        tiger.stats.strength = 500;
    }
    let mut party = Party::new(data.party.clone());
    let mut rng = create_test_rng();
    let mut engine = BattleEngine::new(vec![data.spawn_enemy("TIGER").unwrap()], &party);

    let outcome = fight_to_the_end(&mut engine, &mut party, &data, &mut rng);
    assert_eq!(outcome, BattleOutcome { won: false });
    assert_eq!(engine.state(), BattleState::Defeat);
    assert!(!party.any_alive());
}

#[test]
fn test_level_up_cascade_arithmetic() {
    let data = ReferenceData::default();
    let stats = data.party[0].stats;
    let mut rng = create_test_rng();

    let partial = apply_experience(&stats, 250, &mut rng);
    assert_eq!((partial.stats.level, partial.stats.exp), (2, 150));

    let double = apply_experience(&stats, 300, &mut rng);
    assert_eq!((double.stats.level, double.stats.exp), (3, 0));
    assert_eq!(double.levels_gained(), 2);
    assert!(double.stats.exp < xp_for_next_level(double.stats.level));
}
