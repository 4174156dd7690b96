//! Headless playthrough.
//!
//! Drives the game with a scripted player: wander the map, fight every
//! encounter with FIGHT, confirm results. Prints what happened.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                    # 20000 ticks, random seed
//!   cargo run --bin simulate -- --seed 42      # Reproducible run
//!   cargo run --bin simulate -- --quiet        # Summary only, no log lines

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use riverlands::core::constants::FRAME_INTERVAL_MS;
use riverlands::core::GameConfig;
use riverlands::data::ReferenceData;
use riverlands::exploration::Direction;
use riverlands::input::{Button, InputState};
use riverlands::logging::{self, LogTarget};
use riverlands::scene::{Game, ModeKind};
use std::env;
use std::io;

const DEFAULT_TICKS: u64 = 20_000;
/// Ticks a wandering direction is held before a new one is picked.
const WANDER_STRIDE: u64 = 12;

struct SimOptions {
    seed: Option<u64>,
    ticks: u64,
    quiet: bool,
}

fn parse_args(args: &[String]) -> SimOptions {
    let mut options = SimOptions {
        seed: None,
        ticks: DEFAULT_TICKS,
        quiet: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    options.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-t" | "--ticks" => {
                if i + 1 < args.len() {
                    options.ticks = args[i + 1].parse().unwrap_or(DEFAULT_TICKS);
                    i += 1;
                }
            }
            "-q" | "--quiet" => options.quiet = true,
            "-h" | "--help" => {
                println!("Usage: simulate [--seed N] [--ticks N] [--quiet]");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                std::process::exit(1);
            }
        }
        i += 1;
    }
    options
}

fn button_for(direction: Direction) -> Button {
    match direction {
        Direction::Up => Button::Up,
        Direction::Down => Button::Down,
        Direction::Left => Button::Left,
        Direction::Right => Button::Right,
    }
}

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();
    let options = parse_args(&args);

    if !options.quiet {
        logging::init(LogTarget::Stderr)?;
    }

    let seed = options.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let config = GameConfig {
        seed: Some(seed),
        ..GameConfig::default()
    };
    let mut game = Game::new(
        &config,
        ReferenceData::default(),
        StdRng::seed_from_u64(seed),
    )
    .map_err(io::Error::other)?;
    // Separate stream so the player's choices don't shift the game's rolls.
    let mut policy_rng = StdRng::seed_from_u64(seed.wrapping_add(1));

    let delta_time = FRAME_INTERVAL_MS as f64 / 1000.0;
    let mut direction = Direction::Right;
    let mut ticks_run = 0;

    for tick in 0..options.ticks {
        if !game.party().any_alive() {
            break;
        }
        let input = match game.mode_kind() {
            ModeKind::Exploration => {
                if tick % WANDER_STRIDE == 0 {
                    direction = Direction::ALL[policy_rng.gen_range(0..Direction::ALL.len())];
                }
                InputState::pressed(button_for(direction))
            }
            ModeKind::Battle => InputState::pressed(Button::Confirm),
            ModeKind::Menu => InputState::pressed(Button::ToggleMenu),
        };
        game.update(delta_time, &input).map_err(io::Error::other)?;
        ticks_run = tick + 1;
    }

    let stats = game.stats();
    println!("Riverlands simulation");
    println!("  Seed:            {}", seed);
    println!("  Ticks:           {}", ticks_run);
    println!("  Encounters:      {}", stats.encounters);
    println!("  Battles won:     {}", stats.battles_won);
    println!("  Battles fled:    {}", stats.battles_fled);
    println!("  Battles lost:    {}", stats.battles_lost);
    println!("  Chests opened:   {}", stats.chests_opened);
    println!(
        "  Enemies left:    {}",
        game.exploration().enemies().len()
    );
    println!();
    println!("Party:");
    for member in &game.party().members {
        let s = &member.stats;
        println!(
            "  {:<8} Lv.{:<3} HP {:>4}/{:<4} MP {:>3}/{:<3} Exp {}",
            member.name, s.level, s.hp, s.max_hp, s.mp, s.max_mp, s.exp
        );
    }
    Ok(())
}
