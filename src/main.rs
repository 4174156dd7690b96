use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::{backend::CrosstermBackend, Terminal};
use riverlands::core::constants::{FRAME_INTERVAL_MS, MAX_FRAME_DELTA_SECONDS};
use riverlands::core::GameConfig;
use riverlands::data::ReferenceData;
use riverlands::input::{is_quit_key, KeyHold};
use riverlands::logging::{self, LogTarget};
use riverlands::scene::Game;
use riverlands::ui::TerminalRenderer;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{error, info};

#[derive(Debug, Default)]
struct CliOptions {
    seed: Option<u64>,
    config_path: Option<PathBuf>,
    data_path: Option<PathBuf>,
}

fn print_help() {
    println!("Riverlands - terminal exploration RPG\n");
    println!("Usage: riverlands [options]\n");
    println!("Options:");
    println!("  --seed N       Seed the world and every roll");
    println!("  --config FILE  World settings (JSON)");
    println!("  --data FILE    Party, enemy, spell and item tables (JSON)");
    println!("  --version      Show version information");
    println!("  --help         Show this help message");
    println!("\nControls: arrows/WASD move, Enter/Space confirm, M/Esc menu, Q quit");
}

fn parse_args(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" if i + 1 < args.len() => {
                i += 1;
                match args[i].parse() {
                    Ok(seed) => options.seed = Some(seed),
                    Err(_) => {
                        eprintln!("Invalid seed: {}", args[i]);
                        std::process::exit(1);
                    }
                }
            }
            "--config" if i + 1 < args.len() => {
                i += 1;
                options.config_path = Some(PathBuf::from(&args[i]));
            }
            "--data" if i + 1 < args.len() => {
                i += 1;
                options.data_path = Some(PathBuf::from(&args[i]));
            }
            "--version" | "-v" => {
                println!("riverlands {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'riverlands --help' for usage.");
                std::process::exit(1);
            }
        }
        i += 1;
    }
    options
}

fn load_config(options: &CliOptions) -> io::Result<GameConfig> {
    let mut config = match &options.config_path {
        Some(path) => GameConfig::from_json_str(&std::fs::read_to_string(path)?)
            .map_err(io::Error::other)?,
        None => GameConfig::default(),
    };
    if options.seed.is_some() {
        config.seed = options.seed;
    }
    Ok(config)
}

fn load_data(options: &CliOptions) -> io::Result<ReferenceData> {
    match &options.data_path {
        Some(path) => ReferenceData::from_json_str(&std::fs::read_to_string(path)?)
            .map_err(io::Error::other),
        None => Ok(ReferenceData::default()),
    }
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    let config = load_config(&options)?;
    let data = load_data(&options)?;

    let log_path = logging::default_log_path();
    if let Err(e) = logging::init(LogTarget::File(log_path.clone())) {
        eprintln!("Warning: could not open log at {}: {}", log_path.display(), e);
    }

    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(seed, "starting riverlands");
    let mut game = Game::new(&config, data, StdRng::seed_from_u64(seed)).map_err(|e| {
        error!(error = %e, "world setup failed");
        io::Error::other(e)
    })?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_game_loop(&mut terminal, &mut game);

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Fixed cadence loop: draw, collect keys until the next frame is due,
/// then advance the game by the real time that passed.
fn run_game_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut Game<StdRng>,
) -> io::Result<()> {
    let frame_interval = Duration::from_millis(FRAME_INTERVAL_MS);
    let mut hold = KeyHold::new();
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|frame| {
            let mut renderer = TerminalRenderer::new(frame);
            game.render(&mut renderer);
        })?;

        let deadline = last_frame + frame_interval;
        while let Some(timeout) = deadline.checked_duration_since(Instant::now()) {
            if !event::poll(timeout)? {
                break;
            }
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && is_quit_key(&key) {
                    info!("quit requested");
                    return Ok(());
                }
                hold.handle_key(&key, Instant::now());
            }
        }

        let now = Instant::now();
        let delta_time = now
            .duration_since(last_frame)
            .as_secs_f64()
            .min(MAX_FRAME_DELTA_SECONDS);
        last_frame = now;

        if let Err(e) = game.update(delta_time, &hold.snapshot(now)) {
            error!(error = %e, "game update failed");
            return Err(io::Error::other(e));
        }
    }
}
