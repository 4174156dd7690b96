// Frame driver
pub const FRAME_INTERVAL_MS: u64 = 33;
pub const MAX_FRAME_DELTA_SECONDS: f64 = 0.25;

// Exploration timing
pub const MOVE_DELAY_SECONDS: f64 = 0.2;
pub const CHEST_PAUSE_SECONDS: f64 = 0.5;

// Battle timing
pub const ENEMY_TURN_DELAY_SECONDS: f64 = 1.0;
pub const BATTLE_NAV_COOLDOWN_SECONDS: f64 = 0.2;
pub const BATTLE_CONFIRM_COOLDOWN_SECONDS: f64 = 0.3;
pub const SPELL_CONFIRM_COOLDOWN_SECONDS: f64 = 0.5;
pub const BATTLE_CANCEL_COOLDOWN_SECONDS: f64 = 0.2;

// Menu timing
pub const MENU_CONFIRM_COOLDOWN_SECONDS: f64 = 0.2;
pub const MENU_NAV_COOLDOWN_SECONDS: f64 = 0.15;
pub const MENU_OPEN_COOLDOWN_SECONDS: f64 = 0.2;

// Map defaults (30x30 world, river through the middle)
pub const DEFAULT_MAP_WIDTH: usize = 30;
pub const DEFAULT_MAP_HEIGHT: usize = 30;
pub const DEFAULT_BRIDGE_COLUMN: usize = 10;
pub const DEFAULT_PLAYER_START: (usize, usize) = (5, 5);
pub const MIN_MAP_WIDTH: usize = 3;
pub const MIN_MAP_HEIGHT: usize = 5;

// Terrain draw thresholds (cumulative order: mountain, forest, water, rest grass)
pub const MOUNTAIN_CHANCE: f64 = 0.05;
pub const FOREST_CHANCE: f64 = 0.10;
pub const WATER_CHANCE: f64 = 0.03;

// Spawning
pub const DEFAULT_ENEMY_COUNT: usize = 20;
pub const DEFAULT_CHEST_COUNT: usize = 5;
pub const DEFAULT_CHEST_ITEM: &str = "potion";
pub const MAX_SPAWN_ATTEMPTS: u32 = 1_000;

// Encounters
pub const MAX_REINFORCEMENTS: usize = 2;

// Progression
pub const XP_PER_LEVEL: u32 = 100;
pub const MAX_LEVEL: u32 = 99;
pub const STAT_GROWTH_MIN: u32 = 1;
pub const STAT_GROWTH_MAX: u32 = 5;
pub const POOL_GROWTH_MIN: u32 = 10;
pub const POOL_GROWTH_MAX: u32 = 20;

// Battle log
pub const BATTLE_LOG_CAPACITY: usize = 5;

// Logging
pub const LOG_ENV_VAR: &str = "RIVERLANDS_LOG";
pub const LOG_FILE_NAME: &str = "riverlands.log";
