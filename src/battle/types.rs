use crate::core::constants::BATTLE_LOG_CAPACITY;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleState {
    PlayerTurn,
    /// Spell list open for the acting member. Still part of the player turn.
    MagicMenu,
    EnemyTurn,
    Victory,
    Defeat,
}

impl BattleState {
    /// Victory and defeat only wait for a confirm.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BattleState::Victory | BattleState::Defeat)
    }

    pub fn is_player_turn(&self) -> bool {
        matches!(self, BattleState::PlayerTurn | BattleState::MagicMenu)
    }
}

/// Top-level battle commands, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Fight,
    Magic,
    Item,
    Run,
}

impl MenuOption {
    pub const ALL: [MenuOption; 4] = [
        MenuOption::Fight,
        MenuOption::Magic,
        MenuOption::Item,
        MenuOption::Run,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::Fight => "FIGHT",
            MenuOption::Magic => "MAGIC",
            MenuOption::Item => "ITEM",
            MenuOption::Run => "RUN",
        }
    }
}

/// Reported once when a battle ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleOutcome {
    /// False for both defeat and running away.
    pub won: bool,
}

/// Most recent battle messages, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl Default for BattleLog {
    fn default() -> Self {
        Self::with_capacity(BATTLE_LOG_CAPACITY)
    }
}

impl BattleLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.push_back(message.into());
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn contains(&self, message: &str) -> bool {
        self.entries.iter().any(|m| m == message)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
