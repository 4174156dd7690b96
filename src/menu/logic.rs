//! Pause menu navigation.
//!
//! The menu only browses: party, spell and inventory data come in by shared
//! reference on every tick and nothing here writes to them.

use super::types::*;
use crate::core::constants::*;
use crate::data::{spells_for_level, Inventory, MagicSpell, Party};
use crate::input::InputState;
use tracing::debug;

/// Moves a cursor by one step in either direction, wrapping within `len`.
fn wrap_step(cursor: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (cursor + 1) % len
    } else {
        (cursor + len - 1) % len
    }
}

#[derive(Debug, Clone)]
pub struct MenuModel {
    state: MenuState,
    main_cursor: usize,
    member_cursor: usize,
    spell_cursor: usize,
    item_cursor: usize,
    input_cooldown: f64,
    closed: bool,
}

impl Default for MenuModel {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuModel {
    /// A freshly opened menu on the main screen. Input is held off briefly
    /// so the key that opened it is not read as "back".
    pub fn new() -> Self {
        Self {
            state: MenuState::Main,
            main_cursor: 0,
            member_cursor: 0,
            spell_cursor: 0,
            item_cursor: 0,
            input_cooldown: MENU_OPEN_COOLDOWN_SECONDS,
            closed: false,
        }
    }

    /// Handles at most one input per tick, in priority confirm, back, up,
    /// down. Returns [`MenuEvent::Close`] once when the player leaves.
    pub fn update(
        &mut self,
        delta_time: f64,
        input: &InputState,
        party: &Party,
        spells: &[MagicSpell],
        inventory: &Inventory,
    ) -> Option<MenuEvent> {
        if self.closed {
            return None;
        }
        self.input_cooldown = (self.input_cooldown - delta_time.max(0.0)).max(0.0);
        if self.input_cooldown > 0.0 {
            return None;
        }

        if input.confirm {
            self.input_cooldown = MENU_CONFIRM_COOLDOWN_SECONDS;
            self.confirm()
        } else if input.toggle_menu {
            self.input_cooldown = MENU_CONFIRM_COOLDOWN_SECONDS;
            self.back()
        } else if input.up || input.down {
            self.input_cooldown = MENU_NAV_COOLDOWN_SECONDS;
            self.navigate(input.down, party, spells, inventory);
            None
        } else {
            None
        }
    }

    fn confirm(&mut self) -> Option<MenuEvent> {
        match self.state {
            MenuState::Main => match self.main_option() {
                MainOption::Status => self.state = MenuState::Status,
                MainOption::Magic => {
                    self.state = MenuState::MagicSelectChar;
                    self.member_cursor = 0;
                }
                MainOption::Inventory => {
                    self.state = MenuState::Inventory;
                    self.item_cursor = 0;
                }
                MainOption::Exit => return self.close(),
            },
            MenuState::MagicSelectChar => {
                self.state = MenuState::MagicList;
                self.spell_cursor = 0;
            }
            MenuState::MagicList => self.state = MenuState::MagicSelectChar,
            MenuState::Status | MenuState::Inventory => self.state = MenuState::Main,
        }
        debug!(state = ?self.state, "menu confirm");
        None
    }

    fn back(&mut self) -> Option<MenuEvent> {
        match self.state {
            MenuState::Main => return self.close(),
            MenuState::MagicList => self.state = MenuState::MagicSelectChar,
            _ => self.state = MenuState::Main,
        }
        None
    }

    fn close(&mut self) -> Option<MenuEvent> {
        self.closed = true;
        debug!("menu closed");
        Some(MenuEvent::Close)
    }

    fn navigate(&mut self, forward: bool, party: &Party, spells: &[MagicSpell], inventory: &Inventory) {
        match self.state {
            MenuState::Main => {
                self.main_cursor = wrap_step(self.main_cursor, MainOption::ALL.len(), forward)
            }
            MenuState::MagicSelectChar => {
                self.member_cursor = wrap_step(self.member_cursor, party.len(), forward)
            }
            MenuState::MagicList => {
                let known = self.known_spells(party, spells).len();
                self.spell_cursor = wrap_step(self.spell_cursor, known, forward);
            }
            MenuState::Inventory => {
                self.item_cursor = wrap_step(self.item_cursor, inventory.entries().len(), forward)
            }
            MenuState::Status => {}
        }
    }

    /// Spells the member under the cursor knows, in table order.
    pub fn known_spells<'s>(&self, party: &Party, spells: &'s [MagicSpell]) -> Vec<&'s MagicSpell> {
        party
            .get(self.member_cursor)
            .map(|member| spells_for_level(spells, member.stats.level))
            .unwrap_or_default()
    }

    pub fn main_option(&self) -> MainOption {
        MainOption::ALL[self.main_cursor % MainOption::ALL.len()]
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn main_cursor(&self) -> usize {
        self.main_cursor
    }

    pub fn member_cursor(&self) -> usize {
        self.member_cursor
    }

    pub fn spell_cursor(&self) -> usize {
        self.spell_cursor
    }

    pub fn item_cursor(&self) -> usize {
        self.item_cursor
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
