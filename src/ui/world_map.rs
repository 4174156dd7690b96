//! Overworld map widget, scrolled so the player stays in view.

use crate::exploration::{ExplorationModel, Position, Terrain};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

/// Each map cell is two terminal columns wide so the grid looks square.
const CELL_WIDTH: u16 = 2;

mod symbols {
    pub const PLAYER: char = '@';
    pub const ENEMY: char = 'E';
    pub const CHEST: char = '$';
    pub const CHEST_OPEN: char = '_';
    pub const NPC: char = '&';
}

/// First map index to show on an axis so `focus` sits near the middle of a
/// `view` long window without scrolling past either edge.
pub fn viewport_origin(focus: usize, map_len: usize, view: usize) -> usize {
    if map_len <= view {
        return 0;
    }
    focus.saturating_sub(view / 2).min(map_len - view)
}

fn terrain_style(terrain: Terrain) -> Style {
    let color = match terrain {
        Terrain::Wall => Color::DarkGray,
        Terrain::Grass => Color::Green,
        Terrain::Water => Color::Blue,
        Terrain::Forest => Color::LightGreen,
        Terrain::Mountain => Color::Gray,
        Terrain::Bridge => Color::Yellow,
    };
    Style::default().fg(color)
}

pub struct WorldMapWidget<'a> {
    world: &'a ExplorationModel,
}

impl<'a> WorldMapWidget<'a> {
    pub fn new(world: &'a ExplorationModel) -> Self {
        Self { world }
    }

    fn cell_display(&self, pos: Position) -> (char, Style) {
        if pos == self.world.player() {
            return (
                symbols::PLAYER,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            );
        }
        if self.world.enemy_at(pos).is_some() {
            return (symbols::ENEMY, Style::default().fg(Color::Red));
        }
        if let Some(chest) = self.world.chest_at(pos) {
            let symbol = if chest.opened {
                symbols::CHEST_OPEN
            } else {
                symbols::CHEST
            };
            return (symbol, Style::default().fg(Color::Yellow));
        }
        if self.world.npc_at(pos).is_some() {
            return (symbols::NPC, Style::default().fg(Color::Cyan));
        }
        let terrain = self.world.map().get(pos).unwrap_or(Terrain::Wall);
        (terrain.icon(), terrain_style(terrain))
    }
}

impl Widget for WorldMapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let map = self.world.map();
        let view_cols = (area.width / CELL_WIDTH) as usize;
        let view_rows = area.height as usize;
        let player = self.world.player();
        let origin_x = viewport_origin(player.x, map.width, view_cols);
        let origin_y = viewport_origin(player.y, map.height, view_rows);

        for row in 0..view_rows.min(map.height) {
            for col in 0..view_cols.min(map.width) {
                let pos = Position::new(origin_x + col, origin_y + row);
                let (symbol, style) = self.cell_display(pos);
                let x = area.x + col as u16 * CELL_WIDTH;
                let y = area.y + row as u16;
                buf.get_mut(x, y).set_char(symbol).set_style(style);
            }
        }
    }
}
