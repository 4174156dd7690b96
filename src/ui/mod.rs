pub mod battle_scene;
pub mod menu_scene;
pub mod world_map;

use crate::battle::BattleEngine;
use crate::data::Party;
use crate::exploration::ExplorationModel;
use crate::menu::MenuModel;
use crate::scene::{MenuView, SceneRenderer};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, ListItem, Paragraph},
    Frame,
};
use world_map::WorldMapWidget;

/// Draws game scenes into one terminal frame.
pub struct TerminalRenderer<'a, 'f> {
    frame: &'a mut Frame<'f>,
}

impl<'a, 'f> TerminalRenderer<'a, 'f> {
    pub fn new(frame: &'a mut Frame<'f>) -> Self {
        Self { frame }
    }
}

impl SceneRenderer for TerminalRenderer<'_, '_> {
    fn draw_exploration(&mut self, exploration: &ExplorationModel, party: &Party) {
        let area = self.frame.size();
        render_exploration(self.frame, area, exploration, party);
    }

    fn draw_battle(&mut self, battle: &BattleEngine, party: &Party) {
        let area = self.frame.size();
        battle_scene::render_battle_scene(self.frame, area, battle, party);
    }

    fn draw_menu(&mut self, menu: &MenuModel, view: &MenuView<'_>) {
        let area = self.frame.size();
        menu_scene::render_menu_overlay(self.frame, area, menu, view);
    }
}

/// Party colour tags are CSS-style hex strings; anything unparsable is white.
pub fn member_color(tag: &str) -> Color {
    tag.parse().unwrap_or(Color::White)
}

/// List row with a cursor marker when selected.
pub fn selectable_item(text: String, selected: bool) -> ListItem<'static> {
    if selected {
        ListItem::new(format!("> {}", text)).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ListItem::new(format!("  {}", text)).style(Style::default().fg(Color::White))
    }
}

fn render_exploration(frame: &mut Frame, area: Rect, world: &ExplorationModel, party: &Party) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(26)])
        .split(rows[0]);

    let map_block = Block::default().title(" Riverlands ").borders(Borders::ALL);
    let map_inner = map_block.inner(columns[0]);
    frame.render_widget(map_block, columns[0]);
    frame.render_widget(WorldMapWidget::new(world), map_inner);

    let party_lines: Vec<Line> = party
        .members
        .iter()
        .flat_map(|member| {
            [
                Line::styled(
                    format!("{} Lv.{}", member.name, member.stats.level),
                    Style::default().fg(member_color(&member.sprite_color)),
                ),
                Line::from(format!(
                    " HP {}/{} MP {}/{}",
                    member.stats.hp, member.stats.max_hp, member.stats.mp, member.stats.max_mp
                )),
            ]
        })
        .collect();
    let party_block = Block::default().title(" Party ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(party_lines).block(party_block), columns[1]);

    let hud_text = world
        .message()
        .unwrap_or("[Arrows/WASD] Move  [M/Esc] Menu  [Q] Quit");
    let hud = Paragraph::new(hud_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(hud, rows[1]);
}
