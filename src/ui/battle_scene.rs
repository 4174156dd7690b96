//! Battle screen: enemies, party, command or spell list, and the log.

use super::{member_color, selectable_item};
use crate::battle::{BattleEngine, BattleState, MenuOption};
use crate::data::Party;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn render_battle_scene(frame: &mut Frame, area: Rect, battle: &BattleEngine, party: &Party) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(8)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(20)])
        .split(rows[1]);

    render_enemies(frame, top[0], battle);
    render_party(frame, top[1], battle, party);
    render_commands(frame, bottom[0], battle);
    render_log(frame, bottom[1], battle);
}

fn render_enemies(frame: &mut Frame, area: Rect, battle: &BattleEngine) {
    let lines: Vec<Line> = battle
        .enemies()
        .iter()
        .filter(|e| e.is_alive())
        .map(|enemy| {
            Line::from(vec![
                Span::styled(
                    format!("{:<10}", enemy.name()),
                    Style::default().fg(member_color(enemy.sprite_color())),
                ),
                Span::raw(format!(
                    " HP {:>4}/{:<4}",
                    enemy.stats().hp,
                    enemy.stats().max_hp
                )),
            ])
        })
        .collect();
    let block = Block::default().title(" Enemies ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_party(frame: &mut Frame, area: Rect, battle: &BattleEngine, party: &Party) {
    let lines: Vec<Line> = party
        .members
        .iter()
        .enumerate()
        .map(|(i, member)| {
            let acting = battle.state().is_player_turn() && i == battle.actor_index();
            let marker = if acting { "> " } else { "  " };
            let style = if !member.is_alive() {
                Style::default().fg(Color::DarkGray)
            } else if acting {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::styled(
                format!(
                    "{}{:<8} HP {:>4}/{:<4} MP {:>3}/{:<3}",
                    marker,
                    member.name,
                    member.stats.hp,
                    member.stats.max_hp,
                    member.stats.mp,
                    member.stats.max_mp
                ),
                style,
            )
        })
        .collect();
    let block = Block::default().title(" Party ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_commands(frame: &mut Frame, area: Rect, battle: &BattleEngine) {
    let (title, items): (&str, Vec<ListItem>) = match battle.state() {
        BattleState::MagicMenu => (
            " Magic ",
            battle
                .available_spells()
                .iter()
                .enumerate()
                .map(|(i, spell)| {
                    selectable_item(
                        format!("{:<14}{:>3} MP", spell.name, spell.mp_cost),
                        i == battle.selected_spell(),
                    )
                })
                .collect(),
        ),
        BattleState::Victory => (" Victory ", vec![ListItem::new("[Enter] Continue")]),
        BattleState::Defeat => (" Defeat ", vec![ListItem::new("[Enter] Continue")]),
        BattleState::EnemyTurn => (" Enemy turn ", Vec::new()),
        BattleState::PlayerTurn => (
            " Command ",
            MenuOption::ALL
                .iter()
                .map(|option| selectable_item(option.label().to_string(), *option == battle.selected()))
                .collect(),
        ),
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    frame.render_widget(List::new(items).block(block), area);
}

fn render_log(frame: &mut Frame, area: Rect, battle: &BattleEngine) {
    let lines: Vec<Line> = battle.log().iter().map(Line::from).collect();
    let block = Block::default()
        .title(" Log ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(
        Paragraph::new(lines)
            .style(Style::default().fg(Color::Gray))
            .block(block),
        area,
    );
}
