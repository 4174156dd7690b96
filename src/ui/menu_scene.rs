//! Pause menu overlay.

use super::selectable_item;
use crate::menu::{MainOption, MenuModel, MenuState};
use crate::scene::MenuView;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

const MENU_WIDTH: u16 = 56;
const MENU_HEIGHT: u16 = 22;

/// Render the menu centred over whatever is already drawn.
pub fn render_menu_overlay(frame: &mut Frame, area: Rect, menu: &MenuModel, view: &MenuView<'_>) {
    let width = MENU_WIDTH.min(area.width);
    let height = MENU_HEIGHT.min(area.height);
    let menu_area = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };
    frame.render_widget(Clear, menu_area);

    let block = Block::default()
        .title(format!(" -- {} -- ", menu.state().title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .style(Style::default().bg(Color::Blue));
    let inner = block.inner(menu_area);
    frame.render_widget(block, menu_area);

    match menu.state() {
        MenuState::Main => {
            let items: Vec<ListItem> = MainOption::ALL
                .iter()
                .map(|option| {
                    selectable_item(option.label().to_string(), *option == menu.main_option())
                })
                .collect();
            frame.render_widget(List::new(items), inner);
        }
        MenuState::Status => {
            let lines: Vec<Line> = view
                .party
                .members
                .iter()
                .flat_map(|member| {
                    let s = &member.stats;
                    [
                        Line::from(format!("{} Lv.{}", member.name, s.level)),
                        Line::from(format!(
                            "  HP: {}/{}  MP: {}/{}",
                            s.hp, s.max_hp, s.mp, s.max_mp
                        )),
                        Line::from(format!(
                            "  Str: {} Def: {} Spd: {}  Exp: {}",
                            s.strength, s.defense, s.speed, s.exp
                        )),
                    ]
                })
                .collect();
            frame.render_widget(Paragraph::new(lines), inner);
        }
        MenuState::MagicSelectChar => {
            let mut items = vec![ListItem::new("Select Character:")];
            items.extend(view.party.members.iter().enumerate().map(|(i, member)| {
                selectable_item(member.name.clone(), i == menu.member_cursor())
            }));
            frame.render_widget(List::new(items), inner);
        }
        MenuState::MagicList => {
            let name = view
                .party
                .get(menu.member_cursor())
                .map(|m| m.name.as_str())
                .unwrap_or("?");
            let known = menu.known_spells(view.party, view.spells);
            let mut items = vec![ListItem::new(format!("{}'s Magic", name))
                .style(Style::default().fg(Color::Yellow))];
            if known.is_empty() {
                items.push(ListItem::new("No magic learned.").style(Style::default().fg(Color::Gray)));
            }
            items.extend(known.iter().enumerate().map(|(i, spell)| {
                selectable_item(
                    format!("{:<16}{:>3} MP  {}", spell.name, spell.mp_cost, spell.element.name()),
                    i == menu.spell_cursor(),
                )
            }));
            frame.render_widget(List::new(items), inner);
        }
        MenuState::Inventory => {
            let items: Vec<ListItem> = view
                .inventory
                .entries()
                .iter()
                .enumerate()
                .map(|(i, entry)| {
                    selectable_item(
                        format!("{:<14} x{:<3} {}", entry.name, entry.quantity, entry.description),
                        i == menu.item_cursor(),
                    )
                })
                .collect();
            frame.render_widget(List::new(items), inner);
        }
    }
}
