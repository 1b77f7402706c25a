use crossterm::event::KeyCode;
use predictor::{Controller, ControllerView};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::{
    theme::Theme,
    widgets::{centered_rect, render_hints, service_status},
};

use super::{form, tabs, Action, Screen};

const LOGO: &str = r#"
 ┌─┐┬─┐┌─┐┌┬┐┬┌─┐┌┬┐┌─┐┬─┐
 ├─┘├┬┘├┤  ││││   │ │ │├┬┘
 ┴  ┴└─└─┘─┴┘┴└─┘ ┴ └─┘┴└─
feature prediction console
"#;

const MENU_ITEMS: &[&str] = &["Feature Prediction", "Bearing Materials", "Quit"];

pub struct MenuState {
    pub selected: usize,
}

impl MenuState {
    pub fn new() -> Self {
        Self { selected: 0 }
    }
}

pub fn handle_key(state: &mut MenuState, key: KeyCode, ctl: &mut Controller) -> Action {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            state.selected = state.selected.saturating_sub(1);
            Action::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.selected < MENU_ITEMS.len() - 1 {
                state.selected += 1;
            }
            Action::None
        }
        KeyCode::Enter => match state.selected {
            0 => Action::Transition(Screen::Form(form::FormState::new())),
            1 => {
                // Entering the panel counts as an activation of the current tab.
                let active = ctl.tabs().active();
                ctl.switch_tab(active);
                Action::Transition(Screen::Tabs(tabs::TabsState::new()))
            }
            _ => Action::Quit,
        },
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => Action::None,
    }
}

pub fn draw(f: &mut Frame, state: &MenuState, view: &ControllerView) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let outer = centered_rect(60, 70, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(1),
            Constraint::Length(MENU_ITEMS.len() as u16 * 2 + 2),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(outer);

    draw_logo(f, chunks[0]);
    draw_menu(f, chunks[2], state);
    f.render_widget(
        Paragraph::new(service_status(view.service_up, &view.endpoint)).alignment(Alignment::Center),
        chunks[4],
    );
    render_hints(
        f,
        chunks[5],
        &[("↑↓ / j k", "navigate"), ("enter", "select"), ("q", "quit")],
    );
}

fn draw_logo(f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = LOGO
        .lines()
        .map(|l| Line::from(Span::styled(l, Theme::title())))
        .collect();

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn draw_menu(f: &mut Frame, area: Rect, state: &MenuState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(" MENU ")
        .title_alignment(Alignment::Center)
        .title_style(Theme::title());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let item_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            MENU_ITEMS
                .iter()
                .map(|_| Constraint::Length(2))
                .collect::<Vec<_>>(),
        )
        .split(inner);

    for (i, (label, item_area)) in MENU_ITEMS.iter().zip(item_areas.iter()).enumerate() {
        let (prefix, style) = if i == state.selected {
            ("▶ ", Theme::title().add_modifier(Modifier::BOLD))
        } else {
            ("  ", Theme::dim())
        };

        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(*label, style),
            ])),
            *item_area,
        );
    }
}
