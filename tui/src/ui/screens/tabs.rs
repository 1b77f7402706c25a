use crossterm::event::KeyCode;
use predictor::{
    tabs::{TabContext, PARAM_KEYS, TAB_IDS},
    BearingState, Controller, ControllerView,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::ui::{
    theme::Theme,
    widgets::{centered_rect, draw_section, input_field, render_hints},
};

use super::{menu, Action, Screen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Input,
    /// Index into `PARAM_KEYS`.
    Param(usize),
}

pub struct TabsState {
    focus: Focus,
}

impl TabsState {
    pub fn new() -> Self {
        Self {
            focus: Focus::Input,
        }
    }

    fn focus_up(&mut self) {
        self.focus = match self.focus {
            Focus::Input | Focus::Param(0) => Focus::Input,
            Focus::Param(i) => Focus::Param(i - 1),
        };
    }

    fn focus_down(&mut self) {
        self.focus = match self.focus {
            Focus::Input => Focus::Param(0),
            Focus::Param(i) => Focus::Param((i + 1).min(PARAM_KEYS.len() - 1)),
        };
    }
}

pub fn handle_key(state: &mut TabsState, key: KeyCode, ctl: &mut Controller) -> Action {
    let active = ctl.tabs().active();

    match key {
        KeyCode::Tab | KeyCode::Right => {
            ctl.switch_tab(active.next());
            Action::None
        }
        KeyCode::BackTab | KeyCode::Left => {
            ctl.switch_tab(active.prev());
            Action::None
        }
        KeyCode::Up => {
            state.focus_up();
            Action::None
        }
        KeyCode::Down => {
            state.focus_down();
            Action::None
        }
        KeyCode::Char(' ') if matches!(state.focus, Focus::Param(_)) => {
            if let Focus::Param(i) = state.focus {
                ctl.toggle_param(active, PARAM_KEYS[i]);
            }
            Action::None
        }
        KeyCode::Char(c) => {
            edit_focused(state, ctl, |value| value.push(c));
            Action::None
        }
        KeyCode::Backspace => {
            edit_focused(state, ctl, |value| {
                value.pop();
            });
            Action::None
        }
        KeyCode::Esc => Action::Transition(Screen::Menu(menu::MenuState::new())),
        _ => Action::None,
    }
}

fn edit_focused(state: &TabsState, ctl: &mut Controller, edit: impl FnOnce(&mut String)) {
    let active = ctl.tabs().active();
    let ctx = ctl.tabs().current_context();

    match state.focus {
        Focus::Input => {
            let mut value = ctx.input_value.clone();
            edit(&mut value);
            ctl.update_tab_input(active, value);
        }
        Focus::Param(i) => {
            let key = PARAM_KEYS[i];
            if !ctx.is_selected(key) {
                return;
            }
            let mut value = ctx.param_value(key).to_string();
            edit(&mut value);
            ctl.update_param_value(active, key, value);
        }
    }
}

pub fn draw(f: &mut Frame, state: &TabsState, view: &ControllerView) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let outer = centered_rect(90, 96, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                          // title
            Constraint::Length(3),                          // tab bar
            Constraint::Length(3),                          // input
            Constraint::Length(PARAM_KEYS.len() as u16 + 2), // params
            Constraint::Min(8),                             // bearing
            Constraint::Length(1),                          // hints
        ])
        .split(outer);

    f.render_widget(
        Paragraph::new(Span::styled(
            "Bearing Materials",
            Theme::title().add_modifier(Modifier::BOLD),
        )),
        chunks[0],
    );

    draw_tab_bar(f, chunks[1], view);

    let ctx = view.tabs.current_context();
    f.render_widget(
        input_field(
            "input",
            &ctx.input_value,
            "free text for this tab",
            state.focus == Focus::Input,
        ),
        chunks[2],
    );
    draw_params(f, chunks[3], state, ctx);
    draw_bearing(f, chunks[4], view);

    render_hints(
        f,
        chunks[5],
        &[
            ("tab / ←→", "switch tab"),
            ("↑↓", "field"),
            ("space", "toggle param"),
            ("esc", "back"),
        ],
    );
}

fn draw_tab_bar(f: &mut Frame, area: Rect, view: &ControllerView) {
    let titles = TAB_IDS
        .iter()
        .map(|id| Line::from(format!(" {} ", id.label())))
        .collect::<Vec<_>>();
    let selected = TAB_IDS
        .iter()
        .position(|id| *id == view.tabs.active())
        .unwrap_or(0);

    f.render_widget(
        Tabs::new(titles)
            .select(selected)
            .style(Theme::dim())
            .highlight_style(Theme::accent_cyan())
            .divider(Span::styled("│", Theme::muted()))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Theme::border()),
            ),
        area,
    );
}

fn draw_params(f: &mut Frame, area: Rect, state: &TabsState, ctx: &TabContext) {
    let lines = PARAM_KEYS
        .iter()
        .enumerate()
        .map(|(i, key)| {
            let focused = state.focus == Focus::Param(i);
            let selected = ctx.is_selected(*key);
            let mark = if selected { "[x]" } else { "[ ]" };
            let style = if focused {
                Theme::accent_cyan()
            } else {
                Theme::dim()
            };

            let mut spans = vec![
                Span::styled(if focused { "▶ " } else { "  " }, style),
                Span::styled(format!("{mark} {:<6}", key.label()), style),
            ];
            // Values only exist for selected parameters.
            if selected {
                spans.push(Span::styled(ctx.param_value(*key).to_string(), Theme::text()));
                if focused {
                    spans.push(Span::styled("█", Theme::accent_cyan()));
                }
            }
            Line::from(spans)
        })
        .collect::<Vec<_>>();

    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border())
                .title(" Parameters ")
                .title_style(Theme::title()),
        ),
        area,
    );
}

fn draw_bearing(f: &mut Frame, area: Rect, view: &ControllerView) {
    let tab = view
        .bearing_tab
        .map_or_else(String::new, |t| format!(" for {}", t.label()));

    match &view.bearing {
        BearingState::Idle => {
            f.render_widget(
                Paragraph::new(Span::styled("no recommendation yet", Theme::muted()))
                    .block(bearing_block(format!(" Recommendation{tab} "))),
                area,
            );
        }
        BearingState::Loading => {
            f.render_widget(
                Paragraph::new(Span::styled("loading recommendation...", Theme::accent_cyan()))
                    .block(bearing_block(format!(" Recommendation{tab} "))),
                area,
            );
        }
        BearingState::Failed(msg) => {
            f.render_widget(
                Paragraph::new(msg.as_str())
                    .style(Theme::text())
                    .wrap(Wrap { trim: true })
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(Theme::error())
                            .title(" Error ")
                            .title_style(Theme::error()),
                    ),
                area,
            );
        }
        BearingState::Ready(sections) => {
            let block = bearing_block(format!(" Recommendation{tab} "));
            let inner = block.inner(area);
            f.render_widget(block, area);

            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(
                    sections
                        .iter()
                        .map(|_| Constraint::Ratio(1, sections.len() as u32))
                        .collect::<Vec<_>>(),
                )
                .split(inner);

            for (section, col) in sections.iter().zip(cols.iter()) {
                draw_section(f, *col, section);
            }
        }
    }
}

fn bearing_block<'a>(title: String) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(title)
        .title_style(Theme::title())
}
