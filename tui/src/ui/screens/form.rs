use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use predictor::{features::FEATURE_COUNT, Controller, ControllerView};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::ui::{
    theme::Theme,
    widgets::{centered_rect, draw_prediction, input_field, render_hints, service_status},
};

use super::{menu, Action, Screen};

const FIELD_TITLES: [&str; FEATURE_COUNT] =
    ["feature 1", "feature 2", "feature 3", "feature 4", "feature 5"];

pub struct FormState {
    focused: usize,
}

impl FormState {
    pub fn new() -> Self {
        Self { focused: 0 }
    }
}

pub fn handle_key(state: &mut FormState, key: KeyEvent, ctl: &mut Controller) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('r') {
            ctl.reset();
        }
        return Action::None;
    }

    match key.code {
        KeyCode::Up | KeyCode::BackTab => {
            state.focused = state.focused.saturating_sub(1);
            Action::None
        }
        KeyCode::Down | KeyCode::Tab => {
            state.focused = (state.focused + 1).min(FEATURE_COUNT - 1);
            Action::None
        }
        KeyCode::Char(c) => {
            let mut value = ctl.features()[state.focused].clone();
            value.push(c);
            ctl.update_feature(state.focused, value);
            Action::None
        }
        KeyCode::Backspace => {
            let mut value = ctl.features()[state.focused].clone();
            value.pop();
            ctl.update_feature(state.focused, value);
            Action::None
        }
        KeyCode::Enter => {
            if ctl.can_submit() {
                ctl.submit();
            }
            Action::None
        }
        KeyCode::Esc => Action::Transition(Screen::Menu(menu::MenuState::new())),
        _ => Action::None,
    }
}

pub fn draw(f: &mut Frame, state: &FormState, view: &ControllerView) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let outer = centered_rect(70, 96, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                         // title
            Constraint::Length(1),                         // service status
            Constraint::Length(1),                         // spacer
            Constraint::Length(FEATURE_COUNT as u16 * 3), // inputs
            Constraint::Length(1),                         // submit
            Constraint::Length(1),                         // spacer
            Constraint::Min(6),                            // result
            Constraint::Length(1),                         // hints
        ])
        .split(outer);

    f.render_widget(
        Paragraph::new(Span::styled(
            "Feature Prediction",
            Theme::title().add_modifier(Modifier::BOLD),
        )),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new(service_status(view.service_up, &view.endpoint)),
        chunks[1],
    );

    let fields = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3); FEATURE_COUNT])
        .split(chunks[3]);

    for (i, (value, field_area)) in view.features.iter().zip(fields.iter()).enumerate() {
        f.render_widget(
            input_field(FIELD_TITLES[i], value, "enter a number", i == state.focused),
            *field_area,
        );
    }

    let submit = if view.prediction.is_loading() {
        Span::styled("[ predicting... ]", Theme::muted())
    } else if view.can_submit {
        Span::styled("[ predict ]", Theme::accent_cyan())
    } else {
        Span::styled("[ predict ] fill every feature first", Theme::muted())
    };
    f.render_widget(
        Paragraph::new(Line::from(submit)).alignment(Alignment::Center),
        chunks[4],
    );

    draw_prediction(f, chunks[6], &view.prediction);

    render_hints(
        f,
        chunks[7],
        &[
            ("↑↓", "field"),
            ("enter", "predict"),
            ("ctrl-r", "reset"),
            ("esc", "back"),
        ],
    );
}
