use predictor::{
    bearing::SectionResult,
    prediction::{confidence_ratio, format_confidence},
    PredictionState,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{block::Title, Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use super::theme::Theme;

/// Single-line text field with a cursor when focused.
pub fn input_field<'a>(title: &'a str, value: &'a str, placeholder: &'a str, focused: bool) -> Paragraph<'a> {
    let border = if focused { Theme::border_focus() } else { Theme::border() };

    let mut spans = if value.is_empty() {
        vec![Span::styled(placeholder, Theme::muted())]
    } else {
        vec![Span::styled(value, Theme::text())]
    };
    if focused {
        spans.push(Span::styled("█", Theme::accent_cyan()));
    }

    Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(" {title} "))
            .title_style(Theme::title()),
    )
}

/// Result, error or progress of the prediction slot.
pub fn draw_prediction(f: &mut Frame, area: Rect, state: &PredictionState) {
    match state {
        PredictionState::Idle => {
            f.render_widget(
                Paragraph::new(Span::styled("no prediction yet", Theme::muted()))
                    .block(panel(" Result ")),
                area,
            );
        }
        PredictionState::Loading => {
            f.render_widget(
                Paragraph::new(Span::styled("predicting...", Theme::accent_cyan()))
                    .block(panel(" Result ")),
                area,
            );
        }
        PredictionState::Failed(msg) => {
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
        PredictionState::Succeeded(result) => {
            let block = panel(" Result ");
            let inner = block.inner(area);
            f.render_widget(block, area);

            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1), // class
                    Constraint::Length(1), // confidence
                    Constraint::Length(1), // spacer
                    Constraint::Length(1), // bar
                    Constraint::Min(0),
                ])
                .split(inner);

            f.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled("predicted class: ", Theme::dim()),
                    Span::styled(result.prediction.to_string(), Theme::ok()),
                ])),
                rows[0],
            );
            f.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled("confidence:      ", Theme::dim()),
                    Span::styled(format_confidence(result.confidence), Theme::ok()),
                ])),
                rows[1],
            );
            f.render_widget(
                Gauge::default()
                    .gauge_style(Theme::gauge_recommended())
                    .ratio(confidence_ratio(result.confidence))
                    .label(""),
                rows[3],
            );
        }
    }
}

/// One bearing section: a bar per class and the recommendation badge.
pub fn draw_section(f: &mut Frame, area: Rect, section: &SectionResult) {
    let block = panel(format!(" {} ", section.section_name));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            section
                .items
                .iter()
                .map(|_| Constraint::Length(1))
                .chain([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
                .collect::<Vec<_>>(),
        )
        .split(inner);

    for (i, item) in section.items.iter().enumerate() {
        let recommended = i == section.recommended_index;
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(12), Constraint::Min(4)])
            .split(rows[i]);

        let label_style = if recommended {
            Theme::ok()
        } else {
            Theme::dim()
        };
        f.render_widget(
            Paragraph::new(Span::styled(item.class_name.as_str(), label_style)),
            cols[0],
        );
        f.render_widget(
            Gauge::default()
                .gauge_style(if recommended {
                    Theme::gauge_recommended()
                } else {
                    Theme::gauge()
                })
                .ratio(confidence_ratio(item.probability))
                .label(format!("{:.1}%", item.probability * 100.0)),
            cols[1],
        );
    }

    let best = section.recommended();
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("✓ ", Theme::ok()),
            Span::styled("recommended: ", Theme::dim()),
            Span::styled(
                format!("{} ({:.1}%)", best.class_name, best.probability * 100.0),
                Theme::ok().add_modifier(Modifier::BOLD),
            ),
        ])),
        rows[section.items.len() + 1],
    );
}

/// Reachability of the prediction service.
pub fn service_status(up: Option<bool>, endpoint: &str) -> Line<'_> {
    let (mark, style) = match up {
        Some(true) => ("● online", Theme::ok()),
        Some(false) => ("● offline", Theme::error()),
        None => ("● checking", Theme::muted()),
    };
    Line::from(vec![
        Span::styled(mark, style),
        Span::styled("  ", Theme::muted()),
        Span::styled(endpoint, Theme::muted()),
    ])
}

fn panel<'a>(title: impl Into<Title<'a>>) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(title)
        .title_style(Theme::title())
}

pub fn render_hints(f: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let spans = hints
        .iter()
        .enumerate()
        .flat_map(|(i, (key, action))| {
            let sep = if i == 0 { "" } else { "    " };
            [
                Span::styled(sep, Theme::muted()),
                Span::styled(format!("[{key}]"), Theme::accent_cyan()),
                Span::styled(format!(" {action}"), Theme::dim()),
            ]
        })
        .collect::<Vec<_>>();

    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}
