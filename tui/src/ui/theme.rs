use ratatui::style::{Color, Modifier, Style};

/// Amber instrument-panel theme.
///
/// Base aesthetic:
/// - amber foreground
/// - near-black background
/// - cyan for focus, green/red for outcomes
pub struct Theme;

impl Theme {
    // Core palette
    pub const BG: Color = Color::Rgb(10, 10, 12);
    pub const FG_AMBER: Color = Color::Rgb(255, 176, 0);
    pub const FG_DIM: Color = Color::Rgb(190, 130, 20);
    pub const FG_MUTED: Color = Color::Rgb(95, 90, 80);

    pub const ACCENT_CYAN: Color = Color::Rgb(0, 215, 255);
    pub const ACCENT_GREEN: Color = Color::Rgb(80, 250, 120);
    pub const ACCENT_RED: Color = Color::Rgb(255, 80, 80);

    /// Default full-screen style.
    pub fn base() -> Style {
        Style::default().fg(Self::FG_AMBER).bg(Self::BG)
    }

    /// Panel borders.
    pub fn border() -> Style {
        Style::default().fg(Self::FG_DIM).bg(Self::BG)
    }

    /// Border of the focused field.
    pub fn border_focus() -> Style {
        Style::default().fg(Self::ACCENT_CYAN).bg(Self::BG)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::FG_AMBER)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text() -> Style {
        Style::default().fg(Self::FG_AMBER)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::FG_DIM)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::FG_MUTED)
    }

    pub fn ok() -> Style {
        Style::default()
            .fg(Self::ACCENT_GREEN)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ACCENT_RED)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent_cyan() -> Style {
        Style::default()
            .fg(Self::ACCENT_CYAN)
            .add_modifier(Modifier::BOLD)
    }

    /// Filled part of a probability or confidence bar.
    pub fn gauge() -> Style {
        Style::default().fg(Self::FG_DIM).bg(Self::BG)
    }

    /// Bar of the recommended class.
    pub fn gauge_recommended() -> Style {
        Style::default().fg(Self::ACCENT_GREEN).bg(Self::BG)
    }
}
