use std::io;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use predictor::{ClientConfig, Controller};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::ui::screens::{menu, Action, Screen};

const CONFIG_PATH: &str = "predictor.json";

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// `predictor.json` if present, then `PREDICTOR_*` environment overrides.
fn load_config() -> Result<ClientConfig> {
    let base = if Path::new(CONFIG_PATH).exists() {
        ClientConfig::load(CONFIG_PATH).with_context(|| format!("loading {CONFIG_PATH}"))?
    } else {
        ClientConfig::default()
    };
    Ok(base.with_env()?)
}

/// Runs the TUI application.
///
/// # Errors
/// Returns an error if the config is invalid or terminal setup or rendering fails.
pub fn run() -> Result<()> {
    let config = load_config()?;
    log::info!("using prediction endpoint {}", config.endpoint);

    let mut controller = Controller::new(&config)?;
    controller.probe_health();

    let guard = TerminalGuard::enter()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut screen = Screen::Menu(menu::MenuState::new());

    loop {
        controller.tick();
        let view = controller.view();
        terminal.draw(|f| screen.draw(f, &view))?;

        if event::poll(Duration::from_millis(120))? {
            if let Event::Key(k) = event::read()? {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                match screen.handle_key(k, &mut controller) {
                    Action::Quit => break,
                    Action::Transition(next) => screen = next,
                    Action::None => {}
                }
            }
        }
    }

    terminal.show_cursor()?;
    drop(guard);
    controller.shutdown();
    log::info!("bye");
    Ok(())
}
