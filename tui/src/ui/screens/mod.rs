pub mod form;
pub mod menu;
pub mod tabs;

use crossterm::event::KeyEvent;
use predictor::{Controller, ControllerView};
use ratatui::Frame;

pub enum Action {
    None,
    Quit,
    Transition(Screen),
}

pub enum Screen {
    Menu(menu::MenuState),
    Form(form::FormState),
    Tabs(tabs::TabsState),
}

impl Screen {
    pub fn draw(&self, f: &mut Frame, view: &ControllerView) {
        match self {
            Screen::Menu(s) => menu::draw(f, s, view),
            Screen::Form(s) => form::draw(f, s, view),
            Screen::Tabs(s) => tabs::draw(f, s, view),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, ctl: &mut Controller) -> Action {
        match self {
            Screen::Menu(s) => menu::handle_key(s, key.code, ctl),
            Screen::Form(s) => form::handle_key(s, key, ctl),
            Screen::Tabs(s) => tabs::handle_key(s, key.code, ctl),
        }
    }
}
