use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::state::AppState;
use crate::ui::widgets;

pub fn render(f: &mut Frame, state: &AppState) {
    // Main layout: selector + examples + status bar
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    widgets::render_selector(f, vertical[0], state);
    widgets::render_examples(f, vertical[1], state);
    widgets::render_status_bar(f, vertical[2], state);
}
