//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout areas
pub struct MainLayout {
    pub controls: Rect,
    pub tables: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Calculate main screen layout
///
/// Control bar on top, tables in the middle, then a status line and the
/// key help line.
pub fn calculate_main_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    MainLayout {
        controls: chunks[0],
        tables: chunks[1],
        status: chunks[2],
        help: chunks[3],
    }
}
