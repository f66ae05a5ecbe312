//! Status and key help lines

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Draw the status line: an error wins over an informational message
pub fn draw_status(frame: &mut Frame, area: Rect, error: Option<&str>, message: Option<&str>) {
    let line = match (error, message) {
        (Some(err), _) => Line::from(Span::styled(
            format!(" {}", err),
            Style::default().fg(Color::Red),
        )),
        (None, Some(msg)) => Line::from(Span::styled(
            format!(" {}", msg),
            Style::default().fg(Color::Green),
        )),
        (None, None) => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the key help line
pub fn draw_help(frame: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Yellow);
    let text = Style::default().fg(Color::DarkGray);
    let spans = vec![
        Span::styled(" drag │", key),
        Span::styled(" resize  ", text),
        Span::styled("dbl-click", key),
        Span::styled(" fit  ", text),
        Span::styled("a", key),
        Span::styled(" auto-size all  ", text),
        Span::styled("r", key),
        Span::styled(" reset  ", text),
        Span::styled("hjkl", key),
        Span::styled(" scroll  ", text),
        Span::styled("F5", key),
        Span::styled(" reload  ", text),
        Span::styled("q", key),
        Span::styled(" quit", text),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
