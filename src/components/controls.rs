//! Control panel component
//!
//! Draws the buttons the sizer injected into the page. Nothing is drawn for
//! a page without the control container.

use crate::input::HitMap;
use crate::model::{ControlButton, ControlPanel};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Button under the pointer while pressed
#[derive(Debug, Default)]
pub struct ControlBar {
    pub pressed: Option<ControlButton>,
}

/// Screen rectangles of the panel's buttons laid out left to right
pub fn button_rects(panel: &ControlPanel, area: Rect) -> Vec<(Rect, ControlButton)> {
    let mut x = area.x.saturating_add(1);
    let right = area.x.saturating_add(area.width);
    let mut rects = Vec::new();

    for button in &panel.buttons {
        let width = u16::try_from(button_text(*button).width()).unwrap_or(u16::MAX);
        if x >= right {
            break;
        }
        let visible = width.min(right - x);
        rects.push((Rect::new(x, area.y, visible, 1), *button));
        x = x.saturating_add(width).saturating_add(2);
    }
    rects
}

fn button_text(button: ControlButton) -> String {
    format!("[ {} ]", button.label())
}

impl ControlBar {
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        panel: Option<&ControlPanel>,
        resizing: bool,
        hits: &mut HitMap,
    ) {
        hits.buttons.clear();
        let Some(panel) = panel else {
            return;
        };
        hits.buttons = button_rects(panel, area);

        let mut spans = vec![Span::raw(" ")];
        for button in &panel.buttons {
            let style = if self.pressed == Some(*button) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            };
            spans.push(Span::styled(button_text(*button), style));
            spans.push(Span::raw("  "));
        }
        if resizing {
            spans.push(Span::styled(
                " RESIZING ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> ControlPanel {
        ControlPanel {
            container: "controls".to_string(),
            buttons: ControlButton::all().to_vec(),
        }
    }

    #[test]
    fn test_button_rects_follow_labels() {
        let rects = button_rects(&panel(), Rect::new(0, 0, 80, 1));

        // "[ Auto-size All Columns ]" is 25 cells, then two spaces
        assert_eq!(
            rects,
            vec![
                (Rect::new(1, 0, 25, 1), ControlButton::AutoSizeAll),
                (Rect::new(28, 0, 17, 1), ControlButton::ResetColumns),
            ]
        );
    }

    #[test]
    fn test_button_rects_clip_to_area() {
        let rects = button_rects(&panel(), Rect::new(0, 0, 30, 1));

        assert_eq!(rects.len(), 2);
        assert_eq!(rects[1].0.width, 2);

        let rects = button_rects(&panel(), Rect::new(0, 0, 20, 1));
        assert_eq!(rects, vec![(Rect::new(1, 0, 19, 1), ControlButton::AutoSizeAll)]);
    }
}
