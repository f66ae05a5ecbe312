//! Table view component
//!
//! Renders every table of the document at its current column widths and
//! records where header cells landed on screen, so mouse reports can be
//! mapped back to columns.

use crate::action::Action;
use crate::component::Component;
use crate::input::{HeaderHit, HitMap};
use crate::model::{ColumnRef, Document, SessionState, Table};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

/// Everything the table view needs from the app to draw
pub struct TableRenderContext<'a> {
    pub document: &'a Document,
    pub session: &'a SessionState,
    pub cell_padding: u32,
    pub cell_px: u32,
}

/// Scrollable view over the document's tables
pub struct TableView {
    scroll_y: u16,
    scroll_x: u16,
    /// Lines produced by the last draw
    content_height: u16,
    content_width: u16,
    viewport_height: u16,
}

impl Default for TableView {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a pixel offset to the nearest cell boundary
pub fn px_to_cells(px: i32, cell_px: u32) -> u32 {
    let px = px.max(0) as u32;
    let cell_px = cell_px.max(1);
    (px + cell_px / 2) / cell_px
}

/// Pad or truncate `text` to exactly `width` display cells
pub fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();

    if total <= width {
        out.push_str(text);
        used = total;
    } else if width > 0 {
        for c in text.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > width - 1 {
                break;
            }
            out.push(c);
            used += w;
        }
        out.push('…');
        used += 1;
    }

    out.extend(std::iter::repeat(' ').take(width.saturating_sub(used)));
    out
}

/// Cell ranges `[start, end)` of every column of a table
fn column_cells(table: &Table, cell_padding: u32, cell_px: u32) -> Vec<(u32, u32)> {
    (0..table.column_count())
        .map(|idx| {
            let (left, right) = table.column_span(idx, cell_padding).unwrap_or((0, 0));
            (px_to_cells(left, cell_px), px_to_cells(right, cell_px))
        })
        .collect()
}

impl TableView {
    pub fn new() -> Self {
        Self {
            scroll_y: 0,
            scroll_x: 0,
            content_height: 0,
            content_width: 0,
            viewport_height: 0,
        }
    }

    #[cfg(test)]
    pub fn scroll(&self) -> (u16, u16) {
        (self.scroll_y, self.scroll_x)
    }

    /// Build the lines for one table, returning the index of its header line
    fn table_lines(
        table: &Table,
        table_idx: usize,
        ctx: &TableRenderContext,
        lines: &mut Vec<Line<'static>>,
    ) -> usize {
        let ranges = column_cells(table, ctx.cell_padding, ctx.cell_px);
        let active = ctx.session.session().map(|s| s.target);

        if let Some(caption) = &table.caption {
            lines.push(Line::from(Span::styled(
                caption.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        // Header
        let header_line = lines.len();
        let header_spans: Vec<Span> = table
            .headers
            .iter()
            .zip(&ranges)
            .enumerate()
            .flat_map(|(col, (header, (start, end)))| {
                let width = end.saturating_sub(*start) as usize;
                let is_active = active == Some(ColumnRef::new(table_idx, col));
                let style = if is_active {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                };
                let handle_style = if is_active {
                    Style::default().fg(Color::Yellow)
                } else if header.width.is_some() {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                cell_spans(header.text(), width, style, handle_style)
            })
            .collect();
        lines.push(Line::from(header_spans));

        // Separator
        let separator: String = ranges
            .iter()
            .map(|(start, end)| {
                let width = end.saturating_sub(*start) as usize;
                if width == 0 {
                    String::new()
                } else {
                    format!("{}┼", "─".repeat(width - 1))
                }
            })
            .collect();
        lines.push(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        )));

        // Rows
        for row in &table.rows {
            let height = row
                .iter()
                .map(|cell| cell.text.lines().count().max(1))
                .max()
                .unwrap_or(1);
            for line_idx in 0..height {
                let spans: Vec<Span> = ranges
                    .iter()
                    .enumerate()
                    .flat_map(|(col, (start, end))| {
                        let width = end.saturating_sub(*start) as usize;
                        let text = row
                            .get(col)
                            .and_then(|cell| cell.text.lines().nth(line_idx))
                            .unwrap_or("");
                        cell_spans(
                            text,
                            width,
                            Style::default().fg(Color::White),
                            Style::default().fg(Color::DarkGray),
                        )
                    })
                    .collect();
                lines.push(Line::from(spans));
            }
        }

        lines.push(Line::from(Span::styled(
            format!("{} rows", table.rows.len()),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));

        header_line
    }

    /// Draw the tables and record header positions into `hits`
    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        ctx: &TableRenderContext,
        hits: &mut HitMap,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(
                " {} ",
                ctx.document.title.as_deref().unwrap_or("Tables")
            ))
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);

        let mut lines = Vec::new();
        let mut header_lines = Vec::new();
        if ctx.document.tables.is_empty() {
            lines.push(Line::from("No tables in document"));
        }
        for (idx, table) in ctx.document.tables.iter().enumerate() {
            let line = Self::table_lines(table, idx, ctx, &mut lines);
            header_lines.push((idx, line));
        }

        self.content_height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        self.content_width = u16::try_from(lines.iter().map(|l| l.width()).max().unwrap_or(0))
            .unwrap_or(u16::MAX);
        self.viewport_height = inner.height;
        self.clamp_scroll();

        hits.canvas_x = inner.x;
        hits.scroll_x = self.scroll_x;
        hits.headers.clear();
        for (table_idx, line) in header_lines {
            let Some(row) = self.screen_row(line, inner) else {
                continue;
            };
            let table = &ctx.document.tables[table_idx];
            for (col, (start, end)) in column_cells(table, ctx.cell_padding, ctx.cell_px)
                .into_iter()
                .enumerate()
            {
                let right_px = table
                    .column_span(col, ctx.cell_padding)
                    .map(|(_, right)| right)
                    .unwrap_or(0);
                hits.headers.push(HeaderHit {
                    row,
                    start,
                    end,
                    right_px,
                    column: ColumnRef::new(table_idx, col),
                });
            }
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .scroll((self.scroll_y, self.scroll_x));
        frame.render_widget(paragraph, area);
    }

    /// Screen row of a content line, if it is visible
    fn screen_row(&self, line: usize, inner: Rect) -> Option<u16> {
        let line = u16::try_from(line).ok()?;
        if line < self.scroll_y {
            return None;
        }
        let offset = line - self.scroll_y;
        (offset < inner.height).then(|| inner.y + offset)
    }

    fn clamp_scroll(&mut self) {
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        self.scroll_y = self.scroll_y.min(max_y);
        self.scroll_x = self.scroll_x.min(self.content_width.saturating_sub(1));
    }
}

/// Content padded to `width - 1` cells followed by the column's edge handle
fn cell_spans(text: &str, width: usize, style: Style, handle_style: Style) -> Vec<Span<'static>> {
    if width == 0 {
        return Vec::new();
    }
    vec![
        Span::styled(fit(text, width - 1), style),
        Span::styled("│", handle_style),
    ]
}

impl Component for TableView {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::Char('h') | KeyCode::Left => Some(Action::ScrollLeft),
            KeyCode::Char('l') | KeyCode::Right => Some(Action::ScrollRight),
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PageDown)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PageUp)
            }
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let page = self.viewport_height.max(1);
        match action {
            Action::ScrollDown => self.scroll_y = self.scroll_y.saturating_add(1),
            Action::ScrollUp => self.scroll_y = self.scroll_y.saturating_sub(1),
            Action::ScrollRight => self.scroll_x = self.scroll_x.saturating_add(4),
            Action::ScrollLeft => self.scroll_x = self.scroll_x.saturating_sub(4),
            Action::PageDown => self.scroll_y = self.scroll_y.saturating_add(page),
            Action::PageUp => self.scroll_y = self.scroll_y.saturating_sub(page),
            _ => {}
        }
        self.clamp_scroll();
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing is done through render which takes full context
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cell;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_px_to_cells_rounds_to_nearest() {
        assert_eq!(px_to_cells(0, 8), 0);
        assert_eq!(px_to_cells(150, 8), 19);
        assert_eq!(px_to_cells(147, 8), 18);
        assert_eq!(px_to_cells(-20, 8), 0);
    }

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("ID", 5), "ID   ");
        assert_eq!(fit("Description", 6), "Descr…");
        assert_eq!(fit("abc", 0), "");
        assert_eq!(fit("表格表格", 5), "表格…");
    }

    fn sample_document() -> Document {
        let mut table = Table::new(
            "t",
            vec![Cell::new("ID", 16), Cell::new("Name", 32)],
            vec![vec![Cell::new("1", 8), Cell::new("Alice\nBob", 40)]],
        )
        .with_caption("People");
        table.headers[0].width = Some(150);
        let mut doc = Document::new(vec![table]);
        doc.title = Some("Demo".to_string());
        doc
    }

    #[test]
    fn test_render_records_header_hits() {
        let doc = sample_document();
        let session = SessionState::Idle;
        let ctx = TableRenderContext {
            document: &doc,
            session: &session,
            cell_padding: 30,
            cell_px: 8,
        };
        let mut view = TableView::new();
        let mut hits = HitMap::default();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).expect("test terminal");

        terminal
            .draw(|frame| {
                let area = frame.area();
                view.render(frame, area, &ctx, &mut hits)
            })
            .expect("draw");

        // Block border puts content at (1, 1); caption is line 0, header line 1
        assert_eq!(hits.canvas_x, 1);
        assert_eq!(
            hits.headers,
            vec![
                HeaderHit {
                    row: 2,
                    start: 0,
                    end: 19,
                    right_px: 150,
                    column: ColumnRef::new(0, 0),
                },
                HeaderHit {
                    row: 2,
                    start: 19,
                    end: 28,
                    right_px: 220,
                    column: ColumnRef::new(0, 1),
                },
            ]
        );

        let buffer = terminal.backend().buffer();
        let header: String = (1..30).map(|x| buffer[(x, 2)].symbol().to_string()).collect();
        assert!(header.starts_with("ID"), "header row: {:?}", header);
        assert_eq!(buffer[(19, 2)].symbol(), "│");
    }

    #[test]
    fn test_scrolled_header_is_not_hit() {
        let doc = sample_document();
        let session = SessionState::Idle;
        let ctx = TableRenderContext {
            document: &doc,
            session: &session,
            cell_padding: 30,
            cell_px: 8,
        };
        let mut view = TableView::new();
        let mut hits = HitMap::default();
        let mut terminal = Terminal::new(TestBackend::new(80, 5)).expect("test terminal");

        terminal
            .draw(|frame| {
                let area = frame.area();
                view.render(frame, area, &ctx, &mut hits)
            })
            .expect("draw");
        view.update(Action::ScrollDown).expect("scroll");
        view.update(Action::ScrollDown).expect("scroll");
        terminal
            .draw(|frame| {
                let area = frame.area();
                view.render(frame, area, &ctx, &mut hits)
            })
            .expect("draw");

        assert_eq!(view.scroll().0, 2);
        assert!(hits.headers.is_empty());
    }
}
