//! Terminal input translation
//!
//! Turns crossterm mouse reports into the pointer events the table sizer
//! understands. Terminal cells are mapped to document pixels through the
//! configured cell size; clicks and double-clicks are synthesized here because
//! terminals only report presses and releases.

use crate::model::{ColumnRef, ControlButton, PointerEvent, PointerKind, Target};
use crate::services::{InputSurface, ListenerRegistry};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use std::time::{Duration, Instant};

/// `InputSurface` backed by the terminal
///
/// Text selection cannot be toggled on a terminal with mouse capture; the
/// flag is rendered as a "resizing" indicator instead.
#[derive(Debug)]
pub struct TerminalSurface {
    listeners: ListenerRegistry,
    text_selection: bool,
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self {
            listeners: ListenerRegistry::new(),
            text_selection: true,
        }
    }
}

impl TerminalSurface {
    pub fn text_selection(&self) -> bool {
        self.text_selection
    }
}

impl InputSurface for TerminalSurface {
    fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    fn listeners_mut(&mut self) -> &mut ListenerRegistry {
        &mut self.listeners
    }

    fn set_text_selection(&mut self, enabled: bool) {
        self.text_selection = enabled;
    }
}

/// Cell range of one rendered header cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderHit {
    /// Screen row of the header line
    pub row: u16,
    /// First document cell of the column
    pub start: u32,
    /// One past the last document cell of the column
    pub end: u32,
    /// Right edge of the column in document pixels
    pub right_px: i32,
    pub column: ColumnRef,
}

/// Screen geometry recorded by the last draw
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitMap {
    /// Screen column where document cell `scroll_x` is drawn
    pub canvas_x: u16,
    /// Horizontal scroll in cells
    pub scroll_x: u16,
    pub headers: Vec<HeaderHit>,
    pub buttons: Vec<(Rect, ControlButton)>,
}

impl HitMap {
    /// Document cell under a screen column (may be negative left of the canvas)
    pub fn document_cell(&self, screen_x: u16) -> i64 {
        i64::from(screen_x) - i64::from(self.canvas_x) + i64::from(self.scroll_x)
    }

    /// Document x in pixels of the centre of the cell under `screen_x`
    pub fn document_x(&self, screen_x: u16, cell_px: u32) -> i32 {
        let px = self.document_cell(screen_x) * i64::from(cell_px) + i64::from(cell_px / 2);
        px.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    /// Element under a screen position
    pub fn target_at(&self, column: u16, row: u16) -> Target {
        let position = Position::new(column, row);
        if let Some((_, button)) = self.buttons.iter().find(|(rect, _)| rect.contains(position)) {
            return Target::Control(*button);
        }

        self.header_at(column, row)
            .map(|h| Target::Header(h.column))
            .unwrap_or(Target::None)
    }

    fn header_at(&self, column: u16, row: u16) -> Option<&HeaderHit> {
        let cell = self.document_cell(column);
        if cell < 0 {
            return None;
        }
        self.headers
            .iter()
            .find(|h| h.row == row && i64::from(h.start) <= cell && cell < i64::from(h.end))
    }

    /// Right edge of the column whose handle cell is under a screen position
    ///
    /// The handle is the last cell of a header; a press there grabs the edge
    /// itself whatever the cell size.
    pub fn handle_edge(&self, column: u16, row: u16) -> Option<i32> {
        let cell = self.document_cell(column);
        self.header_at(column, row)
            .filter(|h| cell + 1 == i64::from(h.end))
            .map(|h| h.right_px)
    }
}

/// Synthesizes clicks and double-clicks from presses and releases
#[derive(Debug)]
pub struct ClickTracker {
    window: Duration,
    pressed: Option<Target>,
    last_click: Option<(Target, Instant)>,
}

impl ClickTracker {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pressed: None,
            last_click: None,
        }
    }

    pub fn press(&mut self, target: Target) {
        self.pressed = Some(target);
    }

    /// Record a release; returns the synthesized kinds in delivery order
    pub fn release(&mut self, target: Target, now: Instant) -> Vec<PointerKind> {
        let pressed = self.pressed.take();
        if target == Target::None || pressed != Some(target) {
            return Vec::new();
        }

        let mut kinds = vec![PointerKind::Click];
        match self.last_click {
            Some((previous, at))
                if previous == target && now.saturating_duration_since(at) <= self.window =>
            {
                kinds.push(PointerKind::DoubleClick);
                self.last_click = None;
            }
            _ => self.last_click = Some((target, now)),
        }
        kinds
    }
}

/// Mouse-to-pointer translation for the terminal host
#[derive(Debug)]
pub struct PointerTranslator {
    pub hits: HitMap,
    cell_px: u32,
    clicks: ClickTracker,
    /// Offset from cell centre to the grabbed edge, held until release
    grab_offset: i32,
}

impl PointerTranslator {
    pub fn new(cell_px: u32, double_click: Duration) -> Self {
        Self {
            hits: HitMap::default(),
            cell_px: cell_px.max(1),
            clicks: ClickTracker::new(double_click),
            grab_offset: 0,
        }
    }

    pub fn translate(&mut self, mouse: MouseEvent, now: Instant) -> Vec<PointerEvent> {
        let centre = self.hits.document_x(mouse.column, self.cell_px);
        let target = self.hits.target_at(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let x = self
                    .hits
                    .handle_edge(mouse.column, mouse.row)
                    .unwrap_or(centre);
                self.grab_offset = x.saturating_sub(centre);
                self.clicks.press(target);
                vec![PointerEvent::down(x, target)]
            }
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                let x = centre.saturating_add(self.grab_offset);
                vec![PointerEvent::new(PointerKind::Move, x, target)]
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let x = centre.saturating_add(self.grab_offset);
                self.grab_offset = 0;
                let mut events = vec![PointerEvent::new(PointerKind::Up, x, target)];
                events.extend(
                    self.clicks
                        .release(target, now)
                        .into_iter()
                        .map(|kind| PointerEvent::new(kind, x, target)),
                );
                events
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn header_map() -> HitMap {
        HitMap {
            canvas_x: 2,
            scroll_x: 0,
            headers: vec![
                HeaderHit {
                    row: 4,
                    start: 0,
                    end: 19,
                    right_px: 150,
                    column: ColumnRef::new(0, 0),
                },
                HeaderHit {
                    row: 4,
                    start: 19,
                    end: 34,
                    right_px: 270,
                    column: ColumnRef::new(0, 1),
                },
            ],
            buttons: vec![(Rect::new(2, 1, 24, 1), ControlButton::AutoSizeAll)],
        }
    }

    #[test]
    fn test_target_at_resolves_headers_and_buttons() {
        let map = header_map();

        assert_eq!(map.target_at(2, 4), Target::Header(ColumnRef::new(0, 0)));
        assert_eq!(map.target_at(20, 4), Target::Header(ColumnRef::new(0, 0)));
        assert_eq!(map.target_at(21, 4), Target::Header(ColumnRef::new(0, 1)));
        assert_eq!(map.target_at(36, 4), Target::None);
        assert_eq!(map.target_at(5, 5), Target::None);
        assert_eq!(map.target_at(0, 4), Target::None);
        assert_eq!(map.target_at(10, 1), Target::Control(ControlButton::AutoSizeAll));
    }

    #[test]
    fn test_document_x_accounts_for_scroll() {
        let mut map = header_map();
        assert_eq!(map.document_x(2, 8), 4);
        assert_eq!(map.document_x(20, 8), 18 * 8 + 4);

        map.scroll_x = 10;
        assert_eq!(map.document_x(2, 8), 84);
        assert_eq!(map.document_x(0, 8), 8 * 8 + 4);
    }

    #[test]
    fn test_handle_cell_grabs_right_edge() {
        // A 150px column drawn over round(150 / 8) = 19 cells, handle is cell 18
        let map = header_map();
        assert_eq!(map.handle_edge(2 + 18, 4), Some(150));
        assert_eq!(map.handle_edge(2 + 17, 4), None);
        assert_eq!(map.handle_edge(2 + 33, 4), Some(270));
        assert_eq!(map.handle_edge(2 + 18, 5), None);
    }

    #[test]
    fn test_press_release_on_same_target_clicks() {
        let now = Instant::now();
        let mut tracker = ClickTracker::new(Duration::from_millis(400));
        let button = Target::Control(ControlButton::ResetColumns);

        tracker.press(button);
        assert_eq!(tracker.release(button, now), vec![PointerKind::Click]);

        tracker.press(button);
        assert_eq!(tracker.release(Target::None, now), Vec::<PointerKind>::new());
    }

    #[test]
    fn test_second_click_in_window_is_double_click() {
        let start = Instant::now();
        let mut tracker = ClickTracker::new(Duration::from_millis(400));
        let header = Target::Header(ColumnRef::new(0, 2));

        tracker.press(header);
        tracker.release(header, start);
        tracker.press(header);
        assert_eq!(
            tracker.release(header, start + Duration::from_millis(250)),
            vec![PointerKind::Click, PointerKind::DoubleClick]
        );

        // A third click starts a new pair
        tracker.press(header);
        assert_eq!(
            tracker.release(header, start + Duration::from_millis(300)),
            vec![PointerKind::Click]
        );
    }

    #[test]
    fn test_slow_second_click_is_not_double_click() {
        let start = Instant::now();
        let mut tracker = ClickTracker::new(Duration::from_millis(400));
        let header = Target::Header(ColumnRef::new(0, 0));

        tracker.press(header);
        tracker.release(header, start);
        tracker.press(header);
        assert_eq!(
            tracker.release(header, start + Duration::from_millis(900)),
            vec![PointerKind::Click]
        );
    }

    #[test]
    fn test_translate_drag_sequence() {
        let mut translator = PointerTranslator::new(8, Duration::from_millis(400));
        translator.hits = header_map();
        let now = Instant::now();

        // Handle cell of the first column: the press lands on its edge
        let down = translator.translate(mouse(MouseEventKind::Down(MouseButton::Left), 20, 4), now);
        assert_eq!(
            down,
            vec![PointerEvent::new(
                PointerKind::Down,
                150,
                Target::Header(ColumnRef::new(0, 0))
            )]
        );

        // Moves keep the same offset from the cell centre (150 - 148)
        let drag = translator.translate(mouse(MouseEventKind::Drag(MouseButton::Left), 35, 9), now);
        assert_eq!(drag[0].kind, PointerKind::Move);
        assert_eq!(drag[0].x, 33 * 8 + 4 + 2);

        let up = translator.translate(mouse(MouseEventKind::Up(MouseButton::Left), 35, 9), now);
        assert_eq!(up.len(), 1);
        assert_eq!(up[0].kind, PointerKind::Up);
        assert_eq!(up[0].x, 33 * 8 + 4 + 2);

        // Offset is released with the button
        let moved = translator.translate(mouse(MouseEventKind::Moved, 35, 9), now);
        assert_eq!(moved[0].x, 33 * 8 + 4);
    }

    #[test]
    fn test_press_inside_header_uses_cell_centre() {
        let mut translator = PointerTranslator::new(8, Duration::from_millis(400));
        translator.hits = header_map();

        let down = translator.translate(
            mouse(MouseEventKind::Down(MouseButton::Left), 10, 4),
            Instant::now(),
        );
        assert_eq!(down[0].x, 8 * 8 + 4);
    }

    #[test]
    fn test_translate_ignores_other_buttons() {
        let mut translator = PointerTranslator::new(8, Duration::from_millis(400));
        let events = translator.translate(
            mouse(MouseEventKind::Down(MouseButton::Right), 3, 3),
            Instant::now(),
        );
        assert!(events.is_empty());
    }
}
