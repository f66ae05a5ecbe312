//! Interactive table sizer
//!
//! Owns the resize session and applies drag, auto-size and reset operations
//! to a `Document`. Input arrives through an `InputSurface`; every handler
//! runs to completion before the next event, so no locking is involved.

use crate::config::{Config, SizingConfig};
use crate::error::{ShapeDiagnostic, SizerError};
use crate::model::{
    ColumnRef, ControlButton, ControlPanel, Document, PointerEvent, PointerKind, ResizeSession,
    SessionState, Target,
};
use crate::services::surface::{InputSurface, ListenerScope};

/// Result of wiring the sizer to a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachReport {
    /// Number of header cells that received listeners
    pub columns: usize,
    /// Rows whose cell count does not match their table's header count
    pub diagnostics: Vec<ShapeDiagnostic>,
    /// Outcome of inserting the control panel
    pub controls: Result<(), SizerError>,
}

/// Observable effect of a handled event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizerOutcome {
    /// No listener matched, or the event did not qualify
    Ignored,
    SessionStarted(ColumnRef),
    Resized { column: ColumnRef, width: u32 },
    SessionEnded(ColumnRef),
    AutoSized { column: ColumnRef, width: u32 },
    AutoSizedAll(usize),
    Reset(usize),
}

/// Drag-resize state machine plus the bulk width operations
#[derive(Debug, Clone)]
pub struct TableSizer {
    sizing: SizingConfig,
    container_marker: String,
    state: SessionState,
}

impl TableSizer {
    pub fn new(sizing: SizingConfig, container_marker: impl Into<String>) -> Self {
        Self {
            sizing,
            container_marker: container_marker.into(),
            state: SessionState::Idle,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.sizing, config.container_marker.clone())
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[cfg(test)]
    pub fn is_resizing(&self) -> bool {
        self.state.is_active()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Initialization
    // ─────────────────────────────────────────────────────────────────────────

    /// Register listeners for every header cell and inject the control panel
    ///
    /// Safe to call again after the document changed: previous registrations
    /// are dropped, an active session is ended, and an existing panel is kept.
    pub fn attach(&mut self, doc: &mut Document, surface: &mut dyn InputSurface) -> AttachReport {
        if self.state.is_active() {
            self.state.end();
            surface.set_text_selection(true);
        }
        surface.clear_listeners();

        let columns = doc.columns();
        for column in &columns {
            surface.listen(ListenerScope::Header(*column), PointerKind::Down);
            surface.listen(ListenerScope::Header(*column), PointerKind::DoubleClick);
        }
        surface.listen(ListenerScope::Document, PointerKind::Move);
        surface.listen(ListenerScope::Document, PointerKind::Up);

        let diagnostics = validate_shape(doc);
        for diag in &diagnostics {
            log::warn!("{}", diag);
        }

        let controls = self.inject_controls(doc, surface);
        if let Err(err) = &controls {
            log::warn!("{}", err);
        }

        log::info!(
            "Attached to {} tables, {} header cells",
            doc.tables.len(),
            columns.len()
        );

        AttachReport {
            columns: columns.len(),
            diagnostics,
            controls,
        }
    }

    /// Insert the control panel into the marked container
    fn inject_controls(
        &self,
        doc: &mut Document,
        surface: &mut dyn InputSurface,
    ) -> Result<(), SizerError> {
        if !doc.has_container(&self.container_marker) {
            return Err(SizerError::MissingContainer {
                marker: self.container_marker.clone(),
            });
        }

        if doc.control_panel.is_none() {
            doc.control_panel = Some(ControlPanel {
                container: self.container_marker.clone(),
                buttons: ControlButton::all().to_vec(),
            });
        }

        for button in ControlButton::all() {
            surface.listen(ListenerScope::Control(button), PointerKind::Click);
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Event dispatch
    // ─────────────────────────────────────────────────────────────────────────

    /// Handle one pointer event delivered by the surface
    pub fn handle_pointer(
        &mut self,
        doc: &mut Document,
        surface: &mut dyn InputSurface,
        event: PointerEvent,
    ) -> SizerOutcome {
        if !surface.listeners().wants(&event) {
            return SizerOutcome::Ignored;
        }

        match (event.kind, event.target) {
            (PointerKind::Down, Target::Header(column)) => {
                self.begin_resize(doc, surface, column, event.x)
            }
            (PointerKind::Move, _) => self.drag_to(doc, event.x),
            (PointerKind::Up, _) => self.end_resize(surface),
            (PointerKind::DoubleClick, Target::Header(column)) => {
                match self.auto_size(doc, column) {
                    Some(width) => SizerOutcome::AutoSized { column, width },
                    None => SizerOutcome::Ignored,
                }
            }
            (PointerKind::Click, Target::Control(ControlButton::AutoSizeAll)) => {
                SizerOutcome::AutoSizedAll(self.auto_size_all(doc))
            }
            (PointerKind::Click, Target::Control(ControlButton::ResetColumns)) => {
                SizerOutcome::Reset(self.reset_all(doc))
            }
            _ => SizerOutcome::Ignored,
        }
    }

    fn begin_resize(
        &mut self,
        doc: &Document,
        surface: &mut dyn InputSurface,
        column: ColumnRef,
        x: i32,
    ) -> SizerOutcome {
        let Some(table) = doc.tables.get(column.table) else {
            return SizerOutcome::Ignored;
        };
        let padding = self.sizing.cell_padding;
        let (Some((left, right)), Some(width)) = (
            table.column_span(column.column, padding),
            table.current_width(column.column, padding),
        ) else {
            return SizerOutcome::Ignored;
        };

        if !self.sizing.hit_zone.contains(x, left, right) {
            return SizerOutcome::Ignored;
        }

        let replaced = self.state.begin(ResizeSession {
            target: column,
            start_x: x,
            start_width: width,
        });
        if let Some(previous) = replaced {
            log::debug!("Resize of {} replaced by {}", previous.target, column);
        }
        surface.set_text_selection(false);
        log::debug!("Resize started on {} at x={} width={}", column, x, width);

        SizerOutcome::SessionStarted(column)
    }

    fn drag_to(&mut self, doc: &mut Document, x: i32) -> SizerOutcome {
        let Some(session) = self.state.session().copied() else {
            return SizerOutcome::Ignored;
        };

        let requested = session.requested_width(x);
        let width = requested
            .max(i64::from(self.sizing.min_width))
            .min(i64::from(u32::MAX)) as u32;

        match doc.header_mut(session.target) {
            Some(header) => {
                header.width = Some(width);
                SizerOutcome::Resized {
                    column: session.target,
                    width,
                }
            }
            None => SizerOutcome::Ignored,
        }
    }

    fn end_resize(&mut self, surface: &mut dyn InputSurface) -> SizerOutcome {
        match self.state.end() {
            Some(session) => {
                surface.set_text_selection(true);
                log::debug!("Resize ended on {}", session.target);
                SizerOutcome::SessionEnded(session.target)
            }
            None => SizerOutcome::Ignored,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Bulk operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Fit a column to its widest content, returning the applied width
    pub fn auto_size(&self, doc: &mut Document, column: ColumnRef) -> Option<u32> {
        let widest = doc.tables.get(column.table)?.widest_content(column.column)?;
        let width = self
            .sizing
            .clamp_auto(widest.saturating_add(self.sizing.auto_size_padding));

        let header = doc.header_mut(column)?;
        header.width = Some(width);
        log::debug!("Auto-sized {} to {}px", column, width);
        Some(width)
    }

    /// Auto-size every column of every table, one column at a time
    pub fn auto_size_all(&self, doc: &mut Document) -> usize {
        let sized = doc
            .columns()
            .into_iter()
            .filter_map(|column| self.auto_size(doc, column))
            .count();
        log::info!("Auto-sized {} columns", sized);
        sized
    }

    /// Clear every explicit width, returning how many were set
    pub fn reset_all(&self, doc: &mut Document) -> usize {
        let mut cleared = 0;
        for header in doc.tables.iter_mut().flat_map(|t| t.headers.iter_mut()) {
            if header.width.take().is_some() {
                cleared += 1;
            }
        }
        log::info!("Reset {} column widths", cleared);
        cleared
    }
}

/// Check that every body row lines up with its table's header cells
pub fn validate_shape(doc: &Document) -> Vec<ShapeDiagnostic> {
    doc.tables
        .iter()
        .flat_map(|table| {
            table.mismatched_rows().map(|(row, found)| ShapeDiagnostic {
                table_id: table.id.clone(),
                row,
                expected: table.column_count(),
                found,
            })
        })
        .collect()
}
