//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that owns the document and the table sizer and delegates rendering to
//! child components.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    calculate_main_layout, draw_help, draw_status, ControlBar, TableRenderContext, TableView,
};
use crate::config::Config;
use crate::input::{PointerTranslator, TerminalSurface};
use crate::model::{Document, PointerEvent, PointerKind, Target};
use crate::services::{self, CellMeasure, SizerOutcome, TableSizer};
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{layout::Rect, Frame};
use std::path::PathBuf;
use std::time::{Duration, Instant};

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    pub config: Config,

    /// Documents the page was built from (empty for the built-in sample)
    pub paths: Vec<PathBuf>,

    /// The page being sized
    pub document: Document,

    pub sizer: TableSizer,
    pub surface: TerminalSurface,
    pub pointer: PointerTranslator,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message to display
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub table_view: TableView,
    pub control_bar: ControlBar,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Create a new App, loading the documents at `paths`
    pub fn new(config: Config, paths: Vec<PathBuf>) -> Result<App> {
        let document = Self::load(&config, &paths)?;

        Ok(App {
            sizer: TableSizer::from_config(&config),
            surface: TerminalSurface::default(),
            pointer: PointerTranslator::new(
                config.cell_px,
                Duration::from_millis(config.double_click_ms),
            ),
            config,
            paths,
            document,
            should_quit: false,
            error: None,
            status_message: None,
            table_view: TableView::new(),
            control_bar: ControlBar::default(),
        })
    }

    fn load(config: &Config, paths: &[PathBuf]) -> Result<Document> {
        let measure = CellMeasure::new(config.cell_px);
        services::load_document(paths, &config.container_marker, &measure)
            .context("Failed to load documents")
    }

    /// Wire the sizer to the current document and report what it found
    fn attach(&mut self) {
        let report = self.sizer.attach(&mut self.document, &mut self.surface);

        self.error = report
            .diagnostics
            .first()
            .map(|diag| match report.diagnostics.len() {
                1 => diag.to_string(),
                n => format!("{} (and {} more)", diag, n - 1),
            });

        self.status_message = Some(match report.controls {
            Ok(()) => format!(
                "{} columns in {} tables",
                report.columns,
                self.document.tables.len()
            ),
            Err(err) => err.to_string(),
        });
    }

    /// Re-read the documents from disk and attach again
    fn reload(&mut self) {
        match Self::load(&self.config, &self.paths) {
            Ok(document) => {
                log::info!("Reloaded {} tables", document.tables.len());
                self.document = document;
                self.attach();
            }
            Err(err) => {
                log::warn!("Reload failed: {:#}", err);
                self.error = Some(format!("{:#}", err));
            }
        }
    }

    fn handle_pointer(&mut self, event: PointerEvent) {
        match (event.kind, event.target) {
            (PointerKind::Down, Target::Control(button)) => self.control_bar.pressed = Some(button),
            (PointerKind::Up, _) => self.control_bar.pressed = None,
            _ => {}
        }

        let outcome = self
            .sizer
            .handle_pointer(&mut self.document, &mut self.surface, event);
        if let Some(message) = describe(&self.document, outcome) {
            self.status_message = Some(message);
        }
    }

    /// Status line text while a column is being dragged
    fn session_status(&self) -> Option<String> {
        let session = self.sizer.state().session()?;
        let table = self.document.tables.get(session.target.table)?;
        let header = table.headers.get(session.target.column)?;
        let width = table.current_width(session.target.column, self.config.sizing.cell_padding)?;
        Some(format!("Resizing '{}' in {}: {}px", header.text(), table.id, width))
    }
}

/// Human-readable status for a sizer outcome
fn describe(doc: &Document, outcome: SizerOutcome) -> Option<String> {
    let header_name = |column| {
        doc.header(column)
            .map(|h| h.text().to_string())
            .unwrap_or_default()
    };
    match outcome {
        SizerOutcome::Ignored | SizerOutcome::SessionStarted(_) | SizerOutcome::Resized { .. } => {
            None
        }
        SizerOutcome::SessionEnded(column) => {
            let width = doc.header(column).and_then(|h| h.width)?;
            Some(format!("'{}' set to {}px", header_name(column), width))
        }
        SizerOutcome::AutoSized { column, width } => {
            Some(format!("Auto-sized '{}' to {}px", header_name(column), width))
        }
        SizerOutcome::AutoSizedAll(count) => Some(format!("Auto-sized {} columns", count)),
        SizerOutcome::Reset(count) => Some(format!("Reset {} column widths", count)),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        self.attach();
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('a') => Some(Action::AutoSizeAll),
            KeyCode::Char('r') => Some(Action::ResetColumns),
            KeyCode::F(5) => Some(Action::Reload),
            _ => return self.table_view.handle_key_event(key),
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Vec<Action>> {
        let actions = match mouse.kind {
            MouseEventKind::ScrollDown => vec![Action::ScrollDown],
            MouseEventKind::ScrollUp => vec![Action::ScrollUp],
            MouseEventKind::ScrollRight => vec![Action::ScrollRight],
            MouseEventKind::ScrollLeft => vec![Action::ScrollLeft],
            _ => self
                .pointer
                .translate(mouse, Instant::now())
                .into_iter()
                .map(Action::Pointer)
                .collect(),
        };
        Ok(actions)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick | Action::Resize(_, _) => {}
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Reload => self.reload(),

            // ─────────────────────────────────────────────────────────────────
            // Scrolling (delegate to TableView)
            // ─────────────────────────────────────────────────────────────────
            Action::ScrollUp
            | Action::ScrollDown
            | Action::ScrollLeft
            | Action::ScrollRight
            | Action::PageUp
            | Action::PageDown => {
                self.table_view.update(action)?;
            }

            // ─────────────────────────────────────────────────────────────────
            // Column Sizing
            // ─────────────────────────────────────────────────────────────────
            Action::AutoSizeAll => {
                let count = self.sizer.auto_size_all(&mut self.document);
                self.status_message = describe(&self.document, SizerOutcome::AutoSizedAll(count));
            }
            Action::ResetColumns => {
                let count = self.sizer.reset_all(&mut self.document);
                self.status_message = describe(&self.document, SizerOutcome::Reset(count));
            }
            Action::Pointer(event) => self.handle_pointer(event),
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = calculate_main_layout(area);

        self.control_bar.render(
            frame,
            layout.controls,
            self.document.control_panel.as_ref(),
            !self.surface.text_selection(),
            &mut self.pointer.hits,
        );

        let ctx = TableRenderContext {
            document: &self.document,
            session: self.sizer.state(),
            cell_padding: self.config.sizing.cell_padding,
            cell_px: self.config.cell_px,
        };
        self.table_view
            .render(frame, layout.tables, &ctx, &mut self.pointer.hits);

        let session = self.session_status();
        let message = session.as_deref().or(self.status_message.as_deref());
        draw_status(frame, layout.status, self.error.as_deref(), message);
        draw_help(frame, layout.help);
        Ok(())
    }
}
