//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use crate::model::PointerEvent;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for time-based updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit the application
    Quit,
    /// Reload documents from disk and re-attach the sizer
    Reload,

    // ─────────────────────────────────────────────────────────────────────────
    // Scrolling
    // ─────────────────────────────────────────────────────────────────────────
    /// Scroll the tables up one line
    ScrollUp,
    /// Scroll the tables down one line
    ScrollDown,
    /// Scroll the tables left one cell
    ScrollLeft,
    /// Scroll the tables right one cell
    ScrollRight,
    /// Scroll up one page
    PageUp,
    /// Scroll down one page
    PageDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Column Sizing
    // ─────────────────────────────────────────────────────────────────────────
    /// Auto-size every column in the document
    AutoSizeAll,
    /// Clear every explicit column width
    ResetColumns,
    /// Pointer input for the table sizer
    Pointer(PointerEvent),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::Quit => write!(f, "Quit"),
            Action::Reload => write!(f, "Reload"),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
            Action::ScrollLeft => write!(f, "ScrollLeft"),
            Action::ScrollRight => write!(f, "ScrollRight"),
            Action::PageUp => write!(f, "PageUp"),
            Action::PageDown => write!(f, "PageDown"),
            Action::AutoSizeAll => write!(f, "AutoSizeAll"),
            Action::ResetColumns => write!(f, "ResetColumns"),
            Action::Pointer(event) => write!(f, "Pointer({:?} at {})", event.kind, event.x),
        }
    }
}
