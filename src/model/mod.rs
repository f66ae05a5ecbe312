//! Model layer - document and interaction state
//!
//! This module contains the state-related types:
//! - `Document` - Tables, header cells and the injected control panel
//! - `PointerEvent` - Typed input delivered to the sizer
//! - `SessionState` - Drag-resize state machine

pub mod document;
pub mod pointer;
pub mod session;

// Re-export commonly used types
pub use document::{Cell, ColumnRef, ControlButton, ControlPanel, Document, Table};
pub use pointer::{PointerEvent, PointerKind, Target};
pub use session::{ResizeSession, SessionState};
