//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod controls;
pub mod layout;
pub mod status;
pub mod table;

pub use controls::ControlBar;
pub use layout::calculate_main_layout;
pub use status::{draw_help, draw_status};
pub use table::{TableRenderContext, TableView};
