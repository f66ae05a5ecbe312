//! Services behind the UI
//!
//! This module contains:
//! - The interactive table sizer (resize, auto-size, reset)
//! - The input surface abstraction it subscribes to
//! - Content measurement
//! - Document loading

pub mod loader;
pub mod measure;
pub mod sizer;
pub mod surface;

pub use loader::load_document;
pub use measure::CellMeasure;
pub use sizer::{SizerOutcome, TableSizer};
pub use surface::{InputSurface, ListenerRegistry};
