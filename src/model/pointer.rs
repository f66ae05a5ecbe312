//! Pointer events as seen by the table sizer
//!
//! Hosts translate their native input (terminal mouse reports, test scripts)
//! into these typed events. `x` is in document pixels.

use super::document::{ColumnRef, ControlButton};

/// Kind of pointer signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    /// Press and release over the same target
    Click,
    DoubleClick,
}

/// Element under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Header(ColumnRef),
    Control(ControlButton),
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: i32,
    pub target: Target,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: i32, target: Target) -> Self {
        Self { kind, x, target }
    }

    pub fn down(x: i32, target: Target) -> Self {
        Self::new(PointerKind::Down, x, target)
    }

    #[cfg(test)]
    pub fn moved(x: i32) -> Self {
        Self::new(PointerKind::Move, x, Target::None)
    }

    #[cfg(test)]
    pub fn up(x: i32) -> Self {
        Self::new(PointerKind::Up, x, Target::None)
    }

    #[cfg(test)]
    pub fn click(target: Target) -> Self {
        Self::new(PointerKind::Click, 0, target)
    }

    #[cfg(test)]
    pub fn double_click(x: i32, target: Target) -> Self {
        Self::new(PointerKind::DoubleClick, x, target)
    }
}
