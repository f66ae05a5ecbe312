//! Input surface - the host capability the sizer subscribes to
//!
//! The sizer never talks to a windowing API directly. It registers interest in
//! `(scope, kind)` pairs on an `InputSurface` and only reacts to events that
//! match a registration, the way DOM listeners only fire for the element they
//! were attached to.

use crate::model::{ColumnRef, ControlButton, PointerEvent, PointerKind, Target};
use std::collections::HashSet;

/// What a listener is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerScope {
    /// Fires for any event, wherever the pointer is
    Document,
    Header(ColumnRef),
    Control(ControlButton),
}

/// Set of active `(scope, kind)` registrations
#[derive(Debug, Default, Clone)]
pub struct ListenerRegistry {
    listeners: HashSet<(ListenerScope, PointerKind)>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; returns false if it was already registered
    pub fn register(&mut self, scope: ListenerScope, kind: PointerKind) -> bool {
        self.listeners.insert((scope, kind))
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn contains(&self, scope: ListenerScope, kind: PointerKind) -> bool {
        self.listeners.contains(&(scope, kind))
    }

    /// Whether some registration matches the event
    pub fn wants(&self, event: &PointerEvent) -> bool {
        if self.contains(ListenerScope::Document, event.kind) {
            return true;
        }
        let scope = match event.target {
            Target::Header(column) => ListenerScope::Header(column),
            Target::Control(button) => ListenerScope::Control(button),
            Target::None => return false,
        };
        self.contains(scope, event.kind)
    }
}

/// Host-side capability consumed by the table sizer
pub trait InputSurface {
    fn listeners(&self) -> &ListenerRegistry;

    fn listeners_mut(&mut self) -> &mut ListenerRegistry;

    /// Enable or suppress text selection for the whole surface
    fn set_text_selection(&mut self, enabled: bool);

    fn listen(&mut self, scope: ListenerScope, kind: PointerKind) -> bool {
        self.listeners_mut().register(scope, kind)
    }

    fn clear_listeners(&mut self) {
        self.listeners_mut().clear();
    }
}
