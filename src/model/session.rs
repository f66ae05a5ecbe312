//! Resize session state machine

use super::document::ColumnRef;

/// Captured state of an in-progress drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSession {
    pub target: ColumnRef,
    pub start_x: i32,
    pub start_width: u32,
}

impl ResizeSession {
    /// Width the drag asks for at pointer position `x`, before any clamping
    pub fn requested_width(&self, x: i32) -> i64 {
        i64::from(self.start_width) + i64::from(x) - i64::from(self.start_x)
    }
}

/// Idle, or resizing one column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Resizing(ResizeSession),
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Resizing(_))
    }

    pub fn session(&self) -> Option<&ResizeSession> {
        match self {
            SessionState::Resizing(session) => Some(session),
            SessionState::Idle => None,
        }
    }

    /// Start a session, replacing any session already in progress
    pub fn begin(&mut self, session: ResizeSession) -> Option<ResizeSession> {
        let previous = self.session().copied();
        *self = SessionState::Resizing(session);
        previous
    }

    /// End the session, returning it if one was active
    pub fn end(&mut self) -> Option<ResizeSession> {
        let previous = self.session().copied();
        *self = SessionState::Idle;
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(start_x: i32, start_width: u32) -> ResizeSession {
        ResizeSession {
            target: ColumnRef::new(0, 0),
            start_x,
            start_width,
        }
    }

    #[test]
    fn test_requested_width_follows_pointer_delta() {
        let s = session(200, 150);
        assert_eq!(s.requested_width(320), 270);
        assert_eq!(s.requested_width(100), 50);
        assert_eq!(s.requested_width(-1000), -1050);
    }

    #[test]
    fn test_begin_overwrites_previous_session() {
        let mut state = SessionState::default();
        assert!(!state.is_active());

        assert_eq!(state.begin(session(10, 100)), None);
        let replaced = state.begin(session(50, 200));
        assert_eq!(replaced, Some(session(10, 100)));
        assert_eq!(state.session(), Some(&session(50, 200)));
    }

    #[test]
    fn test_end_returns_to_idle() {
        let mut state = SessionState::default();
        assert_eq!(state.end(), None);

        state.begin(session(10, 100));
        assert_eq!(state.end(), Some(session(10, 100)));
        assert_eq!(state, SessionState::Idle);
    }
}
