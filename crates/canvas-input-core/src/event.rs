//! Input event types.
//!
//! Events are immutable values. The "processed" bookkeeping a consumer needs
//! lives in [`QueuedEvent`], next to the payload rather than inside it, so a
//! freshly built event can serve directly as a pattern to match queued events
//! against.
//!
//! # Matching
//!
//! [`KeyEvent`] equality covers the key and the action. [`PointerEvent`] and
//! [`MotionEvent`] capture a position but compare by action only; use
//! [`InputEvent::matches`] with [`PointerMatching::ActionAndPosition`] when
//! the position must agree as well.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::key::Key;

/// A position on the canvas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Position {
    /// The origin.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Create a new position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// What happened to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// The key went down.
    Press,
    /// The key came back up.
    Release,
    /// The key produced text.
    Type,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key involved.
    pub key: Key,
    /// What happened to it.
    pub action: KeyAction,
}

impl KeyEvent {
    /// Create a new key event.
    pub const fn new(key: Key, action: KeyAction) -> Self {
        Self { key, action }
    }

    /// A press of `key`.
    pub const fn press(key: Key) -> Self {
        Self::new(key, KeyAction::Press)
    }

    /// A release of `key`.
    pub const fn release(key: Key) -> Self {
        Self::new(key, KeyAction::Release)
    }

    /// Text typed with `key`.
    pub const fn typed(key: Key) -> Self {
        Self::new(key, KeyAction::Type)
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.action, self.key)
    }
}

/// Pointer button actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerAction {
    /// A button was pressed and released in place.
    Click,
    /// A button went down.
    Down,
    /// A button came up.
    Up,
}

/// A pointer button event.
///
/// Equality and hashing consider the action only.
#[derive(Debug, Clone, Copy)]
pub struct PointerEvent {
    /// Where the pointer was.
    pub position: Position,
    /// What the button did.
    pub action: PointerAction,
}

impl PointerEvent {
    /// Create a new pointer event.
    pub const fn new(position: Position, action: PointerAction) -> Self {
        Self { position, action }
    }
}

impl PartialEq for PointerEvent {
    fn eq(&self, other: &Self) -> bool {
        self.action == other.action
    }
}

impl Eq for PointerEvent {}

impl Hash for PointerEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.action.hash(state);
    }
}

/// Pointer motion actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionAction {
    /// The pointer entered the canvas.
    Enter,
    /// The pointer left the canvas.
    Exit,
    /// The pointer moved with a button held.
    Drag,
    /// The pointer moved with no button held.
    Move,
}

/// A pointer motion event.
///
/// Equality and hashing consider the action only.
#[derive(Debug, Clone, Copy)]
pub struct MotionEvent {
    /// Where the pointer ended up.
    pub position: Position,
    /// What kind of motion it was.
    pub action: MotionAction,
}

impl MotionEvent {
    /// Create a new motion event.
    pub const fn new(position: Position, action: MotionAction) -> Self {
        Self { position, action }
    }
}

impl PartialEq for MotionEvent {
    fn eq(&self, other: &Self) -> bool {
        self.action == other.action
    }
}

impl Eq for MotionEvent {}

impl Hash for MotionEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.action.hash(state);
    }
}

/// Window lifecycle actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowAction {
    /// The window was first shown.
    Opened,
    /// The user asked to close the window.
    Closing,
    /// The window has been closed.
    Closed,
    /// The window was minimized.
    Iconified,
    /// The window was restored from minimized.
    Deiconified,
    /// The window gained focus.
    Activated,
    /// The window lost focus.
    Deactivated,
}

/// A window lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowEvent {
    /// What happened to the window.
    pub action: WindowAction,
}

impl WindowEvent {
    /// Create a new window event.
    pub const fn new(action: WindowAction) -> Self {
        Self { action }
    }
}

/// How pointer and motion events are compared when matching a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerMatching {
    /// Only the action has to agree.
    #[default]
    ActionOnly,
    /// The action and the position have to agree.
    ActionAndPosition,
}

/// The kind of an [`InputEvent`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A keyboard event.
    Key,
    /// A pointer button event.
    Pointer,
    /// A pointer motion event.
    Motion,
    /// A window lifecycle event.
    Window,
}

/// Any event the listener can queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// Keyboard.
    Key(KeyEvent),
    /// Pointer button.
    Pointer(PointerEvent),
    /// Pointer motion.
    Motion(MotionEvent),
    /// Window lifecycle.
    Window(WindowEvent),
}

impl InputEvent {
    /// The kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Key(_) => EventKind::Key,
            Self::Pointer(_) => EventKind::Pointer,
            Self::Motion(_) => EventKind::Motion,
            Self::Window(_) => EventKind::Window,
        }
    }

    /// The keyboard payload, if this is a key event.
    pub fn as_key(&self) -> Option<&KeyEvent> {
        match self {
            Self::Key(e) => Some(e),
            _ => None,
        }
    }

    /// The pointer payload, if this is a pointer event.
    pub fn as_pointer(&self) -> Option<&PointerEvent> {
        match self {
            Self::Pointer(e) => Some(e),
            _ => None,
        }
    }

    /// The motion payload, if this is a motion event.
    pub fn as_motion(&self) -> Option<&MotionEvent> {
        match self {
            Self::Motion(e) => Some(e),
            _ => None,
        }
    }

    /// The window payload, if this is a window event.
    pub fn as_window(&self) -> Option<&WindowEvent> {
        match self {
            Self::Window(e) => Some(e),
            _ => None,
        }
    }

    /// The position carried by pointer and motion events.
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::Pointer(e) => Some(e.position),
            Self::Motion(e) => Some(e.position),
            _ => None,
        }
    }

    /// Check whether this event matches `pattern` under the given policy.
    pub fn matches(&self, pattern: &InputEvent, policy: PointerMatching) -> bool {
        if self != pattern {
            return false;
        }
        match policy {
            PointerMatching::ActionOnly => true,
            PointerMatching::ActionAndPosition => self.position() == pattern.position(),
        }
    }
}

impl From<KeyEvent> for InputEvent {
    fn from(event: KeyEvent) -> Self {
        Self::Key(event)
    }
}

impl From<PointerEvent> for InputEvent {
    fn from(event: PointerEvent) -> Self {
        Self::Pointer(event)
    }
}

impl From<MotionEvent> for InputEvent {
    fn from(event: MotionEvent) -> Self {
        Self::Motion(event)
    }
}

impl From<WindowEvent> for InputEvent {
    fn from(event: WindowEvent) -> Self {
        Self::Window(event)
    }
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(e) => write!(f, "key {e}"),
            Self::Pointer(e) => write!(f, "pointer {:?} at {}", e.action, e.position),
            Self::Motion(e) => write!(f, "motion {:?} to {}", e.action, e.position),
            Self::Window(e) => write!(f, "window {:?}", e.action),
        }
    }
}

/// An event waiting in the listener's queue.
#[derive(Debug, Clone, Copy)]
pub struct QueuedEvent {
    event: InputEvent,
    processed: bool,
}

impl QueuedEvent {
    /// Wrap a fresh, unprocessed event.
    pub fn new(event: InputEvent) -> Self {
        Self {
            event,
            processed: false,
        }
    }

    /// The event payload.
    pub fn event(&self) -> &InputEvent {
        &self.event
    }

    /// Check if a consumer has already handled this event.
    pub fn is_processed(&self) -> bool {
        self.processed
    }

    /// Mark the event as handled.
    pub fn mark_processed(&mut self) {
        self.processed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_event_equality() {
        assert_eq!(KeyEvent::press(Key::A), KeyEvent::new(Key::A, KeyAction::Press));
        assert_ne!(KeyEvent::press(Key::A), KeyEvent::release(Key::A));
        assert_ne!(KeyEvent::press(Key::A), KeyEvent::press(Key::B));
    }

    #[test]
    fn test_pointer_equality_ignores_position() {
        let a = PointerEvent::new(Position::new(1, 2), PointerAction::Click);
        let b = PointerEvent::new(Position::new(30, 40), PointerAction::Click);
        let c = PointerEvent::new(Position::new(1, 2), PointerAction::Down);
        assert_eq!(a, b);
        assert_ne!(a, c);

        let m1 = MotionEvent::new(Position::new(0, 0), MotionAction::Drag);
        let m2 = MotionEvent::new(Position::new(9, 9), MotionAction::Drag);
        assert_eq!(m1, m2);
    }

    #[test]
    fn test_matches_with_position_policy() {
        let queued = InputEvent::from(PointerEvent::new(Position::new(5, 5), PointerAction::Up));
        let elsewhere = InputEvent::from(PointerEvent::new(Position::new(6, 5), PointerAction::Up));
        let same = InputEvent::from(PointerEvent::new(Position::new(5, 5), PointerAction::Up));

        assert!(queued.matches(&elsewhere, PointerMatching::ActionOnly));
        assert!(!queued.matches(&elsewhere, PointerMatching::ActionAndPosition));
        assert!(queued.matches(&same, PointerMatching::ActionAndPosition));
    }

    #[test]
    fn test_matches_across_kinds() {
        let key = InputEvent::from(KeyEvent::press(Key::Space));
        let window = InputEvent::from(WindowEvent::new(WindowAction::Opened));
        assert!(!key.matches(&window, PointerMatching::ActionOnly));
        let same_key = InputEvent::from(KeyEvent::press(Key::Space));
        assert!(key.matches(&same_key, PointerMatching::ActionAndPosition));
    }

    #[test]
    fn test_payload_accessors() {
        let pointer = InputEvent::from(PointerEvent::new(Position::new(2, 3), PointerAction::Down));
        let motion = InputEvent::from(MotionEvent::new(Position::new(4, 5), MotionAction::Exit));
        let window = InputEvent::from(WindowEvent::new(WindowAction::Iconified));

        assert_eq!(pointer.as_pointer().map(|e| e.action), Some(PointerAction::Down));
        assert!(pointer.as_motion().is_none());
        assert_eq!(motion.as_motion().map(|e| e.position), Some(Position::new(4, 5)));
        assert!(motion.as_window().is_none());
        assert_eq!(window.as_window().map(|e| e.action), Some(WindowAction::Iconified));
        assert!(window.as_pointer().is_none());
        assert_eq!(window.position(), None);
        assert_eq!(
            [pointer.kind(), motion.kind(), window.kind()],
            [EventKind::Pointer, EventKind::Motion, EventKind::Window]
        );
    }

    #[test]
    fn test_queued_event_processed_flag() {
        let mut queued = QueuedEvent::new(InputEvent::from(KeyEvent::typed(Key::X)));
        assert!(!queued.is_processed());
        queued.mark_processed();
        assert!(queued.is_processed());
        assert_eq!(queued.event().kind(), EventKind::Key);
    }
}
