//! Raw input vocabulary and the producer side of the pipeline.
//!
//! Platform layers report what happened through an [`InputSink`]. The sink
//! can be the [`InputListener`](crate::InputListener) itself, when the
//! platform delivers callbacks on the same thread that polls for events, or an
//! [`InputProducer`], a cloneable channel handle that can be moved to whatever
//! thread the platform calls back on. Input sent through a producer sits in
//! the channel until the listener is pumped at the start of the next tick.

use std::sync::{Arc, Weak};

use crossbeam_channel::{Sender, TrySendError};

use crate::error::{InputError, Result};
use crate::event::{Position, WindowAction};
use crate::key::Key;
use crate::logging::targets;

/// A raw callback from the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawInput {
    /// A key went down (possibly an auto-repeat).
    KeyDown(Key),
    /// A key came up.
    KeyUp(Key),
    /// A key produced text.
    KeyTyped(Key),
    /// A pointer button went down.
    PointerDown(Position),
    /// A pointer button came up.
    PointerUp(Position),
    /// A pointer button was clicked.
    PointerClick(Position),
    /// The pointer entered the canvas.
    PointerEnter(Position),
    /// The pointer left the canvas.
    PointerExit(Position),
    /// The pointer moved with a button held.
    PointerDrag(Position),
    /// The pointer moved.
    PointerMove(Position),
    /// Something happened to the window.
    Window(WindowAction),
}

/// Anything that accepts raw platform input.
///
/// Implementors only provide [`push`](InputSink::push); the remaining methods
/// are the named callbacks a platform adapter calls.
pub trait InputSink {
    /// Accept one raw input.
    fn push(&mut self, input: RawInput);

    /// A key went down.
    fn key_down(&mut self, key: Key) {
        self.push(RawInput::KeyDown(key));
    }

    /// A key came up.
    fn key_up(&mut self, key: Key) {
        self.push(RawInput::KeyUp(key));
    }

    /// A key produced text.
    fn key_typed(&mut self, key: Key) {
        self.push(RawInput::KeyTyped(key));
    }

    /// A pointer button went down at `position`.
    fn pointer_down(&mut self, position: Position) {
        self.push(RawInput::PointerDown(position));
    }

    /// A pointer button came up at `position`.
    fn pointer_up(&mut self, position: Position) {
        self.push(RawInput::PointerUp(position));
    }

    /// A pointer button was clicked at `position`.
    fn pointer_click(&mut self, position: Position) {
        self.push(RawInput::PointerClick(position));
    }

    /// The pointer entered the canvas at `position`.
    fn pointer_enter(&mut self, position: Position) {
        self.push(RawInput::PointerEnter(position));
    }

    /// The pointer left the canvas at `position`.
    fn pointer_exit(&mut self, position: Position) {
        self.push(RawInput::PointerExit(position));
    }

    /// The pointer was dragged to `position`.
    fn pointer_drag(&mut self, position: Position) {
        self.push(RawInput::PointerDrag(position));
    }

    /// The pointer moved to `position`.
    fn pointer_move(&mut self, position: Position) {
        self.push(RawInput::PointerMove(position));
    }

    /// The window was opened.
    fn window_opened(&mut self) {
        self.push(RawInput::Window(WindowAction::Opened));
    }

    /// The window is being closed.
    fn window_closing(&mut self) {
        self.push(RawInput::Window(WindowAction::Closing));
    }

    /// The window was closed.
    fn window_closed(&mut self) {
        self.push(RawInput::Window(WindowAction::Closed));
    }

    /// The window was minimized.
    fn window_iconified(&mut self) {
        self.push(RawInput::Window(WindowAction::Iconified));
    }

    /// The window was restored.
    fn window_deiconified(&mut self) {
        self.push(RawInput::Window(WindowAction::Deiconified));
    }

    /// The window gained focus.
    fn window_activated(&mut self) {
        self.push(RawInput::Window(WindowAction::Activated));
    }

    /// The window lost focus.
    fn window_deactivated(&mut self) {
        self.push(RawInput::Window(WindowAction::Deactivated));
    }
}

/// A thread-safe handle for sending raw input to a listener.
///
/// Obtained from [`InputListener::producer`](crate::InputListener::producer).
/// Clones share the same channel.
#[derive(Debug, Clone)]
pub struct InputProducer {
    sender: Sender<RawInput>,
    capacity: Option<usize>,
    name: Arc<str>,
    /// Dies with the listener.
    alive: Weak<()>,
}

impl InputProducer {
    pub(crate) fn new(
        sender: Sender<RawInput>,
        capacity: Option<usize>,
        name: Arc<str>,
        alive: Weak<()>,
    ) -> Self {
        Self {
            sender,
            capacity,
            name,
            alive,
        }
    }

    /// Send raw input to the listener.
    ///
    /// Never fails the caller. If the listener is gone or the channel is full
    /// the input is dropped and a warning is logged.
    pub fn push(&self, input: RawInput) {
        if let Err(err) = self.try_push(input) {
            tracing::warn!(
                target: targets::PRODUCER,
                listener = %self.name,
                ?input,
                "{err}"
            );
        }
    }

    /// Send raw input to the listener, reporting why it could not be queued.
    pub fn try_push(&self, input: RawInput) -> Result<()> {
        match self.sender.try_send(input) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(InputError::QueueFull {
                capacity: self.capacity.unwrap_or_default(),
            }),
            Err(TrySendError::Disconnected(_)) => Err(InputError::ListenerDropped),
        }
    }

    /// Get the number of raw inputs waiting to be pumped.
    pub fn pending(&self) -> usize {
        self.sender.len()
    }

    /// Check if the listener behind this producer still exists.
    pub fn is_connected(&self) -> bool {
        self.alive.strong_count() > 0
    }
}

impl InputSink for InputProducer {
    fn push(&mut self, input: RawInput) {
        InputProducer::push(self, input);
    }
}

static_assertions::assert_impl_all!(InputProducer: Send, Sync, Clone);
static_assertions::assert_impl_all!(RawInput: Send, Sync, Copy);
