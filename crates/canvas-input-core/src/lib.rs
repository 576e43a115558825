//! Core input pipeline for canvas-input.
//!
//! This crate turns raw platform input into a queue of events a game or UI
//! loop can poll:
//!
//! - **Key/Event Model**: [`Key`], [`KeyEvent`], [`PointerEvent`],
//!   [`MotionEvent`], [`WindowEvent`] and the [`InputEvent`] union
//! - **Input Tasks**: key patterns bound to callbacks that intercept events
//!   before they are queued
//! - **Listener**: edge detection over key state, task dispatch, the pending
//!   event queue and its query/consume API
//! - **Producers**: thread-safe handles that feed raw input to a listener,
//!   drained once per tick with [`InputListener::pump`]
//!
//! The crate has no windowing dependency. Platform adapters talk to it through
//! the [`InputSink`] trait.
//!
//! # Example
//!
//! ```
//! use canvas_input_core::{InputListener, InputSink, InputTask, Key, KeyAction, KeyEvent};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//!
//! let mut listener = InputListener::new();
//!
//! // Escape pauses the game as soon as it is pressed.
//! let paused = Arc::new(AtomicBool::new(false));
//! let flag = paused.clone();
//! listener.add_task(InputTask::new(KeyEvent::press(Key::Escape), move || {
//!     flag.store(true, Ordering::SeqCst);
//! }));
//!
//! // Platform adapter side.
//! listener.key_down(Key::Escape);
//! listener.key_down(Key::Space);
//!
//! // Game loop side.
//! assert!(paused.load(Ordering::SeqCst));
//! let mut jumps = 0;
//! listener.check_for_key_stroke(Key::Space, KeyAction::Press, || jumps += 1);
//! assert_eq!(jumps, 1);
//! listener.clear_event_queue();
//! ```

mod config;
mod error;
pub mod event;
pub mod key;
mod listener;
pub mod logging;
mod producer;
mod task;

pub use config::{DEFAULT_LISTENER_NAME, ListenerBuilder, ListenerConfig};
pub use error::{InputError, Result};
pub use event::{
    EventKind, InputEvent, KeyAction, KeyEvent, MotionAction, MotionEvent, PointerAction,
    PointerEvent, PointerMatching, Position, QueuedEvent, WindowAction, WindowEvent,
};
pub use key::Key;
pub use listener::InputListener;
pub use producer::{InputProducer, InputSink, RawInput};
pub use task::{InputTask, InputTaskId, TaskRegistry};
