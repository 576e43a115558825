//! Routing winit window events into an input sink.
//!
//! winit reports raw state changes (a button went down, the cursor moved) and
//! leaves higher-level notions like clicks and drags to the application.
//! [`WinitInputRouter`] fills that gap and forwards everything to an
//! [`InputSink`], which is usually either the listener itself or a producer
//! handle for a listener polled elsewhere.
//!
//! # Usage
//!
//! ```ignore
//! use canvas_input::{InputListener, WinitInputRouter};
//!
//! let mut listener = InputListener::new();
//! let mut router = WinitInputRouter::new(listener.producer());
//!
//! // In ApplicationHandler::window_event:
//! router.handle_window_event(&event);
//!
//! // At the start of each game tick:
//! listener.pump();
//! ```

use std::collections::{HashMap, HashSet};

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{Key as WinitKey, PhysicalKey};

use canvas_input_core::{InputSink, Key, Position};

use crate::keyboard::{from_char, from_winit_key, from_winit_physical_key};

/// Log target for the router.
pub const ROUTER_TARGET: &str = "canvas_input::router";

/// Translates winit window events into raw input for an [`InputSink`].
#[derive(Debug)]
pub struct WinitInputRouter<S: InputSink> {
    sink: S,
    /// Last cursor position reported by winit.
    cursor: Position,
    /// Where each currently held button went down.
    press_origins: HashMap<MouseButton, Position>,
    /// Keys forwarded as down and not yet released.
    held_keys: HashSet<Key>,
}

impl<S: InputSink> WinitInputRouter<S> {
    /// Create a router that forwards to `sink`.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            cursor: Position::ORIGIN,
            press_origins: HashMap::new(),
            held_keys: HashSet::new(),
        }
    }

    /// The sink input is forwarded to.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the router, returning its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// The last cursor position seen by the router.
    pub fn cursor_position(&self) -> Position {
        self.cursor
    }

    /// Check if `key` has been forwarded as down and not released since.
    pub fn is_key_held(&self, key: Key) -> bool {
        self.held_keys.contains(&key)
    }

    /// Check if any mouse button is currently held.
    pub fn is_dragging(&self) -> bool {
        !self.press_origins.is_empty()
    }

    /// Report that the window has been created and shown.
    ///
    /// winit has no event for this, so the host calls it once its window
    /// exists.
    pub fn window_opened(&mut self) {
        self.sink.window_opened();
    }

    /// Handle a single window event.
    ///
    /// Returns `true` if the event was translated into input, `false` if it
    /// is of no interest to the input pipeline.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                self.keyboard_input(
                    &event.physical_key,
                    &event.logical_key,
                    event.state,
                    event.text.as_deref(),
                );
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(*position);
                true
            }
            WindowEvent::CursorEntered { .. } => {
                self.cursor_entered();
                true
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor_left();
                true
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse_input(*state, *button);
                true
            }
            WindowEvent::Focused(true) => {
                self.sink.window_activated();
                true
            }
            WindowEvent::Focused(false) => {
                self.focus_lost();
                true
            }
            WindowEvent::CloseRequested => {
                self.sink.window_closing();
                true
            }
            WindowEvent::Destroyed => {
                self.sink.window_closed();
                true
            }
            WindowEvent::Occluded(true) => {
                self.sink.window_iconified();
                true
            }
            WindowEvent::Occluded(false) => {
                self.sink.window_deiconified();
                true
            }
            _ => false,
        }
    }

    /// Forward a keyboard event.
    ///
    /// The physical key identifies the key; the logical key is only consulted
    /// when the physical key is entirely unknown. Each character of `text`
    /// produced by a press is forwarded as typed input.
    pub fn keyboard_input(
        &mut self,
        physical: &PhysicalKey,
        logical: &WinitKey,
        state: ElementState,
        text: Option<&str>,
    ) {
        let key = match from_winit_physical_key(physical) {
            Key::Unknown(0) => from_winit_key(logical),
            key => key,
        };

        match state {
            ElementState::Pressed => {
                self.held_keys.insert(key);
                self.sink.key_down(key);
                for ch in text.unwrap_or_default().chars() {
                    self.sink.key_typed(from_char(ch));
                }
            }
            ElementState::Released => {
                self.held_keys.remove(&key);
                self.sink.key_up(key);
            }
        }
    }

    /// Forward the window losing focus.
    ///
    /// Releases that happen while unfocused never reach the window on some
    /// platforms, so every held key is released first and held buttons are
    /// forgotten.
    pub fn focus_lost(&mut self) {
        self.press_origins.clear();
        for key in self.held_keys.drain() {
            tracing::trace!(target: ROUTER_TARGET, %key, "released on focus loss");
            self.sink.key_up(key);
        }
        self.sink.window_deactivated();
    }

    /// Forward a cursor movement, as a drag while any button is held.
    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.cursor = to_position(position);
        if self.is_dragging() {
            self.sink.pointer_drag(self.cursor);
        } else {
            self.sink.pointer_move(self.cursor);
        }
    }

    /// Forward the cursor entering the window.
    pub fn cursor_entered(&mut self) {
        self.sink.pointer_enter(self.cursor);
    }

    /// Forward the cursor leaving the window.
    pub fn cursor_left(&mut self) {
        self.sink.pointer_exit(self.cursor);
    }

    /// Forward a mouse button change.
    ///
    /// A release at the same position as the matching press also produces a
    /// click, after the release.
    pub fn mouse_input(&mut self, state: ElementState, button: MouseButton) {
        let position = self.cursor;
        match state {
            ElementState::Pressed => {
                self.press_origins.insert(button, position);
                self.sink.pointer_down(position);
            }
            ElementState::Released => {
                let origin = self.press_origins.remove(&button);
                self.sink.pointer_up(position);
                if origin == Some(position) {
                    tracing::trace!(target: ROUTER_TARGET, ?button, %position, "click");
                    self.sink.pointer_click(position);
                }
            }
        }
    }
}

/// Rounds a winit physical position to whole pixels.
fn to_position(position: PhysicalPosition<f64>) -> Position {
    Position::new(position.x.round() as i32, position.y.round() as i32)
}
