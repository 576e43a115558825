//! canvas-input - input-event pipeline for winit-hosted 2D canvases.
//!
//! This is the main umbrella crate. It re-exports everything from
//! `canvas-input-core` and adds the winit adapter: key translation in
//! [`keyboard`] and window-event routing in [`router`].
//!
//! # Example
//!
//! ```no_run
//! use canvas_input::prelude::*;
//!
//! let mut listener = InputListener::new();
//! let mut router = WinitInputRouter::new(listener.producer());
//! router.window_opened();
//!
//! // Forward every winit WindowEvent with `router.handle_window_event(&event)`,
//! // then once per tick:
//! listener.pump();
//! listener.check_for_key_stroke(Key::Escape, KeyAction::Press, || {
//!     // open the pause menu
//! });
//! listener.clear_event_queue();
//! ```

pub use canvas_input_core::*;

pub mod keyboard;
pub mod prelude;
pub mod router;

pub use router::WinitInputRouter;

/// A router feeding a listener on the same thread.
pub type ListenerRouter = WinitInputRouter<InputListener>;

/// A router feeding a listener through its producer channel.
pub type ProducerRouter = WinitInputRouter<InputProducer>;
