//! Prelude module for canvas-input.
//!
//! ```ignore
//! use canvas_input::prelude::*;
//! ```

pub use crate::{
    InputEvent, InputListener, InputProducer, InputSink, InputTask, Key, KeyAction, KeyEvent,
    ListenerBuilder, MotionAction, PointerAction, PointerMatching, Position, RawInput,
    WindowAction,
};
pub use crate::router::WinitInputRouter;
