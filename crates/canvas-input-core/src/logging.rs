//! Logging facilities for canvas-input.
//!
//! canvas-input uses the `tracing` crate for instrumentation and never installs
//! a subscriber itself. To see its output, install one in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!     // ...
//! }
//! ```
//!
//! Repeated key presses swallowed by edge detection and every queued event are
//! logged at `trace`, task interceptions and pump summaries at `debug`, and
//! dropped raw input at `warn`.

/// Span names used throughout canvas-input for tracing.
pub mod span_names {
    /// Draining the raw-input channel into the listener.
    pub const PUMP: &str = "canvas_input::pump";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem, e.g.
/// `RUST_LOG=canvas_input_core::listener=trace`.
pub mod targets {
    /// Listener and dispatch.
    pub const LISTENER: &str = "canvas_input_core::listener";
    /// Task registry.
    pub const TASK: &str = "canvas_input_core::task";
    /// Raw-input producers.
    pub const PRODUCER: &str = "canvas_input_core::producer";
}
