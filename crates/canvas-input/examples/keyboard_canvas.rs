//! canvas-input demo window
//!
//! Opens an empty window and logs what the input pipeline sees each tick:
//! - Space - jump (handled by polling)
//! - P     - toggle pause (handled by an input task)
//! - Mouse - clicks and drags are reported with their positions
//! - Escape or closing the window quits
//!
//! Run with: RUST_LOG=info cargo run -p canvas-input --example keyboard_canvas

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use canvas_input::ProducerRouter;
use canvas_input::prelude::*;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

struct Demo {
    window: Option<Window>,
    listener: InputListener,
    router: ProducerRouter,
    paused: Arc<AtomicBool>,
    jumps: u32,
}

impl Demo {
    fn new() -> Self {
        let mut listener = InputListener::new();
        let router = WinitInputRouter::new(listener.producer());

        let paused = Arc::new(AtomicBool::new(false));
        let flag = paused.clone();
        listener.add_task(InputTask::new(KeyEvent::press(Key::P), move || {
            let was = flag.fetch_xor(true, Ordering::SeqCst);
            tracing::info!(paused = !was, "pause toggled");
        }));

        Self {
            window: None,
            listener,
            router,
            paused,
            jumps: 0,
        }
    }

    /// One game tick: drain input, react to it, reset the queue.
    fn tick(&mut self, event_loop: &ActiveEventLoop) {
        if self.listener.pump() == 0 {
            return;
        }

        let mut quit = false;
        self.listener
            .check_for_key_stroke(Key::Escape, KeyAction::Press, || quit = true);

        if !self.paused.load(Ordering::SeqCst) {
            let jumps = &mut self.jumps;
            self.listener
                .check_for_key_stroke(Key::Space, KeyAction::Press, || *jumps += 1);
        }

        self.listener.consume_events(|event| match event {
            InputEvent::Pointer(pointer) if pointer.action == PointerAction::Click => {
                tracing::info!(position = %pointer.position, "click");
                true
            }
            InputEvent::Motion(motion) if motion.action == MotionAction::Drag => {
                tracing::debug!(position = %motion.position, "drag");
                true
            }
            InputEvent::Window(window) if window.action == WindowAction::Closing => {
                quit = true;
                true
            }
            _ => false,
        });

        tracing::info!(
            jumps = self.jumps,
            pointer = %self.listener.pointer_position(),
            held = self.listener.pressed_keys().count(),
            "tick"
        );
        self.listener.clear_event_queue();

        if quit {
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for Demo {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("canvas-input demo")
            .with_inner_size(winit::dpi::PhysicalSize::new(640, 480));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                self.window = Some(window);
                self.router.window_opened();
            }
            Err(err) => {
                tracing::error!("failed to create window: {err}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.router.handle_window_event(&event);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.tick(event_loop);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut demo = Demo::new();
    event_loop.run_app(&mut demo)?;
    Ok(())
}
