//! The input listener: raw callbacks in, queryable events out.
//!
//! [`InputListener`] sits between a platform layer and application code. It
//! receives raw callbacks (directly, or through an
//! [`InputProducer`](crate::InputProducer) drained by [`InputListener::pump`]),
//! turns level-triggered key signals into edge-triggered press and release
//! events, lets registered [`InputTask`]s intercept key events, and queues
//! everything else for the application to poll.
//!
//! # Example
//!
//! ```
//! use canvas_input_core::{InputListener, Key, KeyAction, RawInput};
//!
//! let mut listener = InputListener::new();
//! let producer = listener.producer();
//!
//! // Platform thread.
//! producer.push(RawInput::KeyDown(Key::Space));
//!
//! // Start of the next tick.
//! listener.pump();
//! let jumped = listener.check_for_key_stroke(Key::Space, KeyAction::Press, || {});
//! assert_eq!(jumped, 1);
//! assert!(listener.is_key_pressed(Key::Space));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crossbeam_channel::{Receiver, bounded, unbounded};

use crate::config::ListenerConfig;
use crate::error::Result;
use crate::event::{
    InputEvent, KeyAction, KeyEvent, MotionAction, MotionEvent, PointerAction, PointerEvent,
    Position, QueuedEvent, WindowAction, WindowEvent,
};
use crate::key::Key;
use crate::logging::{span_names, targets};
use crate::producer::{InputProducer, InputSink, RawInput};
use crate::task::{InputTask, InputTaskId, TaskRegistry};

/// Collects platform input into a pollable event queue.
///
/// A listener lives as long as the canvas it serves. All of its state is
/// owned by the thread that polls it; input from other threads arrives
/// through [`producer`](Self::producer) handles and is applied in arrival
/// order by [`pump`](Self::pump).
pub struct InputListener {
    config: ListenerConfig,
    name: Arc<str>,
    /// Events waiting to be consumed, oldest first.
    pending: Vec<QueuedEvent>,
    /// Whether each key seen so far is currently held.
    pressed: HashMap<Key, bool>,
    /// Last pointer position reported by a motion-class callback.
    pointer_position: Position,
    tasks: TaskRegistry,
    receiver: Receiver<RawInput>,
    producer: InputProducer,
    /// Producers hold a weak reference to this to see if the listener exists.
    _alive: Arc<()>,
}

impl InputListener {
    /// Create a listener with the default configuration.
    pub fn new() -> Self {
        Self::build(ListenerConfig::default())
    }

    /// Create a listener with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidConfig`](crate::InputError::InvalidConfig)
    /// if the configuration does not validate.
    pub fn with_config(config: ListenerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: ListenerConfig) -> Self {
        let (sender, receiver) = match config.channel_capacity {
            Some(capacity) => bounded(capacity),
            None => unbounded(),
        };
        let name: Arc<str> = Arc::from(config.name.as_str());
        let alive = Arc::new(());
        let producer = InputProducer::new(
            sender,
            config.channel_capacity,
            name.clone(),
            Arc::downgrade(&alive),
        );

        Self {
            config,
            name,
            pending: Vec::new(),
            pressed: HashMap::new(),
            pointer_position: Position::ORIGIN,
            tasks: TaskRegistry::new(),
            receiver,
            producer,
            _alive: alive,
        }
    }

    /// The configuration this listener was built with.
    pub fn config(&self) -> &ListenerConfig {
        &self.config
    }

    /// Get a handle for sending raw input from any thread.
    pub fn producer(&self) -> InputProducer {
        self.producer.clone()
    }

    /// Apply all raw input currently waiting in the channel.
    ///
    /// Call this once at the start of each tick. Inputs are applied in the
    /// order they were sent, and any task callbacks they trigger run on the
    /// calling thread. Returns the number of inputs applied.
    pub fn pump(&mut self) -> usize {
        let _span =
            tracing::debug_span!(target: targets::LISTENER, span_names::PUMP, listener = %self.name)
                .entered();

        let mut applied = 0;
        while let Ok(input) = self.receiver.try_recv() {
            self.apply(input);
            applied += 1;
        }

        if applied > 0 {
            tracing::debug!(
                target: targets::LISTENER,
                applied,
                pending = self.pending.len(),
                "pumped raw input"
            );
        }
        applied
    }

    /// Apply a single raw input.
    pub fn apply(&mut self, input: RawInput) {
        match input {
            RawInput::KeyDown(key) => self.key_pressed(key),
            RawInput::KeyUp(key) => self.key_released(key),
            RawInput::KeyTyped(key) => self.key_typed(key),
            RawInput::PointerDown(pos) => self.pointer_button(pos, PointerAction::Down),
            RawInput::PointerUp(pos) => self.pointer_button(pos, PointerAction::Up),
            RawInput::PointerClick(pos) => self.pointer_button(pos, PointerAction::Click),
            RawInput::PointerEnter(pos) => self.pointer_motion(pos, MotionAction::Enter),
            RawInput::PointerExit(pos) => self.pointer_motion(pos, MotionAction::Exit),
            RawInput::PointerDrag(pos) => self.pointer_motion(pos, MotionAction::Drag),
            RawInput::PointerMove(pos) => self.pointer_motion(pos, MotionAction::Move),
            RawInput::Window(action) => self.window_lifecycle(action),
        }
    }

    // -------------------------------------------------------------------------
    // Raw callbacks
    // -------------------------------------------------------------------------

    /// A key produced text.
    pub fn key_typed(&mut self, key: Key) {
        self.dispatch_key(KeyEvent::typed(key));
    }

    /// A key went down.
    ///
    /// Ignored while the key is already held, so platform auto-repeat yields
    /// a single press.
    pub fn key_pressed(&mut self, key: Key) {
        let held = self.pressed.entry(key).or_insert(false);
        if *held {
            tracing::trace!(target: targets::LISTENER, %key, "suppressed repeated press");
            return;
        }
        *held = true;
        self.dispatch_key(KeyEvent::press(key));
    }

    /// A key came up.
    ///
    /// Ignored unless the key is currently held.
    pub fn key_released(&mut self, key: Key) {
        match self.pressed.get_mut(&key) {
            Some(held) if *held => *held = false,
            _ => {
                tracing::trace!(
                    target: targets::LISTENER,
                    %key,
                    "suppressed release of key that was not held"
                );
                return;
            }
        }
        self.dispatch_key(KeyEvent::release(key));
    }

    /// A pointer button did something. Always queued.
    pub fn pointer_button(&mut self, position: Position, action: PointerAction) {
        self.enqueue(InputEvent::from(PointerEvent::new(position, action)));
    }

    /// The pointer moved, entered or left. Always queued.
    pub fn pointer_motion(&mut self, position: Position, action: MotionAction) {
        self.pointer_position = position;
        self.enqueue(InputEvent::from(MotionEvent::new(position, action)));
    }

    /// Something happened to the window. Always queued.
    pub fn window_lifecycle(&mut self, action: WindowAction) {
        self.enqueue(InputEvent::from(WindowEvent::new(action)));
    }

    /// Offer a key event to the tasks, queueing it if none of them takes it.
    fn dispatch_key(&mut self, event: KeyEvent) {
        if self.tasks.dispatch(&event).is_some() {
            return;
        }
        self.enqueue(event.into());
    }

    fn enqueue(&mut self, event: InputEvent) {
        tracing::trace!(target: targets::LISTENER, %event, "queued");
        self.pending.push(QueuedEvent::new(event));
    }

    // -------------------------------------------------------------------------
    // Consumer API
    // -------------------------------------------------------------------------

    /// Run `callback` once for every unprocessed key event equal to `pattern`
    /// and mark those events processed.
    ///
    /// Returns the number of events matched. Calling this again with the same
    /// pattern does not see the same events twice.
    pub fn check_for_matching_key_stroke<F>(&mut self, pattern: &KeyEvent, callback: F) -> usize
    where
        F: FnMut(),
    {
        self.check_for_matching_event(&InputEvent::Key(*pattern), callback)
    }

    /// Shorthand for [`check_for_matching_key_stroke`](Self::check_for_matching_key_stroke)
    /// with a pattern built from `key` and `action`.
    pub fn check_for_key_stroke<F>(&mut self, key: Key, action: KeyAction, callback: F) -> usize
    where
        F: FnMut(),
    {
        self.check_for_matching_key_stroke(&KeyEvent::new(key, action), callback)
    }

    /// Run `callback` once for every unprocessed event matching `pattern` and
    /// mark those events processed.
    ///
    /// Pointer and motion events are compared according to the configured
    /// [`PointerMatching`](crate::PointerMatching).
    pub fn check_for_matching_event<F>(&mut self, pattern: &InputEvent, mut callback: F) -> usize
    where
        F: FnMut(),
    {
        let policy = self.config.pointer_matching;
        let mut matched = 0;
        for queued in self.pending.iter_mut().filter(|q| !q.is_processed()) {
            if queued.event().matches(pattern, policy) {
                callback();
                queued.mark_processed();
                matched += 1;
            }
        }
        matched
    }

    /// Visit every unprocessed event in order.
    ///
    /// Events for which `visitor` returns `true` are marked processed.
    /// Returns the number of events marked.
    pub fn consume_events<F>(&mut self, mut visitor: F) -> usize
    where
        F: FnMut(&InputEvent) -> bool,
    {
        let mut consumed = 0;
        for queued in self.pending.iter_mut().filter(|q| !q.is_processed()) {
            if visitor(queued.event()) {
                queued.mark_processed();
                consumed += 1;
            }
        }
        consumed
    }

    /// Snapshot of the unprocessed events, oldest first.
    pub fn unprocessed_events(&self) -> Vec<InputEvent> {
        self.iter_unprocessed().copied().collect()
    }

    /// Iterate the unprocessed events, oldest first.
    pub fn iter_unprocessed(&self) -> impl Iterator<Item = &InputEvent> {
        self.pending
            .iter()
            .filter(|q| !q.is_processed())
            .map(QueuedEvent::event)
    }

    /// Number of unprocessed events.
    pub fn unprocessed_len(&self) -> usize {
        self.pending.iter().filter(|q| !q.is_processed()).count()
    }

    /// Number of queued events, processed or not.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Drop every queued event, processed or not.
    pub fn clear_event_queue(&mut self) {
        self.pending.clear();
    }

    /// Check if `key` is currently held.
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.pressed.get(&key).copied().unwrap_or(false)
    }

    /// Iterate the keys currently held.
    pub fn pressed_keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.pressed
            .iter()
            .filter(|(_, held)| **held)
            .map(|(key, _)| *key)
    }

    /// The last pointer position reported by a motion-class callback.
    pub fn pointer_position(&self) -> Position {
        self.pointer_position
    }

    // -------------------------------------------------------------------------
    // Tasks
    // -------------------------------------------------------------------------

    /// Register a task. See [`TaskRegistry::add`].
    pub fn add_task(&mut self, task: InputTask) -> InputTaskId {
        self.tasks.add(task)
    }

    /// Register several tasks. See [`TaskRegistry::add_all`].
    pub fn add_tasks<I>(&mut self, tasks: I) -> Vec<InputTaskId>
    where
        I: IntoIterator<Item = InputTask>,
    {
        self.tasks.add_all(tasks)
    }

    /// Remove a task. Returns `true` if it was registered.
    pub fn remove_task(&mut self, id: InputTaskId) -> bool {
        self.tasks.remove(id)
    }

    /// Remove every task.
    pub fn clear_tasks(&mut self) {
        self.tasks.clear();
    }

    /// Number of registered tasks.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Default for InputListener {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InputListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputListener")
            .field("name", &self.name)
            .field("pending", &self.pending.len())
            .field("tasks", &self.tasks.len())
            .field("pointer_position", &self.pointer_position)
            .finish_non_exhaustive()
    }
}

impl InputSink for InputListener {
    fn push(&mut self, input: RawInput) {
        self.apply(input);
    }
}

static_assertions::assert_impl_all!(InputListener: Send);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ListenerBuilder;
    use crate::event::PointerMatching;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter_task(pattern: KeyEvent, counter: &Arc<AtomicUsize>) -> InputTask {
        let counter = counter.clone();
        InputTask::new(pattern, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_repeated_press_is_suppressed() {
        let mut listener = InputListener::new();
        listener.key_pressed(Key::A);
        listener.key_pressed(Key::A);

        assert_eq!(listener.unprocessed_events(), vec![InputEvent::from(KeyEvent::press(Key::A))]);
        assert!(listener.is_key_pressed(Key::A));
    }

    #[test]
    fn test_release_without_press_is_suppressed() {
        let mut listener = InputListener::new();
        listener.key_released(Key::B);

        assert!(listener.unprocessed_events().is_empty());
        assert!(!listener.is_key_pressed(Key::B));
    }

    #[test]
    fn test_press_release_press_sequence() {
        let mut listener = InputListener::new();
        listener.key_pressed(Key::A);
        listener.key_released(Key::A);
        listener.key_pressed(Key::A);

        assert_eq!(
            listener.unprocessed_events(),
            vec![
                InputEvent::from(KeyEvent::press(Key::A)),
                InputEvent::from(KeyEvent::release(Key::A)),
                InputEvent::from(KeyEvent::press(Key::A)),
            ]
        );
    }

    #[test]
    fn test_typed_events_are_not_edge_filtered() {
        let mut listener = InputListener::new();
        listener.key_typed(Key::H);
        listener.key_typed(Key::H);
        assert_eq!(listener.unprocessed_len(), 2);
        assert!(!listener.is_key_pressed(Key::H));
    }

    #[test]
    fn test_task_intercepts_key_event() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut listener = InputListener::new();
        listener.add_task(counter_task(KeyEvent::press(Key::Space), &hits));

        listener.key_pressed(Key::Space);
        listener.key_pressed(Key::Space);

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(listener.unprocessed_events().is_empty());
        assert!(listener.is_key_pressed(Key::Space));

        // The release has no task and is queued.
        listener.key_released(Key::Space);
        assert_eq!(
            listener.unprocessed_events(),
            vec![InputEvent::from(KeyEvent::release(Key::Space))]
        );
    }

    #[test]
    fn test_removed_task_no_longer_intercepts() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut listener = InputListener::new();
        let id = listener.add_task(counter_task(KeyEvent::typed(Key::Q), &hits));
        assert!(listener.remove_task(id));
        assert_eq!(listener.task_count(), 0);

        listener.key_typed(Key::Q);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(listener.unprocessed_events(), vec![InputEvent::from(KeyEvent::typed(Key::Q))]);
    }

    #[test]
    fn test_pointer_events_skip_tasks_and_queue() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut listener = InputListener::new();
        listener.add_task(counter_task(KeyEvent::press(Key::A), &hits));

        listener.pointer_button(Position::new(4, 2), PointerAction::Down);
        listener.pointer_button(Position::new(4, 2), PointerAction::Up);
        listener.pointer_button(Position::new(4, 2), PointerAction::Click);

        assert_eq!(listener.unprocessed_len(), 3);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        // Button events do not move the tracked pointer.
        assert_eq!(listener.pointer_position(), Position::ORIGIN);
    }

    #[test]
    fn test_motion_updates_pointer_position() {
        let mut listener = InputListener::new();
        listener.pointer_motion(Position::new(10, 20), MotionAction::Enter);
        listener.pointer_motion(Position::new(15, 25), MotionAction::Move);

        assert_eq!(listener.pointer_position(), Position::new(15, 25));
        let events = listener.unprocessed_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].position(), Some(Position::new(15, 25)));
    }

    #[test]
    fn test_window_events_queue() {
        let mut listener = InputListener::new();
        listener.window_lifecycle(WindowAction::Opened);
        listener.window_lifecycle(WindowAction::Activated);

        assert_eq!(
            listener.unprocessed_events(),
            vec![
                InputEvent::from(WindowEvent::new(WindowAction::Opened)),
                InputEvent::from(WindowEvent::new(WindowAction::Activated)),
            ]
        );
    }

    #[test]
    fn test_check_for_matching_key_stroke_consumes_once() {
        let mut listener = InputListener::new();
        listener.key_pressed(Key::A);
        listener.key_pressed(Key::B);

        let mut calls = 0;
        let pattern = KeyEvent::press(Key::A);
        let matched = listener.check_for_matching_key_stroke(&pattern, || calls += 1);
        assert_eq!(matched, 1);
        assert_eq!(calls, 1);
        assert_eq!(listener.unprocessed_events(), vec![InputEvent::from(KeyEvent::press(Key::B))]);

        let again = listener.check_for_key_stroke(Key::A, KeyAction::Press, || calls += 1);
        assert_eq!(again, 0);
        assert_eq!(calls, 1);
        // Processed events stay queued until cleared.
        assert_eq!(listener.pending_len(), 2);
    }

    #[test]
    fn test_check_for_matching_key_stroke_matches_every_occurrence() {
        let mut listener = InputListener::new();
        listener.key_typed(Key::Z);
        listener.key_typed(Key::Y);
        listener.key_typed(Key::Z);

        let mut calls = 0;
        assert_eq!(listener.check_for_key_stroke(Key::Z, KeyAction::Type, || calls += 1), 2);
        assert_eq!(calls, 2);
        assert_eq!(listener.unprocessed_events(), vec![InputEvent::from(KeyEvent::typed(Key::Y))]);
    }

    #[test]
    fn test_pointer_matching_policies() {
        let mut action_only = InputListener::new();
        action_only.pointer_button(Position::new(1, 1), PointerAction::Click);
        let far_away = PointerEvent::new(Position::new(50, 50), PointerAction::Click);
        let pattern = InputEvent::from(far_away);
        assert_eq!(action_only.check_for_matching_event(&pattern, || {}), 1);

        let mut strict = ListenerBuilder::new()
            .pointer_matching(PointerMatching::ActionAndPosition)
            .build()
            .unwrap();
        strict.pointer_button(Position::new(1, 1), PointerAction::Click);
        assert_eq!(strict.check_for_matching_event(&pattern, || {}), 0);
        let exact = InputEvent::from(PointerEvent::new(Position::new(1, 1), PointerAction::Click));
        assert_eq!(strict.check_for_matching_event(&exact, || {}), 1);
    }

    #[test]
    fn test_consume_events() {
        let mut listener = InputListener::new();
        listener.key_pressed(Key::A);
        listener.pointer_motion(Position::new(3, 3), MotionAction::Move);
        listener.window_lifecycle(WindowAction::Closing);

        let consumed = listener.consume_events(|event| event.as_key().is_none());
        assert_eq!(consumed, 2);
        assert_eq!(listener.unprocessed_events(), vec![InputEvent::from(KeyEvent::press(Key::A))]);
    }

    #[test]
    fn test_clear_event_queue_drops_everything() {
        let mut listener = InputListener::new();
        for key in [Key::A, Key::B, Key::C, Key::D, Key::E] {
            listener.key_typed(key);
        }
        for key in [Key::A, Key::B, Key::C] {
            listener.check_for_key_stroke(key, KeyAction::Type, || {});
        }
        assert_eq!(listener.unprocessed_len(), 2);

        listener.clear_event_queue();
        assert!(listener.unprocessed_events().is_empty());
        assert_eq!(listener.pending_len(), 0);
    }

    #[test]
    fn test_unknown_keys_pair_up() {
        let mut listener = InputListener::new();
        listener.key_pressed(Key::Unknown(0xE0));
        listener.key_pressed(Key::Unknown(0xE1));
        listener.key_released(Key::Unknown(0xE0));

        assert!(!listener.is_key_pressed(Key::Unknown(0xE0)));
        assert!(listener.is_key_pressed(Key::Unknown(0xE1)));
        assert_eq!(listener.unprocessed_len(), 3);
    }

    #[test]
    fn test_pressed_keys() {
        let mut listener = InputListener::new();
        listener.key_pressed(Key::W);
        listener.key_pressed(Key::D);
        listener.key_released(Key::W);

        let held: Vec<Key> = listener.pressed_keys().collect();
        assert_eq!(held, vec![Key::D]);
    }

    #[test]
    fn test_pump_applies_in_order() {
        let mut listener = InputListener::new();
        let producer = listener.producer();
        producer.push(RawInput::KeyDown(Key::ArrowLeft));
        producer.push(RawInput::PointerMove(Position::new(8, 9)));
        producer.push(RawInput::KeyUp(Key::ArrowLeft));

        // Nothing is visible until the listener is pumped.
        assert!(listener.unprocessed_events().is_empty());
        assert_eq!(producer.pending(), 3);

        assert_eq!(listener.pump(), 3);
        assert_eq!(listener.pump(), 0);
        assert_eq!(
            listener.unprocessed_events(),
            vec![
                InputEvent::from(KeyEvent::press(Key::ArrowLeft)),
                InputEvent::from(MotionEvent::new(Position::new(8, 9), MotionAction::Move)),
                InputEvent::from(KeyEvent::release(Key::ArrowLeft)),
            ]
        );
        assert_eq!(listener.pointer_position(), Position::new(8, 9));
    }

    #[test]
    fn test_listener_is_a_sink() {
        let mut listener = InputListener::new();
        listener.key_down(Key::S);
        listener.key_down(Key::S);
        listener.pointer_click(Position::new(2, 2));
        listener.window_deactivated();

        assert_eq!(listener.unprocessed_len(), 3);
        assert!(listener.is_key_pressed(Key::S));
    }

    #[test]
    fn test_producer_disconnects_when_listener_drops() {
        let listener = InputListener::new();
        let producer = listener.producer();
        assert!(producer.is_connected());
        drop(listener);
        assert!(!producer.is_connected());
        assert_eq!(
            producer.try_push(RawInput::KeyDown(Key::A)),
            Err(crate::InputError::ListenerDropped)
        );
    }
}
