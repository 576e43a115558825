//! Input tasks: key patterns bound to callbacks.
//!
//! Tasks intercept key events before they reach the listener's queue. When a
//! key event is dispatched the registry is scanned in registration order and
//! the first task whose pattern equals the event runs; the event is then
//! considered consumed.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::event::KeyEvent;
use crate::logging::targets;

/// A unique identifier for a registered input task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputTaskId(u64);

impl InputTaskId {
    /// Get the raw u64 value of this task ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Global counter for generating unique task IDs.
static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

fn next_task_id() -> InputTaskId {
    InputTaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
}

/// A boxed task callback.
type BoxedCallback = Box<dyn FnMut() + Send + 'static>;

/// A key pattern and the callback that runs when it is seen.
pub struct InputTask {
    pattern: KeyEvent,
    callback: BoxedCallback,
}

impl InputTask {
    /// Bind `callback` to `pattern`.
    pub fn new<F>(pattern: KeyEvent, callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        Self {
            pattern,
            callback: Box::new(callback),
        }
    }

    /// The pattern this task reacts to.
    pub fn pattern(&self) -> &KeyEvent {
        &self.pattern
    }

    /// Run the callback.
    pub fn execute(&mut self) {
        (self.callback)();
    }
}

impl fmt::Debug for InputTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputTask")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

/// Internal task data.
#[derive(Debug)]
struct TaskEntry {
    id: InputTaskId,
    task: InputTask,
}

/// Ordered collection of input tasks.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: Vec<TaskEntry>,
}

impl TaskRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task.
    ///
    /// Returns the ID that can be used to remove it again.
    pub fn add(&mut self, task: InputTask) -> InputTaskId {
        let id = next_task_id();
        tracing::trace!(
            target: targets::TASK,
            id = id.as_u64(),
            pattern = %task.pattern,
            "task registered"
        );
        self.tasks.push(TaskEntry { id, task });
        id
    }

    /// Register several tasks, preserving their order.
    pub fn add_all<I>(&mut self, tasks: I) -> Vec<InputTaskId>
    where
        I: IntoIterator<Item = InputTask>,
    {
        tasks.into_iter().map(|task| self.add(task)).collect()
    }

    /// Remove a task.
    ///
    /// Returns `true` if the task was found and removed.
    pub fn remove(&mut self, id: InputTaskId) -> bool {
        if let Some(pos) = self.tasks.iter().position(|t| t.id == id) {
            self.tasks.remove(pos);
            true
        } else {
            false
        }
    }

    /// Remove every task.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Get the number of registered tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if no tasks are registered.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Run the first task whose pattern equals `event`.
    ///
    /// Returns the ID of the task that ran, or `None` if nothing matched.
    pub fn dispatch(&mut self, event: &KeyEvent) -> Option<InputTaskId> {
        let entry = self.tasks.iter_mut().find(|t| t.task.pattern == *event)?;
        tracing::debug!(
            target: targets::TASK,
            id = entry.id.as_u64(),
            %event,
            "task intercepted key event"
        );
        entry.task.execute();
        Some(entry.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Key;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    fn counting(counter: &Arc<AtomicUsize>) -> impl FnMut() + Send + 'static {
        let counter = counter.clone();
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_dispatch_runs_matching_task() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut registry = TaskRegistry::new();
        let id = registry.add(InputTask::new(KeyEvent::press(Key::Space), counting(&hits)));

        assert_eq!(registry.dispatch(&KeyEvent::press(Key::Space)), Some(id));
        assert_eq!(registry.dispatch(&KeyEvent::release(Key::Space)), None);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_first_registered_wins() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let mut registry = TaskRegistry::new();
        let ids = registry.add_all([
            InputTask::new(KeyEvent::press(Key::Enter), counting(&first)),
            InputTask::new(KeyEvent::press(Key::Enter), counting(&second)),
        ]);

        assert_eq!(registry.dispatch(&KeyEvent::press(Key::Enter)), Some(ids[0]));
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);

        assert!(registry.remove(ids[0]));
        assert_eq!(registry.dispatch(&KeyEvent::press(Key::Enter)), Some(ids[1]));
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_remove_unknown_and_clear() {
        let mut registry = TaskRegistry::new();
        let id = registry.add(InputTask::new(KeyEvent::typed(Key::A), || {}));
        assert!(registry.remove(id));
        assert!(!registry.remove(id));

        registry.add(InputTask::new(KeyEvent::typed(Key::B), || {}));
        registry.add(InputTask::new(KeyEvent::typed(Key::C), || {}));
        assert_eq!(registry.len(), 2);
        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut registry = TaskRegistry::new();
        let a = registry.add(InputTask::new(KeyEvent::press(Key::A), || {}));
        let b = registry.add(InputTask::new(KeyEvent::press(Key::A), || {}));
        assert_ne!(a, b);
        assert!(b.as_u64() > a.as_u64());
    }
}
