//! Async task and timer handles.
//!
//! A task handle is a forked evaluator run on a spawned OS thread; completion
//! is latched behind a mutex/condvar pair so a second `AWAIT` (or a `CHECK`/
//! `TICKS` call after completion) observes the same cached result without
//! re-running or blocking on an already-drained channel. A timer handle
//! carries a deadline `Instant` and an `AtomicBool` cancellation flag checked
//! by a dedicated waiting thread before it fires.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, RwLock};
use std::thread;
use std::time::{Duration, Instant};

use ahash::RandomState;

use crate::expression::Expression;

/// A value that becomes available exactly once and can then be observed any
/// number of times without blocking again.
#[derive(Debug)]
struct Latch<T> {
    state: Mutex<Option<T>>,
    cond: Condvar,
}

impl<T: Clone> Latch<T> {
    fn new() -> Self {
        Self {
            state: Mutex::new(None),
            cond: Condvar::new(),
        }
    }

    fn complete(&self, value: T) {
        let mut guard = self.state.lock().expect("latch lock poisoned");
        *guard = Some(value);
        self.cond.notify_all();
    }

    fn wait(&self) -> T {
        let guard = self.state.lock().expect("latch lock poisoned");
        let guard = self
            .cond
            .wait_while(guard, |value| value.is_none())
            .expect("latch lock poisoned");
        guard.clone().expect("latch released with no value")
    }

    fn peek(&self) -> Option<T> {
        self.state.lock().expect("latch lock poisoned").clone()
    }
}

struct TaskEntry {
    latch: Arc<Latch<Expression>>,
}

struct TimerEntry {
    deadline: Instant,
    cancelled: Arc<AtomicBool>,
    latch: Arc<Latch<()>>,
}

/// Registers task and timer handles under monotonically increasing
/// `_async_<n>` ids, unique process-wide and never reused (invariant 5).
#[derive(Default)]
pub struct AsyncRegistry {
    next_id: AtomicU64,
    tasks: RwLock<HashMap<String, TaskEntry, RandomState>>,
    timers: RwLock<HashMap<String, TimerEntry, RandomState>>,
}

impl AsyncRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_handle(&self) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        format!("_async_{n}")
    }

    /// Spawns `work` on a new OS thread, registering a task handle that
    /// latches the computed result.
    pub fn spawn_task(&self, work: impl FnOnce() -> Expression + Send + 'static) -> String {
        let handle = self.next_handle();
        let latch = Arc::new(Latch::new());
        let thread_latch = Arc::clone(&latch);
        thread::spawn(move || {
            let result = work();
            thread_latch.complete(result);
        });
        self.tasks
            .write()
            .expect("async registry lock poisoned")
            .insert(handle.clone(), TaskEntry { latch });
        handle
    }

    /// Registers a timer that fires `duration` from now unless cancelled
    /// first.
    pub fn spawn_timer(&self, duration: Duration) -> String {
        let handle = self.next_handle();
        let deadline = Instant::now() + duration;
        let cancelled = Arc::new(AtomicBool::new(false));
        let latch = Arc::new(Latch::new());
        let thread_cancelled = Arc::clone(&cancelled);
        let thread_latch = Arc::clone(&latch);
        thread::spawn(move || {
            loop {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    break;
                }
                if thread_cancelled.load(Ordering::Acquire) {
                    return;
                }
                thread::sleep(remaining.min(Duration::from_millis(25)));
            }
            if !thread_cancelled.load(Ordering::Acquire) {
                thread_latch.complete(());
            }
        });
        self.timers
            .write()
            .expect("async registry lock poisoned")
            .insert(
                handle.clone(),
                TimerEntry { deadline, cancelled, latch },
            );
        handle
    }

    /// Blocks until `handle` completes, returning its result (`Empty` for a
    /// timer, or for an unknown handle). A second call observes the same
    /// latched result without re-running.
    #[must_use]
    pub fn await_handle(&self, handle: &str) -> Expression {
        if let Some(entry) = self.tasks.read().expect("async registry lock poisoned").get(handle) {
            return entry.latch.wait();
        }
        if let Some(entry) = self.timers.read().expect("async registry lock poisoned").get(handle) {
            entry.latch.wait();
            return Expression::Empty;
        }
        Expression::Empty
    }

    /// Non-blocking: whether `handle` has completed.
    #[must_use]
    pub fn is_done(&self, handle: &str) -> bool {
        if let Some(entry) = self.tasks.read().expect("async registry lock poisoned").get(handle) {
            return entry.latch.peek().is_some();
        }
        if let Some(entry) = self.timers.read().expect("async registry lock poisoned").get(handle) {
            return entry.latch.peek().is_some();
        }
        false
    }

    /// Remaining milliseconds until a timer fires; 0 if already fired,
    /// cancelled, or `handle` does not name a timer.
    #[must_use]
    pub fn ticks(&self, handle: &str) -> u64 {
        let timers = self.timers.read().expect("async registry lock poisoned");
        let Some(entry) = timers.get(handle) else {
            return 0;
        };
        if entry.latch.peek().is_some() || entry.cancelled.load(Ordering::Acquire) {
            return 0;
        }
        u64::try_from(entry.deadline.saturating_duration_since(Instant::now()).as_millis()).unwrap_or(u64::MAX)
    }

    /// Cancels all pending timers and waits up to five seconds for running
    /// tasks to finish.
    pub fn shutdown(&self) {
        for entry in self.timers.read().expect("async registry lock poisoned").values() {
            entry.cancelled.store(true, Ordering::Release);
        }
        let deadline = Instant::now() + Duration::from_secs(5);
        for entry in self.tasks.read().expect("async registry lock poisoned").values() {
            while entry.latch.peek().is_none() && Instant::now() < deadline {
                thread::sleep(Duration::from_millis(10));
            }
        }
    }
}

impl std::fmt::Debug for AsyncRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncRegistry").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_handles_are_sequential_and_unique() {
        let registry = AsyncRegistry::new();
        let a = registry.spawn_task(|| Expression::Empty);
        let b = registry.spawn_task(|| Expression::Empty);
        assert_ne!(a, b);
        assert!(a.starts_with("_async_"));
    }

    #[test]
    fn await_returns_same_result_on_repeat_calls() {
        let registry = AsyncRegistry::new();
        let handle = registry.spawn_task(|| Expression::Text("done".into()));
        assert_eq!(registry.await_handle(&handle), Expression::Text("done".into()));
        assert_eq!(registry.await_handle(&handle), Expression::Text("done".into()));
    }

    #[test]
    fn check_is_false_then_true_after_await() {
        let registry = AsyncRegistry::new();
        let handle = registry.spawn_task(|| Expression::Empty);
        registry.await_handle(&handle);
        assert!(registry.is_done(&handle));
    }

    #[test]
    fn timer_ticks_reach_zero_after_firing() {
        let registry = AsyncRegistry::new();
        let handle = registry.spawn_timer(Duration::from_millis(20));
        registry.await_handle(&handle);
        assert_eq!(registry.ticks(&handle), 0);
    }

    #[test]
    fn unknown_handle_is_not_done() {
        let registry = AsyncRegistry::new();
        assert!(!registry.is_done("_async_999"));
        assert_eq!(registry.ticks("_async_999"), 0);
    }
}
