// src/debounce.rs
// Cancellable timers for the expensive editor layout recompute. Any trigger
// inside the window pushes the deadline out, so a burst fires once.

use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::debug;

pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(120);
pub const THEME_RESIZE_DELAY: Duration = Duration::from_millis(50);
/// Longest delay honoured; larger configured values are clamped to it.
pub const MAX_DELAY: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Debouncer { delay, deadline: None }
    }

    pub fn schedule(&mut self, now: Instant) {
        self.schedule_after(now, self.delay);
    }

    /// Replaces any pending deadline.
    pub fn schedule_after(&mut self, now: Instant, delay: Duration) {
        let delay = delay.min(MAX_DELAY);
        self.deadline = Some(now.checked_add(delay).unwrap_or(now));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// True exactly once per scheduled deadline, once `now` reaches it.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

struct TriggerState {
    debouncer: Debouncer,
    shutdown: bool,
}

struct Shared {
    state: Mutex<TriggerState>,
    wake: Condvar,
}

/// Runs `action` on a worker thread, once per burst of triggers.
pub struct DebouncedTrigger {
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
}

impl DebouncedTrigger {
    pub fn spawn<F>(delay: Duration, action: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let shared = Arc::new(Shared {
            state: Mutex::new(TriggerState {
                debouncer: Debouncer::new(delay),
                shutdown: false,
            }),
            wake: Condvar::new(),
        });
        let worker_shared = shared.clone();
        let worker = thread::spawn(move || worker_loop(worker_shared, action));
        DebouncedTrigger {
            shared,
            worker: Some(worker),
        }
    }

    pub fn trigger(&self) {
        self.update(|debouncer| debouncer.schedule(Instant::now()));
    }

    pub fn trigger_after(&self, delay: Duration) {
        self.update(|debouncer| debouncer.schedule_after(Instant::now(), delay));
    }

    pub fn cancel(&self) {
        self.update(Debouncer::cancel);
    }

    pub fn is_pending(&self) -> bool {
        self.shared
            .state
            .lock()
            .map(|state| state.debouncer.is_pending())
            .unwrap_or(false)
    }

    fn update(&self, change: impl FnOnce(&mut Debouncer)) {
        if let Ok(mut state) = self.shared.state.lock() {
            change(&mut state.debouncer);
            self.shared.wake.notify_all();
        }
    }
}

impl Drop for DebouncedTrigger {
    fn drop(&mut self) {
        if let Ok(mut state) = self.shared.state.lock() {
            state.shutdown = true;
        }
        self.shared.wake.notify_all();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn worker_loop<F: FnMut()>(shared: Arc<Shared>, mut action: F) {
    let Ok(mut state) = shared.state.lock() else {
        return;
    };
    loop {
        if state.shutdown {
            debug!("[DEBOUNCE] Worker stopping.");
            return;
        }
        let now = Instant::now();
        if state.debouncer.fire_if_due(now) {
            // Never hold the lock while the action runs.
            drop(state);
            action();
            state = match shared.state.lock() {
                Ok(state) => state,
                Err(_) => return,
            };
            continue;
        }
        state = match state.debouncer.deadline() {
            Some(deadline) => match shared.wake.wait_timeout(state, deadline.saturating_duration_since(now)) {
                Ok((state, _)) => state,
                Err(_) => return,
            },
            None => match shared.wake.wait(state) {
                Ok(state) => state,
                Err(_) => return,
            },
        };
    }
}
