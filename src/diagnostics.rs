// src/diagnostics.rs
// The on-page console. Every reported failure and status line ends up here,
// and is mirrored to tracing.

use crate::error::{ErrorKind, PlaygroundError};
use chrono::Local;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};

pub const DEFAULT_CAPACITY: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub level: Level,
    pub kind: Option<ErrorKind>,
    pub time: String,
    pub message: String,
}

type Listener = Box<dyn Fn(&Diagnostic) + Send + Sync>;

struct Inner {
    entries: Mutex<VecDeque<Diagnostic>>,
    capacity: usize,
    listener: Mutex<Option<Listener>>,
}

/// Cheap to clone; all clones share one log.
#[derive(Clone)]
pub struct Diagnostics {
    inner: Arc<Inner>,
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("capacity", &self.inner.capacity)
            .field("len", &self.len())
            .finish()
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Diagnostics::new(DEFAULT_CAPACITY)
    }
}

impl Diagnostics {
    pub fn new(capacity: usize) -> Self {
        Diagnostics {
            inner: Arc::new(Inner {
                entries: Mutex::new(VecDeque::new()),
                capacity: capacity.max(1),
                listener: Mutex::new(None),
            }),
        }
    }

    /// Called for every new entry, after it has been recorded.
    pub fn set_listener<F>(&self, listener: F)
    where
        F: Fn(&Diagnostic) + Send + Sync + 'static,
    {
        if let Ok(mut slot) = self.inner.listener.lock() {
            *slot = Some(Box::new(listener));
        }
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(Level::Info, None, message.into());
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.push(Level::Warn, None, message.into());
    }

    /// A warning that stems from a classified failure the caller recovered from.
    pub fn warn_kind(&self, kind: ErrorKind, message: impl Into<String>) {
        self.push(Level::Warn, Some(kind), message.into());
    }

    pub fn error(&self, kind: ErrorKind, message: impl Into<String>) {
        self.push(Level::Error, Some(kind), message.into());
    }

    pub fn report(&self, context: &str, err: &PlaygroundError) {
        self.error(err.kind(), format!("{}: {}", context, err));
    }

    /// The single catch-and-log boundary: an `Err` becomes an error entry and `None`.
    pub fn guard<T>(&self, context: &str, result: crate::error::Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.report(context, &err);
                None
            }
        }
    }

    pub fn entries(&self) -> Vec<Diagnostic> {
        match self.inner.entries.lock() {
            Ok(entries) => entries.iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.inner.entries.lock() {
            entries.clear();
        }
    }

    fn push(&self, level: Level, kind: Option<ErrorKind>, message: String) {
        match level {
            Level::Info => info!("[CONSOLE] {}", message),
            Level::Warn => warn!("[CONSOLE] {:?}: {}", kind, message),
            Level::Error => error!("[CONSOLE] {:?}: {}", kind, message),
        }

        let diagnostic = Diagnostic {
            level,
            kind,
            time: Local::now().format("%H:%M:%S").to_string(),
            message,
        };

        if let Ok(mut entries) = self.inner.entries.lock() {
            if entries.len() == self.inner.capacity {
                entries.pop_front();
            }
            entries.push_back(diagnostic.clone());
        }

        if let Ok(listener) = self.inner.listener.lock() {
            if let Some(listener) = listener.as_ref() {
                listener(&diagnostic);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn guard_turns_errors_into_entries() {
        let diagnostics = Diagnostics::default();
        let ok: Option<u8> = diagnostics.guard("noop", Ok(3));
        assert_eq!(ok, Some(3));
        assert!(diagnostics.is_empty());

        let failed: Option<u8> = diagnostics.guard("Unable to save", Err(PlaygroundError::Storage("quota".into())));
        assert_eq!(failed, None);
        let entries = diagnostics.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, Level::Error);
        assert_eq!(entries[0].kind, Some(ErrorKind::StorageUnavailable));
        assert_eq!(entries[0].message, "Unable to save: Storage unavailable: quota");
    }

    #[test]
    fn oldest_entries_are_dropped_at_capacity() {
        let diagnostics = Diagnostics::new(2);
        diagnostics.info("one");
        diagnostics.info("two");
        diagnostics.warn("three");
        let messages: Vec<_> = diagnostics.entries().into_iter().map(|d| d.message).collect();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[test]
    fn listener_sees_every_entry_and_clones_share_the_log() {
        let diagnostics = Diagnostics::default();
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        diagnostics.set_listener(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let clone = diagnostics.clone();
        clone.info("from clone");
        diagnostics.error(ErrorKind::Io, "boom");
        assert_eq!(seen.load(Ordering::SeqCst), 2);
        assert_eq!(diagnostics.len(), 2);
        diagnostics.clear();
        assert!(clone.is_empty());
    }

    #[test]
    fn entries_carry_a_wall_clock_time() {
        let diagnostics = Diagnostics::default();
        diagnostics.info("Project loaded.");
        let time = &diagnostics.entries()[0].time;
        assert!(chrono::NaiveTime::parse_from_str(time, "%H:%M:%S").is_ok(), "bad time {:?}", time);
    }

    #[test]
    fn kinded_warnings_keep_their_kind() {
        let diagnostics = Diagnostics::default();
        diagnostics.warn("plain");
        diagnostics.warn_kind(ErrorKind::MissingElement, "Warning: #assignment not found; skipped setting value");
        let entries = diagnostics.entries();
        assert_eq!(entries[0].kind, None);
        assert_eq!(entries[1].level, Level::Warn);
        assert_eq!(entries[1].kind, Some(ErrorKind::MissingElement));
    }
}
