//! Where command output goes.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

/// Receives one line per executed command per element.
pub trait ConsoleSink: Send {
    fn write(&mut self, line: &str);
}

/// Collects lines in memory.  Clones share the same buffer, so a caller can
/// keep one handle and give another to the simulation.
#[derive(Clone, Default)]
pub struct BufferConsole {
    lines: Arc<Mutex<Vec<String>>>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Remove and return everything written so far.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl ConsoleSink for BufferConsole {
    fn write(&mut self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_owned());
    }
}

/// Emits every line as an `info` event on the `ts_sim::console` target.
#[derive(Copy, Clone, Debug, Default)]
pub struct TracingConsole;

impl ConsoleSink for TracingConsole {
    fn write(&mut self, line: &str) {
        info!(target: "ts_sim::console", "{line}");
    }
}
