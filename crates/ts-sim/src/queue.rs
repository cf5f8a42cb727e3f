//! Thread-safe command queue.
//!
//! Any number of [`CommandSender`]s may enqueue from any thread while a tick
//! runs.  The driver drains with a snapshot: it reads the queue length once
//! and executes exactly that many commands, so anything enqueued during the
//! drain waits for the next tick and a busy producer cannot stall a tick.

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::{Command, SimError, SimResult};

type Boxed = Box<dyn Command>;

/// Cloneable producer handle.
#[derive(Clone)]
pub struct CommandSender {
    tx: Sender<Boxed>,
}

impl CommandSender {
    pub fn send<C: Command + 'static>(&self, command: C) -> SimResult<()> {
        self.send_boxed(Box::new(command))
    }

    pub fn send_boxed(&self, command: Boxed) -> SimResult<()> {
        self.tx.send(command).map_err(|_| SimError::QueueClosed)
    }
}

/// The consumer side, owned by the simulation.
pub struct CommandQueue {
    tx: Sender<Boxed>,
    rx: Receiver<Boxed>,
}

impl CommandQueue {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    pub fn sender(&self) -> CommandSender {
        CommandSender { tx: self.tx.clone() }
    }

    /// Commands waiting right now.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// The commands queued at the moment of the call, oldest first.
    pub fn snapshot(&self) -> Vec<Boxed> {
        let n = self.rx.len();
        (0..n).map_while(|_| self.rx.try_recv().ok()).collect()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}
