//! Broadcast cancellation shared by a pool and its workers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crossbeam_channel::{bounded, Receiver, Sender};

/// A single-shot, broadcast stop signal.
///
/// Workers poll [`is_cancelled`](Self::is_cancelled) at the top of their loop.
/// Code that blocks on a channel can also `select!` on
/// [`listener`](Self::listener), which becomes ready (disconnected) the moment
/// the signal is raised.
#[derive(Debug, Clone)]
pub struct CancellationSignal {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    cancelled: AtomicBool,
    /// Dropped on cancel to wake every listener
    trigger: Mutex<Option<Sender<()>>>,
    listener: Receiver<()>,
}

impl CancellationSignal {
    /// Creates a new, active signal.
    pub fn new() -> Self {
        let (trigger, listener) = bounded(0);
        Self {
            inner: Arc::new(Inner {
                cancelled: AtomicBool::new(false),
                trigger: Mutex::new(Some(trigger)),
                listener,
            }),
        }
    }

    /// Raises the signal. Calling this more than once has no further effect.
    pub fn cancel(&self) {
        if self.inner.cancelled.swap(true, Ordering::AcqRel) {
            return;
        }
        let mut trigger = self
            .inner
            .trigger
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        trigger.take();
    }

    /// Returns true once the signal has been raised.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// A receiver that never yields a value and disconnects on cancel.
    pub fn listener(&self) -> &Receiver<()> {
        &self.inner.listener
    }
}

impl Default for CancellationSignal {
    fn default() -> Self {
        Self::new()
    }
}
