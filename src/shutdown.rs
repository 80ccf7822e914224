//! Process-wide shutdown signal
//!
//! A raised signal stays raised: every waiter observes it, including
//! waiters that start waiting after it was raised. The signal is a
//! crossbeam channel that never carries a value; raising drops the only
//! sender, which leaves the receiver permanently disconnected and
//! therefore always ready inside `select!`.

use std::sync::{Arc, Mutex};

use crossbeam_channel::{Receiver, Sender};

/// Cloneable handle to the shutdown signal
#[derive(Clone)]
pub struct Shutdown {
    inner: Arc<Inner>,
}

struct Inner {
    /// `Some` until the signal is raised
    trigger: Mutex<Option<Sender<()>>>,
    signal: Receiver<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (trigger, signal) = crossbeam_channel::bounded(0);
        Self {
            inner: Arc::new(Inner {
                trigger: Mutex::new(Some(trigger)),
                signal,
            }),
        }
    }

    /// Raise the signal
    ///
    /// Returns `true` for the call that actually raised it, `false` if it
    /// was already raised.
    pub fn raise(&self, reason: &str) -> bool {
        let mut trigger = match self.inner.trigger.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match trigger.take() {
            Some(sender) => {
                drop(sender);
                log::debug!("Shutdown raised: {}", reason);
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub fn is_raised(&self) -> bool {
        matches!(self.inner.signal.try_recv(), Err(crossbeam_channel::TryRecvError::Disconnected))
    }

    /// Block until the signal is raised
    pub fn wait(&self) {
        // Nothing is ever sent, so recv only returns once the sender is gone
        let _ = self.inner.signal.recv();
    }

    /// Receiver that becomes ready (disconnected) once the signal is raised
    pub fn receiver(&self) -> &Receiver<()> {
        &self.inner.signal
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
