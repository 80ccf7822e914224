//! OS signal watcher
//!
//! Raises the shutdown signal on SIGINT or SIGTERM. Handlers are
//! registered by [`SignalWatcher::install`], so a signal delivered any
//! time after it returns is seen by [`SignalWatcher::watch`].

use std::io;

#[cfg(unix)]
use tokio::signal::unix::{signal, Signal, SignalKind};

use crate::shutdown::Shutdown;

/// Registered SIGINT / SIGTERM handlers
pub struct SignalWatcher {
    #[cfg(unix)]
    interrupt: Signal,
    #[cfg(unix)]
    terminate: Signal,
}

impl SignalWatcher {
    /// Register the handlers; must be called inside a tokio runtime
    #[cfg(unix)]
    pub fn install() -> io::Result<Self> {
        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    #[cfg(not(unix))]
    pub fn install() -> io::Result<Self> {
        Ok(Self {})
    }

    /// Wait for a signal, raise `shutdown` and return the signal's name
    pub async fn watch(self, shutdown: Shutdown) -> &'static str {
        let name = self.recv().await;
        shutdown.raise(name);
        name
    }

    #[cfg(unix)]
    async fn recv(mut self) -> &'static str {
        tokio::select! {
            _ = self.interrupt.recv() => "SIGINT",
            _ = self.terminate.recv() => "SIGTERM",
        }
    }

    #[cfg(not(unix))]
    async fn recv(self) -> &'static str {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        "SIGINT"
    }
}
