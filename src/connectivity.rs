//! Online/offline signal for the host environment.
//!
//! Purely informational: nothing in the crate waits on or queues behind it.

use tokio::sync::watch;
use tracing::info;

use crate::config::Config;

/// The host side of the signal. Owns the current state and publishes
/// transitions to every subscribed [`ConnectivityObserver`].
pub struct NetworkStatus {
    tx: watch::Sender<bool>,
}

impl NetworkStatus {
    pub fn new(online: bool) -> Self {
        let (tx, _rx) = watch::channel(online);
        Self { tx }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(!config.offline)
    }

    pub fn is_online(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn set_online(&self, online: bool) {
        let changed = self.tx.send_if_modified(|current| {
            if *current == online {
                return false;
            }
            *current = online;
            true
        });
        if changed {
            info!(online, "connectivity changed");
        }
    }

    pub fn subscribe(&self) -> ConnectivityObserver {
        ConnectivityObserver {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Read-only view of the host signal. Dropping it releases the subscription.
pub struct ConnectivityObserver {
    rx: watch::Receiver<bool>,
}

impl ConnectivityObserver {
    pub fn is_online(&self) -> bool {
        *self.rx.borrow()
    }

    /// Waits for the next transition. `None` once the host is gone.
    pub async fn changed(&mut self) -> Option<bool> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}
