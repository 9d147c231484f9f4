// src/services/connectivity.rs
//
// Network reachability as reported by the host platform.
// Defaults to connected until told otherwise.

use std::sync::Arc;

use tokio::sync::watch;

use crate::events::{ConnectivityChanged, EventBus};

pub struct ConnectivityMonitor {
    tx: watch::Sender<bool>,
    event_bus: Arc<EventBus>,
}

impl ConnectivityMonitor {
    pub fn new(event_bus: Arc<EventBus>) -> Self {
        let (tx, _rx) = watch::channel(true);
        Self { tx, event_bus }
    }

    pub fn is_connected(&self) -> bool {
        *self.tx.borrow()
    }

    /// Record a platform reachability report. Only real transitions are
    /// published.
    pub fn set_connected(&self, connected: bool) {
        let changed = self.tx.send_if_modified(|current| {
            if *current == connected {
                return false;
            }
            *current = connected;
            true
        });

        if changed {
            log::info!(
                "Connection status: {}",
                if connected { "Online" } else { "Offline" }
            );
            self.event_bus.emit(ConnectivityChanged::new(connected));
        }
    }

    /// Receiver that observes every transition
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_connected() {
        let monitor = ConnectivityMonitor::new(Arc::new(EventBus::new()));
        assert!(monitor.is_connected());
    }

    #[test]
    fn test_only_transitions_are_published() {
        let bus = Arc::new(EventBus::new());
        let monitor = ConnectivityMonitor::new(Arc::clone(&bus));

        monitor.set_connected(true);
        monitor.set_connected(false);
        monitor.set_connected(false);
        monitor.set_connected(true);

        assert!(monitor.is_connected());
        assert_eq!(bus.get_event_log().len(), 2);
    }

    #[tokio::test]
    async fn test_receiver_sees_changes() {
        let monitor = ConnectivityMonitor::new(Arc::new(EventBus::new()));
        let mut rx = monitor.subscribe();

        monitor.set_connected(false);

        rx.changed().await.unwrap();
        assert!(!*rx.borrow());
    }
}
