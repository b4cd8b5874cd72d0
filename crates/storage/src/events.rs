//! Change notifications.
//!
//! Stores publish an event after every persisted mutation; presentation code
//! subscribes and re-renders. Publishing never blocks and never fails: with
//! no subscribers the event is dropped, and a subscriber that falls more than
//! the channel capacity behind sees `RecvError::Lagged` and should reload.

use tokio::sync::broadcast;
use tracing::trace;

/// Default number of undelivered events kept per subscriber.
pub const DEFAULT_CAPACITY: usize = 64;

/// Broadcast sender for one store's change events.
#[derive(Debug, Clone)]
pub struct ChangeNotifier<E> {
    sender: broadcast::Sender<E>,
}

impl<E: Clone + std::fmt::Debug> ChangeNotifier<E> {
    /// Create a notifier with the given per-subscriber buffer.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Start receiving events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<E> {
        self.sender.subscribe()
    }

    /// Publish an event; returns how many subscribers it reached.
    pub fn notify(&self, event: E) -> usize {
        trace!(?event, "Publishing store change");
        self.sender.send(event).unwrap_or(0)
    }
}

impl<E: Clone + std::fmt::Debug> Default for ChangeNotifier<E> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
