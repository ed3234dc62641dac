//! Change notification signal for the display layer
//!
//! One zero-payload notification is emitted per accepted state mutation.
//! Fire-and-forget: absent or lagging subscribers never affect event
//! processing, and notifications are not batched or coalesced here.

use tokio::sync::broadcast;

/// Bounds how far a slow subscriber can lag before it starts missing signals
const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    tx: broadcast::Sender<()>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Signal "state changed, re-render". The error when nobody is
    /// subscribed is deliberately ignored.
    pub fn notify(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_without_subscribers_is_harmless() {
        let notifier = ChangeNotifier::new();
        notifier.notify();
        notifier.notify();
    }

    #[test]
    fn test_one_signal_per_notify() {
        let notifier = ChangeNotifier::new();
        let mut rx = notifier.subscribe();

        notifier.notify();
        notifier.notify();
        notifier.notify();

        let mut count = 0;
        while rx.try_recv().is_ok() {
            count += 1;
        }
        assert_eq!(count, 3);
    }
}
