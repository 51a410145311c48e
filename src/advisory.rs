use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::events::{EventSink, UiEvent};

#[derive(Debug, Default)]
struct Slot {
    message: Option<String>,
    generation: u64,
}

/// Single-slot "Alphin says" message that hides itself after `duration`.
///
/// A new `show` replaces the message and restarts the timer. The pending
/// timer task is aborted on replacement, on `hide`, and on drop.
pub struct AdvisoryNotifier {
    duration: Duration,
    slot: Arc<Mutex<Slot>>,
    timer: Option<JoinHandle<()>>,
    events: EventSink,
}

impl AdvisoryNotifier {
    pub fn new(duration: Duration, events: EventSink) -> Self {
        Self {
            duration,
            slot: Arc::new(Mutex::new(Slot::default())),
            timer: None,
            events,
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn show(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.cancel_timer();

        let generation = {
            let mut slot = lock(&self.slot);
            slot.generation += 1;
            slot.message = Some(message.clone());
            slot.generation
        };

        debug!("Advisory shown: {}", message);
        self.events.emit(UiEvent::AdvisoryShown(message));

        let slot = Arc::clone(&self.slot);
        let events = self.events.clone();
        let duration = self.duration;
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let mut slot = lock(&slot);
            if slot.generation == generation && slot.message.take().is_some() {
                events.emit(UiEvent::AdvisoryHidden);
            }
        }));
    }

    pub fn hide(&mut self) {
        self.cancel_timer();
        if lock(&self.slot).message.take().is_some() {
            self.events.emit(UiEvent::AdvisoryHidden);
        }
    }

    pub fn current(&self) -> Option<String> {
        lock(&self.slot).message.clone()
    }

    pub fn is_visible(&self) -> bool {
        lock(&self.slot).message.is_some()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    fn cancel_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            handle.abort();
        }
    }
}

impl Drop for AdvisoryNotifier {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

// The slot holds no invariants a panicking writer could break.
fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_hide_after_duration() {
        let mut advisory = AdvisoryNotifier::new(Duration::from_secs(5), EventSink::detached());
        advisory.show("Remember to set a stop loss!");
        assert!(advisory.is_visible());

        tokio::time::sleep(Duration::from_millis(4_900)).await;
        assert!(advisory.is_visible());

        tokio::time::sleep(Duration::from_millis(200)).await;
        settle().await;
        assert!(!advisory.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_replacement_restarts_timer() {
        let mut advisory = AdvisoryNotifier::new(Duration::from_secs(5), EventSink::detached());
        advisory.show("A");

        tokio::time::sleep(Duration::from_secs(3)).await;
        advisory.show("B");
        assert_eq!(advisory.current().as_deref(), Some("B"));

        // The first timer would have fired here.
        tokio::time::sleep(Duration::from_secs(3)).await;
        settle().await;
        assert_eq!(advisory.current().as_deref(), Some("B"));

        tokio::time::sleep(Duration::from_secs(3)).await;
        settle().await;
        assert!(advisory.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_published() {
        let (sink, mut rx) = EventSink::channel(8);
        let mut advisory = AdvisoryNotifier::new(Duration::from_secs(3), sink);

        advisory.show("Correct!");
        assert_eq!(rx.recv().await, Some(UiEvent::AdvisoryShown("Correct!".to_string())));
        assert_eq!(rx.recv().await, Some(UiEvent::AdvisoryHidden));
        assert!(!advisory.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_hide() {
        let (sink, mut rx) = EventSink::channel(8);
        let mut advisory = AdvisoryNotifier::new(Duration::from_secs(3), sink);
        advisory.show("x");
        advisory.hide();
        advisory.hide();

        assert_eq!(rx.recv().await, Some(UiEvent::AdvisoryShown("x".to_string())));
        assert_eq!(rx.recv().await, Some(UiEvent::AdvisoryHidden));

        tokio::time::sleep(Duration::from_secs(5)).await;
        settle().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_timer() {
        let (sink, mut rx) = EventSink::channel(8);
        let advisory_slot;
        {
            let mut advisory = AdvisoryNotifier::new(Duration::from_secs(3), sink);
            advisory.show("bye");
            advisory_slot = Arc::clone(&advisory.slot);
        }

        tokio::time::sleep(Duration::from_secs(5)).await;
        settle().await;

        assert_eq!(rx.recv().await, Some(UiEvent::AdvisoryShown("bye".to_string())));
        // Sender side lived only in the notifier and its aborted task.
        assert_eq!(rx.recv().await, None);
        assert_eq!(lock(&advisory_slot).message.as_deref(), Some("bye"));
    }
}
