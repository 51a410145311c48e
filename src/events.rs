use crate::app::Route;
use crate::execution::types::{Position, TradeConfirmation};
use tokio::sync::mpsc;
use tracing::error;

/// State-change notifications published by page sessions.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    RouteChanged(Route),
    PointsChanged(u64),
    UnitCompleted(u32),
    ChallengeAdvanced { index: usize, total: usize },
    TradeFilled(TradeConfirmation),
    PositionOpened(Position),
    BalanceChanged(f64),
    ViewChanged(ViewMode),
    ScenarioStarted(String),
    ScenarioExited,
    AdvisoryShown(String),
    AdvisoryHidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Trading,
    Scenario,
}

/// Non-blocking handle onto the front end's event channel.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    sender: Option<mpsc::Sender<UiEvent>>,
}

impl EventSink {
    pub fn new(sender: mpsc::Sender<UiEvent>) -> Self {
        Self { sender: Some(sender) }
    }

    /// A sink that discards everything.
    pub fn detached() -> Self {
        Self { sender: None }
    }

    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<UiEvent>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self::new(tx), rx)
    }

    pub fn emit(&self, event: UiEvent) {
        let Some(sender) = &self.sender else {
            return;
        };

        match sender.try_send(event) {
            Ok(_) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {}
            Err(mpsc::error::TrySendError::Closed(_)) => {
                error!("UI channel closed, front end is gone");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_emit_delivers_in_order() {
        let (sink, mut rx) = EventSink::channel(8);
        sink.emit(UiEvent::PointsChanged(200));
        sink.emit(UiEvent::AdvisoryHidden);

        assert_eq!(rx.recv().await, Some(UiEvent::PointsChanged(200)));
        assert_eq!(rx.recv().await, Some(UiEvent::AdvisoryHidden));
    }

    #[tokio::test]
    async fn test_full_channel_drops_event() {
        let (sink, mut rx) = EventSink::channel(1);
        sink.emit(UiEvent::PointsChanged(1));
        sink.emit(UiEvent::PointsChanged(2));

        assert_eq!(rx.recv().await, Some(UiEvent::PointsChanged(1)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_detached_sink_is_silent() {
        EventSink::detached().emit(UiEvent::ScenarioExited);
    }
}
