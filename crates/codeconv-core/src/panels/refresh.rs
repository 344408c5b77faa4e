//! Refresh signal shared by the panels.

use tokio::sync::broadcast;
use tracing::trace;

/// Channel capacity for refresh notifications.
const CHANNEL_CAPACITY: usize = 64;

/// Which panel needs re-rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    VoGenerator,
    CodeConverter,
}

/// Broadcasts "panel changed" notifications.
///
/// Cloning shares the underlying channel.
#[derive(Debug, Clone)]
pub struct RefreshSignal {
    sender: broadcast::Sender<PanelKind>,
}

impl RefreshSignal {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Notify subscribers that `kind` changed. A no-op without subscribers.
    pub fn fire(&self, kind: PanelKind) {
        trace!(?kind, "Panel refresh");
        let _ = self.sender.send(kind);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PanelKind> {
        self.sender.subscribe()
    }
}

impl Default for RefreshSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_without_subscribers_is_noop() {
        RefreshSignal::new().fire(PanelKind::VoGenerator);
    }

    #[test]
    fn test_clones_share_channel() {
        let signal = RefreshSignal::new();
        let mut rx = signal.subscribe();
        signal.clone().fire(PanelKind::CodeConverter);
        assert_eq!(rx.try_recv().unwrap(), PanelKind::CodeConverter);
        assert!(rx.try_recv().is_err());
    }
}
