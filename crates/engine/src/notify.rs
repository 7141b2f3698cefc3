//! Single-slot notification surface with auto-expiry.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hardsub_model::{Notification, NotificationKind};
use tokio::sync::watch;

/// Default time a notification stays visible.
pub const DEFAULT_DISPLAY: Duration = Duration::from_millis(4000);

struct Inner {
    slot: watch::Sender<Option<Notification>>,
    next_id: AtomicU64,
    display: Duration,
}

/// Holds at most one notification and clears it after a fixed delay.
///
/// A newer notification replaces the current one immediately. Each clear
/// timer only removes the notification it was scheduled for, so the newer
/// one keeps its full display time.
#[derive(Clone)]
pub struct NotificationSurface {
    inner: Arc<Inner>,
}

impl NotificationSurface {
    pub fn new(display: Duration) -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                slot,
                next_id: AtomicU64::new(1),
                display,
            }),
        }
    }

    /// Observe the notification slot.
    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.inner.slot.subscribe()
    }

    /// The notification currently shown.
    pub fn current(&self) -> Option<Notification> {
        self.inner.slot.borrow().clone()
    }

    /// Number of notifications raised so far.
    pub fn issued(&self) -> u64 {
        self.inner.next_id.load(Ordering::SeqCst) - 1
    }

    pub fn display_duration(&self) -> Duration {
        self.inner.display
    }

    /// Show `message` and schedule its removal. Must run inside a tokio runtime.
    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        self.show(Notification::new(message, kind))
    }

    /// Show a prepared notification, assigning it a fresh id.
    pub fn show(&self, mut notification: Notification) -> u64 {
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        notification.id = id;

        match notification.kind {
            NotificationKind::Success => tracing::info!(id, message = %notification.message, "Notification"),
            NotificationKind::Error => tracing::warn!(id, message = %notification.message, "Notification"),
        }
        self.inner.slot.send_replace(Some(notification));

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(inner.display).await;
            let cleared = inner.slot.send_if_modified(|current| {
                if current.as_ref().is_some_and(|n| n.id == id) {
                    *current = None;
                    true
                } else {
                    false
                }
            });
            if cleared {
                tracing::debug!(id, "Notification expired");
            }
        });

        id
    }
}

impl Default for NotificationSurface {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY)
    }
}
