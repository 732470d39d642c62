//! # Notification Center
//!
//! Two independent message slots shown above the inventory list.
//!
//! ## Slots
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Notification Slots                                 │
//! │                                                                         │
//! │  ERROR (sticky)                       SUCCESS (expiring)                │
//! │  ──────────────                       ──────────────────                │
//! │  post_error(msg)   → replaces         post_success(msg) → replaces      │
//! │  clear_error()     → next success     spawns expiry timer (ttl)         │
//! │  dismiss_error()   → user dismissed   a newer success aborts the old    │
//! │                                       timer and starts a fresh one      │
//! │  never expires                                                          │
//! │                                                                         │
//! │  t=0      post_success("A")     ─┐                                      │
//! │  t=2000   post_success("B")     ─┼─ A's timer aborted                   │
//! │  t=5000   B cleared              ◄┘  (2000 + ttl)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Expiry timers run on the ambient tokio runtime. Outside a runtime the
//! success message is still posted but never expires.

use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::DEFAULT_SUCCESS_TTL_MS;

/// One visible message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub posted_at: DateTime<Utc>,
}

impl Notice {
    fn now(message: impl Into<String>) -> Self {
        Notice {
            message: message.into(),
            posted_at: Utc::now(),
        }
    }
}

/// Read-only view of both slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSnapshot {
    pub error: Option<Notice>,
    pub success: Option<Notice>,
}

#[derive(Debug, Default)]
struct Slots {
    error: Option<Notice>,
    success: Option<Notice>,
    /// Bumped on every success; an expiry only clears its own generation.
    success_generation: u64,
    expiry: Option<JoinHandle<()>>,
}

/// Shared handle to the notification slots.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    slots: Arc<Mutex<Slots>>,
    success_ttl: Duration,
}

impl NotificationCenter {
    /// Creates a center whose success messages live for `success_ttl`.
    pub fn new(success_ttl: Duration) -> Self {
        NotificationCenter {
            slots: Arc::new(Mutex::new(Slots::default())),
            success_ttl,
        }
    }

    fn with_slots<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Slots) -> R,
    {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut slots)
    }

    /// Lifetime of success messages.
    pub fn success_ttl(&self) -> Duration {
        self.success_ttl
    }

    // =========================================================================
    // Error Slot
    // =========================================================================

    /// Replaces the sticky error.
    pub fn post_error(&self, message: impl Into<String>) {
        let notice = Notice::now(message);
        debug!(message = %notice.message, "Error notification posted");
        self.with_slots(|slots| slots.error = Some(notice));
    }

    /// Clears the sticky error as a side effect of a successful action.
    pub fn clear_error(&self) {
        self.with_slots(|slots| slots.error = None);
    }

    /// Clears the sticky error at the user's request.
    ///
    /// Returns true if there was an error to dismiss.
    pub fn dismiss_error(&self) -> bool {
        let dismissed = self.with_slots(|slots| slots.error.take().is_some());
        if dismissed {
            debug!("Error notification dismissed");
        }
        dismissed
    }

    // =========================================================================
    // Success Slot
    // =========================================================================

    /// Replaces the success message and restarts its expiry timer.
    pub fn post_success(&self, message: impl Into<String>) {
        let notice = Notice::now(message);
        debug!(message = %notice.message, "Success notification posted");

        let runtime = tokio::runtime::Handle::try_current();
        let weak: Weak<Mutex<Slots>> = Arc::downgrade(&self.slots);
        let ttl = self.success_ttl;

        self.with_slots(|slots| {
            slots.success = Some(notice);
            slots.success_generation += 1;
            let generation = slots.success_generation;

            if let Some(previous) = slots.expiry.take() {
                previous.abort();
            }

            match runtime {
                Ok(handle) => {
                    slots.expiry = Some(handle.spawn(expire_success(weak, generation, ttl)));
                }
                Err(_) => warn!("No async runtime available, success message will not expire"),
            }
        });
    }

    /// Reads both slots.
    pub fn snapshot(&self) -> NotificationSnapshot {
        self.with_slots(|slots| NotificationSnapshot {
            error: slots.error.clone(),
            success: slots.success.clone(),
        })
    }

    /// Current error message, if any.
    pub fn error_message(&self) -> Option<String> {
        self.with_slots(|slots| slots.error.as_ref().map(|n| n.message.clone()))
    }

    /// Current success message, if any.
    pub fn success_message(&self) -> Option<String> {
        self.with_slots(|slots| slots.success.as_ref().map(|n| n.message.clone()))
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_SUCCESS_TTL_MS))
    }
}

async fn expire_success(slots: Weak<Mutex<Slots>>, generation: u64, ttl: Duration) {
    tokio::time::sleep(ttl).await;

    let Some(slots) = slots.upgrade() else {
        return;
    };
    let mut slots = slots.lock().unwrap_or_else(PoisonError::into_inner);
    if slots.success_generation == generation {
        slots.success = None;
        slots.expiry = None;
        debug!("Success notification expired");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    fn center() -> NotificationCenter {
        NotificationCenter::new(Duration::from_millis(3000))
    }

    #[test]
    fn test_error_is_sticky_until_cleared() {
        let center = center();
        center.post_error("first");
        center.post_error("second");
        assert_eq!(center.error_message().as_deref(), Some("second"));

        center.clear_error();
        assert_eq!(center.error_message(), None);
    }

    #[test]
    fn test_dismiss_reports_whether_anything_was_shown() {
        let center = center();
        assert!(!center.dismiss_error());
        center.post_error("boom");
        assert!(center.dismiss_error());
        assert!(center.snapshot().error.is_none());
    }

    #[test]
    fn test_success_without_runtime_is_still_posted() {
        let center = center();
        center.post_success("saved");
        assert_eq!(center.success_message().as_deref(), Some("saved"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_expires_after_ttl() {
        let center = center();
        center.post_success("Product added successfully.");

        sleep(Duration::from_millis(2999)).await;
        assert!(center.success_message().is_some());

        sleep(Duration::from_millis(2)).await;
        assert!(center.success_message().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_success_restarts_timer() {
        let center = center();
        center.post_success("A");

        sleep(Duration::from_millis(2000)).await;
        center.post_success("B");

        sleep(Duration::from_millis(2000)).await;
        assert_eq!(center.success_message().as_deref(), Some("B"));

        sleep(Duration::from_millis(1001)).await;
        assert!(center.success_message().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_never_expires() {
        let center = center();
        center.post_error("still here");
        center.post_success("done");

        sleep(Duration::from_secs(60)).await;
        assert_eq!(center.error_message().as_deref(), Some("still here"));
        assert!(center.success_message().is_none());
    }
}
