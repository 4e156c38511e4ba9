// Notification center
// Ephemeral toast messages with auto-dismiss timers. Timers are detached
// tasks; removing a notification early makes the eventual timer a no-op.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Default auto-dismiss duration
pub const DEFAULT_DURATION_MS: u64 = 5000;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    Success,
    Error,
    Info,
    Warning,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub category: NotificationCategory,
    pub message: String,
    /// 0 means the notification never auto-dismisses
    pub duration_ms: u64,
}

/// Shared list of active notifications, insertion order preserved
#[derive(Clone, Default)]
pub struct NotificationCenter {
    inner: Arc<RwLock<Vec<Notification>>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a notification and schedule its removal after `duration_ms`.
    /// Returns the generated identifier.
    pub async fn add(
        &self,
        category: NotificationCategory,
        message: impl Into<String>,
        duration_ms: u64,
    ) -> String {
        let id = Uuid::new_v4().to_string();

        self.inner.write().await.push(Notification {
            id: id.clone(),
            category,
            message: message.into(),
            duration_ms,
        });

        if duration_ms > 0 {
            let center = self.clone();
            let timer_id = id.clone();
            // Deadline is fixed here, not at the task's first poll, so the
            // dismissal is anchored to the moment the toast appeared
            let timer = tokio::time::sleep(Duration::from_millis(duration_ms));
            tokio::spawn(async move {
                timer.await;
                center.remove(&timer_id).await;
            });
        }

        id
    }

    pub async fn success(&self, message: impl Into<String>) -> String {
        self.add(NotificationCategory::Success, message, DEFAULT_DURATION_MS)
            .await
    }

    pub async fn error(&self, message: impl Into<String>) -> String {
        self.add(NotificationCategory::Error, message, DEFAULT_DURATION_MS)
            .await
    }

    pub async fn info(&self, message: impl Into<String>) -> String {
        self.add(NotificationCategory::Info, message, DEFAULT_DURATION_MS)
            .await
    }

    pub async fn warning(&self, message: impl Into<String>) -> String {
        self.add(NotificationCategory::Warning, message, DEFAULT_DURATION_MS)
            .await
    }

    /// Remove by id; removing an absent id is a no-op
    pub async fn remove(&self, id: &str) {
        self.inner.write().await.retain(|n| n.id != id);
    }

    /// Remove everything. Pending timers fire against absent ids harmlessly.
    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }

    pub async fn notifications(&self) -> Vec<Notification> {
        self.inner.read().await.clone()
    }
}
