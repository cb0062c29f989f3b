//! # Notification Feed
//!
//! The ledger's single outbound notification surface.
//!
//! ## One Channel, Not Two
//! The original UI split user feedback between transient toasts and blocking
//! alert dialogs, chosen inside the state layer. Here every operation records
//! one structured `Notification` and the presentation layer alone decides
//! modal vs transient rendering.
//!
//! ## Contract
//! - Append-only, caller-driven: the feed never expires entries itself
//!   (auto-dismiss timers are a UI concern)
//! - Entries are removed only by `dismiss` with the entry's id
//! - Ids are UUIDs, not timestamps: two notifications recorded in the same
//!   millisecond must not collide

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Severity
// =============================================================================

/// How the presentation layer should weight a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Operation completed; transient confirmation is enough.
    Success,
    /// Operation rejected; state unchanged.
    Error,
    /// Neutral information.
    Info,
}

// =============================================================================
// Notification
// =============================================================================

/// A single user-facing message recorded by a ledger operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique identifier (UUID v4), used by `dismiss`.
    pub id: String,

    /// Human-readable message, ready for display.
    pub message: String,

    pub severity: Severity,

    /// When the notification was recorded.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Feed
// =============================================================================

/// Append-only list of notifications, oldest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationFeed {
    entries: Vec<Notification>,
}

impl NotificationFeed {
    /// Creates an empty feed.
    pub fn new() -> Self {
        NotificationFeed {
            entries: Vec::new(),
        }
    }

    /// Records a notification and returns its id.
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) -> String {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            message: message.into(),
            severity,
            created_at: Utc::now(),
        };
        let id = notification.id.clone();
        self.entries.push(notification);
        id
    }

    /// Records a success notification.
    pub fn success(&mut self, message: impl Into<String>) -> String {
        self.push(message, Severity::Success)
    }

    /// Records an error notification.
    pub fn error(&mut self, message: impl Into<String>) -> String {
        self.push(message, Severity::Error)
    }

    /// Records an info notification.
    pub fn info(&mut self, message: impl Into<String>) -> String {
        self.push(message, Severity::Info)
    }

    /// All live notifications, oldest first.
    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    /// Removes a notification by id. Returns whether anything was removed.
    pub fn dismiss(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|n| n.id != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
