//! Notification queue entries.
//!
//! # Invariants
//! - `NotificationId` is generated once per entry and never reused.
//! - `created_at_ms` comes from the caller's clock, not from wall time.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Severity shown as the toast colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Warning,
    Error,
    Success,
}

/// Opaque unique notification identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(Uuid);

impl NotificationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for NotificationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Producer input for `DashboardStore::add_notification`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotification {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
}

impl NewNotification {
    pub fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }
}

/// Stored notification with generated identity and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Milliseconds on the store clock when the entry was added.
    pub created_at_ms: u64,
}

impl Notification {
    pub(crate) fn from_new(new: NewNotification, created_at_ms: u64) -> Self {
        Self {
            id: NotificationId::new(),
            message: new.message,
            kind: new.kind,
            created_at_ms,
        }
    }
}
