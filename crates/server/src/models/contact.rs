//! Contact message domain types.
//!
//! Messages arrive from the public contact form and are worked by admins
//! through status updates and replies. Status transitions are free-form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stonebridge_core::{AdminId, ContactMessageId, ContactStatus, Email};

/// A message submitted through the public contact form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: ContactMessageId,
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub message: String,
    pub status: ContactStatus,
    pub reply: Option<String>,
    pub replied_at: Option<DateTime<Utc>>,
    pub replied_by: Option<AdminId>,
    pub responded_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public submission payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

/// Admin triage update (status and/or notes).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactUpdate {
    pub status: Option<ContactStatus>,
    pub notes: Option<String>,
}

impl ContactUpdate {
    /// Merge this patch into an existing message.
    ///
    /// Closing a message stamps `responded_at` if it is not already set.
    pub fn apply(self, message: &mut ContactMessage, now: DateTime<Utc>) {
        if let Some(status) = self.status {
            message.status = status;
            if status == ContactStatus::Closed && message.responded_at.is_none() {
                message.responded_at = Some(now);
            }
        }
        if let Some(notes) = self.notes {
            message.notes = Some(notes);
        }
        message.updated_at = now;
    }
}

/// Reply payload sent by an admin.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactReply {
    pub reply: String,
    /// Status to set after replying; defaults to `closed`.
    pub status: Option<ContactStatus>,
}

impl ContactMessage {
    /// Stamp a reply onto this message.
    pub fn record_reply(&mut self, reply: String, replied_by: AdminId, status: Option<ContactStatus>, now: DateTime<Utc>) {
        self.reply = Some(reply);
        self.replied_at = Some(now);
        self.replied_by = Some(replied_by);
        self.responded_at = Some(now);
        self.status = status.unwrap_or(ContactStatus::Closed);
        self.updated_at = now;
    }
}
