//! Serde models for the JSON payloads exchanged with the server.
//!
//! Field names are camelCase on the wire. Inbound shapes ([`WireMessage`],
//! [`HistoryPage`]) tolerate absent optional fields; outbound shapes are
//! exactly the bodies the server expects on its publish destinations.

use serde::{Deserialize, Serialize};

use crate::{ProtocolError, RoomId, UserId};

/// A single message payload as delivered by the stream or inside a history
/// page.
///
/// `sender_id` is `None` for system-originated entries; the server may also
/// use the sentinel `0` for the same purpose (see [`crate::classify`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMessage {
    /// Server-assigned message id, absent on some system entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Sender's user id. `None` or `0` marks a system entry.
    #[serde(default)]
    pub sender_id: Option<UserId>,

    /// Sender's display name. Subject-change payloads carry the new room
    /// name here.
    #[serde(default)]
    pub sender_name: String,

    /// Message text, or the human-readable system announcement.
    pub content: String,

    /// Server enrollment timestamp, milliseconds since the epoch.
    #[serde(default)]
    pub enrolled_at: i64,
}

impl WireMessage {
    /// Parse a raw stream payload body.
    pub fn from_json(body: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(body).map_err(ProtocolError::from)
    }
}

/// A room member as listed in a history page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireUser {
    /// Stable user id. Absent for members derived from prose events.
    #[serde(default)]
    pub user_id: Option<UserId>,

    /// Display name.
    pub name: String,
}

/// One page of chat history as returned by the history service.
///
/// Page 0 is the newest page; higher indices page backwards in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPage {
    /// Total number of pages available for the room.
    pub total_pages: u32,

    /// Current room subject.
    pub chat_room_name: String,

    /// Full membership list at fetch time.
    #[serde(default)]
    pub users: Vec<WireUser>,

    /// Messages on this page, oldest first.
    #[serde(default)]
    pub messages: Vec<WireMessage>,
}

impl HistoryPage {
    /// Parse a history response body.
    pub fn from_json(body: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(body).map_err(ProtocolError::from)
    }
}

/// Outbound chat message body for the message destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatPublish {
    /// Target room.
    pub chat_room_id: RoomId,

    /// Local user's id.
    pub sender_id: UserId,

    /// Message text.
    pub content: String,
}

/// Outbound presence body for the activity destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceUpdate {
    /// Room the activity applies to.
    pub chat_room_id: RoomId,

    /// Local user's id.
    pub user_id: UserId,
}

/// Request body for updating the room subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectUpdate {
    /// Room to rename.
    pub chat_room_id: RoomId,

    /// New subject.
    pub chat_room_name: String,
}
