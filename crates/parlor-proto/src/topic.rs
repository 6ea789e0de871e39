//! Subscription topics and publish destinations.
//!
//! The stream service routes on string paths: one room-scoped subscription
//! topic for inbound events, and fixed application destinations for outbound
//! chat and presence bodies.

use crate::RoomId;

/// Destination for outbound chat messages ([`crate::ChatPublish`] bodies).
pub const MESSAGE_DESTINATION: &str = "/app/private-message";

/// Destination announcing the local user became active.
pub const USER_ACTIVE_DESTINATION: &str = "/app/user-active";

/// Destination announcing the local user became inactive.
pub const USER_INACTIVE_DESTINATION: &str = "/app/user-inactive";

/// Room-scoped subscription topic for live events.
pub fn room_topic(room_id: RoomId) -> String {
    format!("/topic/private-chat/{room_id}")
}
