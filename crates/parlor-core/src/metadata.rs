//! Room metadata and membership.

use parlor_proto::{RoomId, UserId, WireUser};

/// Room-level metadata for the active session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomMetadata {
    /// Room identifier.
    pub room_id: RoomId,
    /// Room subject. Overwritten by rename acknowledgments (optimistic,
    /// confirmed) and by subject-change events (authoritative).
    pub name: String,
    /// Total history pages reported by the last page load.
    pub total_pages: u32,
}

impl RoomMetadata {
    /// Metadata for a room whose first page has not loaded yet.
    pub fn new(room_id: RoomId) -> Self {
        Self { room_id, name: String::new(), total_pages: 0 }
    }
}

/// A room member.
///
/// Members discovered through history pages carry their stable id; members
/// derived from announcement prose carry only a display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Stable user id, when known.
    pub user_id: Option<UserId>,
    /// Display name.
    pub name: String,
}

impl From<WireUser> for Member {
    fn from(user: WireUser) -> Self {
        Self { user_id: user.user_id, name: user.name }
    }
}

/// The room's membership list.
///
/// Replaced wholesale by history loads; mutated by name on membership
/// announcements. Name-keyed mutation is a protocol-level fragility kept
/// deliberately (see parlor-proto's membership module).
#[derive(Debug, Clone, Default)]
pub struct MembershipSet {
    members: Vec<Member>,
}

impl MembershipSet {
    /// Replace the whole list with the membership from a history page.
    pub fn replace(&mut self, users: Vec<WireUser>) {
        self.members = users.into_iter().map(Member::from).collect();
    }

    /// Add a member known only by display name.
    pub fn add_by_name(&mut self, name: String) {
        self.members.push(Member { user_id: None, name });
    }

    /// Remove every member with the given display name.
    pub fn remove_by_name(&mut self, name: &str) {
        self.members.retain(|m| m.name != name);
    }

    /// True when a member with the given name is present.
    pub fn contains_name(&self, name: &str) -> bool {
        self.members.iter().any(|m| m.name == name)
    }

    /// Members in listing order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when no members are listed.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Discard all members.
    pub fn clear(&mut self) {
        self.members.clear();
    }
}
