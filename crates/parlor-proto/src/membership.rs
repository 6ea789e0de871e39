//! Membership mutations derived from system announcement prose.
//!
//! The server does not emit structured membership events; joins and leaves
//! arrive as human-readable system messages. This module pattern-matches the
//! two known shapes:
//!
//! - `"<name>" left the chat`
//! - `"<name>" added by "<actor>"`
//!
//! Identity here is name-based, not id-based. Duplicate display names collide
//! and a localized server breaks the patterns entirely; the parser is kept in
//! one place so a structured `MemberAdded`/`MemberRemoved` protocol event can
//! replace it without touching session logic.

/// A membership mutation recovered from announcement text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipChange {
    /// The named member left the room.
    Left {
        /// Display name of the member who left.
        name: String,
    },

    /// A member was added to the room.
    Added {
        /// Display name of the new member.
        name: String,
        /// Display name of the member who added them.
        actor: String,
    },
}

const LEFT_SUFFIX: &str = "\" left the chat";
const ADDED_INFIX: &str = "\" added by \"";

/// Recover a membership mutation from a system announcement, if the text
/// matches one of the known shapes.
pub fn parse(content: &str) -> Option<MembershipChange> {
    if let Some(rest) = content.strip_prefix('"') {
        if let Some(name) = rest.strip_suffix(LEFT_SUFFIX)
            && !name.is_empty()
        {
            return Some(MembershipChange::Left { name: name.to_string() });
        }
        if let Some(trailing) = rest.strip_suffix('"')
            && let Some((name, actor)) = trailing.split_once(ADDED_INFIX)
            && !name.is_empty()
            && !actor.is_empty()
        {
            return Some(MembershipChange::Added {
                name: name.to_string(),
                actor: actor.to_string(),
            });
        }
    }
    None
}
