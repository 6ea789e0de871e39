//! Stream payload classification.
//!
//! The protocol dispatches on a single discriminator: a payload whose
//! `sender_id` is `null` or the reserved sentinel `0` is a subject-change
//! (system) event; anything else is a user message. No other field is
//! consulted at this level.

use crate::{SYSTEM_SENDER, WireMessage};

/// Top-level classification of an inbound stream payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// System-originated event: subject change, join/leave announcement.
    SubjectChange,

    /// User-authored chat message.
    UserMessage,
}

/// Classify an inbound payload.
///
/// Total and deterministic: `sender_id` in `{None, Some(0)}` yields
/// [`EventKind::SubjectChange`], every other value yields
/// [`EventKind::UserMessage`].
pub fn classify(payload: &WireMessage) -> EventKind {
    match payload.sender_id {
        None | Some(SYSTEM_SENDER) => EventKind::SubjectChange,
        Some(_) => EventKind::UserMessage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(sender_id: Option<u64>) -> WireMessage {
        WireMessage {
            id: None,
            sender_id,
            sender_name: String::new(),
            content: "x".into(),
            enrolled_at: 0,
        }
    }

    #[test]
    fn null_sender_is_subject_change() {
        assert_eq!(classify(&payload(None)), EventKind::SubjectChange);
    }

    #[test]
    fn sentinel_sender_is_subject_change() {
        assert_eq!(classify(&payload(Some(0))), EventKind::SubjectChange);
    }

    #[test]
    fn any_other_sender_is_user_message() {
        assert_eq!(classify(&payload(Some(1))), EventKind::UserMessage);
        assert_eq!(classify(&payload(Some(u64::MAX))), EventKind::UserMessage);
    }
}
