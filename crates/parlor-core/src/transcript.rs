//! Ordered transcript of system and user entries.
//!
//! The transcript is an append-and-prepend log: live events append to the
//! tail, older history pages prepend at the head. Entries are totally ordered
//! by arrival and never reorder after insertion. Page merges are idempotent,
//! keyed by page index, so a re-delivered page changes nothing.

use parlor_proto::{EventKind, UserId, WireMessage, classify};
use std::collections::HashSet;

/// A single transcript item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Room-level announcement: rename, join, leave.
    System {
        /// Announcement text.
        content: String,
        /// Server timestamp, milliseconds since the epoch.
        enrolled_at: i64,
    },

    /// User-authored chat message.
    User {
        /// Sender's stable id.
        sender_id: UserId,
        /// Sender's display name at send time.
        sender_name: String,
        /// Message text.
        content: String,
        /// Server timestamp, milliseconds since the epoch.
        enrolled_at: i64,
    },
}

impl Entry {
    /// Build an entry from a wire payload using the protocol classifier.
    pub fn from_wire(payload: &WireMessage) -> Self {
        match (classify(payload), payload.sender_id) {
            (EventKind::UserMessage, Some(sender_id)) => Self::User {
                sender_id,
                sender_name: payload.sender_name.clone(),
                content: payload.content.clone(),
                enrolled_at: payload.enrolled_at,
            },
            _ => Self::System {
                content: payload.content.clone(),
                enrolled_at: payload.enrolled_at,
            },
        }
    }

    /// Entry text.
    pub fn content(&self) -> &str {
        match self {
            Self::System { content, .. } | Self::User { content, .. } => content,
        }
    }

    /// True for system (room-level) entries.
    pub fn is_system(&self) -> bool {
        matches!(self, Self::System { .. })
    }
}

/// Ordered log of entries for one room session.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<Entry>,
    merged_pages: HashSet<u32>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole transcript with page 0.
    ///
    /// Discards any previously merged pages; the page-merge history restarts
    /// from page 0.
    pub fn replace(&mut self, entries: Vec<Entry>) {
        self.entries = entries;
        self.merged_pages.clear();
        self.merged_pages.insert(0);
    }

    /// Prepend an older page at the head of the transcript.
    ///
    /// Idempotent per page index: a page that was already merged is dropped
    /// and `0` is returned. Otherwise returns the number of prepended
    /// entries, which the presentation layer uses to keep the viewer's
    /// anchor stable over already-seen content.
    pub fn prepend_page(&mut self, page: u32, entries: Vec<Entry>) -> usize {
        if !self.merged_pages.insert(page) {
            return 0;
        }
        let prepended = entries.len();
        let tail = std::mem::replace(&mut self.entries, entries);
        self.entries.extend(tail);
        prepended
    }

    /// Append a live entry at the tail.
    pub fn append(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
