//! Wire protocol for Parlor
//!
//! JSON payload shapes and protocol-boundary parsing for the chat session
//! client. This crate owns everything that touches the wire representation:
//! the serde models for history pages and stream payloads, the event
//! classifier, the membership-prose parser, and topic/destination naming.
//!
//! # Components
//!
//! - [`WireMessage`] / [`HistoryPage`]: inbound payload shapes
//! - [`ChatPublish`] / [`PresenceUpdate`] / [`SubjectUpdate`]: outbound bodies
//! - [`classify`]: sender-id discriminator for stream payloads
//! - [`membership`]: prose-derived membership mutations
//! - [`topic`]: subscription topics and publish destinations

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod classify;
mod error;
pub mod membership;
mod payload;
pub mod topic;

pub use classify::{EventKind, classify};
pub use error::ProtocolError;
pub use payload::{
    ChatPublish, HistoryPage, PresenceUpdate, SubjectUpdate, WireMessage, WireUser,
};

/// Stable user identifier assigned by the server.
pub type UserId = u64;

/// Chat room identifier.
pub type RoomId = u64;

/// Sender id value reserved for system-originated entries.
///
/// The wire carries system origin either as JSON `null` or as this sentinel;
/// both decode to the same classification.
pub const SYSTEM_SENDER: UserId = 0;
