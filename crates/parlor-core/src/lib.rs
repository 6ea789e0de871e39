//! Session core
//!
//! Action-based state machine for one chat room session. Merges paginated
//! history with a live event stream into one ordered transcript, tracks
//! membership and subject changes, and derives a race-free unread count from
//! local activity.
//!
//! # Architecture
//!
//! The core is sans-IO: it receives events ([`SessionEvent`]), processes them
//! through pure state machine logic, and returns actions ([`SessionAction`])
//! for the caller to execute. One [`Session`] instance owns all state for one
//! room view; nothing is shared across rooms and there is no module-level
//! state.
//!
//! # Components
//!
//! - [`Session`]: top-level controller owning the room state
//! - [`Transcript`]: ordered log of system and user entries
//! - [`HistoryPager`]: backward-pagination cursor with single-in-flight guard
//! - [`PresenceTracker`]: local activity state and unread counter
//! - [`SessionEvent`] / [`SessionAction`]: the event/action vocabulary

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod error;
mod event;
mod metadata;
mod pager;
mod presence;
mod session;
mod transcript;

pub use action::{Anchor, Navigation, SessionAction};
pub use error::SessionError;
pub use event::SessionEvent;
pub use metadata::{Member, MembershipSet, RoomMetadata};
pub use pager::HistoryPager;
pub use parlor_proto::{RoomId, UserId};
pub use presence::{Activity, ActivityCell, PresenceTracker};
pub use session::Session;
pub use transcript::{Entry, Transcript};
