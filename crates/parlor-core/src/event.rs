//! Session input events.
//!
//! Events originate from two sources: collaborator completions (history
//! fetches, rename/leave requests, the confirmation gate) and the live
//! stream/platform signals (payloads, visibility, focus). The runtime feeds
//! them into [`crate::Session::handle`] in arrival order.

use parlor_proto::{HistoryPage, RoomId, WireMessage};

/// Events processed by the session state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A history page load completed.
    PageLoaded {
        /// Room the result belongs to. Results for other rooms are stale
        /// and discarded at apply time.
        room_id: RoomId,
        /// Page index that was requested.
        page: u32,
        /// The page contents.
        result: HistoryPage,
    },

    /// A history page load failed. Fatal for the session.
    PageLoadFailed {
        /// Room the failure belongs to.
        room_id: RoomId,
        /// Page index that was requested.
        page: u32,
    },

    /// A payload arrived on the room's live stream.
    StreamPayload {
        /// Room the subscription belongs to.
        room_id: RoomId,
        /// The raw payload, already JSON-decoded.
        payload: WireMessage,
    },

    /// The view's visibility changed.
    Visibility {
        /// True when the view became hidden.
        hidden: bool,
    },

    /// The window's focus changed.
    Focus {
        /// True when focus was gained.
        focused: bool,
    },

    /// The rename request was acknowledged.
    ///
    /// Carries the confirmed name so a rename issued before an earlier ack
    /// arrives cannot apply the wrong value.
    RenameSucceeded {
        /// The confirmed subject.
        name: String,
    },

    /// The rename request failed. Edit mode stays open for a manual retry.
    RenameFailed {
        /// The subject that was requested.
        name: String,
    },

    /// The leave confirmation gate answered.
    LeaveConfirmed {
        /// True when the user confirmed leaving.
        accepted: bool,
    },

    /// The leave request succeeded; the session is over.
    LeaveSucceeded,

    /// The leave request failed; the session stays open.
    LeaveFailed,
}
