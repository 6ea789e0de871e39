//! Session side-effects and directives.
//!
//! Actions are instructions produced by the session state machine for the
//! runtime to execute. The core never performs I/O itself.

use crate::presence::Activity;
use parlor_proto::{RoomId, UserId};

/// Actions produced by the session state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Render the current session state.
    Render,

    /// Dispatch a history page fetch.
    FetchPage {
        /// Room to fetch for.
        room_id: RoomId,
        /// Page index to fetch.
        page: u32,
    },

    /// Open the room-scoped live subscription.
    Subscribe {
        /// Subscription topic.
        topic: String,
    },

    /// Release the live subscription.
    Unsubscribe,

    /// Publish a chat message. Fire-and-forget; the echo arrives back via
    /// the stream like any other message.
    SendChat {
        /// Target room.
        room_id: RoomId,
        /// Local user's id.
        sender_id: UserId,
        /// Message text.
        content: String,
    },

    /// Publish a presence signal. Fire-and-forget, best-effort.
    PublishPresence {
        /// Room the signal applies to.
        room_id: RoomId,
        /// Local user's id.
        user_id: UserId,
        /// The state being announced.
        activity: Activity,
    },

    /// Issue a subject rename request.
    RequestRename {
        /// Room to rename.
        room_id: RoomId,
        /// Requested subject.
        name: String,
    },

    /// Issue a leave-room request.
    RequestLeave {
        /// Room to leave.
        room_id: RoomId,
    },

    /// Ask the external yes/no gate whether to leave the room.
    ConfirmLeave {
        /// Room in question.
        room_id: RoomId,
    },

    /// Viewer anchoring directive, emitted after the render that commits the
    /// corresponding transcript mutation.
    Anchor(Anchor),

    /// Leave the room view.
    Navigate(Navigation),
}

/// Viewer anchoring directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Scroll the transcript to its latest entry.
    Bottom,

    /// Keep the viewer's position stable over already-seen content.
    Preserve {
        /// Number of entries prepended above the previously visible
        /// content; the presentation layer derives the height delta from
        /// this extent.
        prepended: usize,
    },
}

/// Navigation targets outside the room view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Identity is missing; go to the login screen.
    Login,

    /// The room list. Used when no room is selected, after leaving, and on
    /// fatal history failures.
    RoomList,

    /// The add-user screen for the given room.
    AddUser {
        /// Room to add a user to.
        room_id: RoomId,
    },
}
