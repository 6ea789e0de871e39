//! Runtime inputs.
//!
//! The driver delivers two kinds of input: user intents from the
//! presentation layer ([`SessionCommand`]) and collaborator results or
//! platform signals already shaped as core events
//! ([`parlor_core::SessionEvent`]).

use parlor_core::SessionEvent;

/// One input polled from the driver.
#[derive(Debug, Clone)]
pub enum Input {
    /// A user intent.
    Command(SessionCommand),

    /// A collaborator result or platform signal.
    Event(SessionEvent),
}

/// User intents forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Send a chat message with the given text.
    SendMessage(String),

    /// Load the next older history page (viewer scrolled to the top).
    RequestOlderPage,

    /// Open subject edit mode.
    BeginRename,

    /// Update the in-progress subject draft.
    SubjectDraft(String),

    /// Submit the subject draft as a rename request.
    SaveRename,

    /// Close subject edit mode without renaming.
    CancelRename,

    /// Leave the room (subject to the confirmation gate).
    LeaveRoom,

    /// Go to the add-user screen.
    AddUser,

    /// Close the room view.
    Close,
}
