//! Session error taxonomy.
//!
//! Transport failures never propagate uncaught to the presentation layer;
//! the runtime translates each at the boundary into one of these kinds and
//! handles it locally. There are no automatic retries anywhere: every retry
//! is a manual repetition of the same command.

use thiserror::Error;

use crate::action::Navigation;

/// Errors arising from session operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No identity is available; the session cannot start.
    #[error("no identity available")]
    MissingIdentity,

    /// No room id was supplied; the session cannot start.
    #[error("no room selected")]
    MissingRoom,

    /// A history page failed to load. A session without its transcript is
    /// not useful, so this forces navigation away.
    #[error("history load failed for page {page}")]
    HistoryLoadFailure {
        /// Page index that failed.
        page: u32,
    },

    /// The subject rename request failed. State is unchanged; the user may
    /// retry manually.
    #[error("subject rename failed")]
    RenameFailure,

    /// The leave request failed. The session stays open.
    #[error("leave request failed")]
    LeaveFailure,

    /// A presence publish failed. Presence is advisory; ignored.
    #[error("presence publish failed")]
    PresencePublishFailure,
}

impl SessionError {
    /// True when the error ends the session.
    ///
    /// History failures are fatal while rename/leave failures are
    /// recoverable: a session is meaningless without its initial transcript
    /// but meaningful without a successful rename.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::MissingIdentity | Self::MissingRoom | Self::HistoryLoadFailure { .. }
        )
    }

    /// Navigation target for errors that redirect instead of surfacing.
    pub fn navigation(&self) -> Option<Navigation> {
        match self {
            Self::MissingIdentity => Some(Navigation::Login),
            Self::MissingRoom | Self::HistoryLoadFailure { .. } => Some(Navigation::RoomList),
            Self::RenameFailure | Self::LeaveFailure | Self::PresencePublishFailure => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_failure_is_fatal_rename_is_not() {
        assert!(SessionError::HistoryLoadFailure { page: 0 }.is_fatal());
        assert!(!SessionError::RenameFailure.is_fatal());
        assert!(!SessionError::LeaveFailure.is_fatal());
        assert!(!SessionError::PresencePublishFailure.is_fatal());
    }

    #[test]
    fn redirect_targets() {
        assert_eq!(SessionError::MissingIdentity.navigation(), Some(Navigation::Login));
        assert_eq!(SessionError::MissingRoom.navigation(), Some(Navigation::RoomList));
        assert_eq!(
            SessionError::HistoryLoadFailure { page: 2 }.navigation(),
            Some(Navigation::RoomList)
        );
        assert_eq!(SessionError::RenameFailure.navigation(), None);
    }
}
