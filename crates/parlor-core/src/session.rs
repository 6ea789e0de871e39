//! Session controller.
//!
//! One [`Session`] owns all state for one room view: transcript, metadata,
//! membership, pagination, and presence. It is a pure state machine: events
//! go in through [`Session::handle`], commands come in through the public
//! methods, and both return actions for the runtime to execute. All mutation
//! is serialized through these entry points; each call is one atomic update.
//!
//! Anchor directives are ordered after the [`SessionAction::Render`] that
//! commits the corresponding transcript mutation, so the presentation layer
//! measures settled content.

use parlor_proto::{EventKind, HistoryPage, RoomId, UserId, WireMessage, classify, membership, topic};
use tracing::{debug, warn};

use crate::{
    action::{Anchor, Navigation, SessionAction},
    error::SessionError,
    event::SessionEvent,
    metadata::{MembershipSet, RoomMetadata},
    pager::HistoryPager,
    presence::{Activity, ActivityCell, PresenceTracker},
    transcript::{Entry, Transcript},
};

/// State machine for one chat room session.
///
/// Instantiable per room; holds no shared or module-level state. Torn down
/// when the room changes or the view closes; teardown is idempotent.
#[derive(Debug)]
pub struct Session {
    room_id: RoomId,
    user_id: UserId,
    metadata: RoomMetadata,
    members: MembershipSet,
    transcript: Transcript,
    pager: HistoryPager,
    presence: PresenceTracker,
    editing_subject: bool,
    subject_draft: String,
    torn_down: bool,
}

impl Session {
    /// Start a session for the given identity and room.
    ///
    /// Returns the session plus its boot actions: the page-0 fetch and the
    /// stream subscription are issued together, concurrently, not
    /// sequentially.
    ///
    /// # Errors
    ///
    /// [`SessionError::MissingIdentity`] when no identity is available and
    /// [`SessionError::MissingRoom`] when no room id is supplied. Both map
    /// to navigation targets, not UI-surfaced failures.
    pub fn bootstrap(
        identity: Option<UserId>,
        room_id: Option<RoomId>,
    ) -> Result<(Self, Vec<SessionAction>), SessionError> {
        let user_id = identity.ok_or(SessionError::MissingIdentity)?;
        let room_id = room_id.ok_or(SessionError::MissingRoom)?;

        let mut session = Self {
            room_id,
            user_id,
            metadata: RoomMetadata::new(room_id),
            members: MembershipSet::default(),
            transcript: Transcript::new(),
            pager: HistoryPager::new(),
            presence: PresenceTracker::new(),
            editing_subject: false,
            subject_draft: String::new(),
            torn_down: false,
        };
        let page = session.pager.begin_initial();
        let actions = vec![
            SessionAction::FetchPage { room_id, page },
            SessionAction::Subscribe { topic: topic::room_topic(room_id) },
            SessionAction::Render,
        ];
        Ok((session, actions))
    }

    /// Process an event and return resulting actions.
    pub fn handle(&mut self, event: SessionEvent) -> Vec<SessionAction> {
        if self.torn_down {
            return vec![];
        }
        match event {
            SessionEvent::PageLoaded { room_id, page, result } => {
                self.apply_page(room_id, page, result)
            },
            SessionEvent::PageLoadFailed { room_id, page } => {
                if room_id != self.room_id {
                    debug!(room_id, page, "discarding stale page failure");
                    return vec![];
                }
                self.pager.fail();
                let err = SessionError::HistoryLoadFailure { page };
                warn!(room_id, page, %err, "leaving room");
                vec![SessionAction::Navigate(Navigation::RoomList)]
            },
            SessionEvent::StreamPayload { room_id, payload } => {
                if room_id != self.room_id {
                    debug!(room_id, "discarding stale stream payload");
                    return vec![];
                }
                self.apply_payload(&payload)
            },
            SessionEvent::Visibility { hidden } => {
                self.apply_activity(if hidden { Activity::Inactive } else { Activity::Active })
            },
            SessionEvent::Focus { focused } => {
                self.apply_activity(if focused { Activity::Active } else { Activity::Inactive })
            },
            SessionEvent::RenameSucceeded { name } => {
                self.metadata.name = name;
                self.editing_subject = false;
                vec![SessionAction::Render]
            },
            SessionEvent::RenameFailed { name } => {
                // Edit mode stays open; the user retries manually.
                warn!(%name, error = %SessionError::RenameFailure, "subject unchanged");
                vec![]
            },
            SessionEvent::LeaveConfirmed { accepted } => {
                if accepted {
                    vec![SessionAction::RequestLeave { room_id: self.room_id }]
                } else {
                    vec![]
                }
            },
            SessionEvent::LeaveSucceeded => {
                let mut actions = self.teardown();
                actions.push(SessionAction::Navigate(Navigation::RoomList));
                actions
            },
            SessionEvent::LeaveFailed => {
                warn!(
                    room_id = self.room_id,
                    error = %SessionError::LeaveFailure,
                    "session stays open"
                );
                vec![]
            },
        }
    }

    /// Request the next older history page.
    ///
    /// No-op while a load is in flight or when the last page has already
    /// been loaded.
    pub fn request_older_page(&mut self) -> Vec<SessionAction> {
        if self.torn_down {
            return vec![];
        }
        match self.pager.request_older(self.metadata.total_pages) {
            Some(page) => vec![SessionAction::FetchPage { room_id: self.room_id, page }],
            None => vec![],
        }
    }

    /// Send a chat message.
    ///
    /// No-op on blank content or while a history load is in flight. The
    /// message is never appended optimistically; the echo arrives via the
    /// stream like any other message.
    pub fn send_message(&self, content: &str) -> Vec<SessionAction> {
        if self.torn_down || self.pager.is_loading() || content.trim().is_empty() {
            return vec![];
        }
        vec![SessionAction::SendChat {
            room_id: self.room_id,
            sender_id: self.user_id,
            content: content.to_string(),
        }]
    }

    /// Open subject edit mode with a draft prefilled from the current name.
    pub fn begin_rename(&mut self) -> Vec<SessionAction> {
        self.editing_subject = true;
        self.subject_draft = self.metadata.name.clone();
        vec![SessionAction::Render]
    }

    /// Track the in-progress subject draft.
    pub fn set_subject_draft(&mut self, draft: impl Into<String>) {
        self.subject_draft = draft.into();
    }

    /// Close subject edit mode without issuing a request.
    pub fn cancel_rename(&mut self) -> Vec<SessionAction> {
        self.editing_subject = false;
        vec![SessionAction::Render]
    }

    /// Request a subject rename. No-op on blank input.
    ///
    /// The name is applied locally only on acknowledgment
    /// ([`SessionEvent::RenameSucceeded`]); on failure edit mode stays open
    /// with no rollback.
    pub fn rename_room(&self, name: &str) -> Vec<SessionAction> {
        if self.torn_down || name.trim().is_empty() {
            return vec![];
        }
        vec![SessionAction::RequestRename { room_id: self.room_id, name: name.to_string() }]
    }

    /// Request a rename with the current draft.
    pub fn save_rename(&self) -> Vec<SessionAction> {
        self.rename_room(&self.subject_draft)
    }

    /// Leave the room, pending explicit confirmation by the external gate.
    pub fn leave_room(&self) -> Vec<SessionAction> {
        if self.torn_down {
            return vec![];
        }
        vec![SessionAction::ConfirmLeave { room_id: self.room_id }]
    }

    /// Navigate to the add-user screen. The membership mutation itself
    /// arrives back through the stream.
    pub fn add_user(&self) -> Vec<SessionAction> {
        vec![SessionAction::Navigate(Navigation::AddUser { room_id: self.room_id })]
    }

    /// Release the subscription and discard session state.
    ///
    /// Safe to call multiple times; only the first call releases anything.
    pub fn teardown(&mut self) -> Vec<SessionAction> {
        if self.torn_down {
            return vec![];
        }
        self.torn_down = true;
        self.transcript = Transcript::new();
        self.members.clear();
        self.pager = HistoryPager::new();
        vec![SessionAction::Unsubscribe]
    }

    fn apply_page(&mut self, room_id: RoomId, page: u32, result: HistoryPage) -> Vec<SessionAction> {
        if room_id != self.room_id {
            debug!(room_id, page, "discarding stale page result");
            return vec![];
        }
        self.pager.complete();
        self.metadata.total_pages = result.total_pages;
        self.metadata.name = result.chat_room_name;
        self.members.replace(result.users);

        let entries: Vec<Entry> = result.messages.iter().map(Entry::from_wire).collect();
        if page == 0 {
            self.transcript.replace(entries);
            return vec![SessionAction::Render, SessionAction::Anchor(Anchor::Bottom)];
        }

        let prepended = self.transcript.prepend_page(page, entries);
        if prepended == 0 {
            // Re-delivered page; the transcript is unchanged.
            return vec![SessionAction::Render];
        }
        vec![SessionAction::Render, SessionAction::Anchor(Anchor::Preserve { prepended })]
    }

    fn apply_payload(&mut self, payload: &WireMessage) -> Vec<SessionAction> {
        match (classify(payload), payload.sender_id) {
            (EventKind::UserMessage, Some(sender_id)) => {
                self.transcript.append(Entry::User {
                    sender_id,
                    sender_name: payload.sender_name.clone(),
                    content: payload.content.clone(),
                    enrolled_at: payload.enrolled_at,
                });
                // Activity is read through the live cell at this instant,
                // never from a value captured at subscription time.
                self.presence.record_incoming();
            },
            _ => {
                // Subject-change payloads carry the new name in sender_name.
                if !payload.sender_name.is_empty() {
                    self.metadata.name = payload.sender_name.clone();
                }
                self.transcript.append(Entry::System {
                    content: payload.content.clone(),
                    enrolled_at: payload.enrolled_at,
                });
                match membership::parse(&payload.content) {
                    Some(membership::MembershipChange::Left { name }) => {
                        self.members.remove_by_name(&name);
                    },
                    Some(membership::MembershipChange::Added { name, .. }) => {
                        self.members.add_by_name(name);
                    },
                    None => {},
                }
            },
        }
        vec![SessionAction::Render, SessionAction::Anchor(Anchor::Bottom)]
    }

    fn apply_activity(&mut self, activity: Activity) -> Vec<SessionAction> {
        self.presence.apply(activity);
        vec![
            SessionAction::PublishPresence {
                room_id: self.room_id,
                user_id: self.user_id,
                activity,
            },
            SessionAction::Render,
        ]
    }

    /// Room this session is bound to.
    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Local user's id.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// The ordered transcript.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Room metadata snapshot.
    pub fn metadata(&self) -> &RoomMetadata {
        &self.metadata
    }

    /// Membership snapshot.
    pub fn members(&self) -> &MembershipSet {
        &self.members
    }

    /// Current local activity.
    pub fn activity(&self) -> Activity {
        self.presence.activity()
    }

    /// Live reference to the activity slot.
    pub fn activity_cell(&self) -> ActivityCell {
        self.presence.cell()
    }

    /// Messages received while inactive since the last active transition.
    pub fn unread_count(&self) -> u32 {
        self.presence.unread()
    }

    /// True while a history load is in flight.
    pub fn is_loading(&self) -> bool {
        self.pager.is_loading()
    }

    /// Index of the most recently requested history page.
    pub fn current_page(&self) -> u32 {
        self.pager.current_page()
    }

    /// True while subject edit mode is open.
    pub fn is_editing_subject(&self) -> bool {
        self.editing_subject
    }

    /// The in-progress subject draft.
    pub fn subject_draft(&self) -> &str {
        &self.subject_draft
    }

    /// True once the session has been torn down.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

#[cfg(test)]
mod tests {
    use parlor_proto::WireUser;

    use super::*;

    fn booted() -> Session {
        let (session, _) = Session::bootstrap(Some(42), Some(7)).expect("bootstrap");
        session
    }

    fn page(total_pages: u32, messages: Vec<WireMessage>) -> HistoryPage {
        HistoryPage {
            total_pages,
            chat_room_name: "Trip".into(),
            users: vec![WireUser { user_id: Some(1), name: "A".into() }],
            messages,
        }
    }

    fn user_msg(sender_id: u64, content: &str) -> WireMessage {
        WireMessage {
            id: None,
            sender_id: Some(sender_id),
            sender_name: "A".into(),
            content: content.into(),
            enrolled_at: 100,
        }
    }

    fn system_msg(content: &str) -> WireMessage {
        WireMessage {
            id: None,
            sender_id: None,
            sender_name: String::new(),
            content: content.into(),
            enrolled_at: 100,
        }
    }

    #[test]
    fn bootstrap_requires_identity_and_room() {
        assert_eq!(
            Session::bootstrap(None, Some(7)).err(),
            Some(SessionError::MissingIdentity)
        );
        assert_eq!(Session::bootstrap(Some(42), None).err(), Some(SessionError::MissingRoom));
    }

    #[test]
    fn bootstrap_fetches_and_subscribes_concurrently() {
        let (_, actions) = Session::bootstrap(Some(42), Some(7)).expect("bootstrap");
        assert!(matches!(actions.as_slice(), [
            SessionAction::FetchPage { room_id: 7, page: 0 },
            SessionAction::Subscribe { .. },
            SessionAction::Render,
        ]));
    }

    #[test]
    fn page_zero_replaces_and_anchors_to_bottom() {
        let mut session = booted();
        let actions = session.handle(SessionEvent::PageLoaded {
            room_id: 7,
            page: 0,
            result: page(3, vec![user_msg(1, "hi")]),
        });

        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript().entries()[0].content(), "hi");
        assert!(!session.transcript().entries()[0].is_system());
        assert_eq!(session.metadata().name, "Trip");
        assert_eq!(session.metadata().total_pages, 3);
        assert_eq!(session.members().len(), 1);
        assert!(!session.is_loading());
        assert!(actions.contains(&SessionAction::Anchor(Anchor::Bottom)));
    }

    #[test]
    fn older_page_prepends_and_preserves_anchor() {
        let mut session = booted();
        let _ = session.handle(SessionEvent::PageLoaded {
            room_id: 7,
            page: 0,
            result: page(2, vec![user_msg(1, "new")]),
        });
        let fetches = session.request_older_page();
        assert_eq!(fetches, vec![SessionAction::FetchPage { room_id: 7, page: 1 }]);

        let actions = session.handle(SessionEvent::PageLoaded {
            room_id: 7,
            page: 1,
            result: page(2, vec![user_msg(1, "old1"), user_msg(1, "old2")]),
        });

        let contents: Vec<_> =
            session.transcript().entries().iter().map(Entry::content).collect();
        assert_eq!(contents, ["old1", "old2", "new"]);
        assert!(actions.contains(&SessionAction::Anchor(Anchor::Preserve { prepended: 2 })));
    }

    #[test]
    fn older_page_requires_pages_remaining() {
        let mut session = booted();
        let _ = session.handle(SessionEvent::PageLoaded {
            room_id: 7,
            page: 0,
            result: page(1, vec![]),
        });
        assert!(session.request_older_page().is_empty());
    }

    #[test]
    fn request_while_loading_is_noop() {
        let mut session = booted();
        // Page 0 still in flight.
        assert!(session.is_loading());
        assert!(session.request_older_page().is_empty());
        assert_eq!(session.current_page(), 0);
    }

    #[test]
    fn stale_page_for_other_room_is_discarded() {
        let mut session = booted();
        let actions = session.handle(SessionEvent::PageLoaded {
            room_id: 99,
            page: 0,
            result: page(3, vec![user_msg(1, "other room")]),
        });

        assert!(actions.is_empty());
        assert!(session.transcript().is_empty());
        // Our own load is still pending.
        assert!(session.is_loading());
    }

    #[test]
    fn page_failure_navigates_to_room_list() {
        let mut session = booted();
        let actions = session.handle(SessionEvent::PageLoadFailed { room_id: 7, page: 0 });
        assert_eq!(actions, vec![SessionAction::Navigate(Navigation::RoomList)]);
        assert!(!session.is_loading());
    }

    #[test]
    fn user_message_appends_and_anchors_to_bottom() {
        let mut session = booted();
        let actions = session.handle(SessionEvent::StreamPayload {
            room_id: 7,
            payload: user_msg(3, "hello"),
        });

        assert_eq!(session.transcript().len(), 1);
        assert_eq!(actions, vec![
            SessionAction::Render,
            SessionAction::Anchor(Anchor::Bottom)
        ]);
        // Active viewer: nothing unread.
        assert_eq!(session.unread_count(), 0);
    }

    #[test]
    fn messages_while_inactive_count_as_unread() {
        let mut session = booted();
        let _ = session.handle(SessionEvent::Visibility { hidden: true });
        let _ = session.handle(SessionEvent::StreamPayload { room_id: 7, payload: user_msg(3, "a") });
        let _ = session.handle(SessionEvent::StreamPayload { room_id: 7, payload: user_msg(3, "b") });
        assert_eq!(session.unread_count(), 2);

        let _ = session.handle(SessionEvent::Focus { focused: true });
        assert_eq!(session.unread_count(), 0);
    }

    #[test]
    fn activity_signals_publish_presence() {
        let mut session = booted();
        let actions = session.handle(SessionEvent::Focus { focused: false });
        assert!(actions.contains(&SessionAction::PublishPresence {
            room_id: 7,
            user_id: 42,
            activity: Activity::Inactive,
        }));
        assert_eq!(session.activity(), Activity::Inactive);
    }

    #[test]
    fn subject_change_renames_room_and_appends_system_entry() {
        let mut session = booted();
        let mut payload = system_msg("Subject changed");
        payload.sender_name = "New Name".into();

        let _ = session.handle(SessionEvent::StreamPayload { room_id: 7, payload });
        assert_eq!(session.metadata().name, "New Name");
        assert!(session.transcript().entries()[0].is_system());
    }

    #[test]
    fn leave_announcement_removes_member_by_name() {
        let mut session = booted();
        let _ = session.handle(SessionEvent::PageLoaded {
            room_id: 7,
            page: 0,
            result: HistoryPage {
                total_pages: 1,
                chat_room_name: "Trip".into(),
                users: vec![
                    WireUser { user_id: Some(1), name: "A".into() },
                    WireUser { user_id: Some(2), name: "Bob".into() },
                ],
                messages: vec![],
            },
        });

        let _ = session.handle(SessionEvent::StreamPayload {
            room_id: 7,
            payload: system_msg("\"Bob\" left the chat"),
        });

        assert!(!session.members().contains_name("Bob"));
        assert!(session.members().contains_name("A"));
        assert_eq!(
            session.transcript().entries().last().map(Entry::content),
            Some("\"Bob\" left the chat")
        );
    }

    #[test]
    fn add_announcement_adds_member_by_name() {
        let mut session = booted();
        let _ = session.handle(SessionEvent::StreamPayload {
            room_id: 7,
            payload: system_msg("\"Carol\" added by \"A\""),
        });
        assert!(session.members().contains_name("Carol"));
    }

    #[test]
    fn send_message_guards_blank_and_loading() {
        let mut session = booted();
        // Page 0 in flight: transport not yet confirmed ready.
        assert!(session.send_message("hello").is_empty());

        let _ = session.handle(SessionEvent::PageLoaded {
            room_id: 7,
            page: 0,
            result: page(1, vec![]),
        });
        assert!(session.send_message("").is_empty());
        assert!(session.send_message("   ").is_empty());

        let actions = session.send_message("hello");
        assert_eq!(actions, vec![SessionAction::SendChat {
            room_id: 7,
            sender_id: 42,
            content: "hello".into(),
        }]);
    }

    #[test]
    fn rename_flow_is_optimistic_confirmed() {
        let mut session = booted();
        let _ = session.handle(SessionEvent::PageLoaded {
            room_id: 7,
            page: 0,
            result: page(1, vec![]),
        });

        let _ = session.begin_rename();
        assert!(session.is_editing_subject());
        assert_eq!(session.subject_draft(), "Trip");

        assert!(session.rename_room("").is_empty());
        assert!(session.rename_room("   ").is_empty());

        session.set_subject_draft("Study Group");
        let actions = session.save_rename();
        assert_eq!(actions, vec![SessionAction::RequestRename {
            room_id: 7,
            name: "Study Group".into(),
        }]);
        // Not applied until acknowledged.
        assert_eq!(session.metadata().name, "Trip");

        let _ = session.handle(SessionEvent::RenameSucceeded { name: "Study Group".into() });
        assert_eq!(session.metadata().name, "Study Group");
        assert!(!session.is_editing_subject());
    }

    #[test]
    fn rename_failure_keeps_edit_mode_open() {
        let mut session = booted();
        let _ = session.begin_rename();
        let _ = session.handle(SessionEvent::RenameFailed { name: "X".into() });
        assert!(session.is_editing_subject());
    }

    #[test]
    fn leave_requires_confirmation() {
        let mut session = booted();
        assert_eq!(session.leave_room(), vec![SessionAction::ConfirmLeave { room_id: 7 }]);

        // Declined: nothing happens.
        assert!(session.handle(SessionEvent::LeaveConfirmed { accepted: false }).is_empty());

        // Confirmed: the leave request is issued.
        assert_eq!(
            session.handle(SessionEvent::LeaveConfirmed { accepted: true }),
            vec![SessionAction::RequestLeave { room_id: 7 }]
        );

        // Failure keeps the session open.
        let _ = session.handle(SessionEvent::LeaveFailed);
        assert!(!session.is_torn_down());

        // Success tears down and navigates away.
        let actions = session.handle(SessionEvent::LeaveSucceeded);
        assert_eq!(actions, vec![
            SessionAction::Unsubscribe,
            SessionAction::Navigate(Navigation::RoomList),
        ]);
        assert!(session.is_torn_down());
    }

    #[test]
    fn teardown_is_idempotent() {
        let mut session = booted();
        assert_eq!(session.teardown(), vec![SessionAction::Unsubscribe]);
        assert!(session.teardown().is_empty());
        assert!(session.teardown().is_empty());
    }

    #[test]
    fn torn_down_session_ignores_everything() {
        let mut session = booted();
        let _ = session.teardown();

        assert!(
            session
                .handle(SessionEvent::StreamPayload { room_id: 7, payload: user_msg(3, "late") })
                .is_empty()
        );
        assert!(session.send_message("hello").is_empty());
        assert!(session.request_older_page().is_empty());
        assert!(session.leave_room().is_empty());
        assert!(session.transcript().is_empty());
    }
}
