//! Generic runtime for session orchestration.
//!
//! The Runtime drives the session event loop: it polls the driver for
//! inputs, feeds them to the [`Session`] state machine, and executes the
//! actions the session returns. Transport failures are translated at this
//! boundary into the [`SessionError`] taxonomy and handled locally; nothing
//! propagates to the presentation layer as an uncaught failure, and nothing
//! is retried automatically.

use parlor_core::{RoomId, Session, SessionAction, SessionError, SessionEvent, UserId};
use parlor_proto::{ChatPublish, PresenceUpdate, SubjectUpdate};
use tracing::{debug, warn};

use crate::{
    command::{Input, SessionCommand},
    driver::Driver,
};

/// Generic runtime that orchestrates Session and Driver.
pub struct Runtime<D: Driver> {
    driver: D,
    session: Option<Session>,
}

impl<D: Driver> Runtime<D> {
    /// Create a runtime with the given driver.
    pub fn new(driver: D) -> Self {
        Self { driver, session: None }
    }

    /// Run one room session to completion.
    ///
    /// Bootstraps the session, then loops: poll input, dispatch to the
    /// session, execute the resulting actions. Returns when the session
    /// navigates away, the view closes, or the input source is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error only for driver render/poll failures; collaborator
    /// request failures are handled through the session's error taxonomy.
    pub async fn run(
        &mut self,
        identity: Option<UserId>,
        room_id: Option<RoomId>,
    ) -> Result<(), D::Error> {
        let (session, actions) = match Session::bootstrap(identity, room_id) {
            Ok(pair) => pair,
            Err(err) => {
                warn!(%err, "session bootstrap redirected");
                if let Some(target) = err.navigation() {
                    self.driver.navigate(target);
                }
                self.driver.stop();
                return Ok(());
            },
        };
        self.session = Some(session);

        if !self.execute(actions).await? {
            loop {
                match self.driver.poll_input().await? {
                    None => {
                        // Input source closed: release the subscription
                        // deterministically before stopping.
                        let actions = self.teardown_actions();
                        let _ = self.execute(actions).await?;
                        break;
                    },
                    Some(Input::Command(command)) => {
                        if self.dispatch(command).await? {
                            break;
                        }
                    },
                    Some(Input::Event(event)) => {
                        let actions = self.handle_event(event);
                        if self.execute(actions).await? {
                            break;
                        }
                    },
                }
            }
        }

        self.driver.stop();
        Ok(())
    }

    /// The session, once bootstrapped.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    fn handle_event(&mut self, event: SessionEvent) -> Vec<SessionAction> {
        self.session.as_mut().map(|s| s.handle(event)).unwrap_or_default()
    }

    fn teardown_actions(&mut self) -> Vec<SessionAction> {
        self.session.as_mut().map(Session::teardown).unwrap_or_default()
    }

    /// Dispatch a user command. Returns `true` when the loop should exit.
    async fn dispatch(&mut self, command: SessionCommand) -> Result<bool, D::Error> {
        let Some(session) = self.session.as_mut() else {
            return Ok(true);
        };
        let (actions, close) = match command {
            SessionCommand::SendMessage(content) => (session.send_message(&content), false),
            SessionCommand::RequestOlderPage => (session.request_older_page(), false),
            SessionCommand::BeginRename => (session.begin_rename(), false),
            SessionCommand::SubjectDraft(draft) => {
                session.set_subject_draft(draft);
                (vec![], false)
            },
            SessionCommand::SaveRename => (session.save_rename(), false),
            SessionCommand::CancelRename => (session.cancel_rename(), false),
            SessionCommand::LeaveRoom => (session.leave_room(), false),
            SessionCommand::AddUser => (session.add_user(), false),
            SessionCommand::Close => (session.teardown(), true),
        };
        let exited = self.execute(actions).await?;
        Ok(exited || close)
    }

    /// Execute actions, feeding collaborator results straight back into the
    /// session until the batch settles. Returns `true` when the loop should
    /// exit (navigation happened).
    async fn execute(&mut self, initial: Vec<SessionAction>) -> Result<bool, D::Error> {
        let mut pending = initial;
        while !pending.is_empty() {
            for action in std::mem::take(&mut pending) {
                match action {
                    SessionAction::Render => {
                        if let Some(session) = self.session.as_ref() {
                            self.driver.render(session)?;
                        }
                    },
                    SessionAction::FetchPage { room_id, page } => {
                        if let Err(err) = self.driver.start_fetch(room_id, page).await {
                            let kind = SessionError::HistoryLoadFailure { page };
                            warn!(%err, %kind, "fetch dispatch failed");
                            pending.extend(
                                self.handle_event(SessionEvent::PageLoadFailed { room_id, page }),
                            );
                        }
                    },
                    SessionAction::Subscribe { topic } => {
                        if let Err(err) = self.driver.subscribe(&topic).await {
                            warn!(%err, topic, "subscribe failed");
                        }
                    },
                    SessionAction::Unsubscribe => {
                        self.driver.unsubscribe().await;
                    },
                    SessionAction::SendChat { room_id, sender_id, content } => {
                        let body = ChatPublish { chat_room_id: room_id, sender_id, content };
                        if let Err(err) = self.driver.publish_chat(body).await {
                            // Fire-and-forget: the message is simply lost.
                            warn!(%err, room_id, "chat publish failed");
                        }
                    },
                    SessionAction::PublishPresence { room_id, user_id, activity } => {
                        let body = PresenceUpdate { chat_room_id: room_id, user_id };
                        if let Err(err) = self.driver.publish_presence(body, activity).await {
                            let kind = SessionError::PresencePublishFailure;
                            debug!(%err, %kind, "presence is best-effort, ignoring");
                        }
                    },
                    SessionAction::RequestRename { room_id, name } => {
                        let body = SubjectUpdate {
                            chat_room_id: room_id,
                            chat_room_name: name.clone(),
                        };
                        if let Err(err) = self.driver.request_rename(body).await {
                            let kind = SessionError::RenameFailure;
                            warn!(%err, %kind, "rename dispatch failed");
                            pending.extend(self.handle_event(SessionEvent::RenameFailed { name }));
                        }
                    },
                    SessionAction::RequestLeave { room_id } => {
                        if let Err(err) = self.driver.request_leave(room_id).await {
                            let kind = SessionError::LeaveFailure;
                            warn!(%err, %kind, "leave dispatch failed");
                            pending.extend(self.handle_event(SessionEvent::LeaveFailed));
                        }
                    },
                    SessionAction::ConfirmLeave { room_id } => {
                        let accepted = self.driver.confirm_leave(room_id).await;
                        pending.extend(
                            self.handle_event(SessionEvent::LeaveConfirmed { accepted }),
                        );
                    },
                    SessionAction::Anchor(anchor) => {
                        self.driver.apply_anchor(anchor);
                    },
                    SessionAction::Navigate(target) => {
                        for follow_up in self.teardown_actions() {
                            if matches!(follow_up, SessionAction::Unsubscribe) {
                                self.driver.unsubscribe().await;
                            }
                        }
                        self.driver.navigate(target);
                        return Ok(true);
                    },
                }
            }
        }
        Ok(false)
    }
}

impl<D: Driver> std::fmt::Debug for Runtime<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime").field("session", &self.session).finish_non_exhaustive()
    }
}
