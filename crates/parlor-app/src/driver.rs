//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the runtime from specific collaborator
//! implementations. Each frontend implements the trait for its platform
//! (HTTP + STOMP in a browser shell, channels in tests) while the generic
//! [`crate::Runtime`] handles all orchestration.
//!
//! # Request/response semantics
//!
//! Dispatch methods (`start_fetch`, `request_rename`, `request_leave`)
//! return as soon as the request is on its way; the outcome arrives later
//! through [`Driver::poll_input`] as a core event. An immediate `Err` from a
//! dispatch method means the request never left, and the runtime treats it
//! as that operation's failure.

use std::future::Future;

use parlor_core::{Activity, Anchor, Navigation, RoomId, Session};
use parlor_proto::{ChatPublish, PresenceUpdate, SubjectUpdate};

use crate::command::Input;

/// Abstracts collaborator I/O for the session runtime.
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Poll for the next input.
    ///
    /// Returns `Ok(None)` when the input source is exhausted; the runtime
    /// then tears the session down and stops.
    fn poll_input(&mut self) -> impl Future<Output = Result<Option<Input>, Self::Error>> + Send;

    /// Dispatch a history page fetch. The page (or its failure) arrives
    /// later via [`Driver::poll_input`].
    fn start_fetch(
        &mut self,
        room_id: RoomId,
        page: u32,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Open the live subscription on the given topic.
    fn subscribe(&mut self, topic: &str)
    -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Release the live subscription. Infallible by contract; a handle that
    /// is already gone has nothing left to release.
    fn unsubscribe(&mut self) -> impl Future<Output = ()> + Send;

    /// Publish a chat message body. Fire-and-forget.
    fn publish_chat(
        &mut self,
        message: ChatPublish,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Publish a presence body to the destination for `activity`.
    /// Fire-and-forget, best-effort.
    fn publish_presence(
        &mut self,
        update: PresenceUpdate,
        activity: Activity,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Dispatch a subject rename request. The acknowledgment arrives via
    /// [`Driver::poll_input`].
    fn request_rename(
        &mut self,
        update: SubjectUpdate,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Dispatch a leave-room request. The outcome arrives via
    /// [`Driver::poll_input`].
    fn request_leave(
        &mut self,
        room_id: RoomId,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Ask the user to confirm leaving the room. Returns the answer; a gate
    /// that cannot ask declines.
    fn confirm_leave(&mut self, room_id: RoomId) -> impl Future<Output = bool> + Send;

    /// Apply a viewer anchoring directive. Called after the render that
    /// committed the corresponding transcript mutation.
    fn apply_anchor(&mut self, anchor: Anchor);

    /// Render the session state.
    fn render(&mut self, session: &Session) -> Result<(), Self::Error>;

    /// Leave the room view for the given target.
    fn navigate(&mut self, target: Navigation);

    /// Release driver resources.
    fn stop(&mut self);
}
