//! Application layer for Parlor
//!
//! Generic runtime for session orchestration. The session core is a pure
//! state machine; this crate supplies the loop that executes its actions
//! against platform collaborators and feeds their results back as events,
//! enabling deterministic scripted testing with the same code that runs in
//! production.
//!
//! # Components
//!
//! - [`Driver`]: trait abstracting platform-specific I/O (history fetch,
//!   stream publish/subscribe, confirmation gate, rendering, navigation)
//! - [`Runtime`]: generic orchestration loop using Driver
//! - [`Input`] / [`SessionCommand`]: inputs polled from the driver
//! - [`input_queue`]: channel plumbing for drivers that receive inbound
//!   events on callbacks

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod command;
mod driver;
mod queue;
mod runtime;

pub use command::{Input, SessionCommand};
pub use driver::Driver;
pub use queue::{InputHandle, InputQueue, input_queue};
pub use runtime::Runtime;
