//! Channel plumbing for driver input delivery.
//!
//! Real drivers receive stream payloads and request completions on
//! callbacks; the queue gives those callbacks a cheap, clonable handle that
//! feeds the runtime's poll loop in arrival order.

use tokio::sync::mpsc;

use crate::command::Input;
use parlor_core::SessionEvent;

/// Create a connected input handle/queue pair.
pub fn input_queue() -> (InputHandle, InputQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (InputHandle { tx }, InputQueue { rx })
}

/// Producer side. Clone one per callback registration.
#[derive(Debug, Clone)]
pub struct InputHandle {
    tx: mpsc::UnboundedSender<Input>,
}

impl InputHandle {
    /// Queue an input. Returns false when the queue is gone.
    pub fn push(&self, input: Input) -> bool {
        self.tx.send(input).is_ok()
    }

    /// Queue a core event.
    pub fn event(&self, event: SessionEvent) -> bool {
        self.push(Input::Event(event))
    }
}

/// Consumer side, owned by the driver.
#[derive(Debug)]
pub struct InputQueue {
    rx: mpsc::UnboundedReceiver<Input>,
}

impl InputQueue {
    /// Wait for the next input. `None` once every handle is dropped.
    pub async fn recv(&mut self) -> Option<Input> {
        self.rx.recv().await
    }

    /// Take the next input without waiting, if one is queued.
    pub fn try_recv(&mut self) -> Option<Input> {
        self.rx.try_recv().ok()
    }
}
