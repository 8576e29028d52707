//! Command Queue
//!
//! FIFO hand-off from the broker event-loop task to the bridge worker
//! task. Unbounded so a push never blocks the producer; the worker is
//! the single consumer and drains commands in arrival order.

use tokio::sync::mpsc;

use super::command::Command;

/// Producer side of the command queue
#[derive(Clone)]
pub struct CommandSender(mpsc::UnboundedSender<Command>);

/// Consumer side of the command queue
pub struct CommandReceiver(mpsc::UnboundedReceiver<Command>);

/// Allocate the command queue
pub fn command_queue() -> (CommandSender, CommandReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (CommandSender(tx), CommandReceiver(rx))
}

impl CommandSender {
    /// Enqueue a command; returns `false` once the consumer is gone
    pub fn push(&self, command: Command) -> bool {
        self.0.send(command).is_ok()
    }
}

impl CommandReceiver {
    /// Wait for the next command; `None` once all producers are gone
    pub async fn next(&mut self) -> Option<Command> {
        self.0.recv().await
    }

    /// Take the next command without waiting
    pub fn try_next(&mut self) -> Option<Command> {
        self.0.try_recv().ok()
    }
}
