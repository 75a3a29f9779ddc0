use serde::Serialize;
use tokio::sync::oneshot;

use crate::models::{AssistantState, Message, SubmitOutcome};
use crate::quick_actions::QuickAction;

/// Defines errors that can occur within the actor system.
#[derive(Debug, thiserror::Error, Serialize, Clone)]
pub enum ActorError {
    /// The actor's mailbox is closed, so the command could not be delivered.
    #[error("Actor mailbox closed: {0}")]
    Mailbox(String),
    /// The actor dropped the response channel before answering.
    #[error("Actor dropped responder: {0}")]
    Responder(String),
    /// An error indicating that an actor operation timed out.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl From<tokio::time::error::Elapsed> for ActorError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        ActorError::Timeout(format!("Actor operation timed out: {}", err))
    }
}

// Re-export AppError for convenience
pub use crate::error::AppError;

/// Commands that can be sent to the assistant actor.
#[derive(Debug)]
pub enum AssistantCommand {
    /// A request to submit free text as the user.
    SubmitText {
        text: String,
        /// A channel to send the submission outcome back.
        responder: oneshot::Sender<SubmitOutcome>,
    },
    /// A request to fire a quick action from the catalog.
    SubmitQuickAction {
        action: QuickAction,
        /// A channel to send the submission outcome back.
        responder: oneshot::Sender<SubmitOutcome>,
    },
    /// A request for an owned copy of the timeline.
    Snapshot {
        responder: oneshot::Sender<Vec<Message>>,
    },
    /// A request for the current composing state.
    State {
        responder: oneshot::Sender<AssistantState>,
    },
    /// A request to clear the timeline and reseed the greeting.
    Reset {
        /// A channel to send the submission outcome back.
        responder: oneshot::Sender<SubmitOutcome>,
    },
    /// A finished composition, posted back by the task that produced it.
    ReplyComposed {
        result: Result<Message, AppError>,
    },
}
