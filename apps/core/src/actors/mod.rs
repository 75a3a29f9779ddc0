//! # Actors Module
//!
//! Tokio actor system for the assistant. A handle owns the mailbox sender;
//! a runner task owns all conversation state, so submission checks and
//! appends never race.
//!
//! ## Components
//! - `messages`: Command enum and actor error type
//! - `traits`: Swappable classifier and generator seams
//! - `assistant`: Conversation controller actor

pub mod assistant;
pub mod messages;
pub mod traits;

// Re-export main types for convenience
pub use assistant::AssistantHandle;
pub use messages::{ActorError, AssistantCommand};
