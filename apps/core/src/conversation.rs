use crate::models::{Message, MessageKind};

/// Greeting seeded as the first assistant message of every conversation.
pub const GREETING: &str = "Hello! I'm your AI assistant for social media. I can help you with analytics insights about your Instagram performance, suggest optimal posting times, analyze engagement patterns, AND create engaging content with captions and hashtags. Switch to the \"Create\" tab to generate posts, captions, and hashtag sets! What would you like to do?";

/// Append-only message timeline for a single assistant session.
///
/// Messages are never edited, reordered or removed; `reset` is the only
/// destructive operation and it reseeds the greeting.
#[derive(Debug)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Creates a conversation seeded with the assistant greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![Message::assistant(MessageKind::Plain, GREETING, None)],
        }
    }

    /// Appends a message to the end of the timeline.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Returns an owned copy of the timeline, in insertion order, for
    /// handing across task boundaries.
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }

    /// Clears the timeline and reseeds the greeting.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.messages
            .push(Message::assistant(MessageKind::Plain, GREETING, None));
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
