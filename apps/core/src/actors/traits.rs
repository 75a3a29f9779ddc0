use crate::actors::messages::AppError;
use crate::intent::RequestIntent;
use crate::models::Message;
use async_trait::async_trait;

/// Defines the routing interface for incoming request text.
///
/// This trait abstracts the classification step, allowing the keyword
/// classifier to be replaced (or instrumented) without touching the
/// controller.
pub trait Classifier: Send + Sync + 'static {
    /// Classifies a request text as creation or analytics.
    fn classify(&self, text: &str) -> RequestIntent;
}

/// Defines the public interface for reply production.
///
/// This trait abstracts the specific implementation of the generators,
/// allowing different backends (canned pools, a remote model) to be used
/// interchangeably.
#[async_trait]
pub trait ReplyGenerator: Send + Sync + 'static {
    /// Produces an analytics reply for the given request text.
    async fn analytics_reply(&self, source_text: &str) -> Result<Message, AppError>;

    /// Produces a content-creation reply for the given prompt.
    async fn creation_reply(&self, prompt_text: &str) -> Result<Message, AppError>;
}
