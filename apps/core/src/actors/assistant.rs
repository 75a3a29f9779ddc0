use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{sleep, timeout, Duration};
use tracing::{debug, error, info, instrument};

use crate::actors::messages::{ActorError, AppError, AssistantCommand};
use crate::actors::traits::{Classifier, ReplyGenerator};
use crate::config::AssistantConfig;
use crate::conversation::Conversation;
use crate::intent::RequestIntent;
use crate::models::{AssistantState, Message, SubmitOutcome};
use crate::quick_actions::{ActionCategory, QuickAction};
use crate::transcript::TranscriptLog;

/// Mailbox capacity for the assistant actor.
const MAILBOX_CAPACITY: usize = 32;

/// How long handle calls wait for the actor to answer.
const COMMAND_TIMEOUT: Duration = Duration::from_secs(5);

/// A handle to the assistant actor.
///
/// This is the primary entry point for the conversation. It owns the mailbox
/// sender; all state lives on the runner task, so every check-and-append is
/// processed in mailbox order without locks.
#[derive(Clone)]
pub struct AssistantHandle {
    sender: mpsc::Sender<AssistantCommand>,
}

impl AssistantHandle {
    /// Creates an assistant over explicit classifier and generator
    /// components.
    ///
    /// This is the main constructor that spawns the runner task. Tests use
    /// it to inject instrumented components and a fast pacing config.
    pub fn with_components<C, G>(
        config: AssistantConfig,
        classifier: Arc<C>,
        generator: Arc<G>,
        transcript: Option<TranscriptLog>,
    ) -> Self
    where
        C: Classifier,
        G: ReplyGenerator,
    {
        let (sender, receiver) = mpsc::channel(MAILBOX_CAPACITY);
        let runner = AssistantRunner::new(
            receiver,
            sender.clone(),
            classifier,
            generator,
            config,
            transcript,
        );
        tokio::spawn(async move { runner.run().await });
        Self { sender }
    }

    /// Submits free text as the user.
    ///
    /// The outcome reports what happened on the timeline:
    /// - `Accepted`: the user message was appended and a reply is composing.
    /// - `IgnoredEmpty`: empty or whitespace-only text, nothing appended.
    /// - `IgnoredBusy`: a reply was already composing, nothing appended or
    ///   queued.
    #[instrument(skip(self, text))]
    pub async fn submit_text(&self, text: String) -> Result<SubmitOutcome, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = AssistantCommand::SubmitText {
            text,
            responder: send,
        };
        self.sender
            .send(msg)
            .await
            .map_err(|e| ActorError::Mailbox(e.to_string()))?;
        let outcome = timeout(COMMAND_TIMEOUT, recv)
            .await?
            .map_err(|e| ActorError::Responder(e.to_string()))?;
        Ok(outcome)
    }

    /// Fires a quick action from the catalog.
    ///
    /// Analytics actions behave exactly like typing the action's prompt;
    /// creation actions route straight to the creation generator without a
    /// user message and with the distinct `ComposingContent` indicator.
    #[instrument(skip(self), fields(action = action.id))]
    pub async fn submit_quick_action(
        &self,
        action: QuickAction,
    ) -> Result<SubmitOutcome, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = AssistantCommand::SubmitQuickAction {
            action,
            responder: send,
        };
        self.sender
            .send(msg)
            .await
            .map_err(|e| ActorError::Mailbox(e.to_string()))?;
        let outcome = timeout(COMMAND_TIMEOUT, recv)
            .await?
            .map_err(|e| ActorError::Responder(e.to_string()))?;
        Ok(outcome)
    }

    /// Returns an owned copy of the timeline in insertion order.
    #[instrument(skip(self))]
    pub async fn snapshot(&self) -> Result<Vec<Message>, AppError> {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(AssistantCommand::Snapshot { responder: send })
            .await
            .map_err(|e| ActorError::Mailbox(e.to_string()))?;
        let messages = timeout(COMMAND_TIMEOUT, recv)
            .await?
            .map_err(|e| ActorError::Responder(e.to_string()))?;
        Ok(messages)
    }

    /// Returns the current composing state.
    #[instrument(skip(self))]
    pub async fn state(&self) -> Result<AssistantState, AppError> {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(AssistantCommand::State { responder: send })
            .await
            .map_err(|e| ActorError::Mailbox(e.to_string()))?;
        let state = timeout(COMMAND_TIMEOUT, recv)
            .await?
            .map_err(|e| ActorError::Responder(e.to_string()))?;
        Ok(state)
    }

    /// Clears the timeline and reseeds the greeting. Ignored with
    /// `IgnoredBusy` while a reply is composing.
    #[instrument(skip(self))]
    pub async fn reset(&self) -> Result<SubmitOutcome, AppError> {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(AssistantCommand::Reset { responder: send })
            .await
            .map_err(|e| ActorError::Mailbox(e.to_string()))?;
        let outcome = timeout(COMMAND_TIMEOUT, recv)
            .await?
            .map_err(|e| ActorError::Responder(e.to_string()))?;
        Ok(outcome)
    }
}

// --- Actor Runner ---
struct AssistantRunner<C, G>
where
    C: Classifier,
    G: ReplyGenerator,
{
    receiver: mpsc::Receiver<AssistantCommand>,
    /// Clone handed to composition tasks so they can post the finished reply
    /// back into the mailbox.
    self_sender: mpsc::Sender<AssistantCommand>,
    classifier: Arc<C>,
    generator: Arc<G>,
    conversation: Conversation,
    state: AssistantState,
    /// Request text of the composition in flight, kept for the transcript.
    pending_text: Option<String>,
    config: AssistantConfig,
    transcript: Option<TranscriptLog>,
}

impl<C, G> AssistantRunner<C, G>
where
    C: Classifier,
    G: ReplyGenerator,
{
    fn new(
        receiver: mpsc::Receiver<AssistantCommand>,
        self_sender: mpsc::Sender<AssistantCommand>,
        classifier: Arc<C>,
        generator: Arc<G>,
        config: AssistantConfig,
        transcript: Option<TranscriptLog>,
    ) -> Self {
        Self {
            receiver,
            self_sender,
            classifier,
            generator,
            conversation: Conversation::new(),
            state: AssistantState::Idle,
            pending_text: None,
            config,
            transcript,
        }
    }

    async fn run(mut self) {
        info!("Assistant started");
        while let Some(msg) = self.receiver.recv().await {
            self.handle_command(msg);
        }
        info!("Assistant stopped");
    }

    #[instrument(skip(self, msg))]
    fn handle_command(&mut self, msg: AssistantCommand) {
        match msg {
            AssistantCommand::SubmitText { text, responder } => {
                let outcome = self.handle_submit(text);
                let _ = responder.send(outcome);
            }
            AssistantCommand::SubmitQuickAction { action, responder } => {
                let outcome = self.handle_quick_action(action);
                let _ = responder.send(outcome);
            }
            AssistantCommand::Snapshot { responder } => {
                let _ = responder.send(self.conversation.snapshot());
            }
            AssistantCommand::State { responder } => {
                let _ = responder.send(self.state);
            }
            AssistantCommand::Reset { responder } => {
                let outcome = self.handle_reset();
                let _ = responder.send(outcome);
            }
            AssistantCommand::ReplyComposed { result } => {
                self.handle_reply_composed(result);
            }
        }
    }

    /// Normal submission path: reject empty text, reject while composing,
    /// otherwise append the user message and start composing a reply.
    fn handle_submit(&mut self, text: String) -> SubmitOutcome {
        if text.trim().is_empty() {
            debug!("Ignoring empty submission");
            return SubmitOutcome::IgnoredEmpty;
        }
        if !self.state.is_idle() {
            debug!(state = %self.state, "Ignoring submission while composing");
            return SubmitOutcome::IgnoredBusy;
        }

        // The user message is visible before the reply exists
        self.conversation.append(Message::user(text.clone()));
        let intent = self.classifier.classify(&text);
        info!(intent = %intent, "Submission accepted");

        let delay = self.config.reply_delay();
        self.begin_composition(intent, text, delay, AssistantState::Composing);
        SubmitOutcome::Accepted
    }

    fn handle_quick_action(&mut self, action: QuickAction) -> SubmitOutcome {
        match action.category {
            // Analytics shortcuts are plain submissions of the canned prompt
            ActionCategory::Analytics => self.handle_submit(action.prompt_text.to_string()),
            // Creation shortcuts bypass classification and append no user
            // message; the panel shows its own card for the fired action
            ActionCategory::Creation => {
                if !self.state.is_idle() {
                    debug!(state = %self.state, action = action.id, "Ignoring quick action while composing");
                    return SubmitOutcome::IgnoredBusy;
                }
                info!(action = action.id, "Creation quick action accepted");

                let delay = self.config.creation_delay();
                self.begin_composition(
                    RequestIntent::Creation,
                    action.prompt_text.to_string(),
                    delay,
                    AssistantState::ComposingContent,
                );
                SubmitOutcome::Accepted
            }
        }
    }

    /// Starts a composition task: wait out the pacing delay, produce the
    /// reply, post it back into the mailbox. The runner keeps draining
    /// commands meanwhile, which is what makes overlap rejection immediate.
    fn begin_composition(
        &mut self,
        intent: RequestIntent,
        source_text: String,
        delay: Duration,
        state: AssistantState,
    ) {
        self.state = state;
        self.pending_text = Some(source_text.clone());

        let generator = Arc::clone(&self.generator);
        let self_sender = self.self_sender.clone();
        tokio::spawn(async move {
            sleep(delay).await;
            let result = match intent {
                RequestIntent::Creation => generator.creation_reply(&source_text).await,
                RequestIntent::Analytics => generator.analytics_reply(&source_text).await,
            };
            if self_sender
                .send(AssistantCommand::ReplyComposed { result })
                .await
                .is_err()
            {
                debug!("Assistant stopped before composition finished");
            }
        });
    }

    fn handle_reply_composed(&mut self, result: Result<Message, AppError>) {
        let request_text = self.pending_text.take();
        self.state = AssistantState::Idle;

        match result {
            Ok(reply) => {
                if let Some(log) = &self.transcript {
                    if let Err(e) = log.append_exchange(request_text.as_deref(), &reply) {
                        error!("Failed to append transcript entry: {}", e);
                    }
                }
                self.conversation.append(reply);
            }
            Err(e) => {
                error!("Composition failed: {}", e);
            }
        }
    }

    fn handle_reset(&mut self) -> SubmitOutcome {
        if !self.state.is_idle() {
            debug!(state = %self.state, "Ignoring reset while composing");
            return SubmitOutcome::IgnoredBusy;
        }
        self.conversation.reset();
        info!("Conversation reset");
        SubmitOutcome::Accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::GREETING;
    use crate::models::{MessageKind, MessageRole};
    use crate::quick_actions;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    // --- Mock Components ---

    struct CountingClassifier {
        verdict: RequestIntent,
        calls: AtomicUsize,
    }

    impl CountingClassifier {
        fn new(verdict: RequestIntent) -> Self {
            Self {
                verdict,
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Classifier for CountingClassifier {
        fn classify(&self, _text: &str) -> RequestIntent {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.verdict
        }
    }

    struct CountingGenerator {
        analytics_calls: AtomicUsize,
        creation_calls: AtomicUsize,
    }

    impl CountingGenerator {
        fn new() -> Self {
            Self {
                analytics_calls: AtomicUsize::new(0),
                creation_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ReplyGenerator for CountingGenerator {
        async fn analytics_reply(&self, _source_text: &str) -> Result<Message, AppError> {
            self.analytics_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Message::assistant(
                MessageKind::Plain,
                "canned analytics reply",
                None,
            ))
        }

        async fn creation_reply(&self, prompt_text: &str) -> Result<Message, AppError> {
            self.creation_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Message::assistant(
                MessageKind::ContentCreation,
                format!("created for: {}", prompt_text),
                None,
            ))
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl ReplyGenerator for FailingGenerator {
        async fn analytics_reply(&self, _source_text: &str) -> Result<Message, AppError> {
            Err(AppError::Internal("pool unavailable".to_string()))
        }

        async fn creation_reply(&self, _prompt_text: &str) -> Result<Message, AppError> {
            Err(AppError::Internal("pool unavailable".to_string()))
        }
    }

    // --- Test Setup ---

    fn fast_config() -> AssistantConfig {
        AssistantConfig {
            reply_delay_ms: 20,
            creation_delay_ms: 40,
        }
    }

    fn setup_with_mocks(
        verdict: RequestIntent,
    ) -> (
        AssistantHandle,
        Arc<CountingClassifier>,
        Arc<CountingGenerator>,
    ) {
        let classifier = Arc::new(CountingClassifier::new(verdict));
        let generator = Arc::new(CountingGenerator::new());
        let handle = AssistantHandle::with_components(
            fast_config(),
            Arc::clone(&classifier),
            Arc::clone(&generator),
            None,
        );
        (handle, classifier, generator)
    }

    async fn wait_for_idle(handle: &AssistantHandle) {
        for _ in 0..200 {
            if handle.state().await.unwrap().is_idle() {
                return;
            }
            sleep(Duration::from_millis(5)).await;
        }
        panic!("assistant never returned to idle");
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_accepted_submission_appends_user_then_reply() {
        let (handle, _classifier, _generator) = setup_with_mocks(RequestIntent::Analytics);

        let outcome = handle
            .submit_text("how is my account doing".to_string())
            .await
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::Accepted);

        // User message is on the timeline before the reply lands
        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[1].role, MessageRole::User);
        assert_eq!(snapshot[1].content, "how is my account doing");

        wait_for_idle(&handle).await;
        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[2].role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn test_empty_and_blank_submissions_are_ignored() {
        let (handle, classifier, _generator) = setup_with_mocks(RequestIntent::Analytics);

        let outcome = handle.submit_text(String::new()).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::IgnoredEmpty);
        let outcome = handle.submit_text("   ".to_string()).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::IgnoredEmpty);

        assert_eq!(handle.snapshot().await.unwrap().len(), 1);
        assert_eq!(classifier.call_count(), 0);
        assert!(handle.state().await.unwrap().is_idle());
    }

    #[tokio::test]
    async fn test_overlapping_submission_is_ignored() {
        let (handle, classifier, _generator) = setup_with_mocks(RequestIntent::Analytics);

        let first = handle.submit_text("first".to_string()).await.unwrap();
        assert_eq!(first, SubmitOutcome::Accepted);
        let second = handle.submit_text("second".to_string()).await.unwrap();
        assert_eq!(second, SubmitOutcome::IgnoredBusy);

        wait_for_idle(&handle).await;

        // Greeting + first + its reply; the overlapping attempt left no trace
        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(classifier.call_count(), 1);
    }

    #[tokio::test]
    async fn test_submission_accepted_again_after_reply_lands() {
        let (handle, classifier, _generator) = setup_with_mocks(RequestIntent::Analytics);

        handle.submit_text("first".to_string()).await.unwrap();
        wait_for_idle(&handle).await;
        let outcome = handle.submit_text("second".to_string()).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Accepted);
        wait_for_idle(&handle).await;

        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.len(), 5);
        assert_eq!(classifier.call_count(), 2);
        assert_eq!(snapshot[1].content, "first");
        assert_eq!(snapshot[3].content, "second");
    }

    #[tokio::test]
    async fn test_creation_intent_routes_to_creation_generator() {
        let (handle, _classifier, generator) = setup_with_mocks(RequestIntent::Creation);

        handle
            .submit_text("write me a caption".to_string())
            .await
            .unwrap();
        // Text submissions share the plain composing indicator
        assert_eq!(handle.state().await.unwrap(), AssistantState::Composing);

        wait_for_idle(&handle).await;
        assert_eq!(generator.creation_calls.load(Ordering::SeqCst), 1);
        assert_eq!(generator.analytics_calls.load(Ordering::SeqCst), 0);

        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot[2].kind, MessageKind::ContentCreation);
    }

    #[tokio::test]
    async fn test_creation_quick_action_skips_classifier() {
        let (handle, classifier, generator) = setup_with_mocks(RequestIntent::Analytics);
        let action = *quick_actions::find("create-post").unwrap();

        let outcome = handle.submit_quick_action(action).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Accepted);
        assert_eq!(
            handle.state().await.unwrap(),
            AssistantState::ComposingContent
        );

        wait_for_idle(&handle).await;
        assert_eq!(classifier.call_count(), 0);
        assert_eq!(generator.creation_calls.load(Ordering::SeqCst), 1);

        // No user message for creation shortcuts: greeting + generated reply
        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[1].role, MessageRole::Assistant);
        assert_eq!(snapshot[1].kind, MessageKind::ContentCreation);
        assert!(snapshot[1].content.contains(action.prompt_text));
    }

    #[tokio::test]
    async fn test_analytics_quick_action_goes_through_normal_path() {
        let (handle, classifier, generator) = setup_with_mocks(RequestIntent::Analytics);
        let action = *quick_actions::find("engagement-analysis").unwrap();

        handle.submit_quick_action(action).await.unwrap();
        assert_eq!(handle.state().await.unwrap(), AssistantState::Composing);

        wait_for_idle(&handle).await;
        assert_eq!(classifier.call_count(), 1);
        assert_eq!(generator.analytics_calls.load(Ordering::SeqCst), 1);

        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[1].role, MessageRole::User);
        assert_eq!(snapshot[1].content, action.prompt_text);
    }

    #[tokio::test]
    async fn test_quick_action_while_composing_is_ignored() {
        let (handle, _classifier, generator) = setup_with_mocks(RequestIntent::Analytics);
        handle.submit_text("first".to_string()).await.unwrap();

        let action = *quick_actions::find("create-post").unwrap();
        let outcome = handle.submit_quick_action(action).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::IgnoredBusy);

        wait_for_idle(&handle).await;
        assert_eq!(generator.creation_calls.load(Ordering::SeqCst), 0);
        assert_eq!(handle.snapshot().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_reset_reseeds_single_greeting() {
        let (handle, _classifier, _generator) = setup_with_mocks(RequestIntent::Analytics);

        handle.submit_text("hello analytics".to_string()).await.unwrap();
        wait_for_idle(&handle).await;

        let outcome = handle.reset().await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Accepted);

        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].content, GREETING);
    }

    #[tokio::test]
    async fn test_reset_while_composing_is_ignored() {
        let (handle, _classifier, _generator) = setup_with_mocks(RequestIntent::Analytics);

        handle.submit_text("first".to_string()).await.unwrap();
        let outcome = handle.reset().await.unwrap();
        assert_eq!(outcome, SubmitOutcome::IgnoredBusy);

        wait_for_idle(&handle).await;
        assert_eq!(handle.snapshot().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_transcript_records_completed_exchanges() {
        let temp_dir = TempDir::new().unwrap();
        let log = TranscriptLog::new(temp_dir.path().join("transcript.jsonl")).unwrap();
        let classifier = Arc::new(CountingClassifier::new(RequestIntent::Analytics));
        let generator = Arc::new(CountingGenerator::new());
        let handle = AssistantHandle::with_components(
            fast_config(),
            classifier,
            generator,
            Some(log.clone()),
        );

        handle
            .submit_text("how did last week go".to_string())
            .await
            .unwrap();
        wait_for_idle(&handle).await;

        let entries = log.recent();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].request.as_deref(), Some("how did last week go"));
        assert_eq!(entries[0].reply_content, "canned analytics reply");
    }

    #[tokio::test]
    async fn test_failed_composition_returns_to_idle() {
        let classifier = Arc::new(CountingClassifier::new(RequestIntent::Analytics));
        let handle = AssistantHandle::with_components(
            fast_config(),
            classifier,
            Arc::new(FailingGenerator),
            None,
        );

        handle.submit_text("anything".to_string()).await.unwrap();
        wait_for_idle(&handle).await;

        // No reply landed, but new submissions are accepted again
        assert_eq!(handle.snapshot().await.unwrap().len(), 2);
        let outcome = handle.submit_text("again".to_string()).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Accepted);
    }
}
