use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The author of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// A message typed (or triggered) by the user.
    User,
    /// A message produced by the assistant.
    Assistant,
}

/// Classifies a message and determines which payload shape accompanies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Narrative text with no structured payload.
    Plain,
    /// Posting-time insight with a `BestTimesInsight` payload.
    AnalyticsInsight,
    /// Trending-hashtag insight with a `TrendingHashtagsInsight` payload.
    HashtagSuggestion,
    /// Generated artifact with a `ContentArtifact` payload.
    ContentCreation,
}

impl MessageKind {
    /// Returns the wire label for the kind.
    pub fn label(&self) -> &'static str {
        match self {
            MessageKind::Plain => "plain",
            MessageKind::AnalyticsInsight => "analytics_insight",
            MessageKind::HashtagSuggestion => "hashtag_suggestion",
            MessageKind::ContentCreation => "content_creation",
        }
    }
}

/// Payload of an `analytics_insight` message: when to post and why.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestTimesInsight {
    /// Ordered posting windows, best first.
    pub best_times: Vec<String>,
    /// Engagement uplift observed in the recommended window.
    pub engagement_boost: String,
    /// Weekdays worth prioritizing.
    pub recommended_days: Vec<String>,
}

/// Payload of a `hashtag_suggestion` message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingHashtagsInsight {
    /// Hashtags currently performing well in the user's niche.
    pub hashtags: Vec<String>,
    /// Estimated reach when they are used.
    pub expected_reach: String,
}

/// A fully generated post: caption plus scheduling and reach guidance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostArtifact {
    /// Ready-to-publish caption text.
    pub caption: String,
    /// Hashtags to attach to the post.
    pub hashtags: Vec<String>,
    /// Suggested visual style for the accompanying image.
    pub image_suggestion: String,
    /// Recommended posting window.
    pub posting_time: String,
    /// Estimated reach.
    pub expected_reach: String,
    /// Predicted engagement rate.
    pub engagement_prediction: String,
}

/// A generated caption with tone and call-to-action guidance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionArtifact {
    /// The caption text itself.
    pub text: String,
    /// Tone classification of the caption.
    pub tone: String,
    /// Length classification.
    pub length: String,
    /// Call-to-action hint.
    pub cta: String,
    /// Hashtags to pair with the caption.
    pub hashtags: Vec<String>,
}

/// A generated hashtag set, grouped by purpose.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashtagSetArtifact {
    /// Broad high-volume hashtags.
    pub trending: Vec<String>,
    /// Hashtags specific to the user's niche.
    pub niche_specific: Vec<String>,
    /// Hashtags aimed at prompting interaction.
    pub engagement_boosters: Vec<String>,
    /// Recommended number of hashtags per post.
    pub optimal_count: String,
    /// Where to place the hashtags.
    pub placement: String,
}

/// A content-creation artifact attached to a `content_creation` message.
///
/// Serializes externally tagged, so the wire shape is `{"post": {..}}`,
/// `{"caption": {..}}` or `{"hashtags": {..}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentArtifact {
    /// A complete social media post.
    Post(PostArtifact),
    /// A standalone photo caption.
    Caption(CaptionArtifact),
    /// A grouped hashtag set.
    Hashtags(HashtagSetArtifact),
}

impl ContentArtifact {
    /// Formats the artifact for clipboard export: the primary text followed by
    /// the hashtag list, space-separated, in payload order. Hashtag sets have
    /// no primary text, so the export is the three groups concatenated.
    pub fn clipboard_text(&self) -> String {
        match self {
            ContentArtifact::Post(post) => {
                format!("{} {}", post.caption, post.hashtags.join(" "))
            }
            ContentArtifact::Caption(caption) => {
                format!("{} {}", caption.text, caption.hashtags.join(" "))
            }
            ContentArtifact::Hashtags(set) => set
                .trending
                .iter()
                .chain(set.niche_specific.iter())
                .chain(set.engagement_boosters.iter())
                .cloned()
                .collect::<Vec<String>>()
                .join(" "),
        }
    }

    /// Returns the primary display text of the artifact, if it has one.
    pub fn primary_text(&self) -> Option<&str> {
        match self {
            ContentArtifact::Post(post) => Some(&post.caption),
            ContentArtifact::Caption(caption) => Some(&caption.text),
            ContentArtifact::Hashtags(_) => None,
        }
    }
}

/// Structured data accompanying a message, discriminated by the message kind.
///
/// Untagged: each variant serializes as its bare payload object, matching the
/// shapes the assistant panel renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessagePayload {
    /// Payload for `analytics_insight`.
    BestTimes(BestTimesInsight),
    /// Payload for `hashtag_suggestion`.
    TrendingHashtags(TrendingHashtagsInsight),
    /// Payload for `content_creation`.
    Content(ContentArtifact),
}

/// A single message on the conversation timeline. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier (UUID v4). Ordering never depends on it.
    pub id: String,
    /// Who authored the message.
    pub role: MessageRole,
    /// Display text.
    pub content: String,
    /// Creation instant, used for display and as an ordering tiebreak.
    pub timestamp: DateTime<Utc>,
    /// Governs which payload shape, if any, accompanies the message.
    pub kind: MessageKind,
    /// Structured data for non-plain kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<MessagePayload>,
}

impl Message {
    /// Creates a plain user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: MessageRole::User,
            content: content.into(),
            timestamp: Utc::now(),
            kind: MessageKind::Plain,
            payload: None,
        }
    }

    /// Creates an assistant message of the given kind.
    pub fn assistant(
        kind: MessageKind,
        content: impl Into<String>,
        payload: Option<MessagePayload>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: MessageRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            kind,
            payload,
        }
    }
}

/// Result of a submission attempt. Rejections are silent no-ops on the
/// timeline; the outcome value is the only signal the caller gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// The submission was accepted and a reply is being composed.
    Accepted,
    /// Empty or whitespace-only input, nothing appended.
    IgnoredEmpty,
    /// A reply was already being composed, nothing appended or queued.
    IgnoredBusy,
}

/// The controller's composing state. `ComposingContent` is the distinct
/// "content is being created" indicator used by creation quick actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistantState {
    /// Ready to accept a submission.
    Idle,
    /// A reply to a text submission is pending.
    Composing,
    /// A creation quick action is generating content.
    ComposingContent,
}

impl fmt::Display for AssistantState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl AssistantState {
    /// Returns the wire label for the state.
    pub fn label(&self) -> &'static str {
        match self {
            AssistantState::Idle => "idle",
            AssistantState::Composing => "composing",
            AssistantState::ComposingContent => "composing_content",
        }
    }

    /// Returns true when no reply is pending.
    pub fn is_idle(&self) -> bool {
        matches!(self, AssistantState::Idle)
    }
}
