//! HTTP surface for the assistant service.
//!
//! Serves the stateless generation endpoints plus the panel session owned by
//! the assistant actor. JSON bodies in and out; errors map onto a structured
//! `ErrorResponse` body with a stable code.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{debug, error, instrument, warn, Level};
use validator::{Validate, ValidationError};

use crate::actors::traits::ReplyGenerator;
use crate::actors::AssistantHandle;
use crate::error::AppError;
use crate::generators::TemplateReplyEngine;
use crate::intent::{IntentClassifier, RequestIntent};
use crate::models::{
    AssistantState, ContentArtifact, Message, MessageKind, MessagePayload, SubmitOutcome,
};
use crate::platform::PlatformConnector;
use crate::quick_actions::{self, ActionCategory, QuickAction};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// The panel session actor.
    pub assistant: AssistantHandle,
    /// Classifier for the stateless message endpoint.
    pub classifier: Arc<IntentClassifier>,
    /// Generator backing the stateless endpoints.
    pub engine: Arc<TemplateReplyEngine>,
    /// Fire-and-forget platform connector.
    pub platform: PlatformConnector,
}

// --- Request / Response bodies ---

/// Rejects empty and whitespace-only strings.
fn validate_not_blank(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Body of the stateless message endpoint. Blank text is a client error
/// here, unlike the panel session where it is a silent no-op.
#[derive(Debug, Deserialize, Validate)]
pub struct MessageRequest {
    /// Free text typed by the user.
    #[validate(custom(function = validate_not_blank))]
    pub text: String,
}

/// Body of the stateless content-generation endpoint.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Prompt the artifact should respond to.
    #[validate(custom(function = validate_not_blank))]
    pub prompt_text: String,
    /// Must be `creation`; this endpoint generates nothing else.
    pub category: ActionCategory,
}

/// Body of the panel submission endpoint. Not validated: empty text is
/// answered with an `ignored_empty` outcome, never an error.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub text: String,
}

/// Body of the quick-action dispatch endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    pub action_id: String,
}

/// Category filter for the quick-action catalog.
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<ActionCategory>,
}

/// Reply from the stateless endpoints: the assistant message minus its
/// timeline identity (id, role, timestamp).
#[derive(Debug, Serialize)]
pub struct ReplyResponse {
    pub kind: MessageKind,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<MessagePayload>,
}

impl From<Message> for ReplyResponse {
    fn from(message: Message) -> Self {
        Self {
            kind: message.kind,
            content: message.content,
            payload: message.payload,
        }
    }
}

/// Outcome of a panel submission.
#[derive(Debug, Serialize)]
pub struct OutcomeResponse {
    pub outcome: SubmitOutcome,
}

/// Current composing state of the panel session.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub state: AssistantState,
}

/// Acknowledgement of a fire-and-forget publish request.
#[derive(Debug, Serialize)]
pub struct PublishResponse {
    pub status: String,
    pub platform: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// --- Error mapping ---

/// Structured error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Actor(_) | AppError::Timeout(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Config(_) => "CONFIG",
            AppError::Internal(_) => "INTERNAL_ERROR",
            AppError::Actor(_) => "ACTOR_UNAVAILABLE",
            AppError::Timeout(_) => "TIMEOUT",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();
        let message = self.to_string();

        // Log errors appropriately
        match &self {
            AppError::Internal(msg) | AppError::Config(msg) => {
                error!(error_code = code, message = %msg, "API error");
            }
            AppError::Actor(_) | AppError::Timeout(_) => {
                warn!(error_code = code, message = %message, "Assistant unavailable");
            }
            _ => {
                debug!(error_code = code, message = %message, "Client error");
            }
        }

        let body = ErrorResponse {
            error: message,
            code,
        };

        (status, Json(body)).into_response()
    }
}

// --- Handlers ---

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Stateless one-shot reply: classify the text, draw from the matching
/// pool. Never touches the panel conversation.
#[instrument(skip(state, request))]
pub async fn post_message(
    State(state): State<AppState>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<ReplyResponse>, AppError> {
    request.validate()?;

    let reply = match state.classifier.classify(&request.text) {
        RequestIntent::Creation => state.engine.creation_reply(&request.text).await?,
        RequestIntent::Analytics => state.engine.analytics_reply(&request.text).await?,
    };
    Ok(Json(reply.into()))
}

/// Stateless artifact generation for the Create tab.
#[instrument(skip(state, request))]
pub async fn generate_content(
    State(state): State<AppState>,
    Json(request): Json<GenerateContentRequest>,
) -> Result<Json<ReplyResponse>, AppError> {
    request.validate()?;
    if request.category != ActionCategory::Creation {
        return Err(AppError::Validation(
            "category must be 'creation'".to_string(),
        ));
    }

    let reply = state.engine.creation_reply(&request.prompt_text).await?;
    Ok(Json(reply.into()))
}

/// Hands an artifact to the platform connector and acknowledges.
#[instrument(skip(state, artifact))]
pub async fn publish_content(
    State(state): State<AppState>,
    Json(artifact): Json<ContentArtifact>,
) -> (StatusCode, Json<PublishResponse>) {
    state.platform.publish(&artifact);
    (
        StatusCode::ACCEPTED,
        Json(PublishResponse {
            status: "accepted".to_string(),
            platform: state.platform.platform().to_string(),
        }),
    )
}

/// Ordered snapshot of the panel conversation.
#[instrument(skip(state))]
pub async fn get_conversation(
    State(state): State<AppState>,
) -> Result<Json<Vec<Message>>, AppError> {
    Ok(Json(state.assistant.snapshot().await?))
}

/// Submits panel text; rejections come back as outcomes, not errors.
#[instrument(skip(state, request))]
pub async fn post_conversation_message(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<OutcomeResponse>, AppError> {
    let outcome = state.assistant.submit_text(request.text).await?;
    Ok(Json(OutcomeResponse { outcome }))
}

/// Fires a quick action by id.
#[instrument(skip(state))]
pub async fn post_quick_action(
    State(state): State<AppState>,
    Json(request): Json<ActionRequest>,
) -> Result<Json<OutcomeResponse>, AppError> {
    let action = quick_actions::find(&request.action_id).ok_or_else(|| {
        AppError::NotFound(format!("Unknown quick action: {}", request.action_id))
    })?;
    let outcome = state.assistant.submit_quick_action(*action).await?;
    Ok(Json(OutcomeResponse { outcome }))
}

/// Resets the panel conversation to the seeded greeting.
#[instrument(skip(state))]
pub async fn reset_conversation(
    State(state): State<AppState>,
) -> Result<Json<OutcomeResponse>, AppError> {
    let outcome = state.assistant.reset().await?;
    Ok(Json(OutcomeResponse { outcome }))
}

/// Current composing state of the panel session.
#[instrument(skip(state))]
pub async fn get_state(State(state): State<AppState>) -> Result<Json<StateResponse>, AppError> {
    let state = state.assistant.state().await?;
    Ok(Json(StateResponse { state }))
}

/// The quick-action catalog, optionally filtered by category.
#[instrument]
pub async fn list_quick_actions(Query(query): Query<CategoryQuery>) -> Json<Vec<QuickAction>> {
    let actions = match query.category {
        Some(category) => quick_actions::for_category(category)
            .into_iter()
            .copied()
            .collect(),
        None => quick_actions::registry().to_vec(),
    };
    Json(actions)
}

// --- Router ---

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    // Tracing layer with request spans and timing
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health))
        .route("/assistant/message", post(post_message))
        .route("/assistant/generate-content", post(generate_content))
        .route("/assistant/publish", post(publish_content))
        .route("/assistant/conversation", get(get_conversation))
        .route(
            "/assistant/conversation/message",
            post(post_conversation_message),
        )
        .route(
            "/assistant/conversation/quick-action",
            post(post_quick_action),
        )
        .route("/assistant/conversation/reset", post(reset_conversation))
        .route("/assistant/state", get(get_state))
        .route("/assistant/quick-actions", get(list_quick_actions))
        .layer(trace_layer)
        .with_state(state)
}
