//! API Tests
//!
//! Exercises the HTTP handlers directly: stateless generation endpoints,
//! the panel session endpoints, and the quick-action catalog.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use tokio::time::sleep;

use crate::actors::AssistantHandle;
use crate::config::AssistantConfig;
use crate::error::AppError;
use crate::generators::TemplateReplyEngine;
use crate::intent::IntentClassifier;
use crate::models::{
    AssistantState, CaptionArtifact, ContentArtifact, MessageKind, SubmitOutcome,
};
use crate::platform::PlatformConnector;
use crate::quick_actions::ActionCategory;
use crate::routes::{
    self, ActionRequest, AppState, CategoryQuery, GenerateContentRequest, MessageRequest,
    SubmitRequest,
};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Builds an `AppState` with short composition delays and seeded pools.
fn test_state() -> AppState {
    let classifier = Arc::new(IntentClassifier::new());
    let engine = Arc::new(TemplateReplyEngine::with_seeds(5, 9));
    let assistant = AssistantHandle::with_components(
        AssistantConfig {
            reply_delay_ms: 20,
            creation_delay_ms: 40,
        },
        Arc::clone(&classifier),
        Arc::clone(&engine),
        None,
    );

    AppState {
        assistant,
        classifier,
        engine,
        platform: PlatformConnector::default(),
    }
}

/// Polls the state endpoint until the panel session reports idle.
async fn wait_for_panel_idle(state: &AppState) {
    for _ in 0..200 {
        let Json(response) = routes::get_state(State(state.clone())).await.unwrap();
        if response.state.is_idle() {
            return;
        }
        sleep(Duration::from_millis(5)).await;
    }
    panic!("panel session never returned to idle");
}

// ============================================================================
// Stateless Endpoint Tests
// ============================================================================

#[cfg(test)]
mod stateless_endpoint_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_reports_package_version() {
        let Json(response) = routes::health().await;

        assert_eq!(response.status, "ok");
        assert_eq!(response.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_message_endpoint_routes_by_keyword() {
        let state = test_state();

        let Json(reply) = routes::post_message(
            State(state.clone()),
            Json(MessageRequest {
                text: "Make a post about brunch".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(reply.kind, MessageKind::ContentCreation);
        assert!(reply.payload.is_some());
        assert!(reply.content.contains("\"Make a post about brunch\""));

        let Json(reply) = routes::post_message(
            State(state),
            Json(MessageRequest {
                text: "How is my engagement developing?".to_string(),
            }),
        )
        .await
        .unwrap();
        assert!(matches!(
            reply.kind,
            MessageKind::Plain | MessageKind::AnalyticsInsight | MessageKind::HashtagSuggestion
        ));
    }

    #[tokio::test]
    async fn test_blank_message_is_rejected() {
        let state = test_state();

        let result = routes::post_message(
            State(state),
            Json(MessageRequest {
                text: "   ".to_string(),
            }),
        )
        .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_generate_content_requires_creation_category() {
        let state = test_state();

        let result = routes::generate_content(
            State(state.clone()),
            Json(GenerateContentRequest {
                prompt_text: "A rainy day post".to_string(),
                category: ActionCategory::Analytics,
            }),
        )
        .await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let Json(reply) = routes::generate_content(
            State(state),
            Json(GenerateContentRequest {
                prompt_text: "A rainy day post".to_string(),
                category: ActionCategory::Creation,
            }),
        )
        .await
        .unwrap();
        assert_eq!(reply.kind, MessageKind::ContentCreation);
        assert!(reply.content.ends_with("\"A rainy day post\""));
    }

    #[tokio::test]
    async fn test_publish_acknowledges_with_platform() {
        let state = test_state();

        let artifact = ContentArtifact::Caption(CaptionArtifact {
            text: "golden hour on the pier".to_string(),
            tone: "warm".to_string(),
            length: "short".to_string(),
            cta: "Tag a friend".to_string(),
            hashtags: vec!["#goldenhour".to_string()],
        });

        let (status, Json(response)) =
            routes::publish_content(State(state), Json(artifact)).await;

        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(response.status, "accepted");
        assert_eq!(response.platform, "Instagram");
    }
}

// ============================================================================
// Panel Endpoint Tests
// ============================================================================

#[cfg(test)]
mod panel_endpoint_tests {
    use super::*;

    #[tokio::test]
    async fn test_conversation_roundtrip() {
        let state = test_state();

        // 1. The conversation opens with the seeded greeting
        let Json(messages) = routes::get_conversation(State(state.clone())).await.unwrap();
        assert_eq!(messages.len(), 1);

        // 2. Submit panel text
        let Json(response) = routes::post_conversation_message(
            State(state.clone()),
            Json(SubmitRequest {
                text: "How did my reels do?".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.outcome, SubmitOutcome::Accepted);

        // 3. Wait for the reply to land
        wait_for_panel_idle(&state).await;
        let Json(messages) = routes::get_conversation(State(state.clone())).await.unwrap();
        assert_eq!(messages.len(), 3);

        // 4. Reset back to the greeting
        let Json(response) = routes::reset_conversation(State(state.clone())).await.unwrap();
        assert_eq!(response.outcome, SubmitOutcome::Accepted);

        let Json(messages) = routes::get_conversation(State(state)).await.unwrap();
        assert_eq!(messages.len(), 1);
    }

    #[tokio::test]
    async fn test_blank_panel_text_is_an_outcome_not_an_error() {
        let state = test_state();

        let Json(response) = routes::post_conversation_message(
            State(state.clone()),
            Json(SubmitRequest {
                text: "   ".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.outcome, SubmitOutcome::IgnoredEmpty);

        let Json(messages) = routes::get_conversation(State(state)).await.unwrap();
        assert_eq!(messages.len(), 1, "rejected input must not touch the timeline");
    }

    #[tokio::test]
    async fn test_unknown_quick_action_is_not_found() {
        let state = test_state();

        let result = routes::post_quick_action(
            State(state),
            Json(ActionRequest {
                action_id: "pivot-to-video".to_string(),
            }),
        )
        .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_quick_action_dispatch_and_state() {
        let state = test_state();

        // 1. Fire a creation quick action
        let Json(response) = routes::post_quick_action(
            State(state.clone()),
            Json(ActionRequest {
                action_id: "hashtag-set".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.outcome, SubmitOutcome::Accepted);

        // 2. The panel reports the content indicator while composing
        let Json(current) = routes::get_state(State(state.clone())).await.unwrap();
        assert_eq!(current.state, AssistantState::ComposingContent);

        // 3. The artifact lands without an echoed user message
        wait_for_panel_idle(&state).await;
        let Json(messages) = routes::get_conversation(State(state)).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].kind, MessageKind::ContentCreation);
    }
}

// ============================================================================
// Catalog Endpoint Tests
// ============================================================================

#[cfg(test)]
mod catalog_endpoint_tests {
    use super::*;

    #[tokio::test]
    async fn test_catalog_lists_every_action() {
        let Json(actions) = routes::list_quick_actions(Query(CategoryQuery { category: None })).await;

        assert_eq!(actions.len(), 6);
        assert_eq!(actions[0].id, "best-posting-times");
    }

    #[tokio::test]
    async fn test_catalog_filters_by_category() {
        let Json(actions) = routes::list_quick_actions(Query(CategoryQuery {
            category: Some(ActionCategory::Creation),
        }))
        .await;

        assert_eq!(actions.len(), 3);
        assert!(actions
            .iter()
            .all(|action| action.category == ActionCategory::Creation));
    }
}
