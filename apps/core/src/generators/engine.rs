//! Template-backed reply engine.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::actors::traits::ReplyGenerator;
use crate::error::AppError;
use crate::models::Message;

use super::{AnalyticsGenerator, CreationGenerator};

/// Canned-reply engine backing the assistant until a real model is wired in.
///
/// The two pools are seeded independently, so analytics draws never perturb
/// the creation sequence. Pools sit behind mutexes because the controller
/// calls the engine from spawned composition tasks.
pub struct TemplateReplyEngine {
    analytics: Mutex<AnalyticsGenerator>,
    creation: Mutex<CreationGenerator>,
}

impl TemplateReplyEngine {
    /// Creates an engine with entropy-seeded pools.
    pub fn new() -> Self {
        Self {
            analytics: Mutex::new(AnalyticsGenerator::new()),
            creation: Mutex::new(CreationGenerator::new()),
        }
    }

    /// Creates an engine with fixed seeds for reproducible sessions.
    pub fn with_seeds(analytics_seed: u64, creation_seed: u64) -> Self {
        Self {
            analytics: Mutex::new(AnalyticsGenerator::with_seed(analytics_seed)),
            creation: Mutex::new(CreationGenerator::with_seed(creation_seed)),
        }
    }
}

impl Default for TemplateReplyEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReplyGenerator for TemplateReplyEngine {
    async fn analytics_reply(&self, _source_text: &str) -> Result<Message, AppError> {
        let mut pool = self
            .analytics
            .lock()
            .map_err(|_| AppError::Internal("Analytics pool lock poisoned".to_string()))?;
        Ok(pool.draw())
    }

    async fn creation_reply(&self, prompt_text: &str) -> Result<Message, AppError> {
        let mut pool = self
            .creation
            .lock()
            .map_err(|_| AppError::Internal("Creation pool lock poisoned".to_string()))?;
        Ok(pool.draw(prompt_text))
    }
}
