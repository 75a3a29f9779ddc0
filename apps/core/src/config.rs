//! Service configuration.
//!
//! Built from `PULSEBOARD_*` environment variables with sensible defaults,
//! validated before the service starts.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;

/// Default HTTP bind address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";

/// Default delay before a text reply is appended, in milliseconds.
const DEFAULT_REPLY_DELAY_MS: u64 = 1500;

/// Default delay before a creation quick action completes, in milliseconds.
const DEFAULT_CREATION_DELAY_MS: u64 = 2000;

/// Composition pacing for the assistant.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AssistantConfig {
    /// Delay before a reply to a text submission lands, in milliseconds.
    #[validate(range(max = 60_000))]
    pub reply_delay_ms: u64,
    /// Delay before a creation quick action completes, in milliseconds.
    #[validate(range(max = 60_000))]
    pub creation_delay_ms: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: DEFAULT_REPLY_DELAY_MS,
            creation_delay_ms: DEFAULT_CREATION_DELAY_MS,
        }
    }
}

impl AssistantConfig {
    /// Reply delay as a `Duration`.
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    /// Creation delay as a `Duration`.
    pub fn creation_delay(&self) -> Duration {
        Duration::from_millis(self.creation_delay_ms)
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone, Validate)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to.
    #[validate(length(min = 1))]
    pub bind_addr: String,
    /// Assistant pacing.
    #[validate(nested)]
    pub assistant: AssistantConfig,
    /// Optional path of the JSON-lines transcript log. Disabled when unset.
    pub transcript_path: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            assistant: AssistantConfig::default(),
            transcript_path: None,
        }
    }
}

impl ServiceConfig {
    /// Loads configuration from the environment, falling back to defaults
    /// for anything unset.
    ///
    /// Recognized variables: `PULSEBOARD_BIND_ADDR`,
    /// `PULSEBOARD_REPLY_DELAY_MS`, `PULSEBOARD_CREATION_DELAY_MS`,
    /// `PULSEBOARD_TRANSCRIPT`.
    pub fn from_env() -> Result<Self, AppError> {
        let config = Self {
            bind_addr: std::env::var("PULSEBOARD_BIND_ADDR")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            assistant: AssistantConfig {
                reply_delay_ms: read_millis("PULSEBOARD_REPLY_DELAY_MS", DEFAULT_REPLY_DELAY_MS)?,
                creation_delay_ms: read_millis(
                    "PULSEBOARD_CREATION_DELAY_MS",
                    DEFAULT_CREATION_DELAY_MS,
                )?,
            },
            transcript_path: std::env::var("PULSEBOARD_TRANSCRIPT")
                .ok()
                .map(PathBuf::from),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Reads a millisecond value from the environment, or the default when unset.
fn read_millis(name: &str, default: u64) -> Result<u64, AppError> {
    match std::env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| {
            AppError::Config(format!("{} must be an integer, got '{}'", name, raw))
        }),
        Err(_) => Ok(default),
    }
}
