//! Platform connector stub.
//!
//! Stands in for a real social platform integration. Publishing is
//! fire-and-forget: the request is acknowledged, logged and dropped, with no
//! delivery, status or retry.

use tracing::{debug, info, instrument};

use crate::models::ContentArtifact;

/// Platform the dashboard currently manages.
const DEFAULT_PLATFORM: &str = "Instagram";

/// Stub connector to the managed social platform.
#[derive(Debug, Clone)]
pub struct PlatformConnector {
    platform: String,
}

impl PlatformConnector {
    /// Creates a connector for the default platform.
    pub fn new() -> Self {
        Self {
            platform: DEFAULT_PLATFORM.to_string(),
        }
    }

    /// Name of the platform this connector targets.
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Accepts a publish request and drops it after logging.
    #[instrument(skip(self, artifact))]
    pub fn publish(&self, artifact: &ContentArtifact) {
        let preview = artifact.primary_text().unwrap_or("(hashtag set)");
        info!(platform = %self.platform, "Publish requested: {}", preview);
        debug!("Outgoing body: {}", artifact.clipboard_text());
    }
}

impl Default for PlatformConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CaptionArtifact, HashtagSetArtifact};

    #[test]
    fn test_publish_accepts_every_artifact_shape() {
        let connector = PlatformConnector::new();

        connector.publish(&ContentArtifact::Caption(CaptionArtifact {
            text: "quiet moments".to_string(),
            tone: "calm".to_string(),
            length: "short".to_string(),
            cta: "none".to_string(),
            hashtags: vec!["#calm".to_string()],
        }));

        connector.publish(&ContentArtifact::Hashtags(HashtagSetArtifact {
            trending: vec!["#a".to_string()],
            niche_specific: vec!["#b".to_string()],
            engagement_boosters: vec!["#c".to_string()],
            optimal_count: "3".to_string(),
            placement: "caption".to_string(),
        }));

        assert_eq!(connector.platform(), "Instagram");
    }
}
