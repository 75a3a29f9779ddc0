//! Quick action registry.
//!
//! A fixed catalog of one-tap shortcuts rendered by the assistant panel.
//! The catalog is static: no persistence, no per-user variation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category a quick action belongs to, which decides how it is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionCategory {
    /// Routed through the normal text-submission path.
    Analytics,
    /// Routed straight to the creation generator, skipping classification.
    Creation,
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl ActionCategory {
    /// Returns the wire label for the category.
    pub fn label(&self) -> &'static str {
        match self {
            ActionCategory::Analytics => "analytics",
            ActionCategory::Creation => "creation",
        }
    }
}

/// A one-tap shortcut with a canned prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickAction {
    /// Stable identifier used by the dispatch API.
    pub id: &'static str,
    /// Short title shown on the action card.
    pub title: &'static str,
    /// One-line description shown under the title.
    pub description: &'static str,
    /// Dispatch category.
    pub category: ActionCategory,
    /// The canned prompt submitted when the action fires.
    pub prompt_text: &'static str,
}

/// The full catalog, in panel display order.
static CATALOG: [QuickAction; 6] = [
    QuickAction {
        id: "best-posting-times",
        title: "Best Posting Times",
        description: "Find optimal times to post",
        category: ActionCategory::Analytics,
        prompt_text: "What are the best times to post on Instagram for maximum engagement?",
    },
    QuickAction {
        id: "engagement-analysis",
        title: "Engagement Analysis",
        description: "Analyze your engagement patterns",
        category: ActionCategory::Analytics,
        prompt_text: "Analyze my recent engagement patterns and suggest improvements",
    },
    QuickAction {
        id: "content-ideas",
        title: "Content Ideas",
        description: "Get content suggestions",
        category: ActionCategory::Analytics,
        prompt_text: "Suggest some trending content ideas for my niche",
    },
    QuickAction {
        id: "create-post",
        title: "Create Post",
        description: "Generate a complete social media post",
        category: ActionCategory::Creation,
        prompt_text: "Create a engaging social media post with caption and hashtags",
    },
    QuickAction {
        id: "photo-caption",
        title: "Photo Caption",
        description: "Generate caption for your photo",
        category: ActionCategory::Creation,
        prompt_text: "Create an engaging caption for a lifestyle photo",
    },
    QuickAction {
        id: "hashtag-set",
        title: "Hashtag Set",
        description: "Generate trending hashtags",
        category: ActionCategory::Creation,
        prompt_text: "Generate a set of trending hashtags for maximum reach",
    },
];

/// Returns the full catalog in display order.
pub fn registry() -> &'static [QuickAction] {
    &CATALOG
}

/// Looks up an action by id.
pub fn find(id: &str) -> Option<&'static QuickAction> {
    CATALOG.iter().find(|action| action.id == id)
}

/// Returns the actions of one category, preserving display order.
pub fn for_category(category: ActionCategory) -> Vec<&'static QuickAction> {
    CATALOG
        .iter()
        .filter(|action| action.category == category)
        .collect()
}
