//! Intent classification using regex patterns.
//!
//! Fast keyword-based routing between analytics and creation replies.
//! No ML model required - pure Rust regex matching.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Detected request intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestIntent {
    /// Content-creation request (create, generate, caption, etc.)
    Creation,
    /// Everything else: analytics and general questions
    Analytics,
}

impl fmt::Display for RequestIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl RequestIntent {
    /// Returns a human-readable label for the intent
    pub fn label(&self) -> &'static str {
        match self {
            RequestIntent::Creation => "creation",
            RequestIntent::Analytics => "analytics",
        }
    }
}

// Compile patterns once at startup. Matching is case-insensitive substring:
// a keyword anywhere in the text counts, even inside a longer word.
static CREATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)create").expect("Invalid regex: create keyword"),
        Regex::new(r"(?i)generate").expect("Invalid regex: generate keyword"),
        Regex::new(r"(?i)make").expect("Invalid regex: make keyword"),
        Regex::new(r"(?i)write").expect("Invalid regex: write keyword"),
        Regex::new(r"(?i)caption").expect("Invalid regex: caption keyword"),
        Regex::new(r"(?i)hashtag").expect("Invalid regex: hashtag keyword"),
        Regex::new(r"(?i)post").expect("Invalid regex: post keyword"),
    ]
});

/// Request classifier using regex patterns.
///
/// Deliberately coarse: any creation keyword routes the whole request to the
/// creation generator, everything else falls back to analytics.
pub struct IntentClassifier {
    patterns: Vec<Regex>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Create a new classifier with the creation keyword patterns
    pub fn new() -> Self {
        Self {
            patterns: CREATION_PATTERNS.clone(),
        }
    }

    /// Classify the intent of a text
    pub fn classify(&self, text: &str) -> RequestIntent {
        if self.patterns.iter().any(|pattern| pattern.is_match(text)) {
            RequestIntent::Creation
        } else {
            RequestIntent::Analytics
        }
    }
}

impl crate::actors::traits::Classifier for IntentClassifier {
    fn classify(&self, text: &str) -> RequestIntent {
        IntentClassifier::classify(self, text)
    }
}
