//! # Generators Module
//!
//! Fixed-pool reply production for PulseBoard.
//! Draws canned insights and artifacts instead of calling a model, so the
//! assistant stays fully offline while the rest of the pipeline is real.
//!
//! ## Components
//! - `analytics`: Analytics insight pool (posting times, hashtags, trends)
//! - `creation`: Content artifact pool (posts, captions, hashtag sets)
//! - `engine`: `ReplyGenerator` implementation over both pools

pub mod analytics;
pub mod creation;
pub mod engine;

// Re-export main types for convenience
pub use analytics::AnalyticsGenerator;
pub use creation::CreationGenerator;
pub use engine::TemplateReplyEngine;
