//! Analytics insight pool.
//!
//! Three canned insight templates covering posting times, trending hashtags
//! and engagement trends. Each draw picks one uniformly at random.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{
    BestTimesInsight, Message, MessageKind, MessagePayload, TrendingHashtagsInsight,
};

/// Number of templates in the pool.
const POOL_SIZE: usize = 3;

/// Draws canned analytics replies from a fixed pool.
pub struct AnalyticsGenerator {
    rng: StdRng,
}

impl AnalyticsGenerator {
    /// Creates a generator seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a generator with a fixed seed for reproducible draws.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws one insight uniformly from the pool.
    pub fn draw(&mut self) -> Message {
        match self.rng.gen_range(0..POOL_SIZE) {
            0 => Self::best_times_insight(),
            1 => Self::trending_hashtags_insight(),
            _ => Self::engagement_trend_insight(),
        }
    }

    fn best_times_insight() -> Message {
        Message::assistant(
            MessageKind::AnalyticsInsight,
            "Based on your recent posts, your audience is most active between 6-8 PM on weekdays. Posts published during this window show 35% higher engagement rates. I recommend scheduling your content between 6:00-7:30 PM for optimal reach.",
            Some(MessagePayload::BestTimes(BestTimesInsight {
                best_times: vec![
                    "6:00 PM".to_string(),
                    "6:30 PM".to_string(),
                    "7:00 PM".to_string(),
                ],
                engagement_boost: "35%".to_string(),
                recommended_days: vec![
                    "Monday".to_string(),
                    "Wednesday".to_string(),
                    "Friday".to_string(),
                ],
            })),
        )
    }

    fn trending_hashtags_insight() -> Message {
        Message::assistant(
            MessageKind::HashtagSuggestion,
            "I've analyzed trending hashtags in your niche. #lifestyle, #dailyinspiration, and #motivationmonday are performing exceptionally well. Consider incorporating these into your next posts while maintaining authenticity.",
            Some(MessagePayload::TrendingHashtags(TrendingHashtagsInsight {
                hashtags: vec![
                    "#lifestyle".to_string(),
                    "#dailyinspiration".to_string(),
                    "#motivationmonday".to_string(),
                    "#selfcare".to_string(),
                ],
                expected_reach: "15K-25K impressions".to_string(),
            })),
        )
    }

    fn engagement_trend_insight() -> Message {
        Message::assistant(
            MessageKind::Plain,
            "Your recent engagement shows a positive trend! Your storytelling posts are performing 42% better than promotional content. I suggest maintaining a 70/30 ratio of value-driven vs promotional posts to maximize audience retention.",
            None,
        )
    }
}

impl Default for AnalyticsGenerator {
    fn default() -> Self {
        Self::new()
    }
}
