//! Content artifact pool.
//!
//! Three canned artifact templates: a complete post, a photo caption and a
//! hashtag set. Each draw picks one uniformly at random and echoes the
//! originating prompt in the message text.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{
    CaptionArtifact, ContentArtifact, HashtagSetArtifact, Message, MessageKind, MessagePayload,
    PostArtifact,
};

/// Number of templates in the pool.
const POOL_SIZE: usize = 3;

/// Draws canned content artifacts from a fixed pool.
pub struct CreationGenerator {
    rng: StdRng,
}

impl CreationGenerator {
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

    /// Draws one artifact uniformly from the pool.
    pub fn draw(&mut self, prompt_text: &str) -> Message {
        match self.rng.gen_range(0..POOL_SIZE) {
            0 => Self::post_artifact(prompt_text),
            1 => Self::caption_artifact(prompt_text),
            _ => Self::hashtag_set_artifact(prompt_text),
        }
    }

    fn post_artifact(prompt_text: &str) -> Message {
        let artifact = ContentArtifact::Post(PostArtifact {
            caption: "✨ Transform your daily routine into something extraordinary! Small changes lead to big results. What's one habit you're working on today? #TransformationTuesday #DailyMotivation".to_string(),
            hashtags: vec![
                "#TransformationTuesday".to_string(),
                "#DailyMotivation".to_string(),
                "#Lifestyle".to_string(),
                "#SelfCare".to_string(),
                "#Motivation".to_string(),
                "#Inspiration".to_string(),
                "#Goals".to_string(),
                "#Wellness".to_string(),
            ],
            image_suggestion: "A bright, inspiring lifestyle image showing personal growth or transformation".to_string(),
            posting_time: "11:00 AM - 1:00 PM for maximum engagement".to_string(),
            expected_reach: "15K-25K impressions".to_string(),
            engagement_prediction: "4.2% engagement rate".to_string(),
        });

        Message::assistant(
            MessageKind::ContentCreation,
            format!(
                "I've created an engaging social media post for you based on your prompt: \"{}\"",
                prompt_text
            ),
            Some(MessagePayload::Content(artifact)),
        )
    }

    fn caption_artifact(prompt_text: &str) -> Message {
        let artifact = ContentArtifact::Caption(CaptionArtifact {
            text: "Sometimes the best moments are the quiet ones. Taking time to appreciate the little things that make life beautiful. 🌸 What are you grateful for today?".to_string(),
            tone: "Inspirational and reflective".to_string(),
            length: "Medium-form (150 characters)".to_string(),
            cta: "Ask a question to boost engagement".to_string(),
            hashtags: vec![
                "#Gratitude".to_string(),
                "#Mindfulness".to_string(),
                "#LifeStyle".to_string(),
                "#Inspiration".to_string(),
                "#SelfCare".to_string(),
            ],
        });

        Message::assistant(
            MessageKind::ContentCreation,
            format!(
                "Here's a compelling caption for your photo: \"{}\"",
                prompt_text
            ),
            Some(MessagePayload::Content(artifact)),
        )
    }

    fn hashtag_set_artifact(prompt_text: &str) -> Message {
        let artifact = ContentArtifact::Hashtags(HashtagSetArtifact {
            trending: vec![
                "#Viral".to_string(),
                "#TrendingNow".to_string(),
                "#ExplorePage".to_string(),
                "#InstaGood".to_string(),
                "#PhotoOfTheDay".to_string(),
            ],
            niche_specific: vec![
                "#LifestyleBlogger".to_string(),
                "#WellnessJourney".to_string(),
                "#MindfulLiving".to_string(),
                "#SelfCareRoutine".to_string(),
            ],
            engagement_boosters: vec![
                "#LikeForLike".to_string(),
                "#FollowForFollow".to_string(),
                "#CommentBelow".to_string(),
                "#ShareYourStory".to_string(),
            ],
            optimal_count: "15-20 hashtags for best reach".to_string(),
            placement: "Mix in caption and first comment".to_string(),
        });

        Message::assistant(
            MessageKind::ContentCreation,
            format!(
                "I've generated a set of trending hashtags for maximum reach: \"{}\"",
                prompt_text
            ),
            Some(MessagePayload::Content(artifact)),
        )
    }
}

impl Default for CreationGenerator {
    fn default() -> Self {
        Self::new()
    }
}
