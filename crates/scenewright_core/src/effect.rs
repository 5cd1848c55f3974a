//! Effects: the host-applicable result of a conversational turn.

use crate::{MediaBlob, NumberingIssue, Scene};
use serde::{Deserialize, Serialize};

/// Quality tier for thumbnail generation.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ModelTier {
    /// Fast, inexpensive image model
    #[default]
    Cheap,
    /// Slower, higher quality image model
    Expensive,
}

/// A described mutation produced by one successfully handled tool call.
///
/// The engine never touches host state; the host applies effects in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Effect {
    /// Nothing to apply
    #[default]
    None,
    /// Replace the whole scene list
    GenerateScript {
        /// The new scenes, in the order the model sent them
        scenes: Vec<Scene>,
        /// Numbering problems found in those scenes (never auto-fixed)
        numbering_issues: Vec<NumberingIssue>,
    },
    /// Overwrite `narration_translated` on every scene, by position
    TranslateNarrations {
        /// Language label the model translated into
        target_language: String,
        /// One entry per scene of the script the call was dispatched against
        narrations: Vec<String>,
    },
    /// Set the video title
    GenerateYouTubeTitle {
        /// The title
        title: String,
    },
    /// Set the video description
    GenerateYouTubeDescription {
        /// The description
        description: String,
    },
    /// Set the video thumbnail
    GenerateYouTubeThumbnail {
        /// Prompt the image was generated from
        prompt: String,
        /// Tier used
        tier: ModelTier,
        /// The generated image
        image: MediaBlob,
    },
}

impl Effect {
    /// Short name used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Effect::None => "none",
            Effect::GenerateScript { .. } => "generate_script",
            Effect::TranslateNarrations { .. } => "translate_narrations",
            Effect::GenerateYouTubeTitle { .. } => "youtube_title",
            Effect::GenerateYouTubeDescription { .. } => "youtube_description",
            Effect::GenerateYouTubeThumbnail { .. } => "youtube_thumbnail",
        }
    }
}

/// Normalized output of one conversational turn.
#[derive(Debug, Clone, PartialEq, Default, derive_getters::Getters)]
pub struct TurnResult {
    /// Text to show the user
    display_text: String,
    /// Mutations for the host to apply, in order
    effects: Vec<Effect>,
}

impl TurnResult {
    /// Create a turn result.
    pub fn new(display_text: impl Into<String>, effects: Vec<Effect>) -> Self {
        Self {
            display_text: display_text.into(),
            effects,
        }
    }

    /// A plain assistant reply with nothing to apply.
    pub fn text_only(display_text: impl Into<String>) -> Self {
        Self::new(display_text, Vec::new())
    }

    /// Split into display text and effects.
    pub fn into_parts(self) -> (String, Vec<Effect>) {
        (self.display_text, self.effects)
    }
}
