//! The closed set of structured operations the model may invoke.

use crate::ModelTier;
use serde::{Deserialize, Serialize};

/// Wire names of the five tools.
///
/// Parsing is case-insensitive so `GenerateScript` and `generateScript` both
/// resolve; anything else is an unknown tool.
///
/// # Examples
///
/// ```
/// use scenewright_core::ToolName;
/// use std::str::FromStr;
///
/// assert_eq!(ToolName::from_str("GenerateScript").unwrap(), ToolName::GenerateScript);
/// assert_eq!(ToolName::GenerateYouTubeTitle.to_string(), "generateYouTubeTitle");
/// assert!(ToolName::from_str("deleteEverything").is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum ToolName {
    /// Replace the script
    #[strum(serialize = "generateScript")]
    GenerateScript,
    /// Fill in translated narration
    #[strum(serialize = "translateNarrations")]
    TranslateNarrations,
    /// Produce a video title
    #[strum(serialize = "generateYouTubeTitle")]
    GenerateYouTubeTitle,
    /// Produce a video description
    #[strum(serialize = "generateYouTubeDescription")]
    GenerateYouTubeDescription,
    /// Produce a thumbnail image
    #[strum(serialize = "generateYouTubeThumbnail")]
    GenerateYouTubeThumbnail,
}

/// A scene as the model sends it in `generateScript`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDraft {
    /// 1-based scene number
    pub scene_number: u32,
    /// Visual description
    pub description: String,
    /// Spoken narration
    pub narration: String,
}

/// One entry of the sparse `translateNarrations` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneNarration {
    /// Scene the translation belongs to
    pub scene_number: u32,
    /// Translated narration text
    pub narration: String,
}

/// A validated tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCallRequest {
    /// Replace the script with these scenes
    GenerateScript {
        /// The new scenes
        scenes: Vec<SceneDraft>,
    },
    /// Translated narration, in one of two shapes
    TranslateNarrations {
        /// Language label
        target_language: String,
        /// Flat form: one string per scene, in script order
        translated_narrations: Option<Vec<String>>,
        /// Sparse form: explicit scene numbers
        scenes: Option<Vec<SceneNarration>>,
    },
    /// Video title
    GenerateYouTubeTitle {
        /// The title
        title: String,
    },
    /// Video description
    GenerateYouTubeDescription {
        /// The description
        description: String,
    },
    /// Thumbnail image request
    GenerateYouTubeThumbnail {
        /// Caller-supplied prompt
        prompt: Option<String>,
        /// Caller-chosen tier
        model_tier: Option<ModelTier>,
    },
}

impl ToolCallRequest {
    /// The tool this request invokes.
    pub fn tool(&self) -> ToolName {
        match self {
            ToolCallRequest::GenerateScript { .. } => ToolName::GenerateScript,
            ToolCallRequest::TranslateNarrations { .. } => ToolName::TranslateNarrations,
            ToolCallRequest::GenerateYouTubeTitle { .. } => ToolName::GenerateYouTubeTitle,
            ToolCallRequest::GenerateYouTubeDescription { .. } => {
                ToolName::GenerateYouTubeDescription
            }
            ToolCallRequest::GenerateYouTubeThumbnail { .. } => {
                ToolName::GenerateYouTubeThumbnail
            }
        }
    }
}
