//! Host-side script state and effect application.

use crate::{Effect, MediaBlob, Scene, TurnResult};
use serde::{Deserialize, Serialize};

/// The host's authoritative script: scenes plus the YouTube artifacts.
///
/// The engine only ever reads a snapshot of `scenes` and returns effects;
/// this type is how a host applies them.
///
/// # Examples
///
/// ```
/// use scenewright_core::{Effect, Scene, Script};
///
/// let mut script = Script::default();
/// script.apply(&Effect::GenerateScript {
///     scenes: vec![Scene::new(1, "A hero wakes", "Today is the day")],
///     numbering_issues: Vec::new(),
/// });
/// assert_eq!(script.scenes.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    /// Ordered scene list
    #[serde(default)]
    pub scenes: Vec<Scene>,
    /// Video title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Video description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Prompt the current thumbnail was generated from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_prompt: Option<String>,
    /// Current thumbnail image
    #[serde(skip)]
    pub thumbnail: Option<MediaBlob>,
}

impl Script {
    /// Create a script from scenes.
    pub fn new(scenes: Vec<Scene>) -> Self {
        Self {
            scenes,
            ..Default::default()
        }
    }

    /// Apply one effect.
    pub fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::GenerateYouTubeTitle { title } => self.title = Some(title.clone()),
            Effect::GenerateYouTubeDescription { description } => {
                self.description = Some(description.clone())
            }
            Effect::GenerateYouTubeThumbnail { prompt, image, .. } => {
                self.thumbnail_prompt = Some(prompt.clone());
                self.thumbnail = Some(image.clone());
            }
            other => apply_scene_effect(&mut self.scenes, other),
        }
    }

    /// Apply every effect of a turn, in order.
    pub fn apply_all(&mut self, result: &TurnResult) {
        for effect in result.effects() {
            self.apply(effect);
        }
    }
}

/// Apply the scene-list part of an effect.
///
/// Script generation replaces the list wholesale. Translation overwrites only
/// `narration_translated`, by position, leaving descriptions, narration and
/// media untouched. An overlay whose length differs from the scene count is
/// not applied at all. Other effects do not touch scenes.
pub fn apply_scene_effect(scenes: &mut Vec<Scene>, effect: &Effect) {
    match effect {
        Effect::GenerateScript { scenes: new, .. } => {
            *scenes = new.clone();
        }
        Effect::TranslateNarrations { narrations, .. } => {
            if narrations.len() != scenes.len() {
                tracing::warn!(
                    scene_count = scenes.len(),
                    narration_count = narrations.len(),
                    "Translation overlay does not match scene count; leaving scenes unchanged"
                );
                return;
            }
            for (scene, text) in scenes.iter_mut().zip(narrations) {
                scene.narration_translated = Some(text.clone());
            }
        }
        Effect::None
        | Effect::GenerateYouTubeTitle { .. }
        | Effect::GenerateYouTubeDescription { .. }
        | Effect::GenerateYouTubeThumbnail { .. } => {}
    }
}
