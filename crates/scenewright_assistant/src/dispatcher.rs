//! Executing validated tool calls against a working copy of the script.

use crate::prompts::derived_thumbnail_prompt;
use crate::tools::parse_tool_call;
use scenewright_core::{
    AssistantConfig, Effect, ModelTier, Scene, ThumbnailConfig, ToolCall, ToolCallRequest,
    ToolName, apply_scene_effect, validate_numbering,
};
use scenewright_error::{
    DownstreamError, ProtocolError, ProtocolErrorKind, ScenewrightError, ScenewrightErrorKind,
    ScenewrightResult,
};
use scenewright_interface::ThumbnailGenerator;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// What happened to one call of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum CallStatus {
    /// The handler ran and produced an effect
    Applied,
    /// Unknown tool or malformed arguments; nothing ran
    Skipped,
    /// The handler ran and failed
    Failed,
}

/// The result of dispatching one batch of calls.
#[derive(Debug, Clone, Default, PartialEq, derive_getters::Getters)]
pub struct DispatchOutcome {
    /// Effects of the calls that succeeded, in call order
    effects: Vec<Effect>,
    /// Sentence of the first successful effect, or empty
    confirmation_text: String,
    /// One sentence per handler failure
    failure_notices: Vec<String>,
    /// Status of each call, parallel to the input
    statuses: Vec<CallStatus>,
}

impl DispatchOutcome {
    /// Confirmation followed by failure notices, one per line.
    pub fn display_text(&self) -> String {
        std::iter::once(self.confirmation_text.as_str())
            .filter(|text| !text.is_empty())
            .chain(self.failure_notices.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Take the effects.
    pub fn into_effects(self) -> Vec<Effect> {
        self.effects
    }
}

/// Validates structured calls and runs one handler per call.
///
/// Calls run sequentially in the order the model sent them. Each successful
/// effect is applied to a working copy of the scenes before the next call
/// runs, so a translation after a `generateScript` in the same batch targets
/// the new scenes. The caller's scenes are never modified.
#[derive(Clone)]
pub struct ToolCallDispatcher {
    thumbnails: Option<Arc<dyn ThumbnailGenerator>>,
    thumbnail_config: ThumbnailConfig,
    assistant_config: AssistantConfig,
}

impl std::fmt::Debug for ToolCallDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolCallDispatcher")
            .field("thumbnails", &self.thumbnails.is_some())
            .field("thumbnail_config", &self.thumbnail_config)
            .field("assistant_config", &self.assistant_config)
            .finish()
    }
}

impl Default for ToolCallDispatcher {
    fn default() -> Self {
        Self::new(ThumbnailConfig::default(), AssistantConfig::default())
    }
}

impl ToolCallDispatcher {
    /// Create a dispatcher with no thumbnail generator.
    pub fn new(thumbnail_config: ThumbnailConfig, assistant_config: AssistantConfig) -> Self {
        Self {
            thumbnails: None,
            thumbnail_config,
            assistant_config,
        }
    }

    /// Attach the image generator used by `generateYouTubeThumbnail`.
    pub fn with_thumbnail_generator(mut self, generator: Arc<dyn ThumbnailGenerator>) -> Self {
        self.thumbnails = Some(generator);
        self
    }

    /// Dispatch one turn's calls against a snapshot of the scenes.
    ///
    /// Never fails: unknown or malformed calls are skipped, handler failures
    /// become failure notices, and the remaining calls still run.
    #[instrument(
        name = "dispatch",
        skip_all,
        fields(call_count = calls.len(), scene_count = current_scenes.len())
    )]
    pub async fn dispatch(&self, calls: &[ToolCall], current_scenes: &[Scene]) -> DispatchOutcome {
        let mut working = current_scenes.to_vec();
        let mut outcome = DispatchOutcome::default();

        for call in calls {
            let request = match parse_tool_call(call) {
                Ok(request) => request,
                Err(e) => {
                    match &e.kind {
                        ProtocolErrorKind::UnknownTool(name) => {
                            warn!(tool = %name, "Ignoring unknown tool")
                        }
                        kind => warn!(call_id = %call.id, reason = %kind, "Skipping malformed tool call"),
                    }
                    outcome.statuses.push(CallStatus::Skipped);
                    continue;
                }
            };

            let tool = request.tool();
            match self.handle(request, &working).await {
                Ok((effect, sentence)) => {
                    info!(tool = %tool, effect = effect.label(), "Tool call applied");
                    apply_scene_effect(&mut working, &effect);
                    if outcome.confirmation_text.is_empty() {
                        outcome.confirmation_text = sentence;
                    }
                    outcome.effects.push(effect);
                    outcome.statuses.push(CallStatus::Applied);
                }
                Err(e) => {
                    warn!(tool = %tool, error = %e, "Tool call failed");
                    outcome.failure_notices.push(failure_sentence(tool, &e));
                    outcome.statuses.push(CallStatus::Failed);
                }
            }
        }

        debug!(
            effects = outcome.effects.len(),
            failures = outcome.failure_notices.len(),
            "Dispatch complete"
        );
        outcome
    }

    async fn handle(
        &self,
        request: ToolCallRequest,
        scenes: &[Scene],
    ) -> ScenewrightResult<(Effect, String)> {
        match request {
            ToolCallRequest::GenerateScript { scenes: drafts } => {
                let new_scenes: Vec<Scene> = drafts
                    .into_iter()
                    .map(|d| Scene::new(d.scene_number, d.description, d.narration))
                    .collect();
                let numbering_issues = validate_numbering(&new_scenes);
                if !numbering_issues.is_empty() {
                    warn!(issues = ?numbering_issues, "Generated script has numbering problems");
                }
                let sentence = format!(
                    "I've generated a new script with {}.",
                    scene_count(new_scenes.len())
                );
                Ok((
                    Effect::GenerateScript {
                        scenes: new_scenes,
                        numbering_issues,
                    },
                    sentence,
                ))
            }
            ToolCallRequest::TranslateNarrations {
                target_language,
                translated_narrations,
                scenes: sparse,
            } => {
                let narrations = normalize_translation(scenes, translated_narrations, sparse)?;
                let sentence = format!("I've translated the narration into {}.", target_language);
                Ok((
                    Effect::TranslateNarrations {
                        target_language,
                        narrations,
                    },
                    sentence,
                ))
            }
            ToolCallRequest::GenerateYouTubeTitle { title } => {
                let sentence = format!("I've set the YouTube title to \"{}\".", title);
                Ok((Effect::GenerateYouTubeTitle { title }, sentence))
            }
            ToolCallRequest::GenerateYouTubeDescription { description } => Ok((
                Effect::GenerateYouTubeDescription { description },
                "I've written a YouTube description for your video.".to_string(),
            )),
            ToolCallRequest::GenerateYouTubeThumbnail { prompt, model_tier } => {
                let tier = model_tier.unwrap_or(*self.thumbnail_config.default_tier());
                self.thumbnail(prompt, tier, scenes).await
            }
        }
    }

    async fn thumbnail(
        &self,
        prompt: Option<String>,
        tier: ModelTier,
        scenes: &[Scene],
    ) -> ScenewrightResult<(Effect, String)> {
        let generator = self
            .thumbnails
            .as_ref()
            .ok_or_else(|| DownstreamError::new("thumbnail", "no thumbnail generator is configured"))?;

        let prompt = match prompt {
            Some(prompt) => prompt,
            None => {
                let descriptions: Vec<&str> = scenes
                    .iter()
                    .map(|s| s.description.trim())
                    .filter(|d| !d.is_empty())
                    .take(*self.assistant_config.fallback_thumbnail_scenes())
                    .collect();
                if descriptions.is_empty() {
                    return Err(DownstreamError::new(
                        "thumbnail",
                        "there is no prompt and no script to derive one from",
                    )
                    .into());
                }
                derived_thumbnail_prompt(&descriptions)
            }
        };

        debug!(tier = %tier, prompt_len = prompt.len(), "Requesting thumbnail");
        let image = generator
            .generate_thumbnail(&prompt, tier)
            .await
            .map_err(|e| DownstreamError::new("thumbnail", downstream_reason(&e)))?;

        Ok((
            Effect::GenerateYouTubeThumbnail {
                prompt,
                tier,
                image,
            },
            "I've generated a YouTube thumbnail.".to_string(),
        ))
    }
}

/// Turn either translation form into one entry per scene.
///
/// The flat form must match the scene count. The sparse form resets every
/// scene it does not name to an empty translation.
fn normalize_translation(
    scenes: &[Scene],
    flat: Option<Vec<String>>,
    sparse: Option<Vec<scenewright_core::SceneNarration>>,
) -> Result<Vec<String>, ProtocolError> {
    if let Some(flat) = flat {
        if flat.len() != scenes.len() {
            return Err(ProtocolError::new(ProtocolErrorKind::LengthMismatch {
                expected: scenes.len(),
                actual: flat.len(),
            }));
        }
        return Ok(flat);
    }

    let mut overlay = vec![String::new(); scenes.len()];
    for entry in sparse.unwrap_or_default() {
        let mut matched = false;
        for (slot, scene) in overlay.iter_mut().zip(scenes) {
            if scene.scene_number == entry.scene_number {
                slot.clone_from(&entry.narration);
                matched = true;
            }
        }
        if !matched {
            warn!(scene_number = entry.scene_number, "Translation names a scene that does not exist");
        }
    }
    Ok(overlay)
}

fn scene_count(n: usize) -> String {
    if n == 1 {
        "1 scene".to_string()
    } else {
        format!("{} scenes", n)
    }
}

/// The part of an error worth showing to the user.
fn downstream_reason(err: &ScenewrightError) -> String {
    match err.kind() {
        ScenewrightErrorKind::Gemini(e) => e.kind.to_string(),
        ScenewrightErrorKind::Downstream(e) => e.message.clone(),
        ScenewrightErrorKind::Protocol(e) => e.kind.to_string(),
        _ => err.to_string(),
    }
}

fn failure_sentence(tool: ToolName, err: &ScenewrightError) -> String {
    let action = match tool {
        ToolName::GenerateScript => "generate the script",
        ToolName::TranslateNarrations => "apply the translation",
        ToolName::GenerateYouTubeTitle => "set the title",
        ToolName::GenerateYouTubeDescription => "write the description",
        ToolName::GenerateYouTubeThumbnail => "generate the thumbnail",
    };
    format!("Sorry, I couldn't {}: {}", action, downstream_reason(err))
}
