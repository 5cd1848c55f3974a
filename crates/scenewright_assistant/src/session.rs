//! One conversational session: context, model round trip, dispatch.

use crate::context::ContextBuilder;
use crate::dispatcher::ToolCallDispatcher;
use crate::extraction::FallbackExtractor;
use crate::prompts::{DEFAULT_SYSTEM_INSTRUCTION, anchor_preface};
use crate::tools::tool_definitions;
use scenewright_core::{
    AnchorImages, Effect, GenerateRequest, Input, Message, Role, Scene, ScenewrightConfig,
    ToolCall, TurnResult, validate_numbering,
};
use scenewright_error::{ScenewrightResult, SessionError, SessionErrorKind};
use scenewright_interface::{ThumbnailGenerator, ToolDefinition, ToolUse};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

/// Whether a turn is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum SessionState {
    /// Ready for the next turn
    Idle,
    /// A turn has been sent and its response is pending
    AwaitingModel,
}

/// Owns the chat with the model for one co-authoring session.
///
/// At most one turn is in flight. [`send_turn`](Self::send_turn) rejects a
/// second concurrent turn with [`SessionErrorKind::TurnInFlight`];
/// [`send_turn_queued`](Self::send_turn_queued) waits for it instead.
///
/// History is only written once a turn's [`TurnResult`] is complete, so a
/// turn whose future is dropped leaves the session exactly as it was.
pub struct ConversationSession<D: ToolUse> {
    driver: D,
    dispatcher: ToolCallDispatcher,
    system_instruction: String,
    tools: Vec<ToolDefinition>,
    history: Mutex<Vec<Message>>,
}

impl<D: ToolUse> std::fmt::Debug for ConversationSession<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationSession")
            .field("provider", &self.driver.provider_name())
            .field("model", &self.driver.model_name())
            .field("dispatcher", &self.dispatcher)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl<D: ToolUse> ConversationSession<D> {
    /// Create a session with the built-in system instruction.
    pub fn new(driver: D, dispatcher: ToolCallDispatcher) -> Self {
        Self {
            driver,
            dispatcher,
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
            tools: tool_definitions(),
            history: Mutex::new(Vec::new()),
        }
    }

    /// Create a session from loaded configuration.
    pub fn from_config(
        driver: D,
        thumbnails: Option<Arc<dyn ThumbnailGenerator>>,
        config: &ScenewrightConfig,
    ) -> Self {
        let mut dispatcher =
            ToolCallDispatcher::new(config.thumbnail().clone(), config.assistant().clone());
        if let Some(generator) = thumbnails {
            dispatcher = dispatcher.with_thumbnail_generator(generator);
        }

        let session = Self::new(driver, dispatcher);
        match config.assistant().system_instruction() {
            Some(instruction) => session.with_system_instruction(instruction.clone()),
            None => session,
        }
    }

    /// Replace the system instruction.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        match self.history.try_lock() {
            Ok(_) => SessionState::Idle,
            Err(_) => SessionState::AwaitingModel,
        }
    }

    /// Snapshot of the committed chat history.
    pub async fn history(&self) -> Vec<Message> {
        self.history.lock().await.clone()
    }

    /// Forget the conversation so far.
    pub async fn reset(&self) {
        self.history.lock().await.clear();
        info!("Conversation history cleared");
    }

    /// Send one user turn.
    ///
    /// # Errors
    ///
    /// [`SessionErrorKind::TurnInFlight`] if another turn is pending, any error
    /// from the model round trip, and [`SessionErrorKind::EmptyResponse`] when
    /// the model sends neither text nor calls. Tool call failures are not
    /// errors; they are reported in the display text.
    #[instrument(
        name = "send_turn",
        skip(self, user_text, current_scenes, anchors),
        fields(scene_count = current_scenes.len(), anchors = anchors.present().count())
    )]
    pub async fn send_turn(
        &self,
        user_text: &str,
        current_scenes: &[Scene],
        anchors: &AnchorImages,
    ) -> ScenewrightResult<TurnResult> {
        let mut history = self
            .history
            .try_lock()
            .map_err(|_| SessionError::new(SessionErrorKind::TurnInFlight))?;
        self.run_turn(&mut history, user_text, current_scenes, anchors)
            .await
    }

    /// Send one user turn, waiting for any pending turn to finish first.
    ///
    /// # Errors
    ///
    /// As [`send_turn`](Self::send_turn), except it never reports
    /// [`SessionErrorKind::TurnInFlight`].
    #[instrument(
        name = "send_turn_queued",
        skip(self, user_text, current_scenes, anchors),
        fields(scene_count = current_scenes.len(), anchors = anchors.present().count())
    )]
    pub async fn send_turn_queued(
        &self,
        user_text: &str,
        current_scenes: &[Scene],
        anchors: &AnchorImages,
    ) -> ScenewrightResult<TurnResult> {
        let mut history = self.history.lock().await;
        self.run_turn(&mut history, user_text, current_scenes, anchors)
            .await
    }

    async fn run_turn(
        &self,
        history: &mut Vec<Message>,
        user_text: &str,
        current_scenes: &[Scene],
        anchors: &AnchorImages,
    ) -> ScenewrightResult<TurnResult> {
        let text = compose_user_text(user_text, current_scenes, anchors);
        let mut parts = vec![Input::Text(text.clone())];
        parts.extend(anchors.present().map(|image| image.to_input()));

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Message::text(Role::System, self.system_instruction.clone()));
        messages.extend(history.iter().cloned());
        messages.push(Message::new(Role::User, parts));

        debug!(messages = messages.len(), "Sending turn to model");
        let response = self
            .driver
            .generate_with_tools(&GenerateRequest::new(messages), &self.tools)
            .await?;

        let free_text = response.text();
        let calls = response.tool_calls();

        if calls.is_empty() && free_text.trim().is_empty() {
            return Err(SessionError::new(SessionErrorKind::EmptyResponse).into());
        }

        let (result, acknowledgements) = if calls.is_empty() {
            (fallback_result(&free_text), None)
        } else {
            let outcome = self.dispatcher.dispatch(&calls, current_scenes).await;
            let display = outcome.display_text();
            let display = if display.is_empty() {
                free_text.clone()
            } else {
                display
            };
            let acknowledgements = calls
                .iter()
                .zip(outcome.statuses())
                .map(|(call, status)| Input::FunctionResponse {
                    name: call.name.clone(),
                    response: json!({"status": status.to_string()}),
                })
                .collect::<Vec<_>>();
            (
                TurnResult::new(display, outcome.into_effects()),
                Some(acknowledgements),
            )
        };

        // Images are sent with the turn that attached them only.
        history.push(Message::text(Role::User, text));
        history.push(model_message(&free_text, &calls));
        if let Some(acknowledgements) = acknowledgements {
            history.push(Message::new(Role::User, acknowledgements));
        }

        info!(
            effects = result.effects().len(),
            tool_calls = calls.len(),
            "Turn complete"
        );
        Ok(result)
    }
}

/// Context block, delimiter, optional anchor preface, then the user's text.
fn compose_user_text(user_text: &str, scenes: &[Scene], anchors: &AnchorImages) -> String {
    let message = if anchors.any_present() {
        format!("{}\n\n{}", anchor_preface(anchors.present().count()), user_text)
    } else {
        user_text.to_string()
    };
    ContextBuilder::wrap_message(scenes, &message)
}

fn fallback_result(free_text: &str) -> TurnResult {
    match FallbackExtractor::try_extract_script(free_text) {
        Some(scenes) => {
            let sentence = format!(
                "I've created a script with {} from my response.",
                if scenes.len() == 1 {
                    "1 scene".to_string()
                } else {
                    format!("{} scenes", scenes.len())
                }
            );
            let numbering_issues = validate_numbering(&scenes);
            TurnResult::new(
                sentence,
                vec![Effect::GenerateScript {
                    scenes,
                    numbering_issues,
                }],
            )
        }
        None => TurnResult::text_only(free_text),
    }
}

fn model_message(free_text: &str, calls: &[ToolCall]) -> Message {
    let mut parts = Vec::with_capacity(calls.len() + 1);
    if !free_text.is_empty() {
        parts.push(Input::Text(free_text.to_string()));
    }
    parts.extend(calls.iter().cloned().map(Input::FunctionCall));
    Message::new(Role::Assistant, parts)
}
