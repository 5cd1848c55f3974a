//! Tool declarations offered to the model and validation of its calls.

use scenewright_core::{ModelTier, SceneDraft, SceneNarration, ToolCall, ToolCallRequest, ToolName};
use scenewright_error::{ProtocolError, ProtocolErrorKind};
use scenewright_interface::ToolDefinition;
use serde_json::{Map, Value, json};
use std::str::FromStr;
use strum::IntoEnumIterator;

/// Function declarations for every tool, in Gemini schema dialect.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    ToolName::iter().map(definition).collect()
}

fn definition(tool: ToolName) -> ToolDefinition {
    let (description, parameters) = match tool {
        ToolName::GenerateScript => (
            "Replace the entire script with a new ordered list of scenes. Send every scene, numbered from 1.",
            json!({
                "type": "OBJECT",
                "properties": {
                    "scenes": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "sceneNumber": {"type": "INTEGER", "description": "1-based position"},
                                "description": {"type": "STRING", "description": "What the image shows"},
                                "narration": {"type": "STRING", "description": "Spoken narration, bracketed tags allowed"}
                            },
                            "required": ["sceneNumber", "description", "narration"]
                        }
                    }
                },
                "required": ["scenes"]
            }),
        ),
        ToolName::TranslateNarrations => (
            "Provide translated narration for the script. Use translatedNarrations with one entry per scene in order, or scenes with explicit scene numbers. Keep bracketed tags unchanged.",
            json!({
                "type": "OBJECT",
                "properties": {
                    "targetLanguage": {"type": "STRING"},
                    "translatedNarrations": {"type": "ARRAY", "items": {"type": "STRING"}},
                    "scenes": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "sceneNumber": {"type": "INTEGER"},
                                "narration": {"type": "STRING"}
                            },
                            "required": ["sceneNumber", "narration"]
                        }
                    }
                },
                "required": ["targetLanguage"]
            }),
        ),
        ToolName::GenerateYouTubeTitle => (
            "Set the YouTube title for the video.",
            json!({
                "type": "OBJECT",
                "properties": {"title": {"type": "STRING"}},
                "required": ["title"]
            }),
        ),
        ToolName::GenerateYouTubeDescription => (
            "Set the YouTube description for the video.",
            json!({
                "type": "OBJECT",
                "properties": {"description": {"type": "STRING"}},
                "required": ["description"]
            }),
        ),
        ToolName::GenerateYouTubeThumbnail => (
            "Generate a YouTube thumbnail image. Omit prompt to derive one from the script.",
            json!({
                "type": "OBJECT",
                "properties": {
                    "prompt": {"type": "STRING"},
                    "modelTier": {"type": "STRING", "enum": ["cheap", "expensive"]}
                }
            }),
        ),
    };

    ToolDefinition {
        name: tool.to_string(),
        description: description.to_string(),
        parameters,
    }
}

/// Validate a raw call from the model into a [`ToolCallRequest`].
///
/// # Errors
///
/// [`ProtocolErrorKind::UnknownTool`] for names outside the five tools, and
/// [`ProtocolErrorKind::MalformedArguments`] when a required argument is
/// missing, blank or of the wrong type.
///
/// # Examples
///
/// ```
/// use scenewright_assistant::parse_tool_call;
/// use scenewright_core::{ToolCall, ToolCallRequest};
/// use serde_json::json;
///
/// let call = ToolCall {
///     id: "call_0".to_string(),
///     name: "generateYouTubeTitle".to_string(),
///     arguments: json!({"title": "The Last Lighthouse"}),
/// };
/// assert_eq!(
///     parse_tool_call(&call).unwrap(),
///     ToolCallRequest::GenerateYouTubeTitle { title: "The Last Lighthouse".to_string() }
/// );
/// ```
pub fn parse_tool_call(call: &ToolCall) -> Result<ToolCallRequest, ProtocolError> {
    let tool = ToolName::from_str(&call.name)
        .map_err(|_| ProtocolError::new(ProtocolErrorKind::UnknownTool(call.name.clone())))?;
    // Gemini omits `args` entirely for a call with no arguments
    let no_arguments = Value::Object(Map::new());
    let arguments = if call.arguments.is_null() {
        &no_arguments
    } else {
        &call.arguments
    };
    let args = Args::new(tool, arguments)?;

    let request = match tool {
        ToolName::GenerateScript => {
            let scenes = args
                .required_array("scenes")?
                .iter()
                .enumerate()
                .map(|(i, item)| args.scene_draft(i, item))
                .collect::<Result<Vec<_>, _>>()?;
            ToolCallRequest::GenerateScript { scenes }
        }
        ToolName::TranslateNarrations => {
            let target_language = args.required_string("targetLanguage")?;
            let translated_narrations = args
                .optional_array("translatedNarrations")?
                .map(|items| {
                    items
                        .iter()
                        .enumerate()
                        .map(|(i, item)| {
                            item.as_str().map(str::to_string).ok_or_else(|| {
                                args.malformed(format!("translatedNarrations[{}] is not a string", i))
                            })
                        })
                        .collect::<Result<Vec<_>, _>>()
                })
                .transpose()?;
            let scenes = args
                .optional_array("scenes")?
                .map(|items| {
                    items
                        .iter()
                        .enumerate()
                        .map(|(i, item)| args.scene_narration(i, item))
                        .collect::<Result<Vec<_>, _>>()
                })
                .transpose()?;

            if translated_narrations.is_none() && scenes.is_none() {
                return Err(args.malformed("neither translatedNarrations nor scenes given"));
            }

            ToolCallRequest::TranslateNarrations {
                target_language,
                translated_narrations,
                scenes,
            }
        }
        ToolName::GenerateYouTubeTitle => ToolCallRequest::GenerateYouTubeTitle {
            title: args.required_string("title")?,
        },
        ToolName::GenerateYouTubeDescription => ToolCallRequest::GenerateYouTubeDescription {
            description: args.required_string("description")?,
        },
        ToolName::GenerateYouTubeThumbnail => {
            let prompt = match args.object.get("prompt") {
                None | Some(Value::Null) => None,
                Some(Value::String(prompt)) => {
                    Some(prompt.trim().to_string()).filter(|p| !p.is_empty())
                }
                Some(other) => {
                    return Err(args.malformed(format!("prompt must be a string, got {}", other)));
                }
            };
            let model_tier = match args.object.get("modelTier") {
                None | Some(Value::Null) => None,
                Some(Value::String(tier)) => Some(
                    ModelTier::from_str(&tier.to_ascii_lowercase())
                        .map_err(|_| args.malformed(format!("unknown modelTier '{}'", tier)))?,
                ),
                Some(other) => {
                    return Err(args.malformed(format!("modelTier must be a string, got {}", other)));
                }
            };
            ToolCallRequest::GenerateYouTubeThumbnail { prompt, model_tier }
        }
    };

    Ok(request)
}

/// Argument object of one call, with the tool name for error messages.
struct Args<'a> {
    tool: ToolName,
    object: &'a Map<String, Value>,
}

impl<'a> Args<'a> {
    fn new(tool: ToolName, arguments: &'a Value) -> Result<Self, ProtocolError> {
        let object = arguments.as_object().ok_or_else(|| {
            ProtocolError::new(ProtocolErrorKind::MalformedArguments {
                tool: tool.to_string(),
                reason: "arguments are not an object".to_string(),
            })
        })?;
        Ok(Self { tool, object })
    }

    #[track_caller]
    fn malformed(&self, reason: impl Into<String>) -> ProtocolError {
        ProtocolError::new(ProtocolErrorKind::MalformedArguments {
            tool: self.tool.to_string(),
            reason: reason.into(),
        })
    }

    fn required_string(&self, key: &str) -> Result<String, ProtocolError> {
        match self.object.get(key).and_then(Value::as_str) {
            Some(value) if !value.trim().is_empty() => Ok(value.to_string()),
            Some(_) => Err(self.malformed(format!("'{}' is blank", key))),
            None => Err(self.malformed(format!("missing '{}'", key))),
        }
    }

    fn required_array(&self, key: &str) -> Result<&'a Vec<Value>, ProtocolError> {
        match self.optional_array(key)? {
            Some(items) if !items.is_empty() => Ok(items),
            Some(_) => Err(self.malformed(format!("'{}' is empty", key))),
            None => Err(self.malformed(format!("missing '{}'", key))),
        }
    }

    fn optional_array(&self, key: &str) -> Result<Option<&'a Vec<Value>>, ProtocolError> {
        match self.object.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(_) => Err(self.malformed(format!("'{}' is not an array", key))),
        }
    }

    fn scene_draft(&self, index: usize, item: &Value) -> Result<SceneDraft, ProtocolError> {
        let object = item
            .as_object()
            .ok_or_else(|| self.malformed(format!("scenes[{}] is not an object", index)))?;
        Ok(SceneDraft {
            scene_number: self.scene_number(index, object)?,
            description: self.field_string(index, object, "description")?,
            narration: self.field_string(index, object, "narration")?,
        })
    }

    fn scene_narration(&self, index: usize, item: &Value) -> Result<SceneNarration, ProtocolError> {
        let object = item
            .as_object()
            .ok_or_else(|| self.malformed(format!("scenes[{}] is not an object", index)))?;
        Ok(SceneNarration {
            scene_number: self.scene_number(index, object)?,
            narration: self.field_string(index, object, "narration")?,
        })
    }

    /// Scene numbers arrive as JSON numbers, sometimes with a `.0`.
    fn scene_number(&self, index: usize, object: &Map<String, Value>) -> Result<u32, ProtocolError> {
        let value = object
            .get("sceneNumber")
            .ok_or_else(|| self.malformed(format!("scenes[{}] has no sceneNumber", index)))?;
        let number = value
            .as_u64()
            .or_else(|| {
                value
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                    .map(|f| f as u64)
            })
            .and_then(|n| u32::try_from(n).ok());
        number.ok_or_else(|| {
            self.malformed(format!("scenes[{}].sceneNumber is not a scene number: {}", index, value))
        })
    }

    fn field_string(
        &self,
        index: usize,
        object: &Map<String, Value>,
        key: &str,
    ) -> Result<String, ProtocolError> {
        object
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| self.malformed(format!("scenes[{}] has no string '{}'", index, key)))
    }
}
