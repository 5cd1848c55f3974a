//! Mapping between scenewright request types and the Gemini wire format.

use super::GeminiResult;
use super::dto::{
    Content, FunctionCall, FunctionDeclaration, FunctionResponse, GenerateContentRequest,
    GenerateContentResponse, GenerationConfig, InlineData, Part, ToolDeclarations,
};
use base64::{Engine, prelude::BASE64_STANDARD};
use scenewright_core::{
    GeminiConfig, GenerateRequest, GenerateResponse, Input, MediaSource, Message, Output, Role,
    ToolCall,
};
use scenewright_error::{GeminiError, GeminiErrorKind};
use scenewright_interface::ToolDefinition;
use tracing::{debug, warn};

const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Build a `generateContent` body from a request and the tools on offer.
pub(crate) fn to_gemini_request(
    req: &GenerateRequest,
    tools: &[ToolDefinition],
    config: &GeminiConfig,
) -> GeminiResult<GenerateContentRequest> {
    let mut system_parts = Vec::new();
    let mut contents = Vec::new();

    for message in req.messages() {
        match message.role() {
            Role::System => {
                let text = message.joined_text();
                if !text.is_empty() {
                    system_parts.push(Part::text(text));
                }
            }
            Role::User | Role::Assistant => contents.push(to_content(message)?),
        }
    }

    let system_instruction = (!system_parts.is_empty()).then(|| Content {
        role: None,
        parts: system_parts,
    });

    let tools = if tools.is_empty() {
        Vec::new()
    } else {
        vec![ToolDeclarations {
            function_declarations: tools
                .iter()
                .map(|tool| FunctionDeclaration {
                    name: tool.name.clone(),
                    description: tool.description.clone(),
                    parameters: tool.parameters.clone(),
                })
                .collect(),
        }]
    };

    let mut generation_config = GenerationConfig {
        temperature: req.temperature().or(*config.temperature()),
        max_output_tokens: req.max_tokens().or(*config.max_output_tokens()),
        ..Default::default()
    };
    if let Some(schema) = req.response_schema() {
        generation_config.response_mime_type = Some("application/json".to_string());
        generation_config.response_schema = Some(schema.clone());
    }

    Ok(GenerateContentRequest {
        contents,
        system_instruction,
        tools,
        generation_config: Some(generation_config),
    })
}

fn to_content(message: &Message) -> GeminiResult<Content> {
    let role = match message.role() {
        Role::Assistant => "model",
        Role::User | Role::System => "user",
    };

    let parts = message
        .content()
        .iter()
        .map(to_part)
        .collect::<GeminiResult<Vec<_>>>()?;

    Ok(Content {
        role: Some(role.to_string()),
        parts,
    })
}

fn to_part(input: &Input) -> GeminiResult<Part> {
    let part = match input {
        Input::Text(text) => Part::text(text.clone()),
        Input::Image { mime, source } => {
            let data = match source {
                MediaSource::Base64(encoded) => encoded.clone(),
                MediaSource::Binary(bytes) => BASE64_STANDARD.encode(bytes),
                MediaSource::Url(_) => {
                    return Err(GeminiError::new(GeminiErrorKind::UrlMediaNotSupported));
                }
            };
            Part {
                inline_data: Some(InlineData {
                    mime_type: mime.clone().unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string()),
                    data,
                }),
                ..Default::default()
            }
        }
        Input::FunctionCall(call) => Part {
            function_call: Some(FunctionCall {
                name: call.name.clone(),
                args: call.arguments.clone(),
            }),
            ..Default::default()
        },
        Input::FunctionResponse { name, response } => Part {
            function_response: Some(FunctionResponse {
                name: name.clone(),
                response: response.clone(),
            }),
            ..Default::default()
        },
    };
    Ok(part)
}

/// Turn a `generateContent` response into text and tool-call outputs.
///
/// Thought parts are dropped. Function calls keep the order the model sent
/// them and are numbered `call_0`, `call_1`, ...
pub(crate) fn from_gemini_response(
    response: GenerateContentResponse,
) -> GeminiResult<GenerateResponse> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.clone())
    {
        warn!(reason = %reason, "Prompt blocked by Gemini");
        return Err(GeminiError::new(GeminiErrorKind::Blocked(reason)));
    }

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(GeminiError::new(GeminiErrorKind::Blocked(
            "no candidates returned".to_string(),
        )));
    };

    let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
    if parts.is_empty()
        && let Some(reason) = candidate.finish_reason.as_deref()
        && matches!(reason, "SAFETY" | "RECITATION" | "PROHIBITED_CONTENT" | "BLOCKLIST")
    {
        return Err(GeminiError::new(GeminiErrorKind::Blocked(reason.to_string())));
    }

    let mut outputs = Vec::new();
    let mut calls = Vec::new();

    for part in parts {
        if part.thought.unwrap_or(false) {
            continue;
        }
        if let Some(text) = part.text
            && !text.is_empty()
        {
            outputs.push(Output::Text(text));
        }
        if let Some(call) = part.function_call {
            let arguments = match call.args {
                serde_json::Value::Null => serde_json::Value::Object(serde_json::Map::new()),
                args => args,
            };
            calls.push(ToolCall {
                id: format!("call_{}", calls.len()),
                name: call.name,
                arguments,
            });
        }
    }

    debug!(
        text_parts = outputs.len(),
        tool_calls = calls.len(),
        "Converted Gemini response"
    );

    if !calls.is_empty() {
        outputs.push(Output::ToolCalls(calls));
    }

    Ok(GenerateResponse { outputs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).expect("valid response json")
    }

    #[test]
    fn system_messages_become_system_instruction() {
        let req = GenerateRequest::new(vec![
            Message::text(Role::System, "You are a script assistant."),
            Message::text(Role::User, "Hi"),
            Message::text(Role::Assistant, "Hello"),
        ]);

        let body = to_gemini_request(&req, &[], &GeminiConfig::default()).unwrap();
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(
            value["systemInstruction"]["parts"][0]["text"],
            "You are a script assistant."
        );
        assert_eq!(value["contents"].as_array().unwrap().len(), 2);
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][1]["role"], "model");
        assert!(value.get("tools").is_none());
    }

    #[test]
    fn images_are_inlined_as_base64() {
        let req = GenerateRequest::new(vec![Message::new(
            Role::User,
            vec![
                Input::Text("match this style".to_string()),
                Input::Image {
                    mime: Some("image/jpeg".to_string()),
                    source: MediaSource::Binary(vec![1, 2, 3]),
                },
            ],
        )]);

        let body = to_gemini_request(&req, &[], &GeminiConfig::default()).unwrap();
        let value = serde_json::to_value(&body).unwrap();
        let inline = &value["contents"][0]["parts"][1]["inlineData"];

        assert_eq!(inline["mimeType"], "image/jpeg");
        assert_eq!(inline["data"], "AQID");
    }

    #[test]
    fn url_images_are_rejected() {
        let req = GenerateRequest::new(vec![Message::new(
            Role::User,
            vec![Input::Image {
                mime: None,
                source: MediaSource::Url("https://example.com/a.png".to_string()),
            }],
        )]);

        let err = to_gemini_request(&req, &[], &GeminiConfig::default()).unwrap_err();
        assert_eq!(err.kind, GeminiErrorKind::UrlMediaNotSupported);
    }

    #[test]
    fn tools_and_schema_are_serialized() {
        let tools = vec![ToolDefinition {
            name: "generateYouTubeTitle".to_string(),
            description: "Set the title".to_string(),
            parameters: json!({"type": "OBJECT", "properties": {"title": {"type": "STRING"}}}),
        }];
        let req = GenerateRequest::builder()
            .messages(vec![Message::text(Role::User, "title please")])
            .response_schema(Some(json!({"type": "ARRAY", "items": {"type": "STRING"}})))
            .build()
            .unwrap();

        let body = to_gemini_request(&req, &tools, &GeminiConfig::default()).unwrap();
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(
            value["tools"][0]["functionDeclarations"][0]["name"],
            "generateYouTubeTitle"
        );
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "ARRAY");
    }

    #[test]
    fn response_with_text_and_calls() {
        let response = parse(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": "thinking...", "thought": true},
                        {"text": "Here you go."},
                        {"functionCall": {"name": "generateYouTubeTitle", "args": {"title": "A"}}},
                        {"functionCall": {"name": "generateYouTubeDescription", "args": {"description": "B"}}}
                    ]
                },
                "finishReason": "STOP"
            }]
        }));

        let converted = from_gemini_response(response).unwrap();

        assert_eq!(converted.text(), "Here you go.");
        let calls = converted.tool_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].id, "call_0");
        assert_eq!(calls[0].name, "generateYouTubeTitle");
        assert_eq!(calls[1].id, "call_1");
        assert_eq!(calls[1].arguments["description"], "B");
    }

    #[test]
    fn call_without_args_has_empty_arguments() {
        let response = parse(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"functionCall": {"name": "generateYouTubeThumbnail"}}]
                },
                "finishReason": "STOP"
            }]
        }));

        let calls = from_gemini_response(response).unwrap().tool_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "generateYouTubeThumbnail");
        assert_eq!(calls[0].arguments, json!({}));
    }

    #[test]
    fn blocked_prompt_is_an_error() {
        let response = parse(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }));

        let err = from_gemini_response(response).unwrap_err();
        assert_eq!(err.kind, GeminiErrorKind::Blocked("SAFETY".to_string()));
    }

    #[test]
    fn empty_candidate_list_is_blocked() {
        let err = from_gemini_response(parse(json!({"candidates": []}))).unwrap_err();
        assert!(matches!(err.kind, GeminiErrorKind::Blocked(_)));
    }
}
