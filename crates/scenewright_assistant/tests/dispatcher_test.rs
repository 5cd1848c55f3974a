// Tests for tool call dispatch: ordering, validation, failure isolation.

mod test_utils;

use scenewright_assistant::{CallStatus, ToolCallDispatcher};
use scenewright_core::{
    AssistantConfig, Effect, ModelTier, NumberingIssue, Scene, Script, ScenewrightConfig,
    ThumbnailConfig, ToolCall,
};
use scenewright_error::GeminiErrorKind;
use serde_json::{Value, json};
use std::sync::Arc;
use test_utils::{MockThumbnails, numbered_scenes};

fn calls(list: Vec<(&str, Value)>) -> Vec<ToolCall> {
    list.into_iter()
        .enumerate()
        .map(|(i, (name, arguments))| ToolCall {
            id: format!("call_{}", i),
            name: name.to_string(),
            arguments,
        })
        .collect()
}

fn dispatcher_with(thumbnails: &MockThumbnails) -> ToolCallDispatcher {
    ToolCallDispatcher::default().with_thumbnail_generator(Arc::new(thumbnails.clone()))
}

#[tokio::test]
async fn test_translation_scenario_flat_form() {
    let scenes = vec![Scene::new(1, "A hero wakes", "[excited] Today is the day")];
    let batch = calls(vec![(
        "translateNarrations",
        json!({
            "targetLanguage": "French",
            "translatedNarrations": ["[excited] Aujourd'hui est le jour"]
        }),
    )]);

    let outcome = ToolCallDispatcher::default().dispatch(&batch, &scenes).await;

    assert_eq!(outcome.confirmation_text(), "I've translated the narration into French.");
    let mut script = Script::new(scenes);
    for effect in outcome.effects() {
        script.apply(effect);
    }
    assert_eq!(
        script.scenes[0].narration_translated.as_deref(),
        Some("[excited] Aujourd'hui est le jour")
    );
    assert_eq!(script.scenes[0].narration, "[excited] Today is the day");
}

#[tokio::test]
async fn test_translation_length_mismatch_leaves_scenes_unchanged() {
    let scenes = numbered_scenes(2);
    let batch = calls(vec![(
        "translateNarrations",
        json!({"targetLanguage": "French", "translatedNarrations": ["un"]}),
    )]);

    let outcome = ToolCallDispatcher::default().dispatch(&batch, &scenes).await;

    assert!(outcome.effects().is_empty());
    assert_eq!(outcome.confirmation_text(), "");
    assert_eq!(outcome.statuses(), &vec![CallStatus::Failed]);
    assert_eq!(outcome.failure_notices().len(), 1);
    assert!(outcome.failure_notices()[0].contains("Expected 2 items but received 1"));

    let mut script = Script::new(scenes.clone());
    for effect in outcome.effects() {
        script.apply(effect);
    }
    assert_eq!(script.scenes, scenes);
}

#[tokio::test]
async fn test_sparse_translation_resets_other_scenes() {
    let mut scenes = numbered_scenes(3);
    scenes[0].narration_translated = Some("old".to_string());
    let batch = calls(vec![(
        "translateNarrations",
        json!({
            "targetLanguage": "German",
            "scenes": [{"sceneNumber": 3, "narration": "drei"}]
        }),
    )]);

    let outcome = ToolCallDispatcher::default().dispatch(&batch, &scenes).await;

    assert_eq!(
        outcome.effects(),
        &vec![Effect::TranslateNarrations {
            target_language: "German".to_string(),
            narrations: vec![String::new(), String::new(), "drei".to_string()],
        }]
    );
}

#[tokio::test]
async fn test_malformed_middle_call_is_isolated() {
    let thumbnails = MockThumbnails::new_success();
    let batch = calls(vec![
        ("generateYouTubeTitle", json!({"title": "The Last Lighthouse"})),
        ("generateYouTubeDescription", json!({})),
        ("generateYouTubeThumbnail", json!({"prompt": "A lighthouse at dusk"})),
    ]);

    let outcome = dispatcher_with(&thumbnails)
        .dispatch(&batch, &numbered_scenes(1))
        .await;

    assert_eq!(
        outcome.statuses(),
        &vec![CallStatus::Applied, CallStatus::Skipped, CallStatus::Applied]
    );
    assert_eq!(outcome.effects().len(), 2);
    assert!(matches!(outcome.effects()[0], Effect::GenerateYouTubeTitle { .. }));
    assert!(matches!(outcome.effects()[1], Effect::GenerateYouTubeThumbnail { .. }));
    assert_eq!(
        outcome.confirmation_text(),
        "I've set the YouTube title to \"The Last Lighthouse\"."
    );
    assert!(outcome.failure_notices().is_empty());
}

#[tokio::test]
async fn test_unknown_tool_is_ignored() {
    let batch = calls(vec![
        ("deleteEverything", json!({})),
        ("generateYouTubeDescription", json!({"description": "A film about light."})),
    ]);

    let outcome = ToolCallDispatcher::default().dispatch(&batch, &[]).await;

    assert_eq!(outcome.statuses(), &vec![CallStatus::Skipped, CallStatus::Applied]);
    assert_eq!(
        outcome.confirmation_text(),
        "I've written a YouTube description for your video."
    );
}

#[tokio::test]
async fn test_first_success_wins_confirmation() {
    let batch = calls(vec![
        ("generateYouTubeDescription", json!({"description": "First"})),
        ("generateYouTubeTitle", json!({"title": "Second"})),
    ]);

    let outcome = ToolCallDispatcher::default().dispatch(&batch, &[]).await;

    assert_eq!(
        outcome.confirmation_text(),
        "I've written a YouTube description for your video."
    );
    assert_eq!(outcome.effects().len(), 2);
}

#[tokio::test]
async fn test_all_skipped_gives_empty_confirmation() {
    let batch = calls(vec![
        ("generateScript", json!({"scenes": []})),
        ("generateYouTubeTitle", json!({"title": ""})),
    ]);

    let outcome = ToolCallDispatcher::default().dispatch(&batch, &[]).await;

    assert!(outcome.effects().is_empty());
    assert_eq!(outcome.confirmation_text(), "");
    assert_eq!(outcome.display_text(), "");
}

#[tokio::test]
async fn test_translation_after_script_targets_new_scenes() {
    let batch = calls(vec![
        (
            "generateScript",
            json!({"scenes": [
                {"sceneNumber": 1, "description": "Dawn", "narration": "It begins."},
                {"sceneNumber": 2, "description": "Dusk", "narration": "It ends."}
            ]}),
        ),
        (
            "translateNarrations",
            json!({"targetLanguage": "Spanish", "translatedNarrations": ["Empieza.", "Termina."]}),
        ),
    ]);

    // One scene before the batch; the translation matches the new two-scene script.
    let outcome = ToolCallDispatcher::default()
        .dispatch(&batch, &numbered_scenes(1))
        .await;

    assert_eq!(outcome.effects().len(), 2);
    let mut script = Script::new(numbered_scenes(1));
    for effect in outcome.effects() {
        script.apply(effect);
    }
    assert_eq!(script.scenes.len(), 2);
    assert_eq!(script.scenes[1].narration_translated.as_deref(), Some("Termina."));
    assert_eq!(
        outcome.confirmation_text(),
        "I've generated a new script with 2 scenes."
    );
}

#[tokio::test]
async fn test_generated_script_keeps_bad_numbering() {
    let batch = calls(vec![(
        "generateScript",
        json!({"scenes": [
            {"sceneNumber": 1, "description": "a", "narration": "b"},
            {"sceneNumber": 1, "description": "c", "narration": "d"},
            {"sceneNumber": 4, "description": "e", "narration": "f"}
        ]}),
    )]);

    let outcome = ToolCallDispatcher::default().dispatch(&batch, &[]).await;

    match &outcome.effects()[0] {
        Effect::GenerateScript {
            scenes,
            numbering_issues,
        } => {
            let numbers: Vec<u32> = scenes.iter().map(|s| s.scene_number).collect();
            assert_eq!(numbers, vec![1, 1, 4]);
            assert_eq!(
                numbering_issues,
                &vec![
                    NumberingIssue::Duplicate(1),
                    NumberingIssue::Gap {
                        expected: 2,
                        found: 4
                    }
                ]
            );
        }
        other => panic!("expected GenerateScript, got {:?}", other),
    }
}

#[tokio::test]
async fn test_thumbnail_failure_becomes_notice() {
    let thumbnails = MockThumbnails::new_error(GeminiErrorKind::HttpError {
        status_code: 500,
        message: "boom".to_string(),
    });
    let batch = calls(vec![
        ("generateYouTubeThumbnail", json!({"prompt": "p"})),
        ("generateYouTubeTitle", json!({"title": "T"})),
    ]);

    let outcome = dispatcher_with(&thumbnails).dispatch(&batch, &[]).await;

    assert_eq!(outcome.statuses(), &vec![CallStatus::Failed, CallStatus::Applied]);
    assert_eq!(outcome.effects().len(), 1);
    assert_eq!(outcome.confirmation_text(), "I've set the YouTube title to \"T\".");
    assert_eq!(
        outcome.failure_notices(),
        &vec!["Sorry, I couldn't generate the thumbnail: HTTP 500 error: boom".to_string()]
    );
    assert_eq!(
        outcome.display_text(),
        "I've set the YouTube title to \"T\".\nSorry, I couldn't generate the thumbnail: HTTP 500 error: boom"
    );
}

#[tokio::test]
async fn test_thumbnail_prompt_derived_from_scenes_with_default_tier() -> anyhow::Result<()> {
    let thumbnails = MockThumbnails::new_success();
    let config = ScenewrightConfig::from_toml_str(
        "[thumbnail]\ndefault_tier = \"expensive\"\n[assistant]\nfallback_thumbnail_scenes = 2\n",
    )?;
    let dispatcher =
        ToolCallDispatcher::new(config.thumbnail().clone(), config.assistant().clone())
            .with_thumbnail_generator(Arc::new(thumbnails.clone()));

    let outcome = dispatcher
        .dispatch(
            &calls(vec![("generateYouTubeThumbnail", json!({}))]),
            &numbered_scenes(3),
        )
        .await;

    let requested = thumbnails.calls();
    assert_eq!(requested.len(), 1);
    let (prompt, tier) = &requested[0];
    assert!(prompt.contains("Scene 1 visual"));
    assert!(prompt.contains("Scene 2 visual"));
    assert!(!prompt.contains("Scene 3 visual"));
    assert_eq!(*tier, ModelTier::Expensive);
    assert_eq!(outcome.confirmation_text(), "I've generated a YouTube thumbnail.");
    Ok(())
}

#[tokio::test]
async fn test_thumbnail_call_with_no_arguments_is_applied() {
    let thumbnails = MockThumbnails::new_success();

    let outcome = dispatcher_with(&thumbnails)
        .dispatch(
            &calls(vec![("generateYouTubeThumbnail", Value::Null)]),
            &numbered_scenes(1),
        )
        .await;

    assert_eq!(outcome.statuses(), &vec![CallStatus::Applied]);
    assert_eq!(thumbnails.calls().len(), 1);
    assert!(matches!(
        outcome.effects()[0],
        Effect::GenerateYouTubeThumbnail { tier: ModelTier::Cheap, .. }
    ));
}

#[tokio::test]
async fn test_thumbnail_without_prompt_or_script_fails() {
    let thumbnails = MockThumbnails::new_success();

    let outcome = dispatcher_with(&thumbnails)
        .dispatch(&calls(vec![("generateYouTubeThumbnail", json!({}))]), &[])
        .await;

    assert!(thumbnails.calls().is_empty());
    assert!(outcome.effects().is_empty());
    assert_eq!(outcome.failure_notices().len(), 1);
    assert!(outcome.failure_notices()[0].starts_with("Sorry, I couldn't generate the thumbnail"));
}

#[tokio::test]
async fn test_thumbnail_without_generator_fails_softly() {
    let dispatcher = ToolCallDispatcher::new(ThumbnailConfig::default(), AssistantConfig::default());

    let outcome = dispatcher
        .dispatch(
            &calls(vec![("generateYouTubeThumbnail", json!({"prompt": "p", "modelTier": "cheap"}))]),
            &[],
        )
        .await;

    assert_eq!(outcome.statuses(), &vec![CallStatus::Failed]);
}

#[tokio::test]
async fn test_caller_scenes_are_not_modified() {
    let scenes = numbered_scenes(2);
    let before = scenes.clone();
    let batch = calls(vec![(
        "generateScript",
        json!({"scenes": [{"sceneNumber": 1, "description": "x", "narration": "y"}]}),
    )]);

    let _ = ToolCallDispatcher::default().dispatch(&batch, &scenes).await;

    assert_eq!(scenes, before);
}
