// Tests for host-side script state and configuration loading.

use scenewright_core::{
    Effect, MediaBlob, ModelTier, Scene, Script, ScenewrightConfig, TurnResult,
};

fn scene_with_media(n: u32) -> Scene {
    let mut scene = Scene::new(n, format!("visual {}", n), format!("[calm] line {}", n));
    scene.image = Some(MediaBlob::new("image/png", vec![n as u8]));
    scene.audio = Some(MediaBlob::new("audio/wav", vec![n as u8, 0]));
    scene
}

#[test]
fn test_translation_preserves_media_and_text() {
    let mut script = Script::new(vec![scene_with_media(1), scene_with_media(2)]);

    script.apply(&Effect::TranslateNarrations {
        target_language: "Italian".to_string(),
        narrations: vec!["[calm] riga 1".to_string(), "[calm] riga 2".to_string()],
    });

    for (i, scene) in script.scenes.iter().enumerate() {
        let n = i as u32 + 1;
        assert_eq!(scene.narration, format!("[calm] line {}", n));
        assert_eq!(scene.narration_translated.as_deref(), Some(format!("[calm] riga {}", n).as_str()));
        assert_eq!(scene.image, Some(MediaBlob::new("image/png", vec![n as u8])));
        assert!(scene.audio.is_some());
    }
}

#[test]
fn test_mismatched_translation_overlay_is_not_applied() {
    let mut script = Script::new(vec![scene_with_media(1), scene_with_media(2)]);
    script.scenes[1].narration_translated = Some("old pass".to_string());
    let before = script.clone();

    script.apply(&Effect::TranslateNarrations {
        target_language: "French".to_string(),
        narrations: vec!["un".to_string()],
    });
    assert_eq!(script, before);

    script.apply(&Effect::TranslateNarrations {
        target_language: "French".to_string(),
        narrations: vec!["un".to_string(), "deux".to_string(), "trois".to_string()],
    });
    assert_eq!(script, before);
}

#[test]
fn test_generate_script_replaces_whole_list() {
    let mut script = Script::new(vec![scene_with_media(1), scene_with_media(2)]);

    script.apply(&Effect::GenerateScript {
        scenes: vec![Scene::new(1, "new", "fresh")],
        numbering_issues: Vec::new(),
    });

    assert_eq!(script.scenes, vec![Scene::new(1, "new", "fresh")]);
}

#[test]
fn test_apply_all_sets_metadata_in_order() {
    let mut script = Script::default();
    let turn = TurnResult::new(
        "done",
        vec![
            Effect::GenerateYouTubeTitle {
                title: "First".to_string(),
            },
            Effect::GenerateYouTubeTitle {
                title: "Second".to_string(),
            },
            Effect::GenerateYouTubeDescription {
                description: "About lighthouses".to_string(),
            },
            Effect::GenerateYouTubeThumbnail {
                prompt: "lighthouse".to_string(),
                tier: ModelTier::Cheap,
                image: MediaBlob::new("image/png", vec![9]),
            },
            Effect::None,
        ],
    );

    script.apply_all(&turn);

    assert_eq!(script.title.as_deref(), Some("Second"));
    assert_eq!(script.description.as_deref(), Some("About lighthouses"));
    assert_eq!(script.thumbnail_prompt.as_deref(), Some("lighthouse"));
    assert_eq!(script.thumbnail.as_ref().map(|t| t.data.clone()), Some(vec![9]));
}

#[test]
fn test_script_json_round_trip_drops_media() -> anyhow::Result<()> {
    let mut script = Script::new(vec![scene_with_media(1)]);
    script.title = Some("T".to_string());
    script.scenes[0].narration_translated = Some(String::new());

    let json = serde_json::to_string(&script)?;
    assert!(json.contains("\"sceneNumber\":1"));
    assert!(json.contains("\"narrationTranslated\":\"\""));
    assert!(!json.contains("image/png"));

    let back: Script = serde_json::from_str(&json)?;
    assert_eq!(back.scenes[0].narration_translated.as_deref(), Some(""));
    assert!(back.scenes[0].image.is_none());
    assert_eq!(back.title.as_deref(), Some("T"));
    Ok(())
}

#[test]
fn test_bundled_defaults() -> anyhow::Result<()> {
    let config = ScenewrightConfig::from_toml_str("")?;

    assert_eq!(config.gemini().chat_model(), "gemini-2.5-flash");
    assert!(*config.gemini().retry().enabled());
    assert_eq!(*config.thumbnail().default_tier(), ModelTier::Cheap);
    assert_eq!(config.thumbnail().model_for(ModelTier::Expensive), "imagen-4.0-ultra-generate-001");
    assert_eq!(*config.assistant().fallback_thumbnail_scenes(), 3);
    assert!(config.assistant().system_instruction().is_none());
    Ok(())
}

#[test]
fn test_overrides_layer_over_defaults() -> anyhow::Result<()> {
    let config = ScenewrightConfig::from_toml_str(
        r#"
[gemini]
chat_model = "gemini-2.5-pro"

[gemini.retry]
enabled = false
max_retries = 1
"#,
    )?;

    assert_eq!(config.gemini().chat_model(), "gemini-2.5-pro");
    assert_eq!(config.gemini().translation_model(), "gemini-2.5-flash");
    assert!(!*config.gemini().retry().enabled());
    assert_eq!(*config.gemini().retry().max_retries(), Some(1));
    Ok(())
}

#[test]
fn test_invalid_config_is_a_config_error() {
    let err = ScenewrightConfig::from_toml_str("[thumbnail]\ndefault_tier = \"premium\"\n")
        .unwrap_err();
    assert!(err.is_fatal());
}
