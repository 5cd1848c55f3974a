// End-to-end turns against the real Gemini API.
//
// Run with `--features api` and GEMINI_API_KEY set.

use scenewright_assistant::{ConversationSession, TranslationContract};
use scenewright_core::{AnchorImages, Effect, Scene, ScenewrightConfig};
use scenewright_models::GeminiClient;

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_live_script_generation_turn() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let config = ScenewrightConfig::load()?;
    let client = GeminiClient::from_env(config.gemini().clone())?;
    let session = ConversationSession::from_config(client, None, &config);

    let result = session
        .send_turn(
            "Write a three-scene script about a lighthouse keeper. Use the generateScript tool.",
            &[],
            &AnchorImages::default(),
        )
        .await?;

    assert!(!result.display_text().is_empty());
    assert!(
        result
            .effects()
            .iter()
            .any(|e| matches!(e, Effect::GenerateScript { scenes, .. } if !scenes.is_empty()))
    );
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_live_translation_keeps_tags() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let config = ScenewrightConfig::load()?;
    let client = GeminiClient::from_env(config.gemini().clone())?;
    let contract =
        TranslationContract::new(client).with_model(config.gemini().translation_model().clone());

    let scenes = vec![
        Scene::new(1, "A hero wakes", "[excited] Today is the day"),
        Scene::new(2, "Rain on glass", "[whispering] Nobody knows."),
    ];
    let narrations: Vec<String> = scenes.iter().map(|s| s.narration.clone()).collect();

    let translated = contract.translate_batch(&narrations, "French").await?;

    assert_eq!(translated.len(), 2);
    assert!(translated[0].contains("[excited]"));
    assert!(translated[1].contains("[whispering]"));
    Ok(())
}
