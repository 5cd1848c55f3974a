//! Batch translation command handler.

use scenewright::{
    Effect, GeminiClient, ScenewrightConfig, ScenewrightResult, TranslationContract,
    files::{load_script, save_script},
};
use std::path::Path;
use tracing::info;

/// Translate a script file's narration and save the result.
pub async fn run_translate(
    config: &ScenewrightConfig,
    script_path: &Path,
    language: &str,
    out: Option<&Path>,
) -> ScenewrightResult<()> {
    let mut script = load_script(script_path)?;
    if script.scenes.is_empty() {
        println!("Script has no scenes; nothing to translate.");
        return Ok(());
    }

    let client = GeminiClient::from_env(config.gemini().clone())?;
    let contract =
        TranslationContract::new(client).with_model(config.gemini().translation_model().clone());

    let narrations: Vec<String> = script.scenes.iter().map(|s| s.narration.clone()).collect();
    let translated = contract.translate_batch(&narrations, language).await?;

    script.apply(&Effect::TranslateNarrations {
        target_language: language.to_string(),
        narrations: translated,
    });

    let destination = out.unwrap_or(script_path);
    save_script(&script, destination)?;

    info!(language, scenes = script.scenes.len(), "Translated script");
    println!(
        "Translated {} scene(s) into {} -> {}",
        script.scenes.len(),
        language,
        destination.display()
    );
    Ok(())
}
