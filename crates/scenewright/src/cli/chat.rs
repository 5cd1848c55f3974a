//! Interactive chat command handler.

use scenewright::{
    AnchorImages, ContextBuilder, ConversationSession, Effect, GeminiClient, ImagenClient,
    ScenewrightConfig, ScenewrightResult, Script, StorageError, StorageErrorKind,
    ThumbnailGenerator, TurnResult,
    files::{load_anchor, load_script, save_script, write_thumbnail},
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

const HELP: &str = "Commands: /script  /save [FILE]  /reset  /help  /quit";

/// Run an interactive conversation over stdin.
///
/// Effects are applied to an in-memory script after every turn. The script is
/// written to disk only on `/save`.
pub async fn run_chat(
    config: &ScenewrightConfig,
    script_path: Option<&Path>,
    anchor_paths: &[PathBuf],
) -> ScenewrightResult<()> {
    let mut script = match script_path {
        Some(path) if path.exists() => load_script(path)?,
        _ => Script::default(),
    };
    let mut save_path = script_path.map(Path::to_path_buf);

    let mut anchors = AnchorImages::default();
    for (slot, path) in anchor_paths.iter().enumerate() {
        anchors.set(slot, load_anchor(path)?);
    }

    let client = GeminiClient::from_env(config.gemini().clone())?;
    let thumbnails: Arc<dyn ThumbnailGenerator> = Arc::new(ImagenClient::from_env(
        config.gemini(),
        config.thumbnail().clone(),
    )?);
    let session = ConversationSession::from_config(client, Some(thumbnails), config);

    println!(
        "Scenewright chat ({} scene(s) loaded). {}",
        script.scenes.len(),
        HELP
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        eprint!("> ");
        let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::FileRead(format!("stdin: {}", e))))?
        else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line.split_once(' ').unwrap_or((line, "")) {
            ("/quit" | "/exit", _) => break,
            ("/help", _) => println!("{}", HELP),
            ("/reset", _) => {
                session.reset().await;
                println!("Conversation cleared; the script is unchanged.");
            }
            ("/script", _) => print_script(&script),
            ("/save", target) => {
                if !target.trim().is_empty() {
                    save_path = Some(PathBuf::from(target.trim()));
                }
                match &save_path {
                    Some(path) => save_all(&script, path)?,
                    None => println!("No script file; use /save FILE"),
                }
            }
            _ => match session.send_turn(line, &script.scenes, &anchors).await {
                Ok(turn) => {
                    script.apply_all(&turn);
                    report_turn(&turn);
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!(error = %e, "Turn failed");
                    println!("Error: {}", e);
                }
            },
        }
    }

    debug!("Chat ended");
    Ok(())
}

fn report_turn(turn: &TurnResult) {
    println!("{}", turn.display_text());
    for effect in turn.effects() {
        debug!(effect = effect.label(), "Applied effect");
        if let Effect::GenerateScript {
            numbering_issues, ..
        } = effect
        {
            for issue in numbering_issues {
                println!("  warning: {}", issue);
            }
        }
    }
}

fn print_script(script: &Script) {
    let rendered = ContextBuilder::render(&script.scenes);
    if rendered.is_empty() {
        println!("(no scenes)");
    } else {
        println!("{}", rendered);
    }
    if let Some(title) = &script.title {
        println!("\nTitle: {}", title);
    }
    if let Some(description) = &script.description {
        println!("Description: {}", description);
    }
    if let Some(prompt) = &script.thumbnail_prompt {
        println!("Thumbnail prompt: {}", prompt);
    }
}

fn save_all(script: &Script, path: &Path) -> ScenewrightResult<()> {
    save_script(script, path)?;
    println!("Saved {}", path.display());
    if let Some(image) = &script.thumbnail {
        let thumbnail = write_thumbnail(path, image)?;
        println!("Saved {}", thumbnail.display());
    }
    Ok(())
}
