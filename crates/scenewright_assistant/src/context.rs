//! Rendering the current script into the per-turn context block.

use scenewright_core::Scene;

/// Separates the script context from the user's own words.
pub const CONTEXT_DELIMITER: &str = "\n\n---\n\n";

const LABEL: &str = "CURRENT SCRIPT:";

/// Renders scenes into the text block injected ahead of every user turn.
///
/// Output is deterministic: the same scenes always render byte-identically.
///
/// # Examples
///
/// ```
/// use scenewright_assistant::ContextBuilder;
/// use scenewright_core::Scene;
///
/// let scenes = vec![Scene::new(1, "A hero wakes", "[excited] Today is the day")];
/// let block = ContextBuilder::render(&scenes);
/// assert!(block.starts_with("CURRENT SCRIPT:"));
/// assert!(block.contains("Narration (original): [excited] Today is the day"));
/// assert_eq!(ContextBuilder::render(&[]), "");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextBuilder;

impl ContextBuilder {
    /// Render the `CURRENT SCRIPT:` block, or an empty string for no scenes.
    pub fn render(scenes: &[Scene]) -> String {
        if scenes.is_empty() {
            return String::new();
        }

        let blocks = scenes.iter().map(render_scene).collect::<Vec<_>>();
        format!("{}\n\n{}", LABEL, blocks.join("\n\n"))
    }

    /// Prepend the rendered block to a user message.
    ///
    /// The message is returned unchanged when there are no scenes.
    pub fn wrap_message(scenes: &[Scene], user_text: &str) -> String {
        let context = Self::render(scenes);
        if context.is_empty() {
            user_text.to_string()
        } else {
            format!("{}{}{}", context, CONTEXT_DELIMITER, user_text)
        }
    }
}

fn render_scene(scene: &Scene) -> String {
    let mut block = format!(
        "Scene {}:\nDescription: {}\nNarration (original): {}",
        scene.scene_number, scene.description, scene.narration
    );
    if let Some(translated) = &scene.narration_translated {
        block.push_str("\nNarration (translated): ");
        block.push_str(translated);
    }
    block
}
