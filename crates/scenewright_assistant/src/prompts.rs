//! Built-in instruction text.

/// System instruction used unless configuration supplies one.
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "\
You are a creative assistant helping the user write a short narrated video script.

A script is an ordered list of scenes. Every scene has a sceneNumber (starting at 1, \
unique, no gaps), a visual description for an image generator, and the narration that \
is spoken over it. Narration may contain bracketed delivery tags such as [whispering] \
or [excited]. Never translate, reword or drop these tags.

Each user message may begin with a CURRENT SCRIPT block describing the script as it \
stands. Refer to scenes by number when you discuss them.

Use the tools to change things instead of writing them out as text:
- generateScript replaces the whole script. Always send every scene.
- translateNarrations supplies translated narration for every scene, in scene order.
- generateYouTubeTitle, generateYouTubeDescription and generateYouTubeThumbnail \
produce the video's YouTube metadata.

When the user only wants to talk, answer in plain text.";

/// Preface placed before the user's text when anchor images are attached.
///
/// `count` is the number of images actually attached, in slot order.
pub fn anchor_preface(count: usize) -> String {
    let noun = if count == 1 { "image" } else { "images" };
    format!(
        "The user attached {} anchor {} as visual references. \
         Scene descriptions may refer to them by position (anchor 1, anchor 2, anchor 3); \
         keep those references intact.",
        count, noun
    )
}

/// Instruction for the batch translation call.
pub(crate) fn translation_prompt(narrations: &[String], target_language: &str) -> String {
    let numbered = serde_json::to_string_pretty(narrations).unwrap_or_else(|_| "[]".to_string());
    format!(
        "Translate each narration in the JSON array below into {language}.\n\
         Return ONLY a JSON array of strings with exactly {count} entries, in the same order.\n\
         Copy every bracketed tag such as [whispering] exactly as written; do not translate it.\n\n\
         {numbered}",
        language = target_language,
        count = narrations.len(),
        numbered = numbered,
    )
}

/// Prompt for a thumbnail when the model did not supply one.
pub(crate) fn derived_thumbnail_prompt(descriptions: &[&str]) -> String {
    format!(
        "Eye-catching YouTube thumbnail for a video with these scenes: {}",
        descriptions.join(" / ")
    )
}
