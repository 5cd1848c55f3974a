//! Best-effort recovery of a script embedded in free text.
//!
//! The model is asked to use `generateScript`, but sometimes writes the scene
//! array into its reply instead. This module finds such an array and turns it
//! into scenes. It is only consulted when a turn carried no structured calls.

use scenewright_core::Scene;
use serde_json::Value;
use tracing::debug;

/// Finds a scene array in free text.
///
/// # Examples
///
/// ```
/// use scenewright_assistant::FallbackExtractor;
///
/// let scenes = FallbackExtractor::try_extract_script(
///     r#"Here you go: [{"description":"d","narration":"n"}]"#,
/// )
/// .unwrap();
/// assert_eq!(scenes.len(), 1);
/// assert_eq!(scenes[0].scene_number, 1);
///
/// assert!(FallbackExtractor::try_extract_script("Sounds good!").is_none());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackExtractor;

impl FallbackExtractor {
    /// Recover scenes from `free_text`, or `None` when nothing usable is there.
    ///
    /// Candidates are tried in order: the contents of a code fence, then every
    /// balanced `[...]` in the text. The first candidate that parses as an array
    /// with at least one element carrying a non-empty description or narration
    /// wins. Elements without `sceneNumber` are numbered by position.
    pub fn try_extract_script(free_text: &str) -> Option<Vec<Scene>> {
        let candidates = extract_from_code_block(free_text)
            .into_iter()
            .flat_map(balanced_arrays)
            .chain(balanced_arrays(free_text));

        for candidate in candidates {
            if let Some(scenes) = parse_scene_array(candidate) {
                debug!(scene_count = scenes.len(), "Recovered script from free text");
                return Some(scenes);
            }
        }

        debug!(text_length = free_text.len(), "No script recoverable from free text");
        None
    }
}

/// Contents of the first code fence, with or without a language tag.
fn extract_from_code_block(response: &str) -> Option<&str> {
    let start = response.find("```")?;
    let content_start = start + 3;
    // Skip the language tag line, if any.
    let skip_to = response[content_start..]
        .find('\n')
        .map(|n| content_start + n + 1)
        .unwrap_or(content_start);

    match response[skip_to..].find("```") {
        Some(end) => Some(response[skip_to..skip_to + end].trim()),
        // Unterminated fence, likely a truncated response.
        None => Some(response[skip_to..].trim()),
    }
}

/// Every top-level balanced `[...]` slice, in order of appearance.
///
/// Scanning ends at the first `[` that never closes; the rest of the text
/// is inside it.
fn balanced_arrays(text: &str) -> Vec<&str> {
    let mut found = Vec::new();
    let mut offset = 0;

    while let Some(relative) = text[offset..].find('[') {
        let start = offset + relative;
        let Some(len) = balanced_from(&text[start..]) else {
            break;
        };
        found.push(&text[start..start + len]);
        offset = start + len;
    }

    found
}

/// Length of the balanced `[...]` starting at the beginning of `text`.
fn balanced_from(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in text.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '[' if !in_string => depth += 1,
            ']' if !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    None
}

fn parse_scene_array(candidate: &str) -> Option<Vec<Scene>> {
    let Ok(Value::Array(items)) = serde_json::from_str::<Value>(candidate) else {
        return None;
    };

    let scenes: Vec<Scene> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| scene_from_value(index, item))
        .collect();

    scenes.iter().any(Scene::has_content).then_some(scenes)
}

fn scene_from_value(index: usize, item: &Value) -> Option<Scene> {
    let object = item.as_object()?;
    let text = |key: &str| {
        object
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let position = u32::try_from(index + 1).unwrap_or(u32::MAX);
    let scene_number = object
        .get("sceneNumber")
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(position);

    Some(Scene::new(scene_number, text("description"), text("narration")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prose_around_array() {
        let scenes =
            FallbackExtractor::try_extract_script(r#"Here you go: [{"description":"d","narration":"n"}]"#)
                .unwrap();
        assert_eq!(scenes, vec![Scene::new(1, "d", "n")]);
    }

    #[test]
    fn code_fence_with_numbers() {
        let text = "Sure!\n```json\n[\n  {\"sceneNumber\": 1, \"description\": \"Dawn\", \"narration\": \"[calm] It begins.\"},\n  {\"sceneNumber\": 2, \"description\": \"Dusk\", \"narration\": \"It ends.\"}\n]\n```\nLet me know.";
        let scenes = FallbackExtractor::try_extract_script(text).unwrap();
        assert_eq!(scenes.len(), 2);
        assert_eq!(scenes[1].scene_number, 2);
        assert_eq!(scenes[0].narration, "[calm] It begins.");
    }

    #[test]
    fn brackets_inside_strings_do_not_break_scanning() {
        let text = r#"[{"description":"a ] tricky [ one","narration":"[whispering] \"hi\""}]"#;
        let scenes = FallbackExtractor::try_extract_script(text).unwrap();
        assert_eq!(scenes[0].description, "a ] tricky [ one");
        assert_eq!(scenes[0].narration, "[whispering] \"hi\"");
    }

    #[test]
    fn tag_before_array_is_skipped() {
        let text = r#"[note] Draft below: [{"description":"d","narration":""}]"#;
        let scenes = FallbackExtractor::try_extract_script(text).unwrap();
        assert_eq!(scenes[0].description, "d");
    }

    #[test]
    fn meaningless_arrays_are_rejected() {
        assert!(FallbackExtractor::try_extract_script("[]").is_none());
        assert!(FallbackExtractor::try_extract_script("[1, 2, 3]").is_none());
        assert!(
            FallbackExtractor::try_extract_script(r#"[{"description":"  ","narration":""}]"#)
                .is_none()
        );
    }

    #[test]
    fn unparseable_text_is_rejected() {
        assert!(FallbackExtractor::try_extract_script("no script here").is_none());
        assert!(FallbackExtractor::try_extract_script(r#"[{"description": "d""#).is_none());
    }

    #[test]
    fn scanning_stops_at_unclosed_bracket() {
        let text = format!(r#"[{{"description":"d","narration":"n"}}] then {}"#, "[".repeat(20_000));
        assert_eq!(
            balanced_arrays(&text),
            vec![r#"[{"description":"d","narration":"n"}]"#]
        );
        assert_eq!(FallbackExtractor::try_extract_script(&text).unwrap().len(), 1);

        assert!(balanced_arrays(&"[ ".repeat(20_000)).is_empty());
    }
}
