//! The scene: one unit of a script.

use crate::MediaBlob;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One unit of the script.
///
/// `narration` and `narration_translated` may contain bracketed delivery tags
/// such as `[whispering]`; those are literals and pass through untouched.
/// `narration_translated` is `None` until a translation pass targets the scene,
/// which is different from `Some("")`.
///
/// Media blobs belong to the host and are never serialized.
///
/// # Examples
///
/// ```
/// use scenewright_core::Scene;
///
/// let scene = Scene::new(1, "A hero wakes", "[excited] Today is the day");
/// assert_eq!(scene.scene_number, 1);
/// assert!(scene.narration_translated.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// 1-based position in the script
    pub scene_number: u32,
    /// Visual description consumed by the image generator
    pub description: String,
    /// Spoken narration in the original language
    pub narration: String,
    /// Translated narration, present only after a translation pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narration_translated: Option<String>,
    /// Generated scene image
    #[serde(skip)]
    pub image: Option<MediaBlob>,
    /// Generated narration audio
    #[serde(skip)]
    pub audio: Option<MediaBlob>,
}

impl Scene {
    /// Create an untranslated scene without media.
    pub fn new(
        scene_number: u32,
        description: impl Into<String>,
        narration: impl Into<String>,
    ) -> Self {
        Self {
            scene_number,
            description: description.into(),
            narration: narration.into(),
            narration_translated: None,
            image: None,
            audio: None,
        }
    }

    /// Whether the scene carries any meaningful text.
    pub fn has_content(&self) -> bool {
        !self.description.trim().is_empty() || !self.narration.trim().is_empty()
    }
}

/// A violation of the contiguous, unique 1..N numbering rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum NumberingIssue {
    /// The same scene number appears more than once
    #[display("scene number {} is used more than once", _0)]
    Duplicate(u32),
    /// Scene numbers are 1-based
    #[display("scene number 0 is not allowed")]
    Zero,
    /// A number is missing from the 1..N range
    #[display("expected scene number {} but found {}", expected, found)]
    Gap {
        /// The next number the range required
        expected: u32,
        /// The number actually present
        found: u32,
    },
}

/// Report numbering problems without changing anything.
///
/// Scenes are never renumbered; callers decide what to do with the report.
///
/// # Examples
///
/// ```
/// use scenewright_core::{NumberingIssue, Scene, validate_numbering};
///
/// let scenes = vec![Scene::new(1, "a", "b"), Scene::new(3, "c", "d")];
/// assert_eq!(
///     validate_numbering(&scenes),
///     vec![NumberingIssue::Gap { expected: 2, found: 3 }]
/// );
/// ```
pub fn validate_numbering(scenes: &[Scene]) -> Vec<NumberingIssue> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for scene in scenes {
        *counts.entry(scene.scene_number).or_default() += 1;
    }

    let mut issues: Vec<NumberingIssue> = counts
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(number, _)| NumberingIssue::Duplicate(*number))
        .collect();

    if counts.remove(&0).is_some() {
        issues.push(NumberingIssue::Zero);
    }

    let mut expected = 1;
    for number in counts.keys() {
        if *number != expected {
            issues.push(NumberingIssue::Gap {
                expected,
                found: *number,
            });
        }
        expected = number.saturating_add(1);
    }

    issues
}
