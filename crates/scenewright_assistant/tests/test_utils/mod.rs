//! Test utilities for scenewright_assistant tests.
//!
//! This module provides mock implementations and test helpers.

#![allow(dead_code)]

use scenewright_core::Scene;

pub mod mock_driver;
pub mod mock_thumbnails;

pub use mock_driver::{MockDriver, MockResponse};
pub use mock_thumbnails::MockThumbnails;

/// Scenes numbered 1..=n with distinct text.
pub fn numbered_scenes(n: u32) -> Vec<Scene> {
    (1..=n)
        .map(|i| Scene::new(i, format!("Scene {} visual", i), format!("Scene {} narration", i)))
        .collect()
}
