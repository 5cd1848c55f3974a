//! Reading and writing scripts and media on disk.

use scenewright_core::{AnchorImage, MediaBlob, Script};
use scenewright_error::{JsonError, ScenewrightResult, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Load a script from a JSON file.
///
/// # Errors
///
/// Returns a storage error if the file cannot be read, or a JSON error if
/// it is not a script.
pub fn load_script(path: &Path) -> ScenewrightResult<Script> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        StorageError::new(StorageErrorKind::FileRead(format!("{}: {}", path.display(), e)))
    })?;
    let script: Script = serde_json::from_str(&content)
        .map_err(|e| JsonError::new(format!("{}: {}", path.display(), e)))?;

    debug!(path = %path.display(), scenes = script.scenes.len(), "Loaded script");
    Ok(script)
}

/// Write a script as pretty-printed JSON.
///
/// Media blobs are not part of the JSON; the thumbnail is written separately
/// by [`write_thumbnail`].
pub fn save_script(script: &Script, path: &Path) -> ScenewrightResult<()> {
    let json = serde_json::to_string_pretty(script).map_err(|e| JsonError::new(e.to_string()))?;
    std::fs::write(path, json).map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!("{}: {}", path.display(), e)))
    })?;

    info!(path = %path.display(), scenes = script.scenes.len(), "Saved script");
    Ok(())
}

/// MIME type of an image file, from its extension.
pub fn image_mime(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

/// Load an image file to use as an anchor.
pub fn load_anchor(path: &Path) -> ScenewrightResult<AnchorImage> {
    let mime = image_mime(path).ok_or_else(|| {
        StorageError::new(StorageErrorKind::UnsupportedMedia(path.display().to_string()))
    })?;
    let data = std::fs::read(path).map_err(|e| {
        StorageError::new(StorageErrorKind::FileRead(format!("{}: {}", path.display(), e)))
    })?;
    Ok(AnchorImage::new(mime, data))
}

/// Where the thumbnail for a script file goes: `<stem>.thumbnail.<ext>` beside it.
pub fn thumbnail_path(script_path: &Path, image: &MediaBlob) -> PathBuf {
    let extension = match image.mime.as_str() {
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        _ => "png",
    };
    let stem = script_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("script");
    script_path.with_file_name(format!("{}.thumbnail.{}", stem, extension))
}

/// Write a thumbnail beside its script and return the path written.
pub fn write_thumbnail(script_path: &Path, image: &MediaBlob) -> ScenewrightResult<PathBuf> {
    let path = thumbnail_path(script_path, image);
    std::fs::write(&path, &image.data).map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!("{}: {}", path.display(), e)))
    })?;

    info!(path = %path.display(), bytes = image.data.len(), "Saved thumbnail");
    Ok(path)
}
