//! Anchor images supplied by the user as visual references.

use crate::{Input, MediaSource};

/// Number of anchor image slots.
pub const MAX_ANCHOR_IMAGES: usize = 3;

/// One reference image. Passed to the model untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorImage {
    /// MIME type, e.g. "image/jpeg"
    pub mime: String,
    /// Raw image bytes
    pub data: Vec<u8>,
}

impl AnchorImage {
    /// Create an anchor image.
    pub fn new(mime: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            data,
        }
    }

    /// Convert into a chat content part.
    pub fn to_input(&self) -> Input {
        Input::Image {
            mime: Some(self.mime.clone()),
            source: MediaSource::Binary(self.data.clone()),
        }
    }
}

/// The three positional anchor slots. Empty slots are allowed anywhere.
///
/// # Examples
///
/// ```
/// use scenewright_core::{AnchorImage, AnchorImages};
///
/// let mut anchors = AnchorImages::default();
/// assert!(!anchors.any_present());
///
/// anchors.set(2, AnchorImage::new("image/png", vec![1]));
/// assert_eq!(anchors.present().count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorImages {
    slots: [Option<AnchorImage>; MAX_ANCHOR_IMAGES],
}

impl AnchorImages {
    /// Fill a slot. Indices outside `0..MAX_ANCHOR_IMAGES` are ignored.
    pub fn set(&mut self, slot: usize, image: AnchorImage) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = Some(image);
        } else {
            tracing::warn!(slot, "Ignoring anchor image for nonexistent slot");
        }
    }

    /// Empty a slot.
    pub fn clear(&mut self, slot: usize) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = None;
        }
    }

    /// Present images in slot order, skipping empty slots.
    pub fn present(&self) -> impl Iterator<Item = &AnchorImage> {
        self.slots.iter().flatten()
    }

    /// Whether at least one slot is filled.
    pub fn any_present(&self) -> bool {
        self.slots.iter().any(Option::is_some)
    }
}

impl FromIterator<AnchorImage> for AnchorImages {
    fn from_iter<I: IntoIterator<Item = AnchorImage>>(iter: I) -> Self {
        let mut anchors = Self::default();
        for (slot, image) in iter.into_iter().enumerate() {
            anchors.set(slot, image);
        }
        anchors
    }
}
