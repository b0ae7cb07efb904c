use image::GrayImage;

use crate::detection::domain::cascade_backend::{CascadeBackend, DetectionParams};
use crate::detection::domain::detector_kind::DetectorKind;
use crate::shared::region::Region;

/// One object class and its loaded classifier, if loading succeeded.
///
/// A detector without a classifier is still usable: it reports no
/// detections, so a failed asset only removes that detector's overlay.
pub struct Detector {
    kind: DetectorKind,
    handle: Option<Box<dyn CascadeBackend>>,
    params: DetectionParams,
}

impl Detector {
    pub fn new(kind: DetectorKind, handle: Box<dyn CascadeBackend>) -> Self {
        Self {
            kind,
            handle: Some(handle),
            params: DetectionParams::default(),
        }
    }

    pub fn absent(kind: DetectorKind) -> Self {
        Self {
            kind,
            handle: None,
            params: DetectionParams::default(),
        }
    }

    pub fn with_params(mut self, params: DetectionParams) -> Self {
        self.params = params;
        self
    }

    pub fn kind(&self) -> DetectorKind {
        self.kind
    }

    pub fn is_available(&self) -> bool {
        self.handle.is_some()
    }

    /// Scans `image` for objects at least `min_object_size` pixels on each side.
    ///
    /// Never fails: an absent classifier or a backend error yields no regions.
    pub fn detect(&mut self, image: &GrayImage, min_object_size: u32) -> Vec<Region> {
        let Some(handle) = self.handle.as_mut() else {
            return Vec::new();
        };
        let params = self.params.with_min_size(min_object_size);
        match handle.detect(image, &params) {
            Ok(regions) => regions,
            Err(e) => {
                log::warn!("{} detection failed: {e}", self.kind);
                Vec::new()
            }
        }
    }
}
