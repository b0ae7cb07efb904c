use image::GrayImage;
use rayon::prelude::*;

use crate::assets::domain::asset_stager::AssetStager;
use crate::detection::domain::cascade_backend::CascadeLoader;
use crate::detection::domain::detector::Detector;
use crate::detection::domain::detector_kind::DetectorKind;
use crate::shared::region::Region;

/// Detections of one detector within a frame.
pub type KindRegions = (DetectorKind, Vec<Region>);

/// Owns one [`Detector`] per object class.
///
/// Built once before any frame is processed and then handed to the frame
/// processor; loading failures leave absent detectors instead of errors.
pub struct DetectorBank {
    detectors: Vec<Detector>,
}

impl DetectorBank {
    /// Stages and loads every [`DetectorKind`], in order, before returning.
    pub fn load_all(stager: &AssetStager, loader: &dyn CascadeLoader) -> Self {
        let detectors = DetectorKind::ALL
            .iter()
            .map(|&kind| Self::load(kind, stager, loader))
            .collect();
        let bank = Self { detectors };
        log::info!(
            "Loaded {}/{} detectors",
            bank.available_count(),
            DetectorKind::ALL.len()
        );
        bank
    }

    /// Stages the asset for `kind` and builds its classifier.
    ///
    /// Any failure is logged and produces an absent detector.
    pub fn load(kind: DetectorKind, stager: &AssetStager, loader: &dyn CascadeLoader) -> Detector {
        let path = match stager.stage(kind.asset_name()) {
            Ok(path) => path,
            Err(e) => {
                log::warn!("No {kind} detector: {e}");
                return Detector::absent(kind);
            }
        };
        match loader.load(&path) {
            Ok(handle) => {
                log::debug!("Loaded {kind} classifier from {}", path.display());
                Detector::new(kind, handle)
            }
            Err(e) => {
                log::warn!("No {kind} detector: {e}");
                Detector::absent(kind)
            }
        }
    }

    pub fn from_detectors(detectors: Vec<Detector>) -> Self {
        Self { detectors }
    }

    pub fn is_available(&self, kind: DetectorKind) -> bool {
        self.detectors
            .iter()
            .any(|d| d.kind() == kind && d.is_available())
    }

    pub fn available_count(&self) -> usize {
        self.detectors.iter().filter(|d| d.is_available()).count()
    }

    /// Runs the detector for `kind`; unknown or absent kinds yield nothing.
    pub fn detect(&mut self, kind: DetectorKind, image: &GrayImage, min_object_size: u32) -> Vec<Region> {
        self.detectors
            .iter_mut()
            .find(|d| d.kind() == kind)
            .map(|d| d.detect(image, min_object_size))
            .unwrap_or_default()
    }

    /// Runs several detectors over the same image and returns their results
    /// in the order of `kinds`.
    ///
    /// With `parallel`, detectors run concurrently on the rayon pool. Each
    /// only reads `image`.
    pub fn detect_many(
        &mut self,
        kinds: &[DetectorKind],
        image: &GrayImage,
        min_object_size: u32,
        parallel: bool,
    ) -> Vec<KindRegions> {
        let mut found: Vec<KindRegions> = if parallel && kinds.len() > 1 {
            self.detectors
                .par_iter_mut()
                .filter(|d| kinds.contains(&d.kind()))
                .map(|d| (d.kind(), d.detect(image, min_object_size)))
                .collect()
        } else {
            self.detectors
                .iter_mut()
                .filter(|d| kinds.contains(&d.kind()))
                .map(|d| (d.kind(), d.detect(image, min_object_size)))
                .collect()
        };

        kinds
            .iter()
            .map(|&kind| match found.iter().position(|(k, _)| *k == kind) {
                Some(pos) => found.swap_remove(pos),
                None => (kind, Vec::new()),
            })
            .collect()
    }
}
