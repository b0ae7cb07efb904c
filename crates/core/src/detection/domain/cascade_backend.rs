use std::path::{Path, PathBuf};

use image::GrayImage;
use thiserror::Error;

use crate::shared::constants::{DETECTION_FLAGS, MIN_NEIGHBORS, SCALE_FACTOR};
use crate::shared::region::Region;

/// Tuning parameters for one multi-scale cascade scan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectionParams {
    pub scale_factor: f64,
    pub min_neighbors: i32,
    pub flags: i32,
    /// Smallest object size considered, `(width, height)`.
    pub min_size: (u32, u32),
    /// Largest object size considered; `None` means unbounded.
    pub max_size: Option<(u32, u32)>,
}

impl DetectionParams {
    /// Copy of these parameters with a square minimum object size.
    pub fn with_min_size(self, side: u32) -> Self {
        Self {
            min_size: (side, side),
            ..self
        }
    }
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            scale_factor: SCALE_FACTOR,
            min_neighbors: MIN_NEIGHBORS,
            flags: DETECTION_FLAGS,
            min_size: (0, 0),
            max_size: None,
        }
    }
}

/// A loaded classifier capable of scanning a grayscale image.
///
/// This is the seam to the external cascade-matching capability; any
/// backend (cascade, learned model, test stub) that maps an image to
/// rectangles satisfies it. `&mut self` because native backends keep
/// scratch state between calls.
pub trait CascadeBackend: Send {
    fn detect(
        &mut self,
        image: &GrayImage,
        params: &DetectionParams,
    ) -> Result<Vec<Region>, Box<dyn std::error::Error>>;
}

#[derive(Error, Debug)]
pub enum ClassifierLoadError {
    #[error("classifier file not found: {0}")]
    NotFound(PathBuf),
    #[error("classifier at {path} could not be loaded: {reason}")]
    Rejected { path: PathBuf, reason: String },
    #[error("no cascade backend is compiled in (enable the `opencv` feature)")]
    BackendUnavailable,
}

/// Builds a [`CascadeBackend`] from a staged definition file.
pub trait CascadeLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<Box<dyn CascadeBackend>, ClassifierLoadError>;
}
