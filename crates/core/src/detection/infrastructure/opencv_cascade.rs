use std::path::Path;

use image::GrayImage;
use opencv::core::{Mat, Rect, Size, Vector};
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;

use crate::detection::domain::cascade_backend::{
    CascadeBackend, CascadeLoader, ClassifierLoadError, DetectionParams,
};
use crate::shared::region::Region;

/// Haar/LBP cascade evaluated by OpenCV's `CascadeClassifier`.
pub struct OpenCvCascade {
    classifier: CascadeClassifier,
}

impl CascadeBackend for OpenCvCascade {
    fn detect(
        &mut self,
        image: &GrayImage,
        params: &DetectionParams,
    ) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Ok(Vec::new());
        }

        // Borrows the grayscale buffer; no copy.
        let mat = Mat::new_rows_cols_with_data(height as i32, width as i32, image.as_raw().as_slice())?;

        let min_size = Size::new(params.min_size.0 as i32, params.min_size.1 as i32);
        let max_size = params
            .max_size
            .map(|(w, h)| Size::new(w as i32, h as i32))
            .unwrap_or_default();

        let mut objects = Vector::<Rect>::new();
        self.classifier.detect_multi_scale(
            &*mat,
            &mut objects,
            params.scale_factor,
            params.min_neighbors,
            params.flags,
            min_size,
            max_size,
        )?;

        Ok(objects
            .iter()
            .map(|r| Region::new(r.x, r.y, r.width, r.height))
            .collect())
    }
}

/// Loads staged cascade XML files with OpenCV.
pub struct OpenCvCascadeLoader;

impl CascadeLoader for OpenCvCascadeLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn CascadeBackend>, ClassifierLoadError> {
        if !path.is_file() {
            return Err(ClassifierLoadError::NotFound(path.to_path_buf()));
        }
        let rejected = |reason: String| ClassifierLoadError::Rejected {
            path: path.to_path_buf(),
            reason,
        };

        let path_str = path
            .to_str()
            .ok_or_else(|| rejected("path is not valid UTF-8".to_string()))?;
        let classifier = CascadeClassifier::new(path_str).map_err(|e| rejected(e.to_string()))?;
        if classifier.empty().map_err(|e| rejected(e.to_string()))? {
            return Err(rejected("file is not a cascade definition".to_string()));
        }

        Ok(Box::new(OpenCvCascade { classifier }))
    }
}
