use std::path::Path;

use crate::detection::domain::cascade_backend::{
    CascadeBackend, CascadeLoader, ClassifierLoadError,
};

/// Loader used when no cascade backend is compiled in.
///
/// Every detector built through it is absent, so the pipeline still runs
/// and passes frames through without overlays.
pub struct UnavailableLoader;

impl CascadeLoader for UnavailableLoader {
    fn load(&self, _path: &Path) -> Result<Box<dyn CascadeBackend>, ClassifierLoadError> {
        Err(ClassifierLoadError::BackendUnavailable)
    }
}
