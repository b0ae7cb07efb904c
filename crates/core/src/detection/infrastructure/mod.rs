#[cfg(feature = "opencv")]
pub mod opencv_cascade;
pub mod unavailable_loader;

use crate::detection::domain::cascade_backend::CascadeLoader;

/// The best cascade loader compiled into this build.
pub fn default_loader() -> Box<dyn CascadeLoader> {
    #[cfg(feature = "opencv")]
    {
        Box::new(opencv_cascade::OpenCvCascadeLoader)
    }
    #[cfg(not(feature = "opencv"))]
    {
        Box::new(unavailable_loader::UnavailableLoader)
    }
}
