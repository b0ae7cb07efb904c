use std::path::PathBuf;

/// Properties of a frame source, reported once when it starts.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    /// 0 when unknown (live cameras, some containers).
    pub total_frames: usize,
    pub source_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction() {
        let meta = VideoMetadata {
            width: 1920,
            height: 1080,
            fps: 30.0,
            total_frames: 900,
            source_path: Some(PathBuf::from("/tmp/test.mp4")),
        };
        assert_eq!(meta.width, 1920);
        assert_eq!(meta.height, 1080);
        assert_eq!(meta.fps, 30.0);
        assert_eq!(meta.total_frames, 900);
        assert_eq!(meta.source_path, Some(PathBuf::from("/tmp/test.mp4")));
    }

    #[test]
    fn test_camera_metadata_has_unknown_length() {
        let meta = VideoMetadata {
            width: 640,
            height: 480,
            fps: 30.0,
            total_frames: 0,
            source_path: None,
        };
        let cloned = meta.clone();
        assert_eq!(meta, cloned);
        assert_eq!(cloned.total_frames, 0);
    }
}
