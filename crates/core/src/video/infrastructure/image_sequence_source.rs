use std::path::{Path, PathBuf};

use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::frame_source::FrameSource;

/// Feeds still images as frames: either one file or every image in a
/// directory, ordered by file name.
///
/// Images may differ in size; the session re-signals the resolution when
/// that happens. Files that fail to decode are logged and skipped.
pub struct ImageSequenceSource {
    path: PathBuf,
    files: Vec<PathBuf>,
}

impl ImageSequenceSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            files: Vec::new(),
        }
    }
}

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn collect_images(path: &Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let entry_path = entry?.path();
        if entry_path.is_file() && is_image_file(&entry_path) {
            files.push(entry_path);
        }
    }
    files.sort();
    Ok(files)
}

fn load_frame(path: &Path, index: usize) -> Result<Frame, Box<dyn std::error::Error>> {
    let rgb = image::open(path)?.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(Frame::new(rgb.into_raw(), width, height, 3, index))
}

impl FrameSource for ImageSequenceSource {
    fn start(&mut self) -> Result<VideoMetadata, Box<dyn std::error::Error>> {
        let files = collect_images(&self.path)?;
        let (width, height) = files
            .iter()
            .find_map(|f| image::image_dimensions(f).ok())
            .ok_or_else(|| format!("No readable images found in {}", self.path.display()))?;

        let metadata = VideoMetadata {
            width,
            height,
            fps: 0.0,
            total_frames: files.len(),
            source_path: Some(self.path.clone()),
        };
        self.files = files;
        Ok(metadata)
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        Box::new(
            self.files
                .iter()
                .enumerate()
                .filter_map(|(index, path)| match load_frame(path, index) {
                    Ok(frame) => Some(Ok(frame)),
                    Err(e) => {
                        log::warn!("Skipping unreadable image {}: {e}", path.display());
                        None
                    }
                }),
        )
    }

    fn stop(&mut self) {
        self.files.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use rstest::rstest;

    fn write_image(dir: &Path, name: &str, w: u32, h: u32, value: u8) -> PathBuf {
        let path = dir.join(name);
        RgbImage::from_pixel(w, h, Rgb([value, value, value]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_single_file_is_one_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_image(dir.path(), "still.png", 8, 6, 40);

        let mut source = ImageSequenceSource::new(&path);
        let meta = source.start().unwrap();
        assert_eq!((meta.width, meta.height), (8, 6));
        assert_eq!(meta.total_frames, 1);
        assert_eq!(meta.fps, 0.0);

        let frames: Vec<Frame> = source.frames().map(|f| f.unwrap()).collect();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].channels(), 3);
        assert_eq!(frames[0].data()[0], 40);
    }

    #[test]
    fn test_directory_sorted_by_name_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        write_image(dir.path(), "b.png", 4, 4, 2);
        write_image(dir.path(), "a.png", 6, 3, 1);
        std::fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();

        let mut source = ImageSequenceSource::new(dir.path());
        let meta = source.start().unwrap();
        assert_eq!(meta.total_frames, 2);
        assert_eq!((meta.width, meta.height), (6, 3));

        let frames: Vec<Frame> = source.frames().map(|f| f.unwrap()).collect();
        assert_eq!(frames[0].index(), 0);
        assert_eq!(frames[0].data()[0], 1);
        assert_eq!((frames[1].width(), frames[1].height()), (4, 4));
        assert_eq!(frames[1].index(), 1);
    }

    #[test]
    fn test_empty_directory_fails_to_start() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = ImageSequenceSource::new(dir.path());
        assert!(source.start().is_err());
    }

    #[test]
    fn test_corrupt_image_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_image(dir.path(), "a.png", 4, 4, 10);
        std::fs::write(dir.path().join("b.png"), b"not a png").unwrap();
        write_image(dir.path(), "c.png", 4, 4, 30);

        let mut source = ImageSequenceSource::new(dir.path());
        source.start().unwrap();
        let frames: Vec<Frame> = source.frames().map(|f| f.unwrap()).collect();

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].data()[0], 10);
        assert_eq!(frames[1].data()[0], 30);
        assert_eq!(frames[1].index(), 2);
    }

    #[test]
    fn test_corrupt_first_image_does_not_block_start() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.png"), b"not a png").unwrap();
        write_image(dir.path(), "b.png", 7, 5, 0);

        let mut source = ImageSequenceSource::new(dir.path());
        let meta = source.start().unwrap();
        assert_eq!((meta.width, meta.height), (7, 5));
    }

    #[test]
    fn test_only_corrupt_images_fails_to_start() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.png"), b"not a png").unwrap();
        let mut source = ImageSequenceSource::new(dir.path());
        assert!(source.start().is_err());
    }

    #[test]
    fn test_stop_forgets_files() {
        let dir = tempfile::tempdir().unwrap();
        write_image(dir.path(), "a.png", 4, 4, 0);
        let mut source = ImageSequenceSource::new(dir.path());
        source.start().unwrap();
        assert_eq!(source.files.len(), 1);
        source.stop();
        assert_eq!(source.frames().count(), 0);
    }

    #[rstest]
    #[case::png("x.png", true)]
    #[case::upper_jpg("x.JPG", true)]
    #[case::webp("x.webp", true)]
    #[case::text("x.txt", false)]
    #[case::no_extension("x", false)]
    fn test_is_image_file(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_image_file(Path::new(name)), expected);
    }
}
