use std::path::{Path, PathBuf};

use image::{RgbImage, RgbaImage};

use crate::shared::frame::Frame;
use crate::video::domain::frame_sink::FrameSink;

/// Writes each frame as `frame_{index:06}.png` into an output directory.
pub struct ImageFileSink {
    dir: PathBuf,
    written: usize,
}

impl ImageFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: 0,
        }
    }

    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("frame_{index:06}.png"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Reorders a frame's pixels to RGB(A) as the encoder expects.
fn to_rgb_order(frame: &Frame) -> Vec<u8> {
    let (r, g, b) = frame.order().rgb_indices();
    let channels = frame.channels() as usize;
    let mut out = Vec::with_capacity(frame.data().len());
    for px in frame.data().chunks_exact(channels) {
        out.extend_from_slice(&[px[r], px[g], px[b]]);
        if channels == 4 {
            out.push(px[3]);
        }
    }
    out
}

impl FrameSink for ImageFileSink {
    fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.frame_path(frame.index());
        let pixels = to_rgb_order(frame);

        match frame.channels() {
            3 => RgbImage::from_raw(frame.width(), frame.height(), pixels)
                .ok_or("frame buffer does not match its dimensions")?
                .save(&path)?,
            4 => RgbaImage::from_raw(frame.width(), frame.height(), pixels)
                .ok_or("frame buffer does not match its dimensions")?
                .save(&path)?,
            n => return Err(format!("unsupported channel count {n}").into()),
        }

        self.written += 1;
        Ok(())
    }

    fn written(&self) -> usize {
        self.written
    }
}

/// Accepts and discards frames; used when no output directory is given.
#[derive(Default)]
pub struct NullFrameSink {
    written: usize,
}

impl FrameSink for NullFrameSink {
    fn write(&mut self, _frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        self.written += 1;
        Ok(())
    }

    fn written(&self) -> usize {
        self.written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::frame::ChannelOrder;

    #[test]
    fn test_writes_png_named_by_index() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let mut sink = ImageFileSink::new(&out);
        let frame = Frame::new(vec![10; 4 * 3 * 3], 4, 3, 3, 7);

        sink.write(&frame).unwrap();

        let path = out.join("frame_000007.png");
        assert!(path.is_file());
        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(img.get_pixel(0, 0).0, [10, 10, 10]);
        assert_eq!(sink.written(), 1);
    }

    #[test]
    fn test_bgr_frame_is_saved_as_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = ImageFileSink::new(dir.path());
        let frame = Frame::new(vec![255, 0, 0], 1, 1, 3, 0).with_order(ChannelOrder::Bgr);

        sink.write(&frame).unwrap();

        let img = image::open(sink.frame_path(0)).unwrap().to_rgb8();
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 255]);
    }

    #[test]
    fn test_rgba_frame_keeps_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = ImageFileSink::new(dir.path());
        let frame = Frame::new(vec![1, 2, 3, 128], 1, 1, 4, 0);

        sink.write(&frame).unwrap();

        let img = image::open(sink.frame_path(0)).unwrap().to_rgba8();
        assert_eq!(img.get_pixel(0, 0).0, [1, 2, 3, 128]);
    }

    #[test]
    fn test_rewriting_same_index_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = ImageFileSink::new(dir.path());
        sink.write(&Frame::new(vec![0; 3], 1, 1, 3, 2)).unwrap();
        sink.write(&Frame::new(vec![9; 3], 1, 1, 3, 2)).unwrap();

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
        let img = image::open(sink.frame_path(2)).unwrap().to_rgb8();
        assert_eq!(img.get_pixel(0, 0).0, [9, 9, 9]);
    }

    #[test]
    fn test_null_sink_counts() {
        let mut sink = NullFrameSink::default();
        sink.write(&Frame::new(vec![0; 3], 1, 1, 3, 0)).unwrap();
        sink.write(&Frame::new(vec![0; 3], 1, 1, 3, 1)).unwrap();
        assert_eq!(sink.written(), 2);
    }
}
