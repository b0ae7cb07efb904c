use image::GrayImage;
use ndarray::{ArrayViewMut2, Axis, Zip};
use thiserror::Error;

use crate::shared::frame::Frame;

// BT.601 luma weights in 14-bit fixed point: 0.299, 0.587, 0.114.
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("frame is {frame_width}x{frame_height} but the grayscale buffer is {buffer_width}x{buffer_height}")]
pub struct SizeMismatch {
    pub frame_width: u32,
    pub frame_height: u32,
    pub buffer_width: u32,
    pub buffer_height: u32,
}

/// Reusable single-channel image sized to the current source resolution.
///
/// Allocated once per resolution and refilled for every frame. Detectors
/// only ever borrow it immutably.
pub struct GrayscaleBuffer {
    image: GrayImage,
}

impl GrayscaleBuffer {
    pub fn allocate(width: u32, height: u32) -> Self {
        Self {
            image: GrayImage::new(width, height),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    /// Overwrites the buffer with the luma of `frame`.
    pub fn fill_from(&mut self, frame: &Frame) -> Result<(), SizeMismatch> {
        let (width, height) = self.image.dimensions();
        if frame.width() != width || frame.height() != height {
            return Err(SizeMismatch {
                frame_width: frame.width(),
                frame_height: frame.height(),
                buffer_width: width,
                buffer_height: height,
            });
        }

        let (r, g, b) = frame.order().rgb_indices();
        let src = frame.as_ndarray();
        let dst = ArrayViewMut2::from_shape((height as usize, width as usize), &mut *self.image)
            .expect("grayscale buffer length must match its dimensions");

        Zip::from(dst)
            .and(src.lanes(Axis(2)))
            .for_each(|gray, px| *gray = luma(px[r], px[g], px[b]));
        Ok(())
    }
}

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    let sum = r as u32 * LUMA_R + g as u32 * LUMA_G + b as u32 * LUMA_B;
    ((sum + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}
