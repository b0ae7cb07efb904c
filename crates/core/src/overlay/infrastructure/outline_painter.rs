use image::Rgba;
use imageproc::drawing::{draw_hollow_rect_mut, Canvas};
use imageproc::rect::Rect;

use crate::overlay::domain::mode::OverlayColor;
use crate::overlay::domain::region_painter::RegionPainter;
use crate::shared::constants::STROKE_WIDTH;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Draws unfilled rectangles around regions.
///
/// The outline runs from the top-left corner to the bottom-right corner
/// `(x + width, y + height)` inclusive, and the stroke is centred on it:
/// with width 3 it covers one pixel either side of that line.
pub struct OutlinePainter {
    stroke_width: u32,
}

impl OutlinePainter {
    pub fn new(stroke_width: u32) -> Self {
        Self {
            stroke_width: stroke_width.max(1),
        }
    }
}

impl Default for OutlinePainter {
    fn default() -> Self {
        Self::new(STROKE_WIDTH)
    }
}

impl RegionPainter for OutlinePainter {
    fn paint(
        &self,
        frame: &mut Frame,
        regions: &[Region],
        color: OverlayColor,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let channels = frame.channels();
        if channels != 3 && channels != 4 {
            return Err(format!("cannot draw on a {channels}-channel frame").into());
        }

        let pixel = Rgba(color.to_pixel(frame.order()));
        let mut canvas = FrameCanvas { frame };
        for region in regions {
            for ring in stroke_rings(region, self.stroke_width) {
                draw_hollow_rect_mut(&mut canvas, ring, pixel);
            }
        }
        Ok(())
    }
}

/// Lets imageproc draw straight into a frame's interleaved buffer,
/// whatever its channel count. Pixels are already in frame channel order.
struct FrameCanvas<'a> {
    frame: &'a mut Frame,
}

impl FrameCanvas<'_> {
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.frame.width() as usize + x as usize) * self.frame.channels() as usize
    }
}

impl Canvas for FrameCanvas<'_> {
    type Pixel = Rgba<u8>;

    fn dimensions(&self) -> (u32, u32) {
        (self.frame.width(), self.frame.height())
    }

    fn get_pixel(&self, x: u32, y: u32) -> Self::Pixel {
        let offset = self.offset(x, y);
        let channels = self.frame.channels() as usize;
        let mut px = [0, 0, 0, 255];
        px[..channels].copy_from_slice(&self.frame.data()[offset..offset + channels]);
        Rgba(px)
    }

    fn draw_pixel(&mut self, x: u32, y: u32, color: Self::Pixel) {
        let offset = self.offset(x, y);
        let channels = self.frame.channels() as usize;
        self.frame.data_mut()[offset..offset + channels].copy_from_slice(&color.0[..channels]);
    }
}

/// Concentric one-pixel rectangles making up a stroke, outermost first.
/// Empty regions have no outline.
fn stroke_rings(region: &Region, stroke_width: u32) -> Vec<Rect> {
    if region.is_empty() {
        return Vec::new();
    }
    let edge = Region::new(region.x, region.y, region.width + 1, region.height + 1);
    let outer = (stroke_width as i32 - 1) / 2;
    (0..stroke_width as i32)
        .map(|i| edge.inflate(outer - i))
        .filter(|r| !r.is_empty())
        .map(|r| Rect::at(r.x, r.y).of_size(r.width as u32, r.height as u32))
        .collect()
}
