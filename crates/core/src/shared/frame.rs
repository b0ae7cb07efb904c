use ndarray::ArrayView3;

/// Order of the colour channels in a [`Frame`].
///
/// A fourth channel, when present, is always alpha.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Bgr,
}

impl ChannelOrder {
    /// Index of the (red, green, blue) samples within one pixel.
    pub fn rgb_indices(self) -> (usize, usize, usize) {
        match self {
            ChannelOrder::Rgb => (0, 1, 2),
            ChannelOrder::Bgr => (2, 1, 0),
        }
    }
}

/// A single video/camera frame: contiguous interleaved 8-bit pixels in
/// row-major order, 3 (colour) or 4 (colour + alpha) channels.
///
/// Frames are borrowed by the processor for one call; it may draw on them
/// in place but never changes their size or layout.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    order: ChannelOrder,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        debug_assert!(
            channels == 3 || channels == 4,
            "frames carry 3 or 4 channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            order: ChannelOrder::Rgb,
            index,
        }
    }

    pub fn with_order(mut self, order: ChannelOrder) -> Self {
        self.order = order;
        self
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn order(&self) -> ChannelOrder {
        self.order
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 3, 5);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.order(), ChannelOrder::Rgb);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    fn test_with_order_sets_bgr() {
        let frame = Frame::new(vec![0u8; 12], 2, 2, 3, 0).with_order(ChannelOrder::Bgr);
        assert_eq!(frame.order(), ChannelOrder::Bgr);
    }

    #[test]
    fn test_rgb_indices() {
        assert_eq!(ChannelOrder::Rgb.rgb_indices(), (0, 1, 2));
        assert_eq!(ChannelOrder::Bgr.rgb_indices(), (2, 1, 0));
    }

    #[test]
    fn test_data_mut_allows_modification() {
        let data = vec![0u8; 8]; // 2x1x4
        let mut frame = Frame::new(data, 2, 1, 4, 0);
        frame.data_mut()[0] = 255;
        assert_eq!(frame.data()[0], 255);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        let data = vec![0u8; 10]; // wrong size for 2x2x3
        Frame::new(data, 2, 2, 3, 0);
    }

    #[test]
    fn test_as_ndarray_shape() {
        let data = vec![0u8; 32]; // 2x4x4
        let frame = Frame::new(data, 4, 2, 4, 0);
        let arr = frame.as_ndarray();
        assert_eq!(arr.shape(), &[2, 4, 4]); // (height, width, channels)
    }
}
