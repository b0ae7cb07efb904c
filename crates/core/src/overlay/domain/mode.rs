use std::fmt;

use crate::detection::domain::detector_kind::DetectorKind;
use crate::shared::constants::{COLOR_GREEN, COLOR_PURPLE, COLOR_RED};
use crate::shared::frame::ChannelOrder;

/// Opaque overlay colour, stored as RGB.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl OverlayColor {
    pub const PURPLE: OverlayColor = OverlayColor::from_rgb(COLOR_PURPLE);
    pub const GREEN: OverlayColor = OverlayColor::from_rgb(COLOR_GREEN);
    pub const RED: OverlayColor = OverlayColor::from_rgb(COLOR_RED);

    pub const fn from_rgb(rgb: [u8; 3]) -> Self {
        Self {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
        }
    }

    /// Pixel value in a frame's channel layout; alpha is fully opaque.
    pub fn to_pixel(self, order: ChannelOrder) -> [u8; 4] {
        match order {
            ChannelOrder::Rgb => [self.r, self.g, self.b, 255],
            ChannelOrder::Bgr => [self.b, self.g, self.r, 255],
        }
    }
}

/// One detector drawn in one colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayLayer {
    pub detector: DetectorKind,
    pub color: OverlayColor,
}

const FACE_ONLY: &[OverlayLayer] = &[OverlayLayer {
    detector: DetectorKind::Face,
    color: OverlayColor::PURPLE,
}];

const FACE_AND_EYES: &[OverlayLayer] = &[
    OverlayLayer {
        detector: DetectorKind::Face,
        color: OverlayColor::PURPLE,
    },
    OverlayLayer {
        detector: DetectorKind::Eye,
        color: OverlayColor::GREEN,
    },
];

const FULL_BODY: &[OverlayLayer] = &[OverlayLayer {
    detector: DetectorKind::FullBody,
    color: OverlayColor::RED,
}];

const UPPER_BODY: &[OverlayLayer] = &[OverlayLayer {
    detector: DetectorKind::UpperBody,
    color: OverlayColor::RED,
}];

/// Which detectors are active for a frame, and in which colours.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    FaceOnly,
    FaceAndEyes,
    FullBody,
    UpperBody,
}

impl Mode {
    pub const ALL: [Mode; 4] = [
        Mode::FaceOnly,
        Mode::FaceAndEyes,
        Mode::FullBody,
        Mode::UpperBody,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn index(self) -> usize {
        match self {
            Mode::FaceOnly => 0,
            Mode::FaceAndEyes => 1,
            Mode::FullBody => 2,
            Mode::UpperBody => 3,
        }
    }

    /// Mode at position `index`, wrapping around the cycle.
    pub fn from_index(index: usize) -> Mode {
        Self::ALL[index % Self::COUNT]
    }

    pub fn next(self) -> Mode {
        Self::from_index(self.index() + 1)
    }

    /// Layers in draw order.
    pub fn layers(self) -> &'static [OverlayLayer] {
        match self {
            Mode::FaceOnly => FACE_ONLY,
            Mode::FaceAndEyes => FACE_AND_EYES,
            Mode::FullBody => FULL_BODY,
            Mode::UpperBody => UPPER_BODY,
        }
    }

    pub fn detectors(self) -> Vec<DetectorKind> {
        self.layers().iter().map(|l| l.detector).collect()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::FaceOnly => write!(f, "face"),
            Mode::FaceAndEyes => write!(f, "face + eyes"),
            Mode::FullBody => write!(f, "full body"),
            Mode::UpperBody => write!(f, "upper body"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::face_only(Mode::FaceOnly, Mode::FaceAndEyes)]
    #[case::face_and_eyes(Mode::FaceAndEyes, Mode::FullBody)]
    #[case::full_body(Mode::FullBody, Mode::UpperBody)]
    #[case::wraps(Mode::UpperBody, Mode::FaceOnly)]
    fn test_next(#[case] mode: Mode, #[case] expected: Mode) {
        assert_eq!(mode.next(), expected);
    }

    #[test]
    fn test_index_round_trip_and_wrap() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_index(mode.index()), mode);
            assert_eq!(Mode::from_index(mode.index() + 4), mode);
        }
    }

    #[test]
    fn test_face_and_eyes_draws_face_first() {
        let layers = Mode::FaceAndEyes.layers();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].detector, DetectorKind::Face);
        assert_eq!(layers[0].color, OverlayColor::PURPLE);
        assert_eq!(layers[1].detector, DetectorKind::Eye);
        assert_eq!(layers[1].color, OverlayColor::GREEN);
    }

    #[test]
    fn test_body_modes_share_colour() {
        assert_eq!(Mode::FullBody.layers()[0].color, OverlayColor::RED);
        assert_eq!(Mode::UpperBody.layers()[0].color, OverlayColor::RED);
        assert_eq!(Mode::FullBody.detectors(), vec![DetectorKind::FullBody]);
        assert_eq!(Mode::UpperBody.detectors(), vec![DetectorKind::UpperBody]);
    }

    #[test]
    fn test_to_pixel_respects_channel_order() {
        let c = OverlayColor::from_rgb([1, 2, 3]);
        assert_eq!(c.to_pixel(ChannelOrder::Rgb), [1, 2, 3, 255]);
        assert_eq!(c.to_pixel(ChannelOrder::Bgr), [3, 2, 1, 255]);
    }

    #[test]
    fn test_default_is_face_only() {
        assert_eq!(Mode::default(), Mode::FaceOnly);
    }
}
