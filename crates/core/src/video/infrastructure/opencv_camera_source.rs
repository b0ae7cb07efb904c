use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};

use crate::shared::constants::{BACK_CAMERA_INDEX, FRONT_CAMERA_INDEX};
use crate::shared::frame::{ChannelOrder, Frame};
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::frame_source::FrameSource;

/// Which physical camera to open when no explicit index is given.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraFacing {
    Front,
    Back,
}

impl CameraFacing {
    pub fn device_index(self) -> i32 {
        match self {
            CameraFacing::Front => FRONT_CAMERA_INDEX,
            CameraFacing::Back => BACK_CAMERA_INDEX,
        }
    }
}

/// Live camera frames through OpenCV's `VideoCapture`. Frames are BGR.
///
/// The stream is open-ended unless `max_frames` is set; the session's
/// cancellation flag is the usual way to end it.
pub struct OpenCvCameraSource {
    device_index: i32,
    max_frames: Option<usize>,
    capture: Option<VideoCapture>,
}

impl OpenCvCameraSource {
    pub fn new(device_index: i32) -> Self {
        Self {
            device_index,
            max_frames: None,
            capture: None,
        }
    }

    pub fn facing(facing: CameraFacing) -> Self {
        Self::new(facing.device_index())
    }

    pub fn with_max_frames(mut self, max_frames: usize) -> Self {
        self.max_frames = Some(max_frames);
        self
    }
}

fn mat_to_frame(mat: &Mat, index: usize) -> Result<Frame, Box<dyn std::error::Error>> {
    let channels = mat.channels();
    if channels != 3 && channels != 4 {
        return Err(format!("camera delivered {channels}-channel frames").into());
    }
    let data = if mat.is_continuous() {
        mat.data_bytes()?.to_vec()
    } else {
        mat.try_clone()?.data_bytes()?.to_vec()
    };
    Ok(Frame::new(data, mat.cols() as u32, mat.rows() as u32, channels as u8, index)
        .with_order(ChannelOrder::Bgr))
}

impl FrameSource for OpenCvCameraSource {
    fn start(&mut self) -> Result<VideoMetadata, Box<dyn std::error::Error>> {
        let capture = VideoCapture::new(self.device_index, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            return Err(format!("Camera {} could not be opened", self.device_index).into());
        }

        let metadata = VideoMetadata {
            width: capture.get(videoio::CAP_PROP_FRAME_WIDTH)? as u32,
            height: capture.get(videoio::CAP_PROP_FRAME_HEIGHT)? as u32,
            fps: capture.get(videoio::CAP_PROP_FPS)?,
            total_frames: self.max_frames.unwrap_or(0),
            source_path: None,
        };
        self.capture = Some(capture);
        Ok(metadata)
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        let Some(capture) = self.capture.as_mut() else {
            return Box::new(std::iter::once(Err("OpenCvCameraSource: not started".into())));
        };
        let limit = self.max_frames.unwrap_or(usize::MAX);

        Box::new((0..limit).map_while(move |index| {
            let mut mat = Mat::default();
            match capture.read(&mut mat) {
                Ok(true) if !mat.empty() => Some(mat_to_frame(&mat, index)),
                Ok(_) => None,
                Err(e) => Some(Err(Box::new(e) as Box<dyn std::error::Error>)),
            }
        }))
    }

    fn stop(&mut self) {
        if let Some(mut capture) = self.capture.take() {
            if let Err(e) = capture.release() {
                log::warn!("Failed to release camera {}: {e}", self.device_index);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_maps_to_device_index() {
        assert_eq!(CameraFacing::Back.device_index(), 0);
        assert_eq!(CameraFacing::Front.device_index(), 1);
    }

    #[test]
    fn test_frames_before_start_yields_error() {
        let mut source = OpenCvCameraSource::new(0);
        let results: Vec<_> = source.frames().collect();
        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
    }

    #[test]
    fn test_mat_to_frame_copies_bgr_pixels() {
        let mat = Mat::new_rows_cols_with_default(
            2,
            3,
            opencv::core::CV_8UC3,
            opencv::core::Scalar::new(1.0, 2.0, 3.0, 0.0),
        )
        .unwrap();
        let frame = mat_to_frame(&mat, 5).unwrap();
        assert_eq!((frame.width(), frame.height()), (3, 2));
        assert_eq!(frame.order(), ChannelOrder::Bgr);
        assert_eq!(&frame.data()[..3], &[1, 2, 3]);
        assert_eq!(frame.index(), 5);
    }
}
