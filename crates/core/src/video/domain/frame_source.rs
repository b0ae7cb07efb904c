use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;

/// Yields frames from a camera, video file or image sequence.
///
/// Implementations handle device and codec details while the session
/// works with the abstract `Frame` and `VideoMetadata` types.
pub trait FrameSource: Send {
    /// Opens the underlying device or file and returns its properties.
    fn start(&mut self) -> Result<VideoMetadata, Box<dyn std::error::Error>>;

    /// Returns an iterator over frames in delivery order.
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>;

    /// Releases the device or file.
    fn stop(&mut self);
}
