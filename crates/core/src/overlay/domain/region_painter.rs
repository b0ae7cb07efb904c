use crate::overlay::domain::mode::OverlayColor;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Drawing primitive that marks detected regions on a frame in place.
///
/// Implementations own clipping: regions may lie partly or wholly outside
/// the frame, and degenerate regions must be ignored rather than rejected.
pub trait RegionPainter: Send {
    fn paint(
        &self,
        frame: &mut Frame,
        regions: &[Region],
        color: OverlayColor,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
