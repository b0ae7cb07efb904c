use crate::shared::frame::Frame;

/// Receives annotated frames after processing.
pub trait FrameSink: Send {
    fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Number of frames accepted so far.
    fn written(&self) -> usize;
}
