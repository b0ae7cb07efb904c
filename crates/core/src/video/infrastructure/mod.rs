pub mod ffmpeg_source;
pub mod image_file_sink;
pub mod image_sequence_source;
#[cfg(feature = "opencv")]
pub mod opencv_camera_source;
