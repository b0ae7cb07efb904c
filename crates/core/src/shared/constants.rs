pub const FACE_CASCADE_NAME: &str = "lbpcascade_frontalface.xml";
pub const EYE_CASCADE_NAME: &str = "haarcascade_eye.xml";
pub const FULL_BODY_CASCADE_NAME: &str = "haarcascade_fullbody.xml";
pub const UPPER_BODY_CASCADE_NAME: &str = "haarcascade_upperbody.xml";

/// Image pyramid step between detection scales.
pub const SCALE_FACTOR: f64 = 1.1;
/// Overlapping candidate windows needed to keep a detection.
pub const MIN_NEIGHBORS: i32 = 4;
/// Scale-image hint passed to the cascade backend.
pub const DETECTION_FLAGS: i32 = 2;
/// Smallest object considered, as a fraction of the frame height.
pub const MIN_OBJECT_RATIO: f64 = 0.2;

pub const STROKE_WIDTH: u32 = 3;

/// Face overlay (RGB).
pub const COLOR_PURPLE: [u8; 3] = [128, 0, 128];
/// Eye overlay (RGB).
pub const COLOR_GREEN: [u8; 3] = [0, 255, 0];
/// Body overlay (RGB).
pub const COLOR_RED: [u8; 3] = [255, 0, 0];

pub const APP_DIR_NAME: &str = "Cascade Overlay";
pub const STAGING_DIR_NAME: &str = "cascade";

pub const BACK_CAMERA_INDEX: i32 = 0;
pub const FRONT_CAMERA_INDEX: i32 = 1;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
