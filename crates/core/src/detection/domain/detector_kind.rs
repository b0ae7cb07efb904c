use std::fmt;

use crate::shared::constants::{
    EYE_CASCADE_NAME, FACE_CASCADE_NAME, FULL_BODY_CASCADE_NAME, UPPER_BODY_CASCADE_NAME,
};

/// Object classes with a bundled cascade definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DetectorKind {
    Face,
    Eye,
    FullBody,
    UpperBody,
}

impl DetectorKind {
    pub const ALL: [DetectorKind; 4] = [
        DetectorKind::Face,
        DetectorKind::Eye,
        DetectorKind::FullBody,
        DetectorKind::UpperBody,
    ];

    /// Name of the bundled classifier definition for this kind.
    pub fn asset_name(self) -> &'static str {
        match self {
            DetectorKind::Face => FACE_CASCADE_NAME,
            DetectorKind::Eye => EYE_CASCADE_NAME,
            DetectorKind::FullBody => FULL_BODY_CASCADE_NAME,
            DetectorKind::UpperBody => UPPER_BODY_CASCADE_NAME,
        }
    }
}

impl fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectorKind::Face => write!(f, "face"),
            DetectorKind::Eye => write!(f, "eye"),
            DetectorKind::FullBody => write!(f, "full body"),
            DetectorKind::UpperBody => write!(f, "upper body"),
        }
    }
}
