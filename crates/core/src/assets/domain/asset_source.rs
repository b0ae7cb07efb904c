use std::io::{self, Read};

/// Read-only store of named byte streams bundled with the application.
///
/// The pipeline only needs "given a name, get bytes"; packaging details
/// (directory on disk, embedded table, archive) stay behind this trait.
pub trait AssetSource: Send + Sync {
    /// Opens the named asset. A missing asset is reported as
    /// [`io::ErrorKind::NotFound`].
    fn open(&self, name: &str) -> io::Result<Box<dyn Read + Send + '_>>;
}
