use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use crate::assets::domain::asset_source::AssetSource;

/// Serves assets from a bundled directory on disk.
pub struct DirAssetSource {
    root: PathBuf,
}

impl DirAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for DirAssetSource {
    fn open(&self, name: &str) -> io::Result<Box<dyn Read + Send + '_>> {
        let path = self.root.join(name);
        if !path.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not a file", path.display()),
            ));
        }
        let file = File::open(path)?;
        Ok(Box::new(BufReader::new(file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_open_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("eye.xml"), b"eye").unwrap();
        let source = DirAssetSource::new(tmp.path());

        let mut bytes = Vec::new();
        source.open("eye.xml").unwrap().read_to_end(&mut bytes).unwrap();

        assert_eq!(bytes, b"eye");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let source = DirAssetSource::new(tmp.path());
        let err = source.open("nope.xml").err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_directory_is_not_an_asset() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        let source = DirAssetSource::new(tmp.path());
        let err = source.open("sub").err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
