use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::assets::domain::asset_source::AssetSource;

const COPY_CHUNK_SIZE: usize = 4096;

#[derive(Error, Debug)]
pub enum AssetStageError {
    #[error("asset not found: {name}")]
    MissingAsset { name: String },
    #[error("failed to read asset {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to create staging directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write staged asset to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Copies bundled assets into a writable directory so that libraries which
/// only accept file paths can open them.
///
/// Staging the same name again overwrites the previous copy; the file is
/// written to a `.part` sibling first and renamed into place, so a failed
/// copy never leaves a truncated asset behind.
pub struct AssetStager {
    source: Box<dyn AssetSource>,
    staging_dir: PathBuf,
}

impl AssetStager {
    pub fn new(source: Box<dyn AssetSource>, staging_dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            staging_dir: staging_dir.into(),
        }
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Stages `name` and returns the path of the writable copy.
    pub fn stage(&self, name: &str) -> Result<PathBuf, AssetStageError> {
        if !is_plain_file_name(name) {
            return Err(AssetStageError::MissingAsset {
                name: name.to_string(),
            });
        }

        log::debug!("Staging {name} into {}", self.staging_dir.display());
        fs::create_dir_all(&self.staging_dir).map_err(|e| AssetStageError::CreateDir {
            path: self.staging_dir.clone(),
            source: e,
        })?;

        let mut reader = self.source.open(name).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                AssetStageError::MissingAsset {
                    name: name.to_string(),
                }
            } else {
                AssetStageError::Read {
                    name: name.to_string(),
                    source: e,
                }
            }
        })?;

        let dest = self.staging_dir.join(name);
        let temp_path = self.staging_dir.join(format!("{name}.part"));

        if let Err(e) = copy_to_file(name, &mut reader, &temp_path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        fs::rename(&temp_path, &dest).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            AssetStageError::Write {
                path: dest.clone(),
                source: e,
            }
        })?;

        Ok(dest)
    }
}

fn copy_to_file(
    name: &str,
    reader: &mut dyn Read,
    path: &Path,
) -> Result<u64, AssetStageError> {
    let write_err = |e: io::Error| AssetStageError::Write {
        path: path.to_path_buf(),
        source: e,
    };

    let mut file = File::create(path).map_err(write_err)?;
    let mut buffer = [0u8; COPY_CHUNK_SIZE];
    let mut copied: u64 = 0;

    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(AssetStageError::Read {
                    name: name.to_string(),
                    source: e,
                })
            }
        };
        file.write_all(&buffer[..n]).map_err(write_err)?;
        copied += n as u64;
    }

    file.flush().map_err(write_err)?;
    Ok(copied)
}

/// Asset names are bare file names; anything that could escape the staging
/// directory is treated as unknown.
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
}
