use std::collections::HashMap;
use std::io::{self, Cursor, Read};

use crate::assets::domain::asset_source::AssetSource;

/// In-memory asset table, for embedded assets and tests.
#[derive(Default)]
pub struct MemoryAssetSource {
    assets: HashMap<String, Vec<u8>>,
}

impl MemoryAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset(mut self, name: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.assets.insert(name.into(), bytes);
        self
    }
}

impl AssetSource for MemoryAssetSource {
    fn open(&self, name: &str) -> io::Result<Box<dyn Read + Send + '_>> {
        self.assets
            .get(name)
            .map(|bytes| Box::new(Cursor::new(bytes.as_slice())) as Box<dyn Read + Send + '_>)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no asset {name}")))
    }
}
