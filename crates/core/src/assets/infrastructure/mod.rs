pub mod dir_asset_source;
pub mod memory_asset_source;
pub mod staging_dir;
