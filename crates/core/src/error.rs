//! Level start errors.
//!
//! Everything that can fail happens before the loop starts: loading level
//! tables and resolving their images. Per-tick logic cannot fail.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::AssetId;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset `{}` is not available", .0.as_str())]
    Missing(AssetId),
    #[error("asset `{}` has an empty size ({width}x{height})", .id.as_str())]
    Empty { id: AssetId, width: u32, height: u32 },
}

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("no definition for level {0}")]
    UnknownLevel(u32),
    #[error("failed to read level file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed level data for level {level}: {source}")]
    Parse {
        level: u32,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid level {level}: {reason}")]
    Invalid { level: u32, reason: String },
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Level(#[from] LevelError),
    #[error(transparent)]
    Asset(#[from] AssetError),
}
