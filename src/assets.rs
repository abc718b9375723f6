//! Storage for uploaded listing images.
//!
//! Handlers only see [`AssetStore`]; a hosted provider can replace
//! [`LocalAssetStore`] without touching the upload route.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::{AppError, Result};

/// Public path prefix that stored files are served under.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Image types accepted for upload and the extension each is stored under.
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
];

/// Where a stored asset can be fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAsset {
    pub secure_url: String,
}

pub trait AssetStore: Send + Sync {
    /// Persist `bytes` under a fresh name ending in `extension`.
    fn store(&self, extension: &str, bytes: &[u8]) -> Result<StoredAsset>;
}

/// Stored extension for an accepted image content type, ignoring parameters
/// and case. `None` for anything outside the allow list.
pub fn image_extension(content_type: &str) -> Option<&'static str> {
    let essence = content_type.split(';').next()?.trim();
    IMAGE_TYPES
        .iter()
        .find(|(mime, _)| mime.eq_ignore_ascii_case(essence))
        .map(|(_, ext)| *ext)
}

/// Writes assets to a local directory that the server also serves.
#[derive(Debug, Clone)]
pub struct LocalAssetStore {
    dir: PathBuf,
    public_base: String,
}

impl LocalAssetStore {
    /// Create the store, making `dir` if it does not exist.
    pub fn new(dir: impl Into<PathBuf>, base_url: &str) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            public_base: format!("{}{}", base_url.trim_end_matches('/'), PUBLIC_PREFIX),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl AssetStore for LocalAssetStore {
    fn store(&self, extension: &str, bytes: &[u8]) -> Result<StoredAsset> {
        if !IMAGE_TYPES.iter().any(|(_, ext)| *ext == extension) {
            return Err(AppError::Upload(format!("unsupported extension {:?}", extension)));
        }
        let file_name = format!("{}.{}", Uuid::new_v4().as_simple(), extension);

        let path = self.dir.join(&file_name);
        fs::write(&path, bytes)
            .map_err(|e| AppError::Upload(format!("writing {}: {}", path.display(), e)))?;

        tracing::debug!("Stored upload {} ({} bytes)", file_name, bytes.len());
        Ok(StoredAsset {
            secure_url: format!("{}/{}", self.public_base, file_name),
        })
    }
}
