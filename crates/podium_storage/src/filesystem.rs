//! Filesystem-based media store.
//!
//! Every registered asset owns a directory named by its id. The directory
//! holds `asset.json` and, once uploaded, the content file named by its
//! SHA-256 hash.

use crate::{AssetRecord, StoredContent};
use async_trait::async_trait;
use podium_core::AssetId;
use podium_error::{PodiumResult, StorageError, StorageErrorKind};
use podium_interface::{AssetPolicy, MediaStore};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use uuid::Uuid;

const RECORD_FILE: &str = "asset.json";

/// Filesystem media store.
///
/// # Example Structure
///
/// ```text
/// /var/podium/media/
/// ├── 0b6f2c1e-.../
/// │   ├── asset.json
/// │   └── 9f86d081884c7d65...png
/// └── 5a1d7e3b-.../
///     └── asset.json          (registered, nothing uploaded yet)
/// ```
///
/// Writes go to a uniquely named temp file first and are renamed into place.
#[derive(Debug, Clone)]
pub struct FileSystemMediaStore {
    base_path: PathBuf,
}

impl FileSystemMediaStore {
    /// Create a new filesystem store rooted at `base_path`.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or accessed.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> PodiumResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created filesystem media store");
        Ok(Self { base_path })
    }

    /// Root directory of the store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn asset_dir(&self, id: &AssetId) -> PathBuf {
        self.base_path.join(id.to_string())
    }

    fn compute_hash(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }

    async fn write_atomic(path: &Path, data: &[u8]) -> PodiumResult<()> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp_path = path.with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;
        Ok(())
    }

    async fn write_record(&self, record: &AssetRecord) -> PodiumResult<()> {
        let json = serde_json::to_vec_pretty(record)
            .map_err(|e| StorageError::new(StorageErrorKind::Metadata(e.to_string())))?;
        Self::write_atomic(&self.asset_dir(record.id()).join(RECORD_FILE), &json).await
    }

    /// Load the record of a registered asset.
    ///
    /// # Errors
    ///
    /// `NotFound` if the asset is not registered.
    pub async fn record(&self, id: &AssetId) -> PodiumResult<AssetRecord> {
        let path = self.asset_dir(id).join(RECORD_FILE);
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(id.to_string()))
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        })?;

        serde_json::from_slice(&bytes)
            .map_err(|e| StorageError::new(StorageErrorKind::Metadata(e.to_string())).into())
    }

    /// Upload the bytes of a registered asset.
    ///
    /// The registered policy decides what is accepted: the extension of
    /// `filename` must be allowed, `data` must fit the size limit and, when
    /// content already exists, the policy must allow rewrites.
    ///
    /// # Errors
    ///
    /// `NotFound`, `InvalidExtension`, `TooLarge`, `RewriteForbidden` or file I/O kinds.
    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    pub async fn upload(
        &self,
        id: &AssetId,
        filename: &str,
        data: &[u8],
    ) -> PodiumResult<StoredContent> {
        let mut record = self.record(id).await?;
        let policy = record.policy().clone();

        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))
            .unwrap_or_default();
        if !policy.allows_extension(&extension) {
            return Err(StorageError::new(StorageErrorKind::InvalidExtension(
                filename.to_string(),
            ))
            .into());
        }

        let size = data.len() as u64;
        if size > *policy.max_size_bytes() {
            return Err(StorageError::new(StorageErrorKind::TooLarge {
                size,
                limit: *policy.max_size_bytes(),
            })
            .into());
        }

        let previous = record.content().clone();
        if previous.is_some() && !*policy.allows_rewrite() {
            return Err(StorageError::new(StorageErrorKind::RewriteForbidden(id.to_string())).into());
        }

        let content = StoredContent::new(
            Self::compute_hash(data),
            extension,
            size,
            filename.to_string(),
        );
        let dir = self.asset_dir(id);
        Self::write_atomic(&dir.join(content.file_name()), data).await?;

        record.set_content(content.clone());
        self.write_record(&record).await?;

        if let Some(old) = previous {
            if old.file_name() != content.file_name() {
                if let Err(e) = tokio::fs::remove_file(dir.join(old.file_name())).await {
                    tracing::warn!(asset_id = %id, error = %e, "Failed to remove replaced content");
                }
            }
        }

        tracing::info!(
            asset_id = %id,
            hash = %content.content_hash(),
            size,
            "Uploaded asset content"
        );
        Ok(content)
    }

    /// Read the uploaded bytes of an asset, verifying their hash.
    ///
    /// # Errors
    ///
    /// `NotFound` if the asset is unknown or has no content, `HashMismatch` on corruption.
    #[tracing::instrument(skip(self))]
    pub async fn retrieve(&self, id: &AssetId) -> PodiumResult<Vec<u8>> {
        let record = self.record(id).await?;
        let content = record.content().clone().ok_or_else(|| {
            StorageError::new(StorageErrorKind::NotFound(format!("{} has no content", id)))
        })?;

        let path = self.asset_dir(id).join(content.file_name());
        let data = tokio::fs::read(&path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        let actual = Self::compute_hash(&data);
        if &actual != content.content_hash() {
            return Err(StorageError::new(StorageErrorKind::HashMismatch(format!(
                "expected {}, got {}",
                content.content_hash(),
                actual
            )))
            .into());
        }

        tracing::debug!(asset_id = %id, size = data.len(), "Retrieved asset content");
        Ok(data)
    }
}

#[async_trait]
impl MediaStore for FileSystemMediaStore {
    #[tracing::instrument(skip(self, policy))]
    async fn register(&self, policy: &AssetPolicy, alias: &str) -> PodiumResult<AssetId> {
        if policy.allowed_extensions().is_empty() {
            return Err(StorageError::new(StorageErrorKind::InvalidExtension(
                "policy allows no extensions".to_string(),
            ))
            .into());
        }

        let id = AssetId::new_v4();
        let dir = self.asset_dir(&id);
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                dir.display(),
                e
            )))
        })?;

        let record = AssetRecord::new(id, alias, policy.clone());
        if let Err(e) = self.write_record(&record).await {
            // Leave nothing behind for a registration that did not complete.
            let _ = tokio::fs::remove_dir_all(&dir).await;
            return Err(e);
        }

        tracing::info!(asset_id = %id, alias, "Registered asset");
        Ok(id)
    }

    #[tracing::instrument(skip(self))]
    async fn unregister(&self, id: &AssetId, force: bool) -> PodiumResult<()> {
        let dir = self.asset_dir(id);

        match tokio::fs::remove_dir_all(&dir).await {
            Ok(()) => {
                tracing::info!(asset_id = %id, "Unregistered asset");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if force {
                    tracing::warn!(asset_id = %id, "Forced unregister of unknown asset");
                    Ok(())
                } else {
                    Err(StorageError::new(StorageErrorKind::NotFound(id.to_string())).into())
                }
            }
            Err(e) => Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "delete {}: {}",
                dir.display(),
                e
            )))
            .into()),
        }
    }

    async fn exists(&self, id: &AssetId) -> PodiumResult<bool> {
        let path = self.asset_dir(id).join(RECORD_FILE);
        tokio::fs::try_exists(&path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
            .into()
        })
    }
}
