//! Asset records persisted by the filesystem store.

use derive_getters::Getters;
use podium_core::AssetId;
use podium_interface::AssetPolicy;
use serde::{Deserialize, Serialize};

/// Everything the store knows about one registered asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct AssetRecord {
    id: AssetId,
    alias: String,
    policy: AssetPolicy,
    #[serde(default)]
    content: Option<StoredContent>,
}

impl AssetRecord {
    pub(crate) fn new(id: AssetId, alias: impl Into<String>, policy: AssetPolicy) -> Self {
        Self {
            id,
            alias: alias.into(),
            policy,
            content: None,
        }
    }

    pub(crate) fn set_content(&mut self, content: StoredContent) {
        self.content = Some(content);
    }
}

/// Summary of uploaded bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct StoredContent {
    /// SHA-256 of the bytes, lowercase hex
    content_hash: String,
    /// Lowercase extension with leading dot
    extension: String,
    /// Size of the bytes
    size_bytes: u64,
    /// Filename supplied with the upload
    original_filename: String,
}

impl StoredContent {
    pub(crate) fn new(
        content_hash: String,
        extension: String,
        size_bytes: u64,
        original_filename: String,
    ) -> Self {
        Self {
            content_hash,
            extension,
            size_bytes,
            original_filename,
        }
    }

    /// File name of the content inside the asset directory.
    pub fn file_name(&self) -> String {
        format!("{}{}", self.content_hash, self.extension)
    }
}
