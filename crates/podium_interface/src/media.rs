//! Media store contract.

use async_trait::async_trait;
use derive_getters::Getters;
use podium_core::AssetId;
use podium_error::PodiumResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Constraints a media store enforces on uploads to a registered asset.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
pub struct AssetPolicy {
    /// Largest accepted upload
    max_size_bytes: u64,
    /// Accepted extensions, stored lowercase with a leading dot
    #[builder(setter(custom))]
    allowed_extensions: BTreeSet<String>,
    /// Whether a second upload may replace existing content
    #[builder(default = "true")]
    #[serde(default = "default_allows_rewrite")]
    allows_rewrite: bool,
}

fn default_allows_rewrite() -> bool {
    true
}

impl AssetPolicyBuilder {
    /// Set the accepted extensions. Each is normalized to lowercase with a leading dot.
    pub fn allowed_extensions<I, S>(&mut self, extensions: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_extensions = Some(
            extensions
                .into_iter()
                .map(|e| AssetPolicy::normalize_extension(e.as_ref()))
                .collect(),
        );
        self
    }
}

impl AssetPolicy {
    fn normalize_extension(extension: &str) -> String {
        let lowered = extension.trim().to_lowercase();
        if lowered.starts_with('.') {
            lowered
        } else {
            format!(".{}", lowered)
        }
    }

    /// Whether `extension` (with or without the dot, any case) is accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use podium_interface::AssetPolicyBuilder;
    ///
    /// let policy = AssetPolicyBuilder::default()
    ///     .max_size_bytes(1024u64)
    ///     .allowed_extensions([".png", "JPG"])
    ///     .build()
    ///     .unwrap();
    /// assert!(policy.allows_extension("jpg"));
    /// assert!(policy.allows_extension(".PNG"));
    /// assert!(!policy.allows_extension(".gif"));
    /// ```
    pub fn allows_extension(&self, extension: &str) -> bool {
        self.allowed_extensions
            .contains(&Self::normalize_extension(extension))
    }
}

/// Store that owns managed image assets.
///
/// `register` reserves a new asset under the given policy and returns its id;
/// bytes are uploaded to it out of band. Both calls must either succeed
/// completely or leave the store unchanged.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Register a new asset.
    ///
    /// # Errors
    ///
    /// `QuotaExceeded`, `InvalidExtension` (policy rejected) or `Unavailable`.
    async fn register(&self, policy: &AssetPolicy, alias: &str) -> PodiumResult<AssetId>;

    /// Remove an asset and any uploaded content.
    ///
    /// With `force`, an unknown id is treated as already removed.
    ///
    /// # Errors
    ///
    /// `NotFound` (only without `force`) or `Unavailable`.
    async fn unregister(&self, id: &AssetId, force: bool) -> PodiumResult<()>;

    /// Whether the asset is currently registered.
    async fn exists(&self, id: &AssetId) -> PodiumResult<bool>;
}
