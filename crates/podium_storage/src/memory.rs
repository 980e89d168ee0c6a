//! In-memory media store.

use async_trait::async_trait;
use podium_core::AssetId;
use podium_error::{PodiumResult, StorageError, StorageErrorKind};
use podium_interface::{AssetPolicy, MediaStore};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// `HashMap`-backed media store.
///
/// Registrations only exist for the lifetime of the store. The store can be
/// switched unavailable to exercise failure paths, and it counts every
/// `register`/`unregister` attempt.
///
/// # Example
///
/// ```
/// use podium_interface::{AssetPolicyBuilder, MediaStore};
/// use podium_storage::InMemoryMediaStore;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let store = InMemoryMediaStore::new();
/// let policy = AssetPolicyBuilder::default()
///     .max_size_bytes(1024u64)
///     .allowed_extensions([".png"])
///     .build()
///     .unwrap();
/// let id = store.register(&policy, "alias").await.unwrap();
/// assert!(store.exists(&id).await.unwrap());
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryMediaStore {
    state: Arc<RwLock<MemoryState>>,
}

#[derive(Debug)]
struct MemoryState {
    assets: HashMap<AssetId, RegisteredAsset>,
    available: bool,
    capacity: Option<usize>,
    register_calls: usize,
    unregister_calls: usize,
}

#[derive(Debug, Clone)]
struct RegisteredAsset {
    alias: String,
    policy: AssetPolicy,
}

impl InMemoryMediaStore {
    /// Create an empty, available store with no capacity limit.
    pub fn new() -> Self {
        Self::with_limit(None)
    }

    /// Create a store that refuses registrations beyond `capacity` assets.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_limit(Some(capacity))
    }

    fn with_limit(capacity: Option<usize>) -> Self {
        Self {
            state: Arc::new(RwLock::new(MemoryState {
                assets: HashMap::new(),
                available: true,
                capacity,
                register_calls: 0,
                unregister_calls: 0,
            })),
        }
    }

    /// While unavailable every call fails with `StorageErrorKind::Unavailable`.
    pub async fn set_available(&self, available: bool) {
        self.state.write().await.available = available;
    }

    /// Number of `register` attempts, successful or not.
    pub async fn register_calls(&self) -> usize {
        self.state.read().await.register_calls
    }

    /// Number of `unregister` attempts, successful or not.
    pub async fn unregister_calls(&self) -> usize {
        self.state.read().await.unregister_calls
    }

    /// Number of registered assets.
    pub async fn len(&self) -> usize {
        self.state.read().await.assets.len()
    }

    /// True when nothing is registered.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.assets.is_empty()
    }

    /// Alias an asset was registered under.
    pub async fn alias(&self, id: &AssetId) -> Option<String> {
        self.state
            .read()
            .await
            .assets
            .get(id)
            .map(|asset| asset.alias.clone())
    }

    /// Policy an asset was registered under.
    pub async fn policy(&self, id: &AssetId) -> Option<AssetPolicy> {
        self.state
            .read()
            .await
            .assets
            .get(id)
            .map(|asset| asset.policy.clone())
    }
}

impl Default for InMemoryMediaStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    #[tracing::instrument(skip(self, policy))]
    async fn register(&self, policy: &AssetPolicy, alias: &str) -> PodiumResult<AssetId> {
        let mut state = self.state.write().await;
        state.register_calls += 1;

        if !state.available {
            return Err(StorageError::new(StorageErrorKind::Unavailable(
                "in-memory store switched off".to_string(),
            ))
            .into());
        }
        if policy.allowed_extensions().is_empty() {
            return Err(StorageError::new(StorageErrorKind::InvalidExtension(
                "policy allows no extensions".to_string(),
            ))
            .into());
        }
        if let Some(capacity) = state.capacity {
            if state.assets.len() >= capacity {
                return Err(StorageError::new(StorageErrorKind::QuotaExceeded(format!(
                    "{} assets registered",
                    capacity
                )))
                .into());
            }
        }

        let id = AssetId::new_v4();
        state.assets.insert(
            id,
            RegisteredAsset {
                alias: alias.to_string(),
                policy: policy.clone(),
            },
        );

        tracing::debug!(asset_id = %id, "Registered asset in memory");
        Ok(id)
    }

    #[tracing::instrument(skip(self))]
    async fn unregister(&self, id: &AssetId, force: bool) -> PodiumResult<()> {
        let mut state = self.state.write().await;
        state.unregister_calls += 1;

        if !state.available {
            return Err(StorageError::new(StorageErrorKind::Unavailable(
                "in-memory store switched off".to_string(),
            ))
            .into());
        }

        if state.assets.remove(id).is_none() {
            if !force {
                return Err(StorageError::new(StorageErrorKind::NotFound(id.to_string())).into());
            }
            tracing::warn!(asset_id = %id, "Forced unregister of unknown asset");
        }

        Ok(())
    }

    async fn exists(&self, id: &AssetId) -> PodiumResult<bool> {
        let state = self.state.read().await;
        if !state.available {
            return Err(StorageError::new(StorageErrorKind::Unavailable(
                "in-memory store switched off".to_string(),
            ))
            .into());
        }
        Ok(state.assets.contains_key(id))
    }
}
