//! Tests for the in-memory media store.

use podium_error::{PodiumErrorKind, StorageErrorKind};
use podium_interface::{AssetPolicy, AssetPolicyBuilder, MediaStore};
use podium_storage::InMemoryMediaStore;

fn image_policy() -> AssetPolicy {
    AssetPolicyBuilder::default()
        .max_size_bytes(1024u64)
        .allowed_extensions([".png"])
        .build()
        .unwrap()
}

fn storage_kind(err: &podium_error::PodiumError) -> Option<StorageErrorKind> {
    match err.kind() {
        PodiumErrorKind::Storage(e) => Some(e.kind.clone()),
        _ => None,
    }
}

#[tokio::test]
async fn test_register_and_unregister() {
    let store = InMemoryMediaStore::new();
    let id = store.register(&image_policy(), "grace-hopper").await.unwrap();

    assert_eq!(store.len().await, 1);
    assert_eq!(store.alias(&id).await.as_deref(), Some("grace-hopper"));
    assert_eq!(store.policy(&id).await, Some(image_policy()));

    store.unregister(&id, false).await.unwrap();
    assert!(store.is_empty().await);
    assert!(!store.exists(&id).await.unwrap());
    assert_eq!(store.register_calls().await, 1);
    assert_eq!(store.unregister_calls().await, 1);
}

#[tokio::test]
async fn test_unavailable_store_fails_every_call() {
    let store = InMemoryMediaStore::new();
    let id = store.register(&image_policy(), "alias").await.unwrap();
    store.set_available(false).await;

    let err = store.register(&image_policy(), "alias").await.unwrap_err();
    assert!(matches!(storage_kind(&err), Some(StorageErrorKind::Unavailable(_))));
    let err = store.unregister(&id, true).await.unwrap_err();
    assert!(matches!(storage_kind(&err), Some(StorageErrorKind::Unavailable(_))));

    store.set_available(true).await;
    assert!(store.exists(&id).await.unwrap());
}

#[tokio::test]
async fn test_capacity_limit() {
    let store = InMemoryMediaStore::with_capacity(1);
    store.register(&image_policy(), "first").await.unwrap();

    let err = store.register(&image_policy(), "second").await.unwrap_err();
    assert!(matches!(
        storage_kind(&err),
        Some(StorageErrorKind::QuotaExceeded(_))
    ));
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_force_ignores_missing_asset() {
    let store = InMemoryMediaStore::new();
    let id = podium_core::AssetId::new_v4();

    let err = store.unregister(&id, false).await.unwrap_err();
    assert!(matches!(storage_kind(&err), Some(StorageErrorKind::NotFound(_))));
    store.unregister(&id, true).await.unwrap();
}
