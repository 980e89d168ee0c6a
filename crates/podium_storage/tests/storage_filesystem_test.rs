//! Tests for the filesystem media store.

use podium_error::{PodiumErrorKind, StorageErrorKind};
use podium_interface::{AssetPolicy, AssetPolicyBuilder, MediaStore};
use podium_storage::FileSystemMediaStore;
use tempfile::TempDir;

fn image_policy() -> AssetPolicy {
    AssetPolicyBuilder::default()
        .max_size_bytes(64u64)
        .allowed_extensions([".jpg", ".jpeg", ".png", ".webp"])
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
async fn test_register_creates_record() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemMediaStore::new(temp_dir.path()).unwrap();

    let id = store.register(&image_policy(), "ada-lovelace").await.unwrap();

    assert!(store.exists(&id).await.unwrap());
    let record = store.record(&id).await.unwrap();
    assert_eq!(record.alias(), "ada-lovelace");
    assert!(record.content().is_none());
    assert!(temp_dir.path().join(id.to_string()).join("asset.json").exists());
}

#[tokio::test]
async fn test_upload_and_retrieve() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemMediaStore::new(temp_dir.path()).unwrap();
    let id = store.register(&image_policy(), "speaker").await.unwrap();

    let content = store.upload(&id, "Portrait.PNG", b"png bytes").await.unwrap();
    assert_eq!(content.extension(), ".png");
    assert_eq!(*content.size_bytes(), 9);

    let data = store.retrieve(&id).await.unwrap();
    assert_eq!(data, b"png bytes");
}

#[tokio::test]
async fn test_upload_rejects_extension() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemMediaStore::new(temp_dir.path()).unwrap();
    let id = store.register(&image_policy(), "speaker").await.unwrap();

    let err = store.upload(&id, "script.exe", b"MZ").await.unwrap_err();
    assert!(matches!(
        storage_kind(&err),
        Some(StorageErrorKind::InvalidExtension(_))
    ));

    let err = store.upload(&id, "no_extension", b"data").await.unwrap_err();
    assert!(matches!(
        storage_kind(&err),
        Some(StorageErrorKind::InvalidExtension(_))
    ));
}

#[tokio::test]
async fn test_upload_rejects_oversized() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemMediaStore::new(temp_dir.path()).unwrap();
    let id = store.register(&image_policy(), "speaker").await.unwrap();

    let err = store.upload(&id, "big.jpg", &[0u8; 65]).await.unwrap_err();
    assert_eq!(
        storage_kind(&err),
        Some(StorageErrorKind::TooLarge {
            size: 65,
            limit: 64
        })
    );
}

#[tokio::test]
async fn test_rewrite_replaces_content() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemMediaStore::new(temp_dir.path()).unwrap();
    let id = store.register(&image_policy(), "speaker").await.unwrap();

    let first = store.upload(&id, "a.png", b"first").await.unwrap();
    let second = store.upload(&id, "b.webp", b"second").await.unwrap();

    assert_ne!(first.content_hash(), second.content_hash());
    assert_eq!(store.retrieve(&id).await.unwrap(), b"second");
    let dir = temp_dir.path().join(id.to_string());
    assert!(!dir.join(first.file_name()).exists());
    assert!(dir.join(second.file_name()).exists());
}

#[tokio::test]
async fn test_rewrite_forbidden_by_policy() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemMediaStore::new(temp_dir.path()).unwrap();
    let policy = AssetPolicyBuilder::default()
        .max_size_bytes(64u64)
        .allowed_extensions([".png"])
        .allows_rewrite(false)
        .build()
        .unwrap();
    let id = store.register(&policy, "speaker").await.unwrap();

    store.upload(&id, "a.png", b"first").await.unwrap();
    let err = store.upload(&id, "a.png", b"second").await.unwrap_err();
    assert!(matches!(
        storage_kind(&err),
        Some(StorageErrorKind::RewriteForbidden(_))
    ));
    assert_eq!(store.retrieve(&id).await.unwrap(), b"first");
}

#[tokio::test]
async fn test_hash_verification() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemMediaStore::new(temp_dir.path()).unwrap();
    let id = store.register(&image_policy(), "speaker").await.unwrap();
    let content = store.upload(&id, "a.png", b"original").await.unwrap();

    let path = temp_dir.path().join(id.to_string()).join(content.file_name());
    tokio::fs::write(&path, b"corrupted").await.unwrap();

    let err = store.retrieve(&id).await.unwrap_err();
    assert!(matches!(
        storage_kind(&err),
        Some(StorageErrorKind::HashMismatch(_))
    ));
}

#[tokio::test]
async fn test_unregister_removes_everything() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemMediaStore::new(temp_dir.path()).unwrap();
    let id = store.register(&image_policy(), "speaker").await.unwrap();
    store.upload(&id, "a.png", b"bytes").await.unwrap();

    store.unregister(&id, false).await.unwrap();

    assert!(!store.exists(&id).await.unwrap());
    assert!(!temp_dir.path().join(id.to_string()).exists());
    let err = store.retrieve(&id).await.unwrap_err();
    assert!(matches!(storage_kind(&err), Some(StorageErrorKind::NotFound(_))));
}

#[tokio::test]
async fn test_unregister_unknown_asset() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemMediaStore::new(temp_dir.path()).unwrap();
    let id = podium_core::AssetId::new_v4();

    let err = store.unregister(&id, false).await.unwrap_err();
    assert!(matches!(storage_kind(&err), Some(StorageErrorKind::NotFound(_))));

    store.unregister(&id, true).await.unwrap();
}

#[tokio::test]
async fn test_register_rejects_empty_policy() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemMediaStore::new(temp_dir.path()).unwrap();
    let policy = AssetPolicyBuilder::default()
        .max_size_bytes(64u64)
        .allowed_extensions(Vec::<String>::new())
        .build()
        .unwrap();

    let err = store.register(&policy, "speaker").await.unwrap_err();
    assert!(matches!(
        storage_kind(&err),
        Some(StorageErrorKind::InvalidExtension(_))
    ));
}

#[tokio::test]
async fn test_exists_reports_io_failure() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemMediaStore::new(temp_dir.path()).unwrap();
    let id = podium_core::AssetId::new_v4();

    // A plain file where the asset directory should be makes the lookup fail
    // with "not a directory" rather than "not found".
    std::fs::write(temp_dir.path().join(id.to_string()), b"not a directory").unwrap();

    let err = store.exists(&id).await.unwrap_err();
    assert!(matches!(
        storage_kind(&err),
        Some(StorageErrorKind::FileRead(_))
    ));
}

#[tokio::test]
async fn test_concurrent_uploads_to_one_asset() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemMediaStore::new(temp_dir.path()).unwrap();
    let id = store.register(&image_policy(), "speaker").await.unwrap();

    let (first, second) = tokio::join!(
        store.upload(&id, "a.png", b"first image"),
        store.upload(&id, "b.png", b"second image"),
    );
    first.unwrap();
    second.unwrap();

    let data = store.retrieve(&id).await.unwrap();
    assert!(data == b"first image" || data == b"second image");

    let leftovers = std::fs::read_dir(temp_dir.path().join(id.to_string()))
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
        .count();
    assert_eq!(leftovers, 0);
}
