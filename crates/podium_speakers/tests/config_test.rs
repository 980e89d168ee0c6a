//! Tests for Podium configuration loading.

use podium_error::PodiumErrorKind;
use podium_speakers::PodiumConfig;
use std::io::Write;
use std::path::Path;

#[test]
fn test_bundled_defaults() {
    let config = PodiumConfig::bundled().unwrap();
    let image = config.speakers().image();

    assert_eq!(*image.max_size_bytes(), 10 * 1024 * 1024);
    assert_eq!(
        image.allowed_extensions(),
        &vec![".jpg", ".jpeg", ".png", ".webp"]
    );
    assert!(*image.allows_rewrite());
    assert_eq!(config.storage().media_root(), Path::new("media"));
}

#[test]
fn test_bundled_policy_builds() {
    let policy = PodiumConfig::bundled()
        .unwrap()
        .speakers()
        .image()
        .asset_policy()
        .unwrap();

    assert!(policy.allows_extension(".webp"));
    assert!(policy.allows_extension("JPG"));
    assert!(!policy.allows_extension(".gif"));
}

#[test]
fn test_file_overrides_defaults() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[speakers.image]
max_size_bytes = 2048
allowed_extensions = ["png"]
allows_rewrite = false

[storage]
media_root = "/srv/podium/media"
"#
    )
    .unwrap();

    let config = PodiumConfig::from_file(file.path()).unwrap();
    let policy = config.speakers().image().asset_policy().unwrap();

    assert_eq!(*policy.max_size_bytes(), 2048);
    assert!(policy.allows_extension(".png"));
    assert!(!policy.allows_extension(".jpg"));
    assert!(!*policy.allows_rewrite());
    assert_eq!(config.storage().media_root(), Path::new("/srv/podium/media"));
}

#[test]
fn test_zero_size_limit_is_a_config_error() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[speakers.image]
max_size_bytes = 0
"#
    )
    .unwrap();

    let config = PodiumConfig::from_file(file.path()).unwrap();
    let err = config.speakers().image().asset_policy().unwrap_err();
    assert!(matches!(err.kind(), PodiumErrorKind::Config(_)));
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = PodiumConfig::from_file(dir.path().join("absent.toml"));
    assert!(result.is_err());
}
