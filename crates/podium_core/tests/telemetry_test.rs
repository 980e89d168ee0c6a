//! Tests for tracing installation.

use podium_core::{classify, init_telemetry};

#[test]
fn test_telemetry_installs_once() {
    let guard = init_telemetry("podium-test").unwrap();

    tracing::info_span!("classify_link").in_scope(|| {
        let reference = classify(Some("https://x.com/a.png")).unwrap();
        tracing::info!(?reference, "Classified");
    });

    assert!(init_telemetry("podium-test").is_err());
    guard.shutdown();
}
