//! Cleanup registry behavior against the live posts table.

use std::sync::Arc;

use crate::helpers::config::*;

use postcheck_client::ResourceClient;
use postcheck_fixtures::{ApiPostSpec, CleanupRegistry, FixtureError, PostFactory, SeedSpec};
use postcheck_storage::StorageGateway;

/// A post the test already removed is skipped, the rest are deleted, and a
/// second cleanup is refused.
#[tokio::test]
#[ignore = "requires a live WordPress instance; run with --ignored"]
async fn test_e2e_cleanup_skips_posts_removed_by_test() {
    let config = harness_config();
    let store = Arc::new(StorageGateway::new(&config.database));
    let registry = Arc::new(CleanupRegistry::new(Arc::clone(&store)));
    let api = ResourceClient::new(&config.api).expect("client should build");
    let factory = PostFactory::new(Arc::new(api), Arc::clone(&registry));

    // Given
    let kept = factory
        .create_via_storage(&SeedSpec::new("Cleanup Kept {uuid}", "kept"))
        .await
        .expect("seed should succeed");
    let removed = factory
        .create_via_api(&ApiPostSpec::default())
        .await
        .expect("create should succeed");
    store.delete(removed.id).await.expect("direct delete should succeed");

    // When
    let report = registry.cleanup().await.expect("cleanup should succeed");

    // Then
    assert_eq!(report.deleted, vec![kept.id()]);
    assert_eq!(report.already_absent, vec![removed.id]);
    assert!(!store.exists(kept.id()).await.expect("exists should succeed"));
    assert!(matches!(
        registry.cleanup().await,
        Err(FixtureError::AlreadyCleaned)
    ));

    store.close().await.expect("close should succeed");
}

/// The scope closes the gateway once the scenario is over.
#[tokio::test]
#[ignore = "requires a live WordPress instance; run with --ignored"]
async fn test_e2e_scope_releases_connection() {
    let scope = live_scope();
    let factory = scope.factory().clone();

    let id = scope
        .run(|factory| async move {
            let seeded = factory
                .create_via_storage(&SeedSpec::new("Scope Release {uuid}", "body"))
                .await?;
            assert!(factory.store().is_open().await);
            Ok::<_, FixtureError>(seeded.id())
        })
        .await;

    assert!(!factory.store().is_open().await);
    assert!(!factory.store().exists(id).await.expect("exists should succeed"));
    factory.store().close().await.expect("close should succeed");
}
