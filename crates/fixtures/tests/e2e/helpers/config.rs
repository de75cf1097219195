//! Harness configuration and scope construction for live scenarios.

use std::sync::OnceLock;

use postcheck_client::ResourceClient;
use postcheck_core::config::HarnessConfig;
use postcheck_fixtures::{TestScope, init_tracing};
use postcheck_storage::StorageGateway;

/// Query that makes the API return raw title and content.
#[allow(dead_code)]
pub const EDIT_CONTEXT: [(&str, &str); 1] = [("context", "edit")];

static CONFIG: OnceLock<HarnessConfig> = OnceLock::new();

/// Loads the configuration once per test binary, reading a `.env` file from the
/// working directory first when one exists.
///
/// # Panics
///
/// Panics listing every missing variable when the environment is incomplete.
#[allow(dead_code)]
pub fn harness_config() -> &'static HarnessConfig {
    CONFIG.get_or_init(|| {
        let _ = dotenvy::dotenv();
        let config = HarnessConfig::from_env()
            .unwrap_or_else(|e| panic!("live scenarios cannot start: {e}"));
        // Another test may have installed the subscriber first.
        let _ = init_tracing(&config.general);
        config
    })
}

/// A fresh scope with its own client, gateway and registry.
#[allow(dead_code)]
pub fn live_scope() -> TestScope<ResourceClient, StorageGateway> {
    TestScope::from_config(harness_config())
        .unwrap_or_else(|e| panic!("cannot build test scope: {e}"))
}
