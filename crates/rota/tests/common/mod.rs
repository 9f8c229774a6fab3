//! Common test utilities and helpers

use rota::{Client, RetryPolicy};
use std::path::Path;
use std::time::Duration;
use wiremock::MockServer;

/// Bearer token used by every test client
#[allow(dead_code)]
pub const TEST_TOKEN: &str = "test-access-token";

/// Schedule API key used by every test client
#[allow(dead_code)]
pub const TEST_SCHEDULE_KEY: &str = "test-schedule-key";

/// Load a response fixture
#[allow(dead_code)]
pub fn load_response_fixture(name: &str) -> serde_json::Value {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let path = Path::new(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join("responses")
        .join(format!("{}.json", name));

    let raw = std::fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!(
            "Failed to load response fixture '{}' from {:?}: {}",
            name, path, e
        )
    });
    serde_json::from_str(&raw).unwrap_or_else(|e| panic!("Invalid fixture '{}': {}", name, e))
}

/// Platform retry rules with millisecond waits
#[allow(dead_code)]
pub fn fast_policy() -> RetryPolicy {
    RetryPolicy::builder()
        .schedule([
            Duration::from_millis(5),
            Duration::from_millis(10),
            Duration::from_millis(20),
        ])
        .build()
}

/// Client pointed at `server` for both the platform and the schedule API
#[allow(dead_code)]
pub fn test_client(server: &MockServer) -> Client {
    test_client_with_policy(server, fast_policy())
}

/// [`test_client`] with a custom retry policy
#[allow(dead_code)]
pub fn test_client_with_policy(server: &MockServer, policy: RetryPolicy) -> Client {
    Client::builder()
        .base_url(server.uri())
        .access_token(TEST_TOKEN)
        .schedule_endpoint(format!("{}/rota", server.uri()))
        .schedule_api_key(TEST_SCHEDULE_KEY)
        .timeout(Duration::from_secs(5))
        .retry_policy(policy)
        .build()
        .expect("test client")
}
