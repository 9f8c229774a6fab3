//! Retry behaviour of platform requests over real HTTP.

mod common;

use rota::{RetryPolicy, StatusError};
use rstest::rstest;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SUMMARY_PATH: &str = "/api/v2/conversations/conv-1/summaries";

#[rstest]
#[case(429)]
#[case(502)]
#[case(503)]
#[case(504)]
#[tokio::test]
async fn test_transient_status_is_retried(#[case] status: u16) {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SUMMARY_PATH))
        .respond_with(ResponseTemplate::new(status))
        .up_to_n_times(3)
        .expect(3)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(SUMMARY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::test_client(&mock_server);
    let summary = client.conversations().summaries("conv-1").await.unwrap();

    assert_eq!(summary["ok"], true);
}

#[tokio::test]
async fn test_gives_up_after_four_attempts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SUMMARY_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .expect(4)
        .mount(&mock_server)
        .await;

    let client = common::test_client(&mock_server);
    let err = client.conversations().summaries("conv-1").await.unwrap_err();

    assert_eq!(err.status(), Some(502));
    assert!(err.to_string().contains("bad gateway"));
}

#[rstest]
#[case(400)]
#[case(401)]
#[case(500)]
#[tokio::test]
async fn test_other_status_fails_fast(#[case] status: u16) {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SUMMARY_PATH))
        .respond_with(ResponseTemplate::new(status))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::test_client(&mock_server);
    let err = client.conversations().summaries("conv-1").await.unwrap_err();

    assert_eq!(err.status(), Some(status));
}

#[tokio::test]
async fn test_retry_after_header_overrides_schedule() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SUMMARY_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(SUMMARY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    // The schedule alone would wait a minute.
    let policy = RetryPolicy::builder()
        .schedule([Duration::from_secs(60)])
        .build();
    let client = common::test_client_with_policy(&mock_server, policy);

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        client.conversations().summaries("conv-1"),
    )
    .await
    .expect("retry-after should replace the 60 s schedule");

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_connection_failure_is_not_retried() {
    let client = rota::Client::builder()
        .base_url("http://127.0.0.1:1")
        .access_token(common::TEST_TOKEN)
        .retry_policy(RetryPolicy::builder().schedule([Duration::from_secs(60)]).build())
        .build()
        .unwrap();

    let result = tokio::time::timeout(
        Duration::from_secs(10),
        client.conversations().summaries("conv-1"),
    )
    .await
    .expect("connection errors must not wait for a retry");

    let err = result.unwrap_err();
    assert!(matches!(err, rota::Error::Transport(_)));
    assert_eq!(err.status(), None);
}
