//! Integration tests for HTTP transport

use rota_core::retry::{Invoker, RetryPolicy};
use rota_transport::{HttpRequest, HttpResponse, HttpTransport, Transport, TransportError};
use rstest::rstest;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Same rules as the platform policy, with millisecond waits.
fn fast_invoker() -> Invoker {
    Invoker::new(
        RetryPolicy::builder()
            .schedule([
                Duration::from_millis(5),
                Duration::from_millis(10),
                Duration::from_millis(20),
            ])
            .build(),
    )
}

async fn send_checked(
    transport: &HttpTransport,
    request: HttpRequest,
) -> Result<HttpResponse, TransportError> {
    Ok(transport.send_http(request).await?.error_for_status()?)
}

#[tokio::test]
async fn test_get_forwards_headers_and_returns_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/conversations/c-1/summaries"))
        .and(header("Authorization", "Bearer token123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "total": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let request = HttpRequest::new(
        "GET",
        format!("{}/api/v2/conversations/c-1/summaries", server.uri()),
    )
    .with_bearer("token123");

    let response = transport.send_http(request).await.unwrap();

    assert!(response.is_success());
    let body: serde_json::Value = response.json().unwrap();
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn test_error_status_is_returned_as_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "3")
                .set_body_string("rate limited"),
        )
        .mount(&server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let response = transport
        .send_http(HttpRequest::new("GET", server.uri()))
        .await
        .unwrap();

    assert_eq!(response.status, 429);
    let err = response.error_for_status().unwrap_err();
    assert_eq!(err.retry_after_secs, Some(3));
    assert_eq!(err.message, "rate limited");
}

#[rstest]
#[case(502)]
#[case(503)]
#[case(504)]
#[tokio::test]
async fn test_invoker_retries_transient_status(#[case] status: u16) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let response = fast_invoker()
        .call(
            |req| send_checked(&transport, req),
            HttpRequest::new("GET", server.uri()),
        )
        .await
        .unwrap();

    assert_eq!(response.text(), "ok");
}

#[tokio::test]
async fn test_invoker_gives_up_after_four_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .expect(4)
        .mount(&server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let err = fast_invoker()
        .call(
            |req| send_checked(&transport, req),
            HttpRequest::new("GET", server.uri()),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Status(ref e) if e.status == 503));
}

#[tokio::test]
async fn test_invoker_does_not_retry_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let err = fast_invoker()
        .call(
            |req| send_checked(&transport, req),
            HttpRequest::new("GET", server.uri()),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Status(ref e) if e.status == 404));
}

#[tokio::test]
async fn test_connection_failure_is_not_retried() {
    // Nothing listens on port 1
    let uri = "http://127.0.0.1:1".to_string();

    let transport = HttpTransport::new().unwrap();
    let err = fast_invoker()
        .call(
            |req| send_checked(&transport, req),
            HttpRequest::new("GET", uri.clone()),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        TransportError::Connection(_) | TransportError::Http(_)
    ));
}

#[tokio::test]
async fn test_post_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/conversations/calls"))
        .and(header("Content-Type", "application/json"))
        .and(wiremock::matchers::body_json(serde_json::json!({
            "phoneNumber": "+441234567890"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "call-1" })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let request = HttpRequest::new("POST", format!("{}/api/v2/conversations/calls", server.uri()))
        .with_json(&serde_json::json!({ "phoneNumber": "+441234567890" }))
        .unwrap();

    let response = send_checked(&transport, request).await.unwrap();
    let body: serde_json::Value = response.json().unwrap();
    assert_eq!(body["id"], "call-1");
}
