//! Behavioural tests for the invoker under the platform retry policy.
//!
//! All tests run on a paused tokio clock, so backoff sleeps complete
//! instantly while `Instant` still reports the simulated elapsed time.

use proptest::prelude::*;
use rota_core::error::ApiError;
use rota_core::retry::Invoker;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

/// Scripted operation: fails with the queued statuses, then succeeds.
#[derive(Clone)]
struct Script {
    failures: Arc<Mutex<Vec<ApiError>>>,
    calls: Arc<Mutex<Vec<Instant>>>,
}

impl Script {
    fn new(failures: Vec<ApiError>) -> Self {
        let mut failures = failures;
        failures.reverse();
        Self {
            failures: Arc::new(Mutex::new(failures)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn always(err: ApiError) -> Self {
        Self::new(vec![err; 16])
    }

    async fn run(&self, payload: &'static str) -> Result<&'static str, ApiError> {
        self.calls.lock().unwrap().push(Instant::now());
        match self.failures.lock().unwrap().pop() {
            Some(err) => Err(err),
            None => Ok(payload),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Gaps between consecutive invocations.
    fn gaps(&self) -> Vec<Duration> {
        self.calls
            .lock()
            .unwrap()
            .windows(2)
            .map(|w| w[1] - w[0])
            .collect()
    }
}

async fn invoke(script: &Script) -> Result<&'static str, ApiError> {
    Invoker::standard()
        .call(|payload| script.run(payload), "payload")
        .await
}

#[tokio::test(start_paused = true)]
async fn test_two_503s_then_success_waits_twelve_seconds() {
    let script = Script::new(vec![
        ApiError::new(503, "unavailable"),
        ApiError::new(503, "unavailable"),
    ]);
    let start = Instant::now();

    let result = invoke(&script).await;

    assert_eq!(result.unwrap(), "payload");
    assert_eq!(script.call_count(), 3);
    assert_eq!(start.elapsed(), Duration::from_secs(12));
}

#[tokio::test(start_paused = true)]
async fn test_404_rejects_immediately() {
    let script = Script::always(ApiError::new(404, "not found"));
    let start = Instant::now();

    let err = invoke(&script).await.unwrap_err();

    assert_eq!(err, ApiError::new(404, "not found"));
    assert_eq!(script.call_count(), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_three_failures_then_success_uses_four_attempts() {
    for status in [429, 502, 503, 504] {
        let script = Script::new(vec![ApiError::new(status, "transient"); 3]);

        let result = invoke(&script).await;

        assert_eq!(result.unwrap(), "payload", "status {status}");
        assert_eq!(script.call_count(), 4, "status {status}");
    }
}

#[tokio::test(start_paused = true)]
async fn test_always_failing_rejects_with_fourth_error() {
    let failures = (0..8)
        .map(|i| ApiError::new(502, format!("attempt {i}")))
        .collect();
    let script = Script::new(failures);

    let err = invoke(&script).await.unwrap_err();

    assert_eq!(err.message, "attempt 3");
    assert_eq!(script.call_count(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_backoff_sequence_is_3_9_27() {
    let script = Script::always(ApiError::new(504, "gateway timeout"));
    let start = Instant::now();

    let _ = invoke(&script).await;

    assert_eq!(
        script.gaps(),
        vec![
            Duration::from_secs(3),
            Duration::from_secs(9),
            Duration::from_secs(27)
        ]
    );
    assert_eq!(start.elapsed(), Duration::from_secs(39));
}

#[tokio::test(start_paused = true)]
async fn test_retry_after_overrides_schedule_at_every_attempt() {
    let script = Script::new(vec![
        ApiError::new(503, "unavailable"),
        ApiError::new(429, "slow down").with_retry_after(5),
        ApiError::new(429, "slow down").with_retry_after(5),
    ]);

    let result = invoke(&script).await;

    assert!(result.is_ok());
    assert_eq!(
        script.gaps(),
        vec![
            Duration::from_secs(3),
            Duration::from_secs(5),
            Duration::from_secs(5)
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_429_without_retry_after_follows_schedule() {
    let script = Script::new(vec![ApiError::new(429, "slow down"); 2]);

    invoke(&script).await.unwrap();

    assert_eq!(
        script.gaps(),
        vec![Duration::from_secs(3), Duration::from_secs(9)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_negative_retry_after_retries_without_waiting() {
    let script = Script::new(vec![ApiError::new(429, "slow down").with_retry_after(-30)]);
    let start = Instant::now();

    invoke(&script).await.unwrap();

    assert_eq!(script.call_count(), 2);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_calls_are_independent() {
    let fast = Script::new(vec![]);
    let slow = Script::new(vec![ApiError::new(503, "unavailable")]);
    let invoker = Invoker::standard();
    let start = Instant::now();

    let (a, b) = tokio::join!(
        invoker.call(|p| fast.run(p), "fast"),
        invoker.call(|p| slow.run(p), "slow"),
    );

    assert_eq!(a.unwrap(), "fast");
    assert_eq!(b.unwrap(), "slow");
    assert_eq!(fast.call_count(), 1);
    assert_eq!(slow.call_count(), 2);
    assert_eq!(start.elapsed(), Duration::from_secs(3));
}

fn paused_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn prop_non_retryable_status_never_retries(status in 100u16..600) {
        prop_assume!(![429, 502, 503, 504].contains(&status));

        let rt = paused_runtime();
        rt.block_on(async {
            let script = Script::always(ApiError::new(status, "nope"));
            let start = Instant::now();

            let err = invoke(&script).await.unwrap_err();

            prop_assert_eq!(err.status, status);
            prop_assert_eq!(script.call_count(), 1);
            prop_assert_eq!(start.elapsed(), Duration::ZERO);
            Ok(())
        })?;
    }

    #[test]
    fn prop_attempts_bounded(failures in 0usize..10, status in prop::sample::select(vec![429u16, 502, 503, 504])) {
        let rt = paused_runtime();
        rt.block_on(async {
            let script = Script::new(vec![ApiError::new(status, "transient"); failures]);

            let result = invoke(&script).await;

            prop_assert!(script.call_count() <= 4);
            prop_assert_eq!(result.is_ok(), failures <= 3);
            prop_assert_eq!(script.call_count(), failures.min(3) + 1);
            Ok(())
        })?;
    }
}
