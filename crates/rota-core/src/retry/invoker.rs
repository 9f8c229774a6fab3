//! Resilient invocation of remote operations.

use super::schedule::RetryPolicy;
use super::strategy::BackoffStrategy;
use crate::error::StatusError;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Whether an operation may safely be attempted more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Idempotency {
    /// Repeating the call has no additional effect (reads, lookups).
    #[default]
    Idempotent,
    /// Repeating the call may duplicate a side effect (placing a call).
    /// Attempted exactly once.
    NonIdempotent,
}

/// Per-call options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallOptions {
    /// Name of the operation, attached to log events.
    pub label: &'static str,
    /// Whether failed attempts may be retried.
    pub idempotency: Idempotency,
}

impl CallOptions {
    /// Options for an operation that is safe to retry.
    pub const fn idempotent(label: &'static str) -> Self {
        Self {
            label,
            idempotency: Idempotency::Idempotent,
        }
    }

    /// Options for an operation that must not be repeated.
    pub const fn non_idempotent(label: &'static str) -> Self {
        Self {
            label,
            idempotency: Idempotency::NonIdempotent,
        }
    }
}

impl Default for CallOptions {
    fn default() -> Self {
        Self::idempotent("call")
    }
}

/// Lifecycle of a single invocation.
///
/// `Idle → Attempting → {Succeeded, FailedTerminal}`, with `Waiting`
/// between a retryable failure and the next `Attempting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InvocationState {
    /// Created, nothing sent yet.
    Idle,
    /// Attempt `attempt` (0-indexed) is in flight.
    Attempting {
        /// Current attempt.
        attempt: u32,
    },
    /// Attempt `attempt` failed with a retryable error; sleeping.
    Waiting {
        /// The attempt that failed.
        attempt: u32,
        /// Backoff before the next attempt.
        delay: Duration,
    },
    /// An attempt returned a payload.
    Succeeded {
        /// Total invocations made.
        attempts: u32,
    },
    /// The last error was propagated.
    FailedTerminal {
        /// Total invocations made.
        attempts: u32,
    },
}

impl InvocationState {
    /// Whether no further transitions are possible.
    pub(crate) fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded { .. } | Self::FailedTerminal { .. })
    }
}

/// Book-keeping for one call. Attempt counts only grow.
#[derive(Debug)]
pub(crate) struct Invocation {
    label: &'static str,
    attempt: u32,
    state: InvocationState,
}

impl Invocation {
    pub(crate) fn new(label: &'static str) -> Self {
        Self {
            label,
            attempt: 0,
            state: InvocationState::Idle,
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> InvocationState {
        self.state
    }

    pub(crate) fn attempt(&self) -> u32 {
        self.attempt
    }

    fn transition(&mut self, next: InvocationState) {
        debug_assert!(
            !self.state.is_terminal(),
            "invocation {} left terminal state {:?}",
            self.label,
            self.state
        );
        trace!(operation = self.label, from = ?self.state, to = ?next, "invocation transition");
        self.state = next;
    }

    pub(crate) fn begin_attempt(&mut self) {
        if let InvocationState::Waiting { .. } = self.state {
            self.attempt += 1;
        }
        self.transition(InvocationState::Attempting {
            attempt: self.attempt,
        });
    }

    pub(crate) fn wait(&mut self, delay: Duration) {
        self.transition(InvocationState::Waiting {
            attempt: self.attempt,
            delay,
        });
    }

    pub(crate) fn succeed(&mut self) {
        self.transition(InvocationState::Succeeded {
            attempts: self.attempt + 1,
        });
    }

    pub(crate) fn fail(&mut self) {
        self.transition(InvocationState::FailedTerminal {
            attempts: self.attempt + 1,
        });
    }
}

/// Runs remote operations with bounded retry-with-backoff.
///
/// The invoker holds only its (immutable) strategy, so a single instance
/// can be shared by any number of concurrent calls.
///
/// # Examples
///
/// ```rust
/// use rota_core::error::ApiError;
/// use rota_core::retry::Invoker;
///
/// # async fn example() -> Result<(), ApiError> {
/// let invoker = Invoker::standard();
///
/// let summary = invoker
///     .call(
///         |conversation_id: String| async move {
///             Ok::<_, ApiError>(format!("summary of {conversation_id}"))
///         },
///         "c-42".to_string(),
///     )
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Invoker<S = RetryPolicy> {
    strategy: S,
}

impl Invoker<RetryPolicy> {
    /// An invoker using the platform [`RetryPolicy`].
    pub fn standard() -> Self {
        Self::new(RetryPolicy::default())
    }
}

impl Default for Invoker {
    fn default() -> Self {
        Self::standard()
    }
}

impl<S: BackoffStrategy> Invoker<S> {
    /// Create an invoker driven by `strategy`.
    pub fn new(strategy: S) -> Self {
        Self { strategy }
    }

    /// The strategy in use.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Call an idempotent operation, retrying transient failures.
    ///
    /// `operation` receives a clone of `args` on every attempt.
    pub async fn call<F, Fut, A, T, E>(&self, operation: F, args: A) -> Result<T, E>
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        A: Clone,
        E: StatusError,
    {
        self.call_with(CallOptions::default(), operation, args)
            .await
    }

    /// Call an operation with explicit options.
    ///
    /// # Returns
    /// - `Ok(T)`: the payload of the first successful attempt
    /// - `Err(E)`: a non-retryable error, or the last error once the retry
    ///   budget is spent
    pub async fn call_with<F, Fut, A, T, E>(
        &self,
        options: CallOptions,
        operation: F,
        args: A,
    ) -> Result<T, E>
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        A: Clone,
        E: StatusError,
    {
        let mut invocation = Invocation::new(options.label);

        loop {
            invocation.begin_attempt();
            let attempt = invocation.attempt();
            debug!(operation = options.label, attempt, "invoking");

            let err = match operation(args.clone()).await {
                Ok(value) => {
                    invocation.succeed();
                    return Ok(value);
                }
                Err(err) => err,
            };

            if options.idempotency == Idempotency::NonIdempotent {
                debug!(
                    operation = options.label,
                    status = err.status(),
                    error = %err,
                    "non-idempotent call failed, not retrying"
                );
                invocation.fail();
                return Err(err);
            }

            if !self.strategy.should_retry(&err, attempt) {
                debug!(
                    operation = options.label,
                    status = err.status(),
                    error = %err,
                    "non-retryable failure"
                );
                invocation.fail();
                return Err(err);
            }

            if attempt >= self.strategy.max_retries() {
                warn!(
                    operation = options.label,
                    status = err.status(),
                    attempts = attempt + 1,
                    error = %err,
                    "retries exhausted"
                );
                invocation.fail();
                return Err(err);
            }

            let Some(delay) = self.strategy.next_delay(&err, attempt) else {
                invocation.fail();
                return Err(err);
            };

            warn!(
                operation = options.label,
                status = err.status(),
                attempt,
                delay_ms = delay.as_millis() as u64,
                "transient failure, retrying"
            );
            invocation.wait(delay);
            drop(err);
            tokio::time::sleep(delay).await;
        }
    }
}
