//! Cancellation context for evaluations
//!
//! Wraps a [`CancellationToken`] and an optional deadline. Network work is
//! raced against both; whichever fires first turns into
//! [`EvaluationError::Cancelled`].

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::error::EvaluationError;

/// Caller-supplied cancellation and deadline
#[derive(Debug, Clone, Default)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that never cancels on its own
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A context driven by an existing token
    #[must_use]
    pub const fn with_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Set a deadline `timeout` from now
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    /// The token backing this context
    #[must_use]
    pub const fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Cancel the context and every clone of it
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether the context is already done
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.token.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Resolves once the context is cancelled or its deadline passes
    pub async fn done(&self) -> EvaluationError {
        match self.deadline {
            Some(deadline) => tokio::select! {
                () = self.token.cancelled() => cancelled(),
                () = tokio::time::sleep_until(deadline) => deadline_exceeded(),
            },
            None => {
                self.token.cancelled().await;
                cancelled()
            },
        }
    }

    /// Run `work` unless the context finishes first
    pub async fn run<F, T>(&self, work: F) -> Result<T, EvaluationError>
    where
        F: Future<Output = Result<T, EvaluationError>>,
    {
        if self.token.is_cancelled() {
            return Err(cancelled());
        }
        tokio::select! {
            biased;
            err = self.done() => Err(err),
            result = work => result,
        }
    }
}

fn cancelled() -> EvaluationError {
    EvaluationError::Cancelled("context cancelled".to_string())
}

fn deadline_exceeded() -> EvaluationError {
    EvaluationError::Cancelled("deadline exceeded".to_string())
}
