//! Per-question answer window.
//!
//! A [`QuestionTimer`] owns the cancellation token for one question. Answering,
//! ending the battle or dropping the timer cancels it, so a stale timeout can
//! never resolve a question that is no longer active.

use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// How a question's answer window closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Answered(String),
    /// The window expired; adjudicated as no answer.
    TimedOut,
    /// The question was torn down before an answer or timeout.
    Cancelled,
}

impl Submission {
    /// The submitted answer, `None` for timeouts and cancellations.
    pub fn answer(&self) -> Option<&str> {
        match self {
            Submission::Answered(answer) => Some(answer.as_str()),
            Submission::TimedOut | Submission::Cancelled => None,
        }
    }
}

pub struct QuestionTimer {
    deadline: Instant,
    token: CancellationToken,
}

impl QuestionTimer {
    pub fn start(limit: Duration) -> Self {
        Self {
            deadline: Instant::now() + limit,
            token: CancellationToken::new(),
        }
    }

    /// Handle for cancelling from elsewhere (battle end, view teardown).
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// Wait for `answer`, the deadline or cancellation, whichever comes first.
    /// An answer source that ends without a value counts as cancellation.
    pub async fn await_answer<F>(&self, answer: F) -> Submission
    where
        F: Future<Output = Option<String>>,
    {
        let outcome = tokio::select! {
            biased;
            _ = self.token.cancelled() => Submission::Cancelled,
            submitted = answer => match submitted {
                Some(text) => Submission::Answered(text.trim().to_string()),
                None => Submission::Cancelled,
            },
            _ = tokio::time::sleep_until(self.deadline) => Submission::TimedOut,
        };
        // The window is closed either way; nothing may fire after this.
        self.token.cancel();
        tracing::debug!(?outcome, "question window closed");
        outcome
    }
}

impl Drop for QuestionTimer {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
