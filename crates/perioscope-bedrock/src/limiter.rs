//! Sliding-window rate limiting with exponential backoff.
//!
//! # Window
//!
//! The limiter keeps the dispatch instant of every call made in the last
//! `window_secs`. Before each dispatch it purges instants that have aged
//! out; if the window is still full it sleeps until the oldest instant
//! expires, then checks again. An instant is recorded only when a call is
//! actually dispatched.
//!
//! Admission goes through a fair async mutex, so concurrent callers are
//! served in the order they asked. The mutex is held while waiting, which
//! suspends only the tasks queued behind it; no thread is blocked. Dropping
//! a waiting future releases the mutex without recording anything.
//!
//! # Retry
//!
//! A [`CallError::RateLimited`] response is retried after
//! `min(base_delay × 2^attempt, max_delay)`, at most `max_retries` times.
//! Every retry goes back through the window. Any other error is returned
//! immediately.

use std::collections::VecDeque;
use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::error::{CallError, InvokeError};

/// Quota and backoff settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimiterConfig {
    /// Maximum dispatches inside one window.
    pub max_requests: usize,
    pub window_secs: u64,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    /// Retries after the first quota failure. The call after the last
    /// retry surfaces the error.
    pub max_retries: u32,
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self {
            max_requests: 14,
            window_secs: 60,
            base_delay_ms: 1_000,
            max_delay_ms: 10_000,
            max_retries: 3,
        }
    }
}

impl LimiterConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    /// `min(base × 2^attempt, max)`, with `attempt` starting at 0.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let base = Duration::from_millis(self.base_delay_ms);
        let max = Duration::from_millis(self.max_delay_ms);
        base.saturating_mul(2u32.saturating_pow(attempt)).min(max)
    }
}

/// Shared request quota for calls to the generative model.
///
/// Construct one per process and share it behind an `Arc`.
#[derive(Debug)]
pub struct RateLimiter {
    config: LimiterConfig,
    dispatched: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    pub fn new(config: LimiterConfig) -> Self {
        let config = LimiterConfig {
            max_requests: config.max_requests.max(1),
            ..config
        };
        Self {
            config,
            dispatched: Mutex::new(VecDeque::with_capacity(config.max_requests)),
        }
    }

    pub fn config(&self) -> &LimiterConfig {
        &self.config
    }

    /// Number of dispatches still inside the window.
    pub async fn in_window(&self) -> usize {
        let mut dispatched = self.dispatched.lock().await;
        purge(&mut dispatched, Instant::now(), self.config.window());
        dispatched.len()
    }

    /// Forget all recorded dispatches.
    pub async fn reset(&self) {
        self.dispatched.lock().await.clear();
    }

    /// Run `request` under the quota, retrying quota failures with backoff.
    ///
    /// `request` is called once per dispatch and must perform exactly one
    /// external call.
    pub async fn invoke<T, F, Fut>(&self, mut request: F) -> Result<T, InvokeError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, CallError>>,
    {
        let mut attempt: u32 = 0;
        loop {
            self.acquire().await;

            match request().await {
                Ok(value) => return Ok(value),
                Err(CallError::RateLimited(message)) if attempt < self.config.max_retries => {
                    let delay = self.config.backoff_delay(attempt);
                    warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "rate limited by model service, backing off: {message}"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(CallError::RateLimited(message)) => {
                    warn!(attempts = attempt + 1, "rate limit retries exhausted");
                    return Err(InvokeError::RetriesExhausted {
                        attempts: attempt + 1,
                        message,
                    });
                }
                Err(CallError::Service(message)) => return Err(InvokeError::Service(message)),
            }
        }
    }

    /// Wait for a free slot in the window and record the dispatch.
    async fn acquire(&self) {
        let window = self.config.window();
        let mut dispatched = self.dispatched.lock().await;

        loop {
            let now = Instant::now();
            purge(&mut dispatched, now, window);

            if dispatched.len() < self.config.max_requests {
                dispatched.push_back(now);
                return;
            }

            let Some(&oldest) = dispatched.front() else {
                continue;
            };
            let wait = window.saturating_sub(now.duration_since(oldest));
            debug!(
                in_window = dispatched.len(),
                wait_ms = wait.as_millis() as u64,
                "request window full, deferring dispatch"
            );
            tokio::time::sleep(wait).await;
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(LimiterConfig::default())
    }
}

fn purge(dispatched: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(&oldest) = dispatched.front() {
        if now.duration_since(oldest) >= window {
            dispatched.pop_front();
        } else {
            break;
        }
    }
}
