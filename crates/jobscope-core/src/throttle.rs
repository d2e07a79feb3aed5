//! Fixed-delay request throttling for polite fetching.
//!
//! Wraps any [`Fetcher`] so that consecutive requests are spaced by at least
//! a configured delay, optionally plus a random jitter.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use jobscope_core::throttle::{ThrottleConfig, ThrottledFetcher};
//!
//! # use jobscope_core::traits::Fetcher;
//! # #[derive(Clone)] struct MyFetcher;
//! # impl Fetcher for MyFetcher {
//! #     async fn fetch(&self, _: &str) -> Result<String, jobscope_core::AppError> { todo!() }
//! # }
//! let config = ThrottleConfig::new(Duration::from_secs(2))
//!     .with_jitter(Duration::from_secs(1));
//! let fetcher = ThrottledFetcher::new(MyFetcher, config);
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::traits::Fetcher;

/// Configuration for the throttled fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrottleConfig {
    /// Minimum delay between consecutive requests.
    pub delay: Duration,

    /// Maximum random jitter added on top of `delay` (uniform [0, jitter]).
    /// `Duration::ZERO` disables it.
    pub jitter: Duration,
}

impl ThrottleConfig {
    /// Create a new config with the given delay and no jitter.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            jitter: Duration::ZERO,
        }
    }

    pub fn with_jitter(mut self, jitter: Duration) -> Self {
        self.jitter = jitter;
        self
    }

    /// Compute the effective delay for a single wait (delay + random jitter).
    fn effective_delay(&self) -> Duration {
        let jitter_ms = self.jitter.as_millis() as u64;
        if jitter_ms == 0 {
            return self.delay;
        }
        self.delay + Duration::from_millis(rand::rng().random_range(0..=jitter_ms))
    }
}

impl Default for ThrottleConfig {
    /// 2 second delay, up to 1 second of jitter.
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(2),
            jitter: Duration::from_secs(1),
        }
    }
}

/// A [`Fetcher`] wrapper that spaces out consecutive requests.
///
/// The first request goes out immediately; every later one waits until the
/// effective delay has elapsed since the previous request started.
#[derive(Clone)]
pub struct ThrottledFetcher<F> {
    inner: F,
    config: ThrottleConfig,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl<F: Fetcher> ThrottledFetcher<F> {
    pub fn new(inner: F, config: ThrottleConfig) -> Self {
        Self {
            inner,
            config,
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    async fn wait_turn(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(previous) = *last {
            let required = self.config.effective_delay();
            let elapsed = previous.elapsed();
            if elapsed < required {
                let sleep_duration = required - elapsed;
                tracing::debug!(sleep_ms = %sleep_duration.as_millis(), "Throttling request");
                tokio::time::sleep(sleep_duration).await;
            }
        }

        *last = Some(Instant::now());
    }
}

impl<F: Fetcher> Fetcher for ThrottledFetcher<F> {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        self.wait_turn().await;
        self.inner.fetch(url).await
    }
}
