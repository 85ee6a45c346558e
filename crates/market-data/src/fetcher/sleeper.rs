use std::time::Duration;

use async_trait::async_trait;

/// Suspends the caller for a backoff delay.
///
/// The fetcher never touches the timer directly so tests can observe the
/// schedule without waiting on it.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
