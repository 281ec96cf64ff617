use async_trait::async_trait;
use std::time::Duration;

use crate::utils::logger::Logger;

/// Every fixed wait in the bot goes through a `Pacer` so tests can observe
/// pacing without sleeping.
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Silent wait (retry backoff).
    async fn sleep(&self, duration: Duration);

    /// Visible wait: a live `label... N` line ticking once per second, ending
    /// on 0, `seconds` ticks in total.
    async fn countdown(&self, label: &str, seconds: u64);
}

/// Real pacer backed by the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct CountdownPacer;

#[async_trait]
impl Pacer for CountdownPacer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    async fn countdown(&self, label: &str, seconds: u64) {
        if seconds == 0 {
            return;
        }
        for remaining in (0..seconds).rev() {
            tokio::time::sleep(Duration::from_secs(1)).await;
            Logger::countdown(label, remaining);
        }
        println!();
    }
}
