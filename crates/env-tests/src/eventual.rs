//! Eventual consistency helpers for timing-dependent tests.
//!
//! Feature-flag writes against an organization with children are processed by
//! a background job, so flow tests poll rather than assert immediately. This
//! is separate from the fixed-schedule health prober in [`crate::probe`]:
//! polling here uses exponential backoff against a category timeout.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

/// Categories of eventual consistency with documented timeouts.
#[derive(Debug, Clone, Copy)]
pub enum ConsistencyCategory {
    /// A background hierarchy job draining to COMPLETED.
    JobCompletion,

    /// Child organizations observing a value written at an ancestor.
    FlagPropagation,
}

impl ConsistencyCategory {
    /// Maximum time to wait for this category.
    pub fn timeout(&self) -> Duration {
        match self {
            ConsistencyCategory::JobCompletion => Duration::from_secs(60),
            ConsistencyCategory::FlagPropagation => Duration::from_secs(30),
        }
    }

    fn initial_delay(&self) -> Duration {
        Duration::from_millis(500)
    }
}

/// Poll `condition` until it returns true or the category timeout elapses.
///
/// Backoff starts at 500ms and doubles per attempt, capped at the remaining
/// time. Returns a descriptive error on timeout.
pub async fn assert_eventually<F, Fut>(
    category: ConsistencyCategory,
    mut condition: F,
) -> Result<(), String>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let timeout = category.timeout();
    let mut delay = category.initial_delay();
    let start = std::time::Instant::now();

    loop {
        if condition().await {
            return Ok(());
        }

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            return Err(format!(
                "Condition not met within {:?} (category: {:?})",
                timeout, category
            ));
        }

        sleep(delay).await;

        delay *= 2;
        let remaining = timeout.saturating_sub(elapsed);
        if delay > remaining {
            delay = remaining;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_timeouts() {
        assert_eq!(
            ConsistencyCategory::JobCompletion.timeout(),
            Duration::from_secs(60)
        );
        assert_eq!(
            ConsistencyCategory::FlagPropagation.timeout(),
            Duration::from_secs(30)
        );
    }

    #[tokio::test]
    async fn succeeds_immediately_without_sleeping() {
        let result =
            assert_eventually(ConsistencyCategory::FlagPropagation, || async { true }).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn succeeds_after_a_retry() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let attempts = Arc::new(AtomicUsize::new(0));
        let attempts_clone = attempts.clone();

        let result = assert_eventually(ConsistencyCategory::FlagPropagation, move || {
            let attempts = attempts_clone.clone();
            async move {
                let count = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                count >= 2
            }
        })
        .await;
        assert!(result.is_ok());
        assert!(attempts.load(Ordering::SeqCst) >= 2);
    }
}
