//! The periodic tick source.
//!
//! A [`TickSource`] owns at most one repeating scheduled callback at a
//! time. Installing a new callback tears the previous one down first, and
//! teardown is idempotent, so two overlapping sources can never
//! double-increment the clock. Dropping the source cancels it.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Handle to the repeating tick callback driving a clock.
#[derive(Debug, Default)]
pub struct TickSource {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl TickSource {
    /// Creates a source with nothing installed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a tick task is currently installed.
    #[must_use]
    pub const fn is_installed(&self) -> bool {
        self.handle.is_some()
    }

    /// Installs `on_tick` to run every `period`, tearing down any
    /// previously installed callback first.
    ///
    /// The first invocation happens one full period after installation.
    pub fn install<F, Fut>(&mut self, period: Duration, mut on_tick: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        self.halt();

        let cancel = CancellationToken::new();
        self.cancel = cancel.clone();
        self.handle = Some(tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            loop {
                tokio::select! {
                    () = cancel.cancelled() => {
                        debug!("tick source cancelled");
                        break;
                    }
                    _ = interval.tick() => {
                        on_tick().await;
                    }
                }
            }
        }));
    }

    /// Cancels the installed callback, if any. Safe to call repeatedly.
    pub fn halt(&mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for TickSource {
    fn drop(&mut self) {
        self.halt();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_period() {
        let count = Arc::new(AtomicU32::new(0));
        let mut source = TickSource::new();
        let c = Arc::clone(&count);
        source.install(Duration::from_secs(1), move || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::advance(Duration::from_millis(3500)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert_eq!(count.load(Ordering::SeqCst), 3);
        source.halt();
    }

    #[tokio::test(start_paused = true)]
    async fn test_install_replaces_previous_source() {
        let first = Arc::new(AtomicU32::new(0));
        let second = Arc::new(AtomicU32::new(0));
        let mut source = TickSource::new();

        let f = Arc::clone(&first);
        source.install(Duration::from_secs(1), move || {
            let f = Arc::clone(&f);
            async move {
                f.fetch_add(1, Ordering::SeqCst);
            }
        });

        let s = Arc::clone(&second);
        source.install(Duration::from_secs(1), move || {
            let s = Arc::clone(&s);
            async move {
                s.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::advance(Duration::from_millis(2500)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        // Only the newest callback ever fires
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_halt_stops_ticking_and_is_idempotent() {
        let count = Arc::new(AtomicU32::new(0));
        let mut source = TickSource::new();
        let c = Arc::clone(&count);
        source.install(Duration::from_secs(1), move || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::advance(Duration::from_millis(1500)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(count.load(Ordering::SeqCst), 1);

        source.halt();
        source.halt();
        assert!(!source.is_installed());

        tokio::time::advance(Duration::from_secs(5)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_task() {
        let count = Arc::new(AtomicU32::new(0));
        {
            let mut source = TickSource::new();
            let c = Arc::clone(&count);
            source.install(Duration::from_secs(1), move || {
                let c = Arc::clone(&c);
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                }
            });
        }

        tokio::time::advance(Duration::from_secs(3)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
