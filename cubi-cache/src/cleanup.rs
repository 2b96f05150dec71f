//! Background sweeping of expired entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::TtlStore;

/// Anything that can drop its expired entries in one pass.
pub trait Sweep: Send + Sync + 'static {
    /// Removes expired entries, returning how many were dropped.
    fn sweep(&self) -> usize;
}

impl<V: Send + Sync + 'static> Sweep for TtlStore<V> {
    fn sweep(&self) -> usize {
        TtlStore::sweep(self)
    }
}

/// Periodic sweeper running as a tokio task.
///
/// The task is running from [`CleanupScheduler::start`] until
/// [`CleanupScheduler::stop`], which consumes the handle so it can only be
/// called once. Dropping the handle signals the task as well, without waiting
/// for it.
pub struct CleanupScheduler {
    shutdown_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
    period: Duration,
}

impl CleanupScheduler {
    /// Spawns the sweeper on the current tokio runtime.
    ///
    /// The first sweep happens one `period` after start.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn start<S: Sweep>(target: Arc<S>, period: Duration) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(Self::run(target, period, shutdown_rx));

        Self {
            shutdown_tx,
            task: Some(task),
            period,
        }
    }

    async fn run<S: Sweep>(target: Arc<S>, period: Duration, mut shutdown_rx: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(period);
        // The first tick completes immediately
        ticker.tick().await;
        info!(?period, "Cleanup scheduler started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = target.sweep();
                    if removed > 0 {
                        debug!(removed, "Swept expired entries");
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Cleanup scheduler stopped");
    }

    /// Returns the sweep period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns true until the background task has exited.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().map_or(false, |t| !t.is_finished())
    }

    /// Stops the sweeper and waits for the task to exit.
    ///
    /// A sweep already in progress completes first.
    pub async fn stop(mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "Cleanup task ended abnormally");
            }
        }
    }
}

impl Drop for CleanupScheduler {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSweep(AtomicUsize);

    impl Sweep for CountingSweep {
        fn sweep(&self) -> usize {
            self.0.fetch_add(1, Ordering::SeqCst);
            0
        }
    }

    #[tokio::test]
    async fn test_cleanup_removes_expired() {
        let store = Arc::new(TtlStore::new(Duration::from_nanos(1)));
        store.set("foo", "0x1111111111111111111111111111111111111111".to_string());

        let scheduler = CleanupScheduler::start(Arc::clone(&store), Duration::from_millis(100));
        tokio::time::sleep(Duration::from_millis(250)).await;

        assert!(store.is_empty());
        scheduler.stop().await;
    }

    #[tokio::test]
    async fn test_cleanup_keeps_live_entries() {
        let store = Arc::new(TtlStore::new(Duration::from_secs(3600)));
        store.set("foo", 1u8);

        let scheduler = CleanupScheduler::start(Arc::clone(&store), Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(store.get("foo"), Some(1));
        scheduler.stop().await;
    }

    #[tokio::test]
    async fn test_stop_ends_task() {
        let counter = Arc::new(CountingSweep(AtomicUsize::new(0)));
        let scheduler = CleanupScheduler::start(Arc::clone(&counter), Duration::from_millis(10));
        assert!(scheduler.is_running());
        assert_eq!(scheduler.period(), Duration::from_millis(10));

        tokio::time::sleep(Duration::from_millis(60)).await;
        scheduler.stop().await;

        let swept = counter.0.load(Ordering::SeqCst);
        assert!(swept > 0);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(counter.0.load(Ordering::SeqCst), swept);
    }

    #[tokio::test]
    async fn test_stop_before_first_sweep() {
        let counter = Arc::new(CountingSweep(AtomicUsize::new(0)));
        let scheduler = CleanupScheduler::start(Arc::clone(&counter), Duration::from_secs(3600));
        scheduler.stop().await;
        assert_eq!(counter.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_drop_signals_task() {
        let counter = Arc::new(CountingSweep(AtomicUsize::new(0)));
        let scheduler = CleanupScheduler::start(Arc::clone(&counter), Duration::from_millis(10));
        drop(scheduler);

        tokio::time::sleep(Duration::from_millis(30)).await;
        let swept = counter.0.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(counter.0.load(Ordering::SeqCst), swept);
    }
}
