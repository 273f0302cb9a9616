use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, Notify, RwLock};
use tracing::{debug, info, warn};

use crate::models::ScheduleSnapshot;
use crate::services::fetcher::ScheduleFetcher;
use crate::services::persistence::SnapshotStore;

/// Age reported before any fetch has ever succeeded. Signals "unknown/very
/// stale" to callers without an error channel.
pub const AGE_UNKNOWN_MINUTES: i64 = 9999;

/// Returns true when the cached data is too old to serve without attempting
/// a refresh. `None` means no fetch has ever succeeded.
pub fn is_stale(
    last_success_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    ttl: chrono::Duration,
) -> bool {
    match last_success_at {
        Some(at) => now - at > ttl,
        None => true,
    }
}

#[derive(Default)]
struct CacheState {
    current: Option<Arc<ScheduleSnapshot>>,
    last_success_at: Option<DateTime<Utc>>,
}

/// Process-wide schedule cache with single-flight refresh.
///
/// Constructed once at startup and shared behind an `Arc`. Concurrent callers
/// either get the cached snapshot immediately, wait (bounded) for a refresh
/// already in flight, or become the refresher themselves. At most one fetch
/// runs at a time.
pub struct ScheduleCacheService {
    fetcher: Arc<dyn ScheduleFetcher>,
    store: SnapshotStore,
    ttl: chrono::Duration,
    wait_timeout: Duration,
    state: RwLock<CacheState>,
    refresh_lock: Mutex<()>,
    refreshing: AtomicBool,
    refresh_done: Notify,
}

impl ScheduleCacheService {
    pub fn new(
        fetcher: Arc<dyn ScheduleFetcher>,
        store: SnapshotStore,
        ttl: chrono::Duration,
        wait_timeout: Duration,
    ) -> Self {
        info!(ttl_minutes = ttl.num_minutes(), "schedule cache initialized");
        Self {
            fetcher,
            store,
            ttl,
            wait_timeout,
            state: RwLock::new(CacheState::default()),
            refresh_lock: Mutex::new(()),
            refreshing: AtomicBool::new(false),
            refresh_done: Notify::new(),
        }
    }

    /// Returns the current snapshot, refreshing it first when stale or when
    /// `force_refresh` is set. Fetch failures never surface here; the previous
    /// snapshot (or `None` before the first success) is returned instead.
    pub async fn get_schedule(&self, force_refresh: bool) -> Option<Arc<ScheduleSnapshot>> {
        if !force_refresh {
            let state = self.state.read().await;
            if state.current.is_some() && !is_stale(state.last_success_at, Utc::now(), self.ttl) {
                debug!(age_minutes = age_of(state.last_success_at), "schedule cache hit");
                return state.current.clone();
            }
        }

        // A refresh is already running: wait for it rather than piling on a
        // second fetch, then return whatever is current at that point.
        if self.refreshing.load(Ordering::Acquire) {
            debug!("schedule refresh in progress, waiting");
            self.wait_for_refresh().await;
            return self.state.read().await.current.clone();
        }

        let _guard = self.refresh_lock.lock().await;

        // Double check under the lock: another caller may have refreshed
        // between our first check and acquiring ownership.
        if !force_refresh {
            let state = self.state.read().await;
            if state.current.is_some() && !is_stale(state.last_success_at, Utc::now(), self.ttl) {
                return state.current.clone();
            }
        }

        self.refreshing.store(true, Ordering::Release);
        info!(force_refresh, "schedule refresh started");

        match self.fetcher.fetch().await {
            Ok(snapshot) if !snapshot.clinics.is_empty() => {
                let snapshot = Arc::new(snapshot);
                {
                    let mut state = self.state.write().await;
                    state.current = Some(Arc::clone(&snapshot));
                    state.last_success_at = Some(Utc::now());
                }
                info!(
                    clinics = snapshot.total_clinics,
                    slots = snapshot.total_slots(),
                    "schedule updated"
                );
                if let Err(e) = self.store.save(&snapshot).await {
                    warn!(error = %e, "cache file save failed");
                }
            }
            Ok(_) => {
                warn!("schedule fetch returned no clinics, keeping previous snapshot");
            }
            Err(e) => {
                warn!(error = %e, "schedule fetch failed, keeping previous snapshot");
            }
        }

        self.refreshing.store(false, Ordering::Release);
        self.refresh_done.notify_waiters();

        self.state.read().await.current.clone()
    }

    /// Whatever snapshot is cached right now, without triggering or waiting
    /// on a refresh.
    pub async fn current_snapshot(&self) -> Option<Arc<ScheduleSnapshot>> {
        self.state.read().await.current.clone()
    }

    /// Whole minutes since the last successful fetch, or
    /// [`AGE_UNKNOWN_MINUTES`] when nothing has ever been fetched.
    pub async fn age_minutes(&self) -> i64 {
        age_of(self.state.read().await.last_success_at)
    }

    /// Blocks until the in-flight refresh clears its flag, bounded by the
    /// configured wait timeout. Timing out is an accepted outcome: the caller
    /// falls back to whatever snapshot is current, it does not start a fetch
    /// of its own.
    async fn wait_for_refresh(&self) {
        let completed = async {
            loop {
                let notified = self.refresh_done.notified();
                if !self.refreshing.load(Ordering::Acquire) {
                    return;
                }
                notified.await;
            }
        };

        if tokio::time::timeout(self.wait_timeout, completed).await.is_err() {
            warn!(
                timeout_secs = self.wait_timeout.as_secs(),
                "timed out waiting for schedule refresh, serving current data"
            );
        }
    }
}

fn age_of(last_success_at: Option<DateTime<Utc>>) -> i64 {
    match last_success_at {
        Some(at) => (Utc::now() - at).num_minutes(),
        None => AGE_UNKNOWN_MINUTES,
    }
}
