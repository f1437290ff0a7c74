//! Live sessions, one per browser tab.
//!
//! Each session sits behind its own mutex so that triggers for one session
//! run one at a time while different sessions never wait on each other.
//! Tabs that go away without ending their session are evicted once they
//! have been idle for longer than the registry's timeout.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use signal_advisor_api_types::SessionId;
use signal_advisor_core::{Clock, Scenario, Session};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

struct Entry {
    session: Arc<Mutex<Session>>,
    last_seen: DateTime<Utc>,
}

pub struct SessionRegistry {
    scenario: Arc<Scenario>,
    clock: Arc<dyn Clock>,
    idle_timeout: TimeDelta,
    next_id: AtomicU64,
    sessions: RwLock<HashMap<SessionId, Entry>>,
}

impl SessionRegistry {
    pub fn new(scenario: Arc<Scenario>, clock: Arc<dyn Clock>, idle_timeout: TimeDelta) -> Self {
        Self {
            scenario,
            clock,
            idle_timeout,
            next_id: AtomicU64::new(1),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub async fn create(&self, speed_kmh: Option<f64>) -> signal_advisor_core::Result<(SessionId, Arc<Mutex<Session>>)> {
        let session = Session::new(Arc::clone(&self.scenario), Arc::clone(&self.clock), speed_kmh)?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let session = Arc::new(Mutex::new(session));
        let now = self.clock.now();

        let mut sessions = self.sessions.write().await;
        let evicted = Self::retain_active(&mut sessions, now, self.idle_timeout);
        sessions.insert(
            id,
            Entry {
                session: Arc::clone(&session),
                last_seen: now,
            },
        );
        info!(id, live = sessions.len(), evicted, "session registered");

        Ok((id, session))
    }

    /// Look up a session and mark it as recently used.
    pub async fn get(&self, id: SessionId) -> Option<Arc<Mutex<Session>>> {
        let now = self.clock.now();
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id)?;
        entry.last_seen = entry.last_seen.max(now);
        Some(Arc::clone(&entry.session))
    }

    pub async fn remove(&self, id: SessionId) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!(id, "session ended");
        }
        removed
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drop every session idle for longer than the timeout. Returns how many
    /// were dropped.
    pub async fn evict_idle(&self) -> usize {
        let now = self.clock.now();
        let mut sessions = self.sessions.write().await;
        let evicted = Self::retain_active(&mut sessions, now, self.idle_timeout);
        if evicted > 0 {
            info!(evicted, live = sessions.len(), "idle sessions evicted");
        }
        evicted
    }

    /// Run [`evict_idle`](Self::evict_idle) every `period` until the task is aborted.
    pub fn spawn_reaper(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let registry = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticks = tokio::time::interval(period);
            ticks.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                registry.evict_idle().await;
            }
        })
    }

    fn retain_active(sessions: &mut HashMap<SessionId, Entry>, now: DateTime<Utc>, idle_timeout: TimeDelta) -> usize {
        let before = sessions.len();
        sessions.retain(|id, entry| {
            let keep = now - entry.last_seen <= idle_timeout;
            if !keep {
                debug!(id, last_seen = %entry.last_seen, "evicting idle session");
            }
            keep
        });
        before - sessions.len()
    }
}
