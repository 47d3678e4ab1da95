use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use time::OffsetDateTime;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use super::log::SessionLog;
use crate::chat::relay::ChatRelay;

/// Everything one client owns. Nothing here outlives the session.
pub struct Session {
    pub id: Uuid,
    pub created_at: OffsetDateTime,
    pub log: SessionLog,
    pub relay: ChatRelay,
    pub rng: StdRng,
}

impl Session {
    pub fn new(relay: ChatRelay, rng: StdRng) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: OffsetDateTime::now_utc(),
            log: SessionLog::default(),
            relay,
            rng,
        }
    }
}

pub type SharedSession = Arc<Mutex<Session>>;

struct Entry {
    session: SharedSession,
    last_seen: Instant,
}

/// Live sessions by id. A request locks only its own session, so a slow
/// chat call never holds up another client. Sessions idle for longer than
/// `idle_ttl` are dropped.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Entry>>>,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            inner: Arc::default(),
            idle_ttl,
        }
    }

    /// Stores a new session, sweeping idle ones first.
    pub async fn insert(&self, session: Session) -> SharedSession {
        let id = session.id;
        let shared = Arc::new(Mutex::new(session));
        let mut map = self.inner.write().await;

        let before = map.len();
        map.retain(|_, e| e.last_seen.elapsed() < self.idle_ttl);
        let expired = before - map.len();
        if expired > 0 {
            info!(expired, live = map.len(), "expired idle sessions");
        }

        map.insert(
            id,
            Entry {
                session: shared.clone(),
                last_seen: Instant::now(),
            },
        );
        shared
    }

    /// Looks up a live session and marks it as seen. An idle session is
    /// removed and reported as missing.
    pub async fn get(&self, id: Uuid) -> Option<SharedSession> {
        let mut map = self.inner.write().await;
        let entry = map.get_mut(&id)?;
        if entry.last_seen.elapsed() >= self.idle_ttl {
            map.remove(&id);
            info!(session_id = %id, "session expired");
            return None;
        }
        entry.last_seen = Instant::now();
        Some(entry.session.clone())
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.inner.write().await.remove(&id).is_some()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    #[tokio::test]
    async fn insert_get_remove() {
        let state = AppState::fake();
        let store = state.sessions.clone();
        let session = state.open_session();
        let id = session.id;

        store.insert(session).await;
        let shared = store.get(id).await.expect("session stored");
        assert_eq!(shared.lock().await.id, id);

        assert!(store.remove(id).await);
        assert!(store.get(id).await.is_none());
        assert!(!store.remove(id).await);
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let state = AppState::fake();
        let a = state.sessions.insert(state.open_session()).await;
        let b = state.sessions.insert(state.open_session()).await;

        a.lock().await.log.record_chat("q", "a");
        assert_eq!(a.lock().await.log.ai_chat().len(), 2);
        assert!(b.lock().await.log.ai_chat().is_empty());
        assert_ne!(a.lock().await.id, b.lock().await.id);
    }

    #[tokio::test]
    async fn idle_sessions_expire_on_lookup() {
        let state = AppState::fake();
        let store = SessionStore::new(Duration::from_millis(50));
        let session = state.open_session();
        let id = session.id;
        store.insert(session).await;

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(store.get(id).await.is_none());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn insert_sweeps_abandoned_sessions() {
        let state = AppState::fake();
        let store = SessionStore::new(Duration::from_millis(50));
        store.insert(state.open_session()).await;
        store.insert(state.open_session()).await;
        assert_eq!(store.len().await, 2);

        tokio::time::sleep(Duration::from_millis(80)).await;
        let fresh = state.open_session();
        let fresh_id = fresh.id;
        store.insert(fresh).await;

        assert_eq!(store.len().await, 1);
        assert!(store.get(fresh_id).await.is_some());
    }

    #[tokio::test]
    async fn lookups_keep_a_session_alive() {
        let state = AppState::fake();
        let store = SessionStore::new(Duration::from_millis(400));
        let session = state.open_session();
        let id = session.id;
        store.insert(session).await;

        for _ in 0..3 {
            tokio::time::sleep(Duration::from_millis(200)).await;
            assert!(store.get(id).await.is_some());
        }
    }
}
