//! In-memory session storage with idle eviction.
//!
//! Each session lives behind its own async mutex so requests for one game are
//! serialized while different games never contend. Eviction cancels the session's
//! token, which lets an in-flight LLM call notice that its result is no longer wanted.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;

use whodunit_domain::{Case, Session, SessionId};

use crate::infrastructure::ports::ClockPort;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),
}

/// One stored session plus its lifecycle bookkeeping.
pub struct SessionHandle {
    id: SessionId,
    case: Arc<Case>,
    session: Mutex<Session>,
    last_active_ms: AtomicI64,
    cancel: CancellationToken,
}

impl SessionHandle {
    fn new(session: Session, now_ms: i64) -> Self {
        Self {
            id: session.id(),
            case: Arc::clone(session.case()),
            session: Mutex::new(session),
            last_active_ms: AtomicI64::new(now_ms),
            cancel: CancellationToken::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The case is immutable, so reading it needs no lock.
    pub fn case(&self) -> &Arc<Case> {
        &self.case
    }

    /// Exclusive access to the session. Held across the whole operation, LLM call included.
    pub async fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().await
    }

    /// Cancelled once the session has been evicted or deleted.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_evicted(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn touch(&self, now_ms: i64) {
        self.last_active_ms.fetch_max(now_ms, Ordering::AcqRel);
    }

    fn last_active_ms(&self) -> i64 {
        self.last_active_ms.load(Ordering::Acquire)
    }
}

/// Owner of every live session.
pub struct SessionStore {
    sessions: DashMap<SessionId, Arc<SessionHandle>>,
    clock: Arc<dyn ClockPort>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(clock: Arc<dyn ClockPort>, idle_timeout: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            clock,
            idle_timeout,
        }
    }

    fn now_ms(&self) -> i64 {
        self.clock.now().timestamp_millis()
    }

    fn is_expired(&self, handle: &SessionHandle, now_ms: i64) -> bool {
        let idle_ms = i64::try_from(self.idle_timeout.as_millis()).unwrap_or(i64::MAX);
        now_ms.saturating_sub(handle.last_active_ms()) > idle_ms
    }

    /// Store a fresh session for `case` and return its handle.
    pub fn create(&self, case: Arc<Case>) -> Arc<SessionHandle> {
        let now = self.clock.now();
        let session = Session::new(SessionId::new(), case, now);
        let handle = Arc::new(SessionHandle::new(session, now.timestamp_millis()));
        self.sessions.insert(handle.id(), Arc::clone(&handle));
        tracing::info!(session_id = %handle.id(), "Session created");
        handle
    }

    /// Look up a live session. Expired sessions are evicted on the spot.
    pub fn get(&self, id: SessionId) -> Result<Arc<SessionHandle>, StoreError> {
        let handle = self
            .sessions
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(StoreError::NotFound(id))?;

        if self.is_expired(&handle, self.now_ms()) {
            self.evict(id, "idle");
            return Err(StoreError::NotFound(id));
        }
        Ok(handle)
    }

    /// Record activity on a session so it is not considered idle.
    pub fn touch(&self, handle: &SessionHandle) {
        handle.touch(self.now_ms());
    }

    /// Remove a session. Returns false when it was already gone.
    pub fn delete(&self, id: SessionId) -> bool {
        self.evict(id, "deleted")
    }

    /// Remove every session idle for longer than the timeout. Returns the count removed.
    pub fn evict_idle(&self) -> usize {
        let now_ms = self.now_ms();
        let expired: Vec<SessionId> = self
            .sessions
            .iter()
            .filter(|entry| self.is_expired(entry.value(), now_ms))
            .map(|entry| *entry.key())
            .collect();

        expired
            .into_iter()
            .filter(|id| self.evict(*id, "idle"))
            .count()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn evict(&self, id: SessionId, reason: &'static str) -> bool {
        match self.sessions.remove(&id) {
            Some((_, handle)) => {
                handle.cancel.cancel();
                tracing::info!(session_id = %id, reason, "Session evicted");
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{three_suspect_case, ManualClock};

    fn store(clock: &Arc<ManualClock>) -> SessionStore {
        SessionStore::new(clock.clone(), Duration::from_secs(60))
    }

    #[tokio::test]
    async fn create_then_get_returns_same_session() {
        let clock = Arc::new(ManualClock::new());
        let store = store(&clock);

        let handle = store.create(Arc::new(three_suspect_case()));
        let fetched = store.get(handle.id()).unwrap();

        assert_eq!(fetched.id(), handle.id());
        assert_eq!(fetched.lock().await.id(), handle.id());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let clock = Arc::new(ManualClock::new());
        let store = store(&clock);
        let id = SessionId::new();

        assert_eq!(store.get(id).err(), Some(StoreError::NotFound(id)));
    }

    #[test]
    fn expired_session_is_evicted_lazily_on_get() {
        let clock = Arc::new(ManualClock::new());
        let store = store(&clock);
        let handle = store.create(Arc::new(three_suspect_case()));

        clock.advance(Duration::from_secs(61));

        assert!(store.get(handle.id()).is_err());
        assert!(handle.is_evicted());
        assert!(store.is_empty());
    }

    #[test]
    fn touch_keeps_session_alive() {
        let clock = Arc::new(ManualClock::new());
        let store = store(&clock);
        let handle = store.create(Arc::new(three_suspect_case()));

        clock.advance(Duration::from_secs(45));
        store.touch(&handle);
        clock.advance(Duration::from_secs(45));

        assert!(store.get(handle.id()).is_ok());
    }

    #[test]
    fn evict_idle_only_removes_expired_sessions() {
        let clock = Arc::new(ManualClock::new());
        let store = store(&clock);
        let stale = store.create(Arc::new(three_suspect_case()));
        clock.advance(Duration::from_secs(50));
        let fresh = store.create(Arc::new(three_suspect_case()));
        clock.advance(Duration::from_secs(20));

        assert_eq!(store.evict_idle(), 1);
        assert!(stale.is_evicted());
        assert!(!fresh.is_evicted());
        assert!(store.get(fresh.id()).is_ok());
    }

    #[test]
    fn delete_cancels_token() {
        let clock = Arc::new(ManualClock::new());
        let store = store(&clock);
        let handle = store.create(Arc::new(three_suspect_case()));

        assert!(store.delete(handle.id()));
        assert!(!store.delete(handle.id()));
        assert!(handle.cancellation().is_cancelled());
    }
}
