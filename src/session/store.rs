//! Session persistence.
//!
//! [`SessionStore`] abstracts where match sessions live; [`MemoryStore`]
//! is the in-process implementation used by the server. Appends go
//! through dedicated operations so the event logs stay append-only.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::clock::TimerEvent;
use crate::error::StoreError;
use crate::score::ScoreEvent;

use super::{MatchSession, SessionPatch};

/// Backing store for match sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persists a new session.
    async fn create(&self, session: MatchSession) -> Result<MatchSession, StoreError>;

    /// Fetches a session by id.
    async fn get(&self, id: Uuid) -> Result<MatchSession, StoreError>;

    /// Applies a partial update and returns the updated session.
    async fn update(&self, id: Uuid, patch: SessionPatch) -> Result<MatchSession, StoreError>;

    /// Appends a clock lifecycle event to the session's log.
    async fn append_timer_event(
        &self,
        id: Uuid,
        event: TimerEvent,
    ) -> Result<MatchSession, StoreError>;

    /// Appends a score event to the session's log.
    async fn append_score_event(
        &self,
        id: Uuid,
        event: ScoreEvent,
    ) -> Result<MatchSession, StoreError>;
}

/// In-memory store keyed by session id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sessions: DashMap<Uuid, MatchSession>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Number of sessions held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn with_session<F>(&self, id: Uuid, mutate: F) -> Result<MatchSession, StoreError>
    where
        F: FnOnce(&mut MatchSession),
    {
        let mut entry = self.sessions.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        mutate(entry.value_mut());
        Ok(entry.value().clone())
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn create(&self, session: MatchSession) -> Result<MatchSession, StoreError> {
        self.sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn get(&self, id: Uuid) -> Result<MatchSession, StoreError> {
        self.sessions
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(StoreError::NotFound(id))
    }

    async fn update(&self, id: Uuid, patch: SessionPatch) -> Result<MatchSession, StoreError> {
        self.with_session(id, |session| patch.apply(session))
    }

    async fn append_timer_event(
        &self,
        id: Uuid,
        event: TimerEvent,
    ) -> Result<MatchSession, StoreError> {
        self.with_session(id, |session| session.timer_events.push(event))
    }

    async fn append_score_event(
        &self,
        id: Uuid,
        event: ScoreEvent,
    ) -> Result<MatchSession, StoreError> {
        self.with_session(id, |session| session.score_events.push(event))
    }
}
