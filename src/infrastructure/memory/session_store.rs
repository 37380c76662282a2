//! In-Memory Session Store Implementation

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::application::ports::{Session, SessionError, SessionStorePort};

/// 内存会话存储
pub struct InMemorySessionStore {
    sessions: DashMap<String, Session>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStorePort for InMemorySessionStore {
    fn create(&self, session: Session) -> Result<String, SessionError> {
        let token = session.token.clone();
        if self.sessions.contains_key(&token) {
            return Err(SessionError::AlreadyExists);
        }
        let user_id = session.user_id;
        self.sessions.insert(token.clone(), session);
        tracing::debug!(user_id = %user_id, "Session created");
        Ok(token)
    }

    fn get(&self, token: &str) -> Option<Session> {
        let session = self.sessions.get(token).map(|s| s.clone())?;
        if session.is_expired_at(Utc::now()) {
            // 过期会话立即移除，不等待 sweeper
            self.sessions.remove(token);
            tracing::debug!(user_id = %session.user_id, "Expired session rejected");
            return None;
        }
        Some(session)
    }

    fn touch(&self, token: &str) {
        if let Some(mut session) = self.sessions.get_mut(token) {
            session.last_seen = Utc::now();
        }
    }

    fn remove(&self, token: &str) -> Result<(), SessionError> {
        self.sessions
            .remove(token)
            .map(|(_, session)| {
                tracing::debug!(user_id = %session.user_id, "Session removed");
            })
            .ok_or(SessionError::NotFound)
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired_at(now));
        before.saturating_sub(self.sessions.len())
    }

    fn len(&self) -> usize {
        self.sessions.len()
    }
}
