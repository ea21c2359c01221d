use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use anyhow::{anyhow, Result};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::app::engagement::EngagementState;
use crate::app::feed::FeedCursor;
use crate::app::preferences::Preferences;
use crate::infra::store::MemoryStore;

/// One client's ephemeral state. Dropped with the process.
pub struct Session {
    pub id: Uuid,
    pub created_at: OffsetDateTime,
    pub preferences: Preferences<MemoryStore>,
    pub feed: FeedCursor,
    pub engagement: EngagementState,
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    page_size: usize,
}

impl SessionStore {
    pub fn new(page_size: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            page_size,
        }
    }

    /// Starts a session over a fresh preference store, so it is always a first visit.
    pub fn create(&self) -> Result<(Uuid, bool)> {
        self.create_with_store(MemoryStore::new())
    }

    pub fn create_with_store(&self, store: MemoryStore) -> Result<(Uuid, bool)> {
        let session = Session {
            id: Uuid::new_v4(),
            created_at: OffsetDateTime::now_utc(),
            preferences: Preferences::init(store),
            feed: FeedCursor::new(self.page_size),
            engagement: EngagementState::new(),
        };
        let id = session.id;
        let first_visit = session.preferences.is_first_visit();

        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| anyhow!("session store lock poisoned"))?;
        sessions.insert(id, session);
        tracing::info!(session_id = %id, first_visit, "session created");

        Ok((id, first_visit))
    }

    pub fn exists(&self, id: Uuid) -> Result<bool> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| anyhow!("session store lock poisoned"))?;
        Ok(sessions.contains_key(&id))
    }

    /// Runs `f` against the session. `None` when the session is unknown.
    pub fn with_session<T, F>(&self, id: Uuid, f: F) -> Result<Option<T>>
    where
        F: FnOnce(&mut Session) -> T,
    {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| anyhow!("session store lock poisoned"))?;
        Ok(sessions.get_mut(&id).map(f))
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map(|sessions| sessions.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
