//! In-memory per-user session store.
//!
//! Each user owns one `Arc<Mutex<UserSession>>` slot. The map lock is only
//! held to find or insert a slot; all reads and writes of a session happen
//! under that user's own mutex, so updates for one user are serialized while
//! different users never contend.

use crate::{UserId, UserSession};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Exclusive handle to one user's session
pub type SessionSlot = Arc<Mutex<UserSession>>;

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<UserId, SessionSlot>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot for an existing user, without creating one
    pub async fn get(&self, user: UserId) -> Option<SessionSlot> {
        self.sessions.read().await.get(&user).cloned()
    }

    /// Slot for a user, created empty on first use
    pub async fn get_or_create(&self, user: UserId) -> SessionSlot {
        if let Some(slot) = self.get(user).await {
            return slot;
        }

        let mut sessions = self.sessions.write().await;
        // Another task may have inserted between the two locks
        let slot = sessions.entry(user).or_insert_with(|| {
            tracing::debug!(%user, "Created session");
            Arc::new(Mutex::new(UserSession::default()))
        });
        Arc::clone(slot)
    }

    /// Copy of a user's session, if one exists
    pub async fn snapshot(&self, user: UserId) -> Option<UserSession> {
        let slot = self.get(user).await?;
        let session = slot.lock().await;
        Some(session.clone())
    }

    /// Number of users with a session
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
