//! Concurrent session registry.
//!
//! Keyed by session id. Create, lookup and remove are linearizable per
//! key; cross-session iteration sees a point-in-time snapshot per shard
//! and never blocks writers for long.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::sessions::session::{Session, SessionInner};

#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, Arc<Session>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new session, failing if the id is already taken.
    pub fn create(&self, id: String, inner: SessionInner) -> Result<Arc<Session>, DomainError> {
        match self.sessions.entry(id.clone()) {
            Entry::Occupied(_) => Err(DomainError::conflict(
                ConflictKind::DuplicateSession,
                format!("session '{id}' already exists"),
            )),
            Entry::Vacant(vacant) => {
                let session = Arc::new(Session::new(id, inner));
                vacant.insert(Arc::clone(&session));
                Ok(session)
            }
        }
    }

    pub fn get(&self, id: &str) -> Result<Arc<Session>, DomainError> {
        self.sessions
            .get(id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Session, format!("session '{id}' not found"))
            })
    }

    pub fn remove(&self, id: &str) -> Result<Arc<Session>, DomainError> {
        self.sessions
            .remove(id)
            .map(|(_, session)| session)
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Session, format!("session '{id}' not found"))
            })
    }

    /// Point-in-time snapshot of every live session handle.
    pub fn snapshot(&self) -> Vec<Arc<Session>> {
        self.sessions
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::default_rules;
    use crate::engine::scripted::ScriptedEngine;
    use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
    use crate::sessions::session::SessionInner;

    use super::SessionRegistry;

    fn inner() -> SessionInner {
        SessionInner::new(Box::new(ScriptedEngine::new(default_rules())), default_rules())
    }

    #[test]
    fn create_then_get_returns_the_same_session() {
        let registry = SessionRegistry::new();
        let created = registry.create("g1".to_string(), inner()).unwrap();
        let fetched = registry.get("g1").unwrap();
        assert!(std::sync::Arc::ptr_eq(&created, &fetched));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_create_is_a_conflict() {
        let registry = SessionRegistry::new();
        registry.create("g1".to_string(), inner()).unwrap();
        let err = registry.create("g1".to_string(), inner()).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Conflict(ConflictKind::DuplicateSession, _)
        ));
    }

    #[test]
    fn get_and_remove_missing_are_not_found() {
        let registry = SessionRegistry::new();
        assert!(matches!(
            registry.get("nope").unwrap_err(),
            DomainError::NotFound(NotFoundKind::Session, _)
        ));
        assert!(matches!(
            registry.remove("nope").unwrap_err(),
            DomainError::NotFound(NotFoundKind::Session, _)
        ));
    }

    #[test]
    fn remove_frees_the_id_for_reuse() {
        let registry = SessionRegistry::new();
        registry.create("g1".to_string(), inner()).unwrap();
        registry.remove("g1").unwrap();
        assert!(registry.is_empty());
        registry.create("g1".to_string(), inner()).unwrap();
    }
}
