//! Checkpoint hook invoked after every successful phase resolution.

use tracing::debug;

use crate::engine::PublicState;
use crate::errors::domain::DomainError;

/// Called with the post-resolution state of a session. Implementations
/// may write it anywhere; a hook failure is logged by the caller and
/// never rolls back the resolution.
pub trait PersistenceHook: Send + Sync {
    fn checkpoint(&self, session_id: &str, state: &PublicState) -> Result<(), DomainError>;
}

/// Default hook: logs and discards.
#[derive(Default)]
pub struct NoopPersistence;

impl PersistenceHook for NoopPersistence {
    fn checkpoint(&self, session_id: &str, state: &PublicState) -> Result<(), DomainError> {
        debug!(session_id, phase = %state.phase, "Checkpoint (noop)");
        Ok(())
    }
}
