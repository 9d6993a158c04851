//! Session flow orchestration service.
//!
//! This service provides the operations that move a session through its
//! life: creation, player registration, order submission, dummy-power
//! order generation and phase resolution. Each mutation acquires the
//! session's lock once and performs all dependent engine calls under it.

mod bots;
mod lifecycle;
mod orders;
mod resolve;

use std::sync::Arc;

use tracing::warn;

use crate::engine::EngineFactory;
use crate::services::persistence::PersistenceHook;
use crate::sessions::session::SessionInner;
use crate::sessions::SessionRegistry;

pub use lifecycle::{PlayerSeat, SessionSummary};
pub use resolve::PhaseOutcome;

/// Session flow service. Cheap to clone; handlers and the automation
/// loop share one set of registry, engine factory and persistence hook.
#[derive(Clone)]
pub struct SessionFlowService {
    pub(crate) registry: Arc<SessionRegistry>,
    pub(crate) engines: Arc<dyn EngineFactory>,
    pub(crate) persistence: Arc<dyn PersistenceHook>,
}

impl SessionFlowService {
    pub fn new(
        registry: Arc<SessionRegistry>,
        engines: Arc<dyn EngineFactory>,
        persistence: Arc<dyn PersistenceHook>,
    ) -> Self {
        Self {
            registry,
            engines,
            persistence,
        }
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Hand the session's current state to the persistence hook. Hook
    /// failures are logged and never abort the mutation that just
    /// happened.
    pub(crate) fn checkpoint(&self, session_id: &str, inner: &SessionInner) {
        let state = inner.engine.public_state();
        if let Err(e) = self.persistence.checkpoint(session_id, &state) {
            warn!(session_id, error = %e, "Checkpoint failed");
        }
    }
}
