use std::sync::Arc;

use crate::engine::scripted::ScriptedFactory;
use crate::engine::EngineFactory;
use crate::services::automation::Automation;
use crate::services::persistence::{NoopPersistence, PersistenceHook};
use crate::services::session_flow::SessionFlowService;
use crate::sessions::SessionRegistry;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub flow: SessionFlowService,
    pub automation: Automation,
}

impl AppState {
    /// Create a new AppState with the given engine factory and
    /// persistence hook
    pub fn new(engines: Arc<dyn EngineFactory>, persistence: Arc<dyn PersistenceHook>) -> Self {
        let registry = Arc::new(SessionRegistry::new());
        let flow = SessionFlowService::new(registry, engines, persistence);
        let automation = Automation::new(flow.clone());
        Self { flow, automation }
    }

    /// Create an AppState backed by the built-in deterministic engine
    pub fn with_scripted_engine() -> Self {
        Self::new(
            Arc::new(ScriptedFactory::default()),
            Arc::new(NoopPersistence),
        )
    }
}
