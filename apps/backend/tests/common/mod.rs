#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

use backend::domain::Power;
use backend::engine::scripted::ScriptedFactory;
use backend::engine::{Adjudicator, EngineError, EngineFactory, PublicState};
use backend::errors::domain::DomainError;
use backend::services::persistence::{NoopPersistence, PersistenceHook};
use backend::state::app_state::AppState;

// Logging is auto-installed for every test binary that pulls this in
#[ctor::ctor]
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Persistence hook that records every checkpoint it receives.
#[derive(Default)]
pub struct RecordingPersistence {
    checkpoints: Mutex<Vec<(String, String)>>,
}

impl RecordingPersistence {
    pub fn checkpoints(&self) -> Vec<(String, String)> {
        self.checkpoints.lock().unwrap().clone()
    }
}

impl PersistenceHook for RecordingPersistence {
    fn checkpoint(&self, session_id: &str, state: &PublicState) -> Result<(), DomainError> {
        self.checkpoints
            .lock()
            .unwrap()
            .push((session_id.to_string(), state.phase.clone()));
        Ok(())
    }
}

/// App state backed by the deterministic engine, with a recording
/// persistence hook exposed for assertions.
pub fn app_state_with_recorder(turn_limit: u32) -> (AppState, Arc<RecordingPersistence>) {
    let recorder = Arc::new(RecordingPersistence::default());
    let state = AppState::new(
        Arc::new(ScriptedFactory::new(turn_limit)),
        Arc::clone(&recorder) as Arc<dyn PersistenceHook>,
    );
    (state, recorder)
}

pub fn app_state(turn_limit: u32) -> AppState {
    app_state_with_recorder(turn_limit).0
}

pub fn app_state_with_factory(factory: Arc<dyn EngineFactory>) -> AppState {
    AppState::new(factory, Arc::new(NoopPersistence))
}

/// Engine stuck in a phase that takes no orders.
pub struct AdjustmentPhaseEngine;

impl Adjudicator for AdjustmentPhaseEngine {
    fn current_phase(&self) -> String {
        "W1901A".to_string()
    }

    fn units_of(&self, _power: Power) -> Vec<String> {
        Vec::new()
    }

    fn legal_orders(&self) -> BTreeMap<String, Vec<String>> {
        BTreeMap::new()
    }

    fn set_orders(&mut self, _power: Power, _orders: &[String]) -> Result<(), EngineError> {
        Ok(())
    }

    fn process(&mut self) -> Result<(), EngineError> {
        Ok(())
    }

    fn is_done(&self) -> bool {
        false
    }

    fn public_state(&self) -> PublicState {
        PublicState {
            phase: self.current_phase(),
            units: BTreeMap::new(),
            centers: BTreeMap::new(),
            controlled_powers: Vec::new(),
        }
    }
}

pub struct AdjustmentPhaseFactory;

impl EngineFactory for AdjustmentPhaseFactory {
    fn create(
        &self,
        _session_id: &str,
        _rules: &[String],
    ) -> Result<Box<dyn Adjudicator>, EngineError> {
        Ok(Box::new(AdjustmentPhaseEngine))
    }
}

/// Create a session with a fixed id and two registered players, started.
pub async fn started_session(state: &AppState, id: &str) {
    state
        .flow
        .create_session(Some(id.to_string()), None)
        .await
        .unwrap();
    state
        .flow
        .register_player(id, "alice", Some(backend::domain::Power::France), None)
        .await
        .unwrap();
    state
        .flow
        .register_player(id, "bob", Some(backend::domain::Power::England), None)
        .await
        .unwrap();
    state.flow.start_session(id).await.unwrap();
}
