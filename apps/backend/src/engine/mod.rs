//! Adjudication engine boundary.
//!
//! The engine is an external collaborator: it owns the board model,
//! legal-move generation and turn resolution. This module pins down the
//! exact surface the orchestration core consumes and nothing more.
//! Phase tokens, unit descriptors and order strings are opaque here;
//! the only convention relied upon is the trailing phase-kind character
//! (see [`crate::domain::PhaseKind`]).

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::domain::Power;

pub mod scripted;

/// Rule set handed to the engine when a session is created without an
/// explicit one.
pub const DEFAULT_RULES: [&str; 6] = [
    "CD_DUMMIES",
    "ALWAYS_WAIT",
    "POWER_CHOICE",
    "IGNORE_ERRORS",
    "NO_DEADLINE",
    "NO_PRESS",
];

pub fn default_rules() -> Vec<String> {
    DEFAULT_RULES.iter().map(|r| r.to_string()).collect()
}

/// Failure inside the adjudication engine.
///
/// Always surfaced as a typed result; an engine failure must never
/// corrupt session state or take down another session's processing.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("adjudication error: {0}")]
    Adjudication(String),
}

/// Read-only projection of the game the engine exposes to spectators.
#[derive(Debug, Clone, Serialize)]
pub struct PublicState {
    pub phase: String,
    pub units: BTreeMap<String, Vec<String>>,
    pub centers: BTreeMap<String, Vec<String>>,
    pub controlled_powers: Vec<String>,
}

/// The adjudication surface consumed by the orchestration core.
///
/// Exactly one engine instance exists per session and is exclusively
/// owned by it; all calls happen inside that session's critical region.
pub trait Adjudicator: Send {
    /// Opaque phase token, e.g. "S1901M". The trailing character encodes
    /// the phase kind.
    fn current_phase(&self) -> String;

    /// Unit descriptors (e.g. "A PAR") currently belonging to `power`.
    fn units_of(&self, power: Power) -> Vec<String>;

    /// Every legal order for the current phase, keyed by location.
    fn legal_orders(&self) -> BTreeMap<String, Vec<String>>;

    /// Stage orders for one power. Does not resolve anything.
    fn set_orders(&mut self, power: Power, orders: &[String]) -> Result<(), EngineError>;

    /// Resolve the staged orders and advance exactly one phase.
    fn process(&mut self) -> Result<(), EngineError>;

    /// Whether the game has reached completion.
    fn is_done(&self) -> bool;

    /// Spectator projection of the current game state.
    fn public_state(&self) -> PublicState;
}

/// Mints one exclusively owned engine per session.
pub trait EngineFactory: Send + Sync {
    fn create(
        &self,
        session_id: &str,
        rules: &[String],
    ) -> Result<Box<dyn Adjudicator>, EngineError>;
}
