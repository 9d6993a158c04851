//! Phase resolution.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use super::SessionFlowService;
use crate::domain::{hold_orders, PhaseKind, Power, SessionStatus};
use crate::errors::domain::{DomainError, InvalidStateKind};

/// Result of one successful resolution step.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseOutcome {
    /// Phase that was resolved.
    pub phase: String,
    pub status: SessionStatus,
    /// Phase now current, absent when the game finished.
    pub next_phase: Option<String>,
}

impl SessionFlowService {
    /// Resolve the current phase.
    ///
    /// Powers with no staged orders default to holding every unit, so
    /// a phase can always resolve regardless of who showed up. Pushing
    /// orders, advancing the engine, clearing staged orders and
    /// updating the status happen under one lock acquisition; no
    /// submission can land in between. The final order sets are built
    /// aside and `pending_orders` is only cleared after the engine
    /// advance succeeds, so an engine failure leaves the session
    /// exactly as it was.
    pub async fn resolve_phase(&self, session_id: &str) -> Result<PhaseOutcome, DomainError> {
        let session = self.registry.get(session_id)?;
        let mut inner = session.inner.lock().await;

        if inner.status == SessionStatus::Done {
            return Err(DomainError::invalid_state(
                InvalidStateKind::AlreadyDone,
                format!("session '{session_id}' is finished"),
            ));
        }

        let phase = inner.engine.current_phase();
        if !PhaseKind::of(&phase).takes_orders() {
            return Err(DomainError::invalid_state(
                InvalidStateKind::WrongPhase,
                format!("cannot resolve during phase '{phase}'"),
            ));
        }

        let mut final_orders: BTreeMap<Power, Vec<String>> = inner.pending_orders.clone();
        for power in Power::ALL {
            if final_orders.contains_key(&power) {
                continue;
            }
            let units = inner.engine.units_of(power);
            if units.is_empty() {
                continue;
            }
            final_orders.insert(power, hold_orders(&units));
        }

        for (power, orders) in &final_orders {
            inner.engine.set_orders(*power, orders)?;
        }
        inner.engine.process()?;
        inner.pending_orders.clear();

        let outcome = if inner.engine.is_done() {
            inner.status = SessionStatus::Done;
            info!(session_id, %phase, "Session finished");
            PhaseOutcome {
                phase,
                status: SessionStatus::Done,
                next_phase: None,
            }
        } else {
            let next_phase = inner.engine.current_phase();
            info!(session_id, %phase, %next_phase, "Phase resolved");
            PhaseOutcome {
                phase,
                status: inner.status,
                next_phase: Some(next_phase),
            }
        };

        self.checkpoint(session_id, &inner);

        Ok(outcome)
    }
}
