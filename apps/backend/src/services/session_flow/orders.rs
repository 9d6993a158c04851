//! Order collection and validation.

use tracing::{debug, info};

use super::SessionFlowService;
use crate::domain::{OrderSet, PhaseKind, Power, SessionStatus};
use crate::errors::domain::{DomainError, InvalidStateKind, NotFoundKind, ValidationKind};

impl SessionFlowService {
    /// Accept a player's proposed orders for the current phase.
    ///
    /// Orders outside the legal set are silently dropped; if nothing
    /// survives the filter the call fails and the power's stored orders
    /// are left untouched. The surviving set replaces any previous
    /// submission for this phase.
    pub async fn submit_orders(
        &self,
        session_id: &str,
        player_id: &str,
        proposed: Vec<String>,
    ) -> Result<(Power, OrderSet), DomainError> {
        let session = self.registry.get(session_id)?;
        let mut inner = session.inner.lock().await;

        if inner.status == SessionStatus::Done {
            return Err(DomainError::invalid_state(
                InvalidStateKind::AlreadyDone,
                format!("session '{session_id}' is finished"),
            ));
        }

        let power = inner.power_of(player_id).ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Player,
                format!("player '{player_id}' not registered in session '{session_id}'"),
            )
        })?;

        let phase = inner.engine.current_phase();
        if !PhaseKind::of(&phase).takes_orders() {
            return Err(DomainError::invalid_state(
                InvalidStateKind::WrongPhase,
                format!("phase '{phase}' does not take orders"),
            ));
        }

        let legal = inner.legal_orders_for(power);
        let accepted: Vec<String> = proposed
            .into_iter()
            .filter(|order| legal.contains(order))
            .collect();
        if accepted.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::NoValidOrders,
                format!("no legal orders for {power} survived filtering"),
            ));
        }

        debug!(
            session_id,
            player_id,
            power = %power,
            accepted = accepted.len(),
            "Orders accepted"
        );
        inner.pending_orders.insert(power, accepted.clone());
        info!(session_id, power = %power, %phase, "Orders stored");

        Ok((power, OrderSet::from(accepted)))
    }

    /// Orders currently staged for `power`, if any.
    pub async fn pending_orders(
        &self,
        session_id: &str,
        power: Power,
    ) -> Result<Option<OrderSet>, DomainError> {
        let session = self.registry.get(session_id)?;
        let inner = session.inner.lock().await;
        Ok(inner
            .pending_orders
            .get(&power)
            .cloned()
            .map(OrderSet::from))
    }
}
