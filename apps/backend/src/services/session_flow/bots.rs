//! Order generation for dummy powers.

use rand::Rng;
use tracing::debug;

use super::SessionFlowService;
use crate::domain::{PhaseKind, Power, SessionStatus};
use crate::errors::domain::DomainError;

impl SessionFlowService {
    /// Stage one random legal order for every dummy power.
    ///
    /// Powers with a registered player are never touched, and a dummy
    /// that already has staged orders keeps them (repeated calls within
    /// one phase are idempotent). A dummy with no legal orders is
    /// skipped. Returns the powers that received orders on this call.
    pub async fn fill_dummy_orders(&self, session_id: &str) -> Result<Vec<Power>, DomainError> {
        let session = self.registry.get(session_id)?;
        let mut inner = session.inner.lock().await;

        if inner.status == SessionStatus::Done {
            return Ok(Vec::new());
        }
        if !PhaseKind::of(&inner.engine.current_phase()).takes_orders() {
            return Ok(Vec::new());
        }

        let mut filled = Vec::new();
        for power in Power::ALL {
            if !inner.is_dummy(power) || inner.pending_orders.contains_key(&power) {
                continue;
            }
            let legal: Vec<String> = inner.legal_orders_for(power).into_iter().collect();
            if legal.is_empty() {
                continue;
            }
            let order = legal[rand::rng().random_range(0..legal.len())].clone();
            debug!(session_id, power = %power, %order, "Bot order staged");
            inner.pending_orders.insert(power, vec![order]);
            filled.push(power);
        }
        Ok(filled)
    }
}
