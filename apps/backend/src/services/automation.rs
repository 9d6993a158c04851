//! Autonomous per-session tick loop.
//!
//! One background task per automated session: each tick fills dummy
//! orders, resolves the phase and sleeps. Loops are independent; a
//! failure in one never touches another session's loop.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::errors::domain::{DomainError, InvalidStateKind};
use crate::services::session_flow::SessionFlowService;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(60);

/// Outcome of a start request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutomationStatus {
    Started,
    /// A loop was already ticking for this session; nothing changed.
    AlreadyRunning,
}

#[derive(Clone)]
pub struct Automation {
    flow: SessionFlowService,
    tasks: Arc<DashMap<String, Arc<CancellationToken>>>,
}

impl Automation {
    pub fn new(flow: SessionFlowService) -> Self {
        Self {
            flow,
            tasks: Arc::new(DashMap::new()),
        }
    }

    /// Spawn the tick loop for a session. Idempotent: a second start
    /// while the first loop is alive reports [`AutomationStatus::AlreadyRunning`].
    pub fn start(
        &self,
        session_id: &str,
        interval: Duration,
    ) -> Result<AutomationStatus, DomainError> {
        let session = self.flow.registry().get(session_id)?;

        let token = {
            let mut entry = self
                .tasks
                .entry(session_id.to_string())
                .or_insert_with(|| Arc::new(CancellationToken::new()));
            if !entry.value().is_cancelled() && session.automation_enabled() {
                return Ok(AutomationStatus::AlreadyRunning);
            }
            // Previous loop was stopped; replace its token so the old
            // task's cleanup cannot cancel the new one.
            *entry.value_mut() = Arc::new(CancellationToken::new());
            // Claim the session before the entry guard drops so a
            // racing start observes the claim and reports
            // AlreadyRunning instead of spawning a second loop.
            session.set_automation_enabled(true);
            Arc::clone(entry.value())
        };

        info!(session_id, interval_ms = interval.as_millis() as u64, "Automation started");

        let flow = self.flow.clone();
        let tasks = Arc::clone(&self.tasks);
        let id = session_id.to_string();
        tokio::spawn(async move {
            Self::run_loop(flow, &id, interval, Arc::clone(&token)).await;
            // Remove our own entry, but only if it still holds our
            // token; a restart may already have installed a fresh one.
            tasks.remove_if(&id, |_, t| Arc::ptr_eq(t, &token));
        });

        Ok(AutomationStatus::Started)
    }

    /// Request cooperative cancellation of a session's loop.
    pub fn stop(&self, session_id: &str) -> Result<(), DomainError> {
        let Some(entry) = self.tasks.get(session_id) else {
            return Err(DomainError::invalid_state(
                InvalidStateKind::AutomationNotRunning,
                format!("no automation running for session '{session_id}'"),
            ));
        };
        entry.value().cancel();
        drop(entry);

        if let Ok(session) = self.flow.registry().get(session_id) {
            session.set_automation_enabled(false);
        }
        info!(session_id, "Automation stop requested");
        Ok(())
    }

    pub fn is_running(&self, session_id: &str) -> bool {
        self.tasks
            .get(session_id)
            .is_some_and(|entry| !entry.value().is_cancelled())
    }

    async fn run_loop(
        flow: SessionFlowService,
        session_id: &str,
        interval: Duration,
        token: Arc<CancellationToken>,
    ) {
        loop {
            if token.is_cancelled() {
                debug!(session_id, "Automation cancelled");
                break;
            }

            match Self::tick(&flow, session_id).await {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    warn!(session_id, error = %e, "Automation tick failed");
                    break;
                }
            }

            tokio::select! {
                _ = token.cancelled() => {
                    debug!(session_id, "Automation cancelled during sleep");
                    break;
                }
                _ = tokio::time::sleep(interval) => {}
            }
        }

        if let Ok(session) = flow.registry().get(session_id) {
            session.set_automation_enabled(false);
        }
        info!(session_id, "Automation loop exited");
    }

    /// One tick. Returns `Ok(false)` when the loop should end quietly
    /// (session gone or finished).
    async fn tick(flow: &SessionFlowService, session_id: &str) -> Result<bool, DomainError> {
        match flow.fill_dummy_orders(session_id).await {
            Ok(_) => {}
            Err(DomainError::NotFound(_, _)) => return Ok(false),
            Err(e) => return Err(e),
        }

        match flow.resolve_phase(session_id).await {
            Ok(outcome) => {
                debug!(session_id, phase = %outcome.phase, "Automation tick resolved");
                Ok(outcome.next_phase.is_some())
            }
            Err(DomainError::NotFound(_, _)) => Ok(false),
            Err(DomainError::InvalidState(InvalidStateKind::AlreadyDone, _)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
