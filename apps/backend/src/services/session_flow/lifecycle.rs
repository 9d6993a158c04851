//! Session creation, registration, start and listing.

use rand::Rng;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use super::SessionFlowService;
use crate::domain::{Power, SessionStatus};
use crate::errors::domain::{ConflictKind, DomainError, InvalidStateKind};
use crate::sessions::session::{PlayerSlot, SessionInner};

/// Summary of one session as reported by list/create.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub status: SessionStatus,
    pub phase: String,
    pub players: usize,
    pub automation_enabled: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A confirmed registration.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSeat {
    pub player_id: String,
    pub power: Power,
}

fn summarize(session: &crate::sessions::session::Session, inner: &SessionInner) -> SessionSummary {
    SessionSummary {
        session_id: session.id.clone(),
        status: inner.status,
        phase: inner.engine.current_phase(),
        players: inner.players.len(),
        automation_enabled: session.automation_enabled(),
        created_at: inner.created_at,
    }
}

impl SessionFlowService {
    /// Create a session. A missing id is minted; missing rules fall
    /// back to the default rule set.
    pub async fn create_session(
        &self,
        id: Option<String>,
        rules: Option<Vec<String>>,
    ) -> Result<SessionSummary, DomainError> {
        let id = id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let rules = rules.unwrap_or_else(crate::engine::default_rules);
        let engine = self.engines.create(&id, &rules)?;
        let session = self
            .registry
            .create(id.clone(), SessionInner::new(engine, rules))?;
        info!(session_id = %id, "Session created");

        let inner = session.inner.lock().await;
        self.checkpoint(&session.id, &inner);
        Ok(summarize(&session, &inner))
    }

    /// Register a player, assigning the requested power or a random
    /// free one.
    pub async fn register_player(
        &self,
        session_id: &str,
        player_id: &str,
        power: Option<Power>,
        display_name: Option<String>,
    ) -> Result<PlayerSeat, DomainError> {
        let session = self.registry.get(session_id)?;
        let mut inner = session.inner.lock().await;

        if inner.status != SessionStatus::Forming {
            return Err(DomainError::invalid_state(
                InvalidStateKind::Other("ALREADY_STARTED".into()),
                format!("session '{session_id}' is no longer forming"),
            ));
        }
        if inner.players.contains_key(player_id) {
            return Err(DomainError::conflict(
                ConflictKind::DuplicatePlayer,
                format!("player '{player_id}' already registered"),
            ));
        }

        let assigned = match power {
            Some(requested) => {
                if inner.assigned_powers().contains(&requested) {
                    return Err(DomainError::conflict(
                        ConflictKind::PowerTaken,
                        format!("power {requested} already taken"),
                    ));
                }
                requested
            }
            None => {
                let free = inner.unassigned_powers();
                if free.is_empty() {
                    return Err(DomainError::conflict(
                        ConflictKind::PowerTaken,
                        "all powers are taken",
                    ));
                }
                free[rand::rng().random_range(0..free.len())]
            }
        };

        inner.players.insert(
            player_id.to_string(),
            PlayerSlot {
                power: assigned,
                display_name,
            },
        );
        info!(session_id, player_id, power = %assigned, "Player registered");
        self.checkpoint(session_id, &inner);

        Ok(PlayerSeat {
            player_id: player_id.to_string(),
            power: assigned,
        })
    }

    /// Move a forming session to active. Requires at least two players;
    /// the remaining powers stay dummies and are driven by the bot
    /// generator.
    pub async fn start_session(&self, session_id: &str) -> Result<SessionSummary, DomainError> {
        let session = self.registry.get(session_id)?;
        let mut inner = session.inner.lock().await;

        if inner.status != SessionStatus::Forming {
            return Err(DomainError::invalid_state(
                InvalidStateKind::Other("ALREADY_STARTED".into()),
                format!("session '{session_id}' already started"),
            ));
        }
        if inner.players.len() < 2 {
            return Err(DomainError::invalid_state(
                InvalidStateKind::NotEnoughPlayers,
                "at least 2 players required",
            ));
        }
        if inner.players.len() < Power::ALL.len() {
            warn!(
                session_id,
                players = inner.players.len(),
                "Starting with dummy powers"
            );
        }

        inner.status = SessionStatus::Active;
        info!(session_id, players = inner.players.len(), "Session started");
        self.checkpoint(session_id, &inner);

        Ok(summarize(&session, &inner))
    }

    /// Summaries of every live session.
    pub async fn list_sessions(&self) -> Vec<SessionSummary> {
        let mut out = Vec::new();
        for session in self.registry.snapshot() {
            let inner = session.inner.lock().await;
            out.push(summarize(&session, &inner));
        }
        out.sort_by(|a, b| a.session_id.cmp(&b.session_id));
        out
    }

    pub async fn session_summary(&self, session_id: &str) -> Result<SessionSummary, DomainError> {
        let session = self.registry.get(session_id)?;
        let inner = session.inner.lock().await;
        Ok(summarize(&session, &inner))
    }

    /// Spectator projection of the game state.
    pub async fn public_state(
        &self,
        session_id: &str,
    ) -> Result<crate::engine::PublicState, DomainError> {
        let session = self.registry.get(session_id)?;
        let inner = session.inner.lock().await;
        Ok(inner.engine.public_state())
    }

    /// Units currently belonging to `power`.
    pub async fn units_of(
        &self,
        session_id: &str,
        power: Power,
    ) -> Result<Vec<String>, DomainError> {
        let session = self.registry.get(session_id)?;
        let inner = session.inner.lock().await;
        Ok(inner.engine.units_of(power))
    }

    /// Legal orders for `power` in the current phase, sorted.
    pub async fn legal_orders(
        &self,
        session_id: &str,
        power: Power,
    ) -> Result<Vec<String>, DomainError> {
        let session = self.registry.get(session_id)?;
        let inner = session.inner.lock().await;
        Ok(inner.legal_orders_for(power).into_iter().collect())
    }

    /// Kind of the current phase (movement, retreat or adjustment).
    pub async fn phase_kind(
        &self,
        session_id: &str,
    ) -> Result<crate::domain::PhaseKind, DomainError> {
        let session = self.registry.get(session_id)?;
        let inner = session.inner.lock().await;
        Ok(crate::domain::PhaseKind::of(&inner.engine.current_phase()))
    }

    /// Drop a session from the registry. The caller is responsible for
    /// stopping automation first.
    pub fn delete_session(&self, session_id: &str) -> Result<(), DomainError> {
        self.registry.remove(session_id)?;
        info!(session_id, "Session deleted");
        Ok(())
    }
}
