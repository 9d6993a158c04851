//! A single live session: engine, roster and pending orders.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};

use time::OffsetDateTime;
use tokio::sync::Mutex;

use crate::domain::{Power, SessionStatus};
use crate::engine::Adjudicator;

/// A registered player's seat.
#[derive(Debug, Clone)]
pub struct PlayerSlot {
    pub power: Power,
    pub display_name: Option<String>,
}

/// Everything behind the session's critical region.
///
/// The engine is exclusively owned here. Any sequence of reads and
/// writes that must be atomic with respect to other callers happens
/// under the enclosing [`Session`]'s lock.
pub struct SessionInner {
    pub engine: Box<dyn Adjudicator>,
    pub rules: Vec<String>,
    pub status: SessionStatus,
    /// player_id -> seat
    pub players: BTreeMap<String, PlayerSlot>,
    /// power -> orders staged for the current phase
    pub pending_orders: BTreeMap<Power, Vec<String>>,
    pub created_at: OffsetDateTime,
}

impl SessionInner {
    pub fn new(engine: Box<dyn Adjudicator>, rules: Vec<String>) -> Self {
        Self {
            engine,
            rules,
            status: SessionStatus::Forming,
            players: BTreeMap::new(),
            pending_orders: BTreeMap::new(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    /// Power held by `player_id`, if registered.
    pub fn power_of(&self, player_id: &str) -> Option<Power> {
        self.players.get(player_id).map(|slot| slot.power)
    }

    /// Powers currently claimed by registered players.
    pub fn assigned_powers(&self) -> BTreeSet<Power> {
        self.players.values().map(|slot| slot.power).collect()
    }

    /// Powers with no registered player behind them.
    pub fn unassigned_powers(&self) -> Vec<Power> {
        let taken = self.assigned_powers();
        Power::ALL
            .into_iter()
            .filter(|p| !taken.contains(p))
            .collect()
    }

    /// A power is a dummy when no registered player controls it.
    pub fn is_dummy(&self, power: Power) -> bool {
        !self.assigned_powers().contains(&power)
    }

    /// The set of legal order strings that mention one of `power`'s
    /// units. Legality is judged by the engine's per-location tables;
    /// the substring match is how a unit's orders are picked out of
    /// them.
    pub fn legal_orders_for(&self, power: Power) -> BTreeSet<String> {
        let units = self.engine.units_of(power);
        let legal = self.engine.legal_orders();
        let mut out = BTreeSet::new();
        for orders in legal.values() {
            for order in orders {
                if units.iter().any(|unit| order.contains(unit.as_str())) {
                    out.insert(order.clone());
                }
            }
        }
        out
    }
}

/// Handle shared between HTTP handlers and the automation loop.
pub struct Session {
    pub id: String,
    /// Flipped by automation start/stop; read by handlers that report
    /// session summaries without taking the lock.
    pub automation_enabled: AtomicBool,
    pub inner: Mutex<SessionInner>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("automation_enabled", &self.automation_enabled)
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(id: String, inner: SessionInner) -> Self {
        Self {
            id,
            automation_enabled: AtomicBool::new(false),
            inner: Mutex::new(inner),
        }
    }

    pub fn automation_enabled(&self) -> bool {
        self.automation_enabled.load(Ordering::SeqCst)
    }

    pub fn set_automation_enabled(&self, enabled: bool) {
        self.automation_enabled.store(enabled, Ordering::SeqCst);
    }
}
