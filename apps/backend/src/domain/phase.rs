//! Phase-kind classification.
//!
//! Phase tokens (e.g. "S1901M") are opaque strings owned by the
//! adjudication engine. The one piece of the convention this service
//! relies on is the trailing character: `M` is movement, `R` is
//! retreat, anything else does not take orders (adjustment phases end
//! in `A`). Phase semantics beyond that are never reimplemented here.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseKind {
    Movement,
    Retreat,
    /// Any phase that does not collect orders through this service.
    Adjustment,
}

impl PhaseKind {
    /// Classify an engine phase token by its trailing character.
    pub fn of(phase: &str) -> PhaseKind {
        match phase.chars().last() {
            Some('M') => PhaseKind::Movement,
            Some('R') => PhaseKind::Retreat,
            _ => PhaseKind::Adjustment,
        }
    }

    /// Whether orders are collected and resolved during this phase.
    pub fn takes_orders(self) -> bool {
        matches!(self, PhaseKind::Movement | PhaseKind::Retreat)
    }
}
