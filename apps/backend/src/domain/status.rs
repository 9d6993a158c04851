//! Session lifecycle status.

use serde::Serialize;

/// Lifecycle status of a session.
///
/// Transitions are monotonic: `Forming -> Active -> Done`. A session
/// becomes `Done` exactly once, when the engine reports completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Forming,
    Active,
    Done,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Forming => "forming",
            SessionStatus::Active => "active",
            SessionStatus::Done => "done",
        }
    }
}
