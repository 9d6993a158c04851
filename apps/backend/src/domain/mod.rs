//! Pure domain types for session orchestration.
//!
//! Nothing in here talks to the adjudication engine or the HTTP layer;
//! these are the value types the services pass around.

pub mod orders;
pub mod phase;
pub mod power;
pub mod status;

pub use orders::{hold_orders, OrderSet};
pub use phase::PhaseKind;
pub use power::Power;
pub use status::SessionStatus;
