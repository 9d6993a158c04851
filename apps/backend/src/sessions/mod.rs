//! Session state and the in-memory session registry.

pub mod registry;
pub mod session;

pub use registry::SessionRegistry;
pub use session::{PlayerSlot, Session, SessionInner};
