pub mod automation;
pub mod persistence;
pub mod session_flow;
