#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod domain;
pub mod engine;
pub mod error;
pub mod errors;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod sessions;
pub mod state;

// Re-exports for public API
pub use error::AppError;
pub use middleware::cors::cors_middleware;
pub use services::automation::{Automation, AutomationStatus};
pub use services::session_flow::SessionFlowService;
pub use sessions::SessionRegistry;
pub use state::app_state::AppState;
