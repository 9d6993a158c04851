//! Error codes for the session backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the session backend API.
///
/// This enum ensures type safety and prevents the use of ad-hoc error
/// codes. Each variant maps to a canonical SCREAMING_SNAKE_CASE string
/// that appears in HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Resource Not Found
    /// Session not found
    SessionNotFound,
    /// Player not registered in the session
    PlayerNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Session id already in use
    SessionExists,
    /// Player id already registered
    PlayerExists,
    /// Power already taken or unavailable
    PowerTaken,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // Invalid State
    /// Operation not valid in the engine's current phase
    WrongPhase,
    /// Session already finished
    AlreadyDone,
    /// Session needs at least two players to start
    NotEnoughPlayers,
    /// No automation loop is running for the session
    AutomationNotRunning,
    /// General invalid state error
    InvalidState,

    // Request Validation
    /// No submitted order survived legality filtering
    NoValidOrders,
    /// Unknown power name
    InvalidPower,
    /// General validation error
    ValidationError,

    // System Errors
    /// Adjudication engine failure
    EngineFailure,
    /// Internal server error
    InternalError,
}

impl ErrorCode {
    /// Canonical SCREAMING_SNAKE_CASE string for this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::SessionNotFound => "SESSION_NOT_FOUND",
            ErrorCode::PlayerNotFound => "PLAYER_NOT_FOUND",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::SessionExists => "SESSION_EXISTS",
            ErrorCode::PlayerExists => "PLAYER_EXISTS",
            ErrorCode::PowerTaken => "POWER_TAKEN",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::WrongPhase => "WRONG_PHASE",
            ErrorCode::AlreadyDone => "ALREADY_DONE",
            ErrorCode::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",
            ErrorCode::AutomationNotRunning => "AUTOMATION_NOT_RUNNING",
            ErrorCode::InvalidState => "INVALID_STATE",
            ErrorCode::NoValidOrders => "NO_VALID_ORDERS",
            ErrorCode::InvalidPower => "INVALID_POWER",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::EngineFailure => "ENGINE_FAILURE",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Every code, for exhaustive checks in tests.
    pub const ALL: [ErrorCode; 17] = [
        ErrorCode::SessionNotFound,
        ErrorCode::PlayerNotFound,
        ErrorCode::NotFound,
        ErrorCode::SessionExists,
        ErrorCode::PlayerExists,
        ErrorCode::PowerTaken,
        ErrorCode::Conflict,
        ErrorCode::WrongPhase,
        ErrorCode::AlreadyDone,
        ErrorCode::NotEnoughPlayers,
        ErrorCode::AutomationNotRunning,
        ErrorCode::InvalidState,
        ErrorCode::NoValidOrders,
        ErrorCode::InvalidPower,
        ErrorCode::ValidationError,
        ErrorCode::EngineFailure,
        ErrorCode::InternalError,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::ErrorCode;

    #[test]
    fn codes_are_unique() {
        let strings: HashSet<&str> = ErrorCode::ALL.iter().map(ErrorCode::as_str).collect();
        assert_eq!(strings.len(), ErrorCode::ALL.len());
    }

    #[test]
    fn codes_are_screaming_snake_case() {
        for code in ErrorCode::ALL {
            let s = code.as_str();
            assert!(!s.is_empty());
            assert!(s
                .chars()
                .all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }
}
