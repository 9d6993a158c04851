use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::errors::domain::{
    ConflictKind, DomainError, InvalidStateKind, NotFoundKind, ValidationKind,
};
use crate::errors::ErrorCode;

/// RFC 9457 style problem document returned for every error response.
#[derive(Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Invalid state: {detail}")]
    InvalidState { code: ErrorCode, detail: String },
    #[error("Engine failure: {detail}")]
    Engine { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    /// Machine-readable error code for any variant
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::InvalidState { code, .. } => *code,
            AppError::Engine { .. } => ErrorCode::EngineFailure,
            AppError::Internal { .. } => ErrorCode::InternalError,
        }
    }

    /// Human-readable detail for any variant
    fn detail(&self) -> String {
        match self {
            AppError::Validation { detail, .. } => detail.clone(),
            AppError::NotFound { detail, .. } => detail.clone(),
            AppError::Conflict { detail, .. } => detail.clone(),
            AppError::InvalidState { detail, .. } => detail.clone(),
            AppError::Engine { detail } => detail.clone(),
            AppError::Internal { detail } => detail.clone(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::InvalidState { .. } => StatusCode::CONFLICT,
            AppError::Engine { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn validation(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn invalid_state(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::InvalidState {
            code,
            detail: detail.into(),
        }
    }

    pub fn engine(detail: impl Into<String>) -> Self {
        Self::Engine {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(kind, detail) => {
                let code = match kind {
                    ValidationKind::NoValidOrders => ErrorCode::NoValidOrders,
                    ValidationKind::InvalidPower => ErrorCode::InvalidPower,
                    _ => ErrorCode::ValidationError,
                };
                AppError::validation(code, detail)
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Session => ErrorCode::SessionNotFound,
                    NotFoundKind::Player => ErrorCode::PlayerNotFound,
                    _ => ErrorCode::NotFound,
                };
                AppError::not_found(code, detail)
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::DuplicateSession => ErrorCode::SessionExists,
                    ConflictKind::DuplicatePlayer => ErrorCode::PlayerExists,
                    ConflictKind::PowerTaken => ErrorCode::PowerTaken,
                    _ => ErrorCode::Conflict,
                };
                AppError::conflict(code, detail)
            }
            DomainError::InvalidState(kind, detail) => {
                let code = match kind {
                    InvalidStateKind::WrongPhase => ErrorCode::WrongPhase,
                    InvalidStateKind::AlreadyDone => ErrorCode::AlreadyDone,
                    InvalidStateKind::NotEnoughPlayers => ErrorCode::NotEnoughPlayers,
                    InvalidStateKind::AutomationNotRunning => ErrorCode::AutomationNotRunning,
                    _ => ErrorCode::InvalidState,
                };
                AppError::invalid_state(code, detail)
            }
            DomainError::Engine(detail) => AppError::engine(detail),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code().as_str();
        let detail = self.detail();

        let problem_details = ProblemDetails {
            type_: format!("https://sessiond.dev/errors/{code}"),
            title: Self::humanize_code(code),
            status: status.as_u16(),
            detail,
            code: code.to_string(),
        };

        HttpResponse::build(status)
            .content_type("application/problem+json")
            .json(problem_details)
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;

    use super::AppError;
    use crate::errors::domain::{
        ConflictKind, DomainError, InvalidStateKind, NotFoundKind, ValidationKind,
    };
    use crate::errors::ErrorCode;

    #[test]
    fn domain_errors_map_to_expected_statuses() {
        let cases: Vec<(DomainError, StatusCode, ErrorCode)> = vec![
            (
                DomainError::not_found(NotFoundKind::Session, "gone"),
                StatusCode::NOT_FOUND,
                ErrorCode::SessionNotFound,
            ),
            (
                DomainError::not_found(NotFoundKind::Player, "gone"),
                StatusCode::NOT_FOUND,
                ErrorCode::PlayerNotFound,
            ),
            (
                DomainError::conflict(ConflictKind::DuplicateSession, "dup"),
                StatusCode::CONFLICT,
                ErrorCode::SessionExists,
            ),
            (
                DomainError::conflict(ConflictKind::PowerTaken, "taken"),
                StatusCode::CONFLICT,
                ErrorCode::PowerTaken,
            ),
            (
                DomainError::invalid_state(InvalidStateKind::AlreadyDone, "done"),
                StatusCode::CONFLICT,
                ErrorCode::AlreadyDone,
            ),
            (
                DomainError::invalid_state(InvalidStateKind::WrongPhase, "phase"),
                StatusCode::CONFLICT,
                ErrorCode::WrongPhase,
            ),
            (
                DomainError::validation(ValidationKind::NoValidOrders, "none"),
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::NoValidOrders,
            ),
            (
                DomainError::engine("boom"),
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::EngineFailure,
            ),
        ];

        for (domain, status, code) in cases {
            let app: AppError = domain.into();
            assert_eq!(app.status(), status);
            assert_eq!(app.code(), code);
        }
    }

    #[test]
    fn humanize_code_title_cases_words() {
        assert_eq!(AppError::humanize_code("SESSION_NOT_FOUND"), "Session Not Found");
        assert_eq!(AppError::humanize_code("CONFLICT"), "Conflict");
    }
}
