//! Billdeck API Routes
//!
//! - /api/auth - Password login, session info
//! - /api/stats - Polled snapshot (+ manual refresh)
//! - /api/dashboard - Derived widgets
//! - /api/changelog, /api/contributions - Commit history
//! - /api/inbox, /api/outbox - File mailbox

use axum::http::StatusCode;

use billdeck::DomainError;

pub mod auth;
pub mod dashboard;
pub mod git;
pub mod mailbox;
pub mod stats;
pub mod swagger;

/// Map a domain error onto the HTTP edge
pub fn domain_error(e: DomainError) -> (StatusCode, String) {
    let status = match &e {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::ExternalService(_) => StatusCode::BAD_GATEWAY,
    };

    if status.is_server_error() {
        tracing::error!("Request failed: {}", e);
    }
    (status, e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_status() {
        assert_eq!(
            domain_error(DomainError::not_found("Outbox file", "x")).0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            domain_error(DomainError::PayloadTooLarge { size: 2, limit: 1 }).0,
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            domain_error(DomainError::ExternalService("down".into())).0,
            StatusCode::BAD_GATEWAY
        );
    }
}
