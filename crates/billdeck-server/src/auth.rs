//! Session authentication
//!
//! `POST /api/auth` trades the dashboard password for a signed, expiring
//! bearer token: `<expires_unix>.<nonce>.<hex hmac-sha256>`. The middleware
//! verifies it on every protected request and hands the handler a
//! [`SessionContext`] extension.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use billdeck::DomainError;

type HmacSha256 = Hmac<Sha256>;

/// Who is making the request. Inserted by [`auth_middleware`].
#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    /// Token nonce; `None` when authentication is disabled
    pub session_id: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl SessionContext {
    /// Context for servers running without a password
    pub fn open() -> Self {
        Self {
            session_id: None,
            expires_at: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session_id.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

pub struct SessionAuth {
    password: Option<String>,
    key: Vec<u8>,
    ttl: Duration,
}

impl SessionAuth {
    /// Without a secret, a random per-process key is used: tokens then die
    /// with the process.
    pub fn new(password: Option<String>, secret: Option<String>, ttl: Duration) -> Self {
        let key = match secret {
            Some(secret) => secret.into_bytes(),
            None => format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple()).into_bytes(),
        };
        Self { password, key, ttl }
    }

    pub fn enabled(&self) -> bool {
        self.password.is_some()
    }

    /// Check the password and issue a token
    pub fn login(&self, password: &str, now: DateTime<Utc>) -> Result<IssuedToken, DomainError> {
        let Some(expected) = self.password.as_deref() else {
            return Ok(self.issue(now));
        };

        // Compare MACs of both sides so the check is constant-time and
        // independent of the password length
        let reference = self.sign(expected.as_bytes());
        let mut mac = self.mac();
        mac.update(password.as_bytes());
        mac.verify_slice(&reference)
            .map_err(|_| DomainError::Unauthorized("Invalid password".to_string()))?;

        Ok(self.issue(now))
    }

    pub fn issue(&self, now: DateTime<Utc>) -> IssuedToken {
        let expires_at = now + chrono::Duration::seconds(self.ttl.as_secs() as i64);
        let payload = format!("{}.{}", expires_at.timestamp(), Uuid::new_v4().simple());
        let signature = hex::encode(self.sign(payload.as_bytes()));

        IssuedToken {
            token: format!("{}.{}", payload, signature),
            expires_at,
        }
    }

    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<SessionContext, DomainError> {
        let invalid = || DomainError::Unauthorized("Invalid session token".to_string());

        let (payload, signature) = token.rsplit_once('.').ok_or_else(invalid)?;
        let (expires, nonce) = payload.split_once('.').ok_or_else(invalid)?;

        let signature = hex::decode(signature).map_err(|_| invalid())?;
        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature).map_err(|_| invalid())?;

        let expires_at = expires
            .parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .ok_or_else(invalid)?;
        if expires_at <= now {
            return Err(DomainError::Unauthorized("Session expired".to_string()));
        }

        Ok(SessionContext {
            session_id: Some(nonce.to_string()),
            expires_at: Some(expires_at),
        })
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.key).expect("HMAC can take key of any size")
    }

    fn sign(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac = self.mac();
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

/// Bearer-token middleware for protected routes.
///
/// With no password configured every request passes with an open context.
pub async fn auth_middleware(
    State(auth): State<Arc<SessionAuth>>,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    let context = if auth.enabled() {
        let token = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "Missing bearer token".to_string(),
            ))?;

        auth.verify(token.trim(), Utc::now()).map_err(|e| {
            tracing::debug!("Rejected session token: {}", e);
            (StatusCode::UNAUTHORIZED, e.to_string())
        })?
    } else {
        SessionContext::open()
    };

    request.extensions_mut().insert(context);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> SessionAuth {
        SessionAuth::new(
            Some("hunter2".to_string()),
            Some("test-secret".to_string()),
            Duration::from_secs(3600),
        )
    }

    #[test]
    fn test_login_and_verify() {
        let auth = auth();
        let now = Utc::now();

        let issued = auth.login("hunter2", now).unwrap();
        let parts: Vec<&str> = issued.token.split('.').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[2].len(), 64);

        let context = auth.verify(&issued.token, now).unwrap();
        assert!(context.is_authenticated());
        assert_eq!(context.session_id.as_deref(), Some(parts[1]));
    }

    #[test]
    fn test_wrong_password() {
        let auth = auth();
        assert!(matches!(
            auth.login("hunter3", Utc::now()),
            Err(DomainError::Unauthorized(_))
        ));
        assert!(auth.login("", Utc::now()).is_err());
    }

    #[test]
    fn test_expired_token() {
        let auth = auth();
        let now = Utc::now();
        let issued = auth.issue(now);

        assert!(auth.verify(&issued.token, now + chrono::Duration::seconds(3599)).is_ok());
        let err = auth
            .verify(&issued.token, now + chrono::Duration::seconds(3600))
            .unwrap_err();
        assert_eq!(err.to_string(), "Unauthorized: Session expired");
    }

    #[test]
    fn test_tampered_token() {
        let auth = auth();
        let now = Utc::now();
        let issued = auth.issue(now);

        // Push the expiry out without re-signing
        let (expires, rest) = issued.token.split_once('.').unwrap();
        let forged = format!("{}.{}", expires.parse::<i64>().unwrap() + 86_400, rest);
        assert!(auth.verify(&forged, now).is_err());

        // Different key
        let other = SessionAuth::new(
            Some("hunter2".to_string()),
            Some("other-secret".to_string()),
            Duration::from_secs(3600),
        );
        assert!(other.verify(&issued.token, now).is_err());

        assert!(auth.verify("garbage", now).is_err());
        assert!(auth.verify("1.2.zz", now).is_err());
    }

    #[test]
    fn test_disabled_auth() {
        let auth = SessionAuth::new(None, None, Duration::from_secs(60));
        assert!(!auth.enabled());
        assert!(auth.login("anything", Utc::now()).is_ok());
        assert!(!SessionContext::open().is_authenticated());
    }
}
