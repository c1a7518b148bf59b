//! Session Guard
//!
//! Admins log in with the shared password and receive a random session token
//! in an HttpOnly cookie. Sessions live in memory and end on logout, expiry,
//! or restart.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "clubsite_session";

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Instant>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Start a session and return its token
    pub async fn issue(&self) -> String {
        let token = Uuid::new_v4().simple().to_string();
        let now = Instant::now();

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, expires| *expires > now);
        sessions.insert(token.clone(), now + self.ttl);
        token
    }

    pub async fn is_valid(&self, token: &str) -> bool {
        let sessions = self.sessions.read().await;
        sessions
            .get(token)
            .is_some_and(|expires| *expires > Instant::now())
    }

    pub async fn revoke(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }
}

/// Session token from the request's cookies
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token)
}

pub fn session_cookie(token: &str, ttl: Duration) -> String {
    format!(
        "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        ttl.as_secs()
    )
}

pub fn expired_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0")
}

/// Reject the request with 401 unless it carries a live session
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = session_token(request.headers()).map(str::to_owned);
    let authorized = match token {
        Some(token) => state.sessions.is_valid(&token).await,
        None => false,
    };
    if !authorized {
        tracing::warn!(method = %request.method(), path = %request.uri().path(), "unauthenticated admin request");
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_token_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; clubsite_session=abc123; other=1"),
        );
        assert_eq!(session_token(&headers), Some("abc123"));
    }

    #[test]
    fn test_session_token_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(session_token(&headers), None);
        assert_eq!(session_token(&HeaderMap::new()), None);
    }

    #[tokio::test]
    async fn test_issue_and_revoke() {
        let store = SessionStore::new(Duration::from_secs(60));
        let token = store.issue().await;

        assert!(store.is_valid(&token).await);
        assert!(!store.is_valid("forged").await);

        store.revoke(&token).await;
        assert!(!store.is_valid(&token).await);
    }

    #[tokio::test]
    async fn test_expired_session_rejected() {
        let store = SessionStore::new(Duration::ZERO);
        let token = store.issue().await;
        assert!(!store.is_valid(&token).await);
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = session_cookie("tok", Duration::from_secs(3600));
        assert_eq!(cookie, "clubsite_session=tok; HttpOnly; SameSite=Lax; Path=/; Max-Age=3600");
        assert!(expired_session_cookie().ends_with("Max-Age=0"));
    }
}
