use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{expired_session_cookie, session_cookie, session_token};
use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    if request.password != state.config.admin_password {
        tracing::warn!("admin login rejected");
        return Err(AppError::Unauthorized);
    }

    let token = state.sessions.issue().await;
    tracing::info!("admin logged in");
    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(&token, state.sessions.ttl()))]),
        Json(json!({ "authenticated": true })),
    ))
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = session_token(&headers) {
        state.sessions.revoke(token).await;
    }
    (
        StatusCode::NO_CONTENT,
        AppendHeaders([(SET_COOKIE, expired_session_cookie())]),
    )
}

pub async fn session(State(state): State<AppState>, headers: HeaderMap) -> Json<Value> {
    let authenticated = match session_token(&headers) {
        Some(token) => state.sessions.is_valid(token).await,
        None => false,
    };
    Json(json!({ "authenticated": authenticated }))
}
