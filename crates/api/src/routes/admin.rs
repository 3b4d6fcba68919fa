//! Admin login and logout endpoints.

use axum::{
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::cookies::SessionCookie;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Valid email and password are required."))]
    pub email: String,

    #[validate(length(min = 1, message = "Valid email and password are required."))]
    pub password: String,
}

/// POST /admin/login
///
/// Rate-limited per client address: after the configured number of
/// consecutive failures the address is blocked for the cooldown window and
/// answers 429 regardless of credential correctness.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let admin = &state.config.admin;

    // Fail closed: with no signing secret there are no admin sessions
    if admin.session_secret.is_empty() {
        return Err(ApiError::Internal(
            "admin session secret is not configured".to_string(),
        ));
    }

    let client = client_address(&headers);
    if state.login_attempts.is_blocked(&client, Utc::now()) {
        return Err(ApiError::RateLimited);
    }

    request.validate()?;

    let credentials_valid = !admin.email.is_empty()
        && request.email.eq_ignore_ascii_case(&admin.email)
        && !admin.password_hash.is_empty()
        && shared::password::verify_password(&request.password, &admin.password_hash)
            .unwrap_or(false);

    if !credentials_valid {
        state.login_attempts.record_failure(&client, Utc::now());
        warn!(client = %client, "Failed admin login attempt");
        return Err(ApiError::Unauthorized("Invalid credentials.".to_string()));
    }

    state.login_attempts.clear(&client);

    let token = shared::session::create_token(
        &admin.session_secret,
        Utc::now(),
        Duration::seconds(admin.session_duration_secs),
    )
    .ok_or_else(|| ApiError::Internal("admin session could not be created".to_string()))?;

    let cookie = SessionCookie::new(admin.cookie_secure, admin.session_duration_secs);
    let mut response_headers = HeaderMap::new();
    cookie.apply(&mut response_headers, &token);

    info!(client = %client, "Admin login succeeded");
    Ok((response_headers, Json(json!({ "ok": true }))))
}

/// POST /admin/logout
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let admin = &state.config.admin;
    let cookie = SessionCookie::new(admin.cookie_secure, admin.session_duration_secs);
    let mut response_headers = HeaderMap::new();
    cookie.apply_clear(&mut response_headers);

    (response_headers, Json(json!({ "ok": true })))
}

/// Best-effort client address: first X-Forwarded-For hop, then X-Real-IP.
fn client_address(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
