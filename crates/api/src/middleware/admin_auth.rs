//! Admin session middleware.
//!
//! Gates the admin surface on the signed session cookie. With no session
//! secret configured, verification always fails and every admin route
//! answers 401.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;

use crate::app::AppState;
use crate::services::cookies::SessionCookie;

/// Middleware that requires a valid admin session cookie.
pub async fn require_admin_session(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let authorized = SessionCookie::extract(req.headers())
        .map(|token| {
            shared::session::verify_token(&state.config.admin.session_secret, token, Utc::now())
        })
        .unwrap_or(false);

    if !authorized {
        return unauthorized_response();
    }

    next.run(req).await
}

fn unauthorized_response() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "unauthorized",
            "message": "Unauthorized."
        })),
    )
        .into_response()
}
