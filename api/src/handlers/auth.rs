//! Auth handlers
//!
//! Access-code login and logout for the dashboard.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Request body for login
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub access_code: String,
}

/// Response body for login and logout
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
}

/// POST /api/auth/login
///
/// Exchange the access code for a session cookie.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected malformed login body");
            return (
                StatusCode::BAD_REQUEST,
                Json(LoginResponse {
                    success: false,
                    message: "Authentication failed".to_string(),
                }),
            )
                .into_response();
        }
    };

    if !state.sessions.check_access_code(request.access_code.trim()) {
        tracing::warn!("Login attempt with invalid access code");
        return (
            StatusCode::UNAUTHORIZED,
            Json(LoginResponse {
                success: false,
                message: "Invalid access code".to_string(),
            }),
        )
            .into_response();
    }

    let token = state.sessions.issue_token(Utc::now());
    tracing::info!("Dashboard session issued");

    (
        [(header::SET_COOKIE, state.sessions.session_cookie(&token))],
        Json(LoginResponse {
            success: true,
            message: "Access granted".to_string(),
        }),
    )
        .into_response()
}

/// POST /api/auth/logout
///
/// Clear the session cookie.
pub async fn logout(State(state): State<AppState>) -> Response {
    (
        [(header::SET_COOKIE, state.sessions.clear_cookie())],
        Json(LoginResponse {
            success: true,
            message: "Logged out".to_string(),
        }),
    )
        .into_response()
}
