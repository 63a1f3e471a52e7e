use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tower_cookies::cookie::time::Duration;
use tower_cookies::{Cookie, Cookies};

use crate::{
    error::{AppError, Result},
    middleware_layer::auth::AUTH_COOKIE,
    state::AppState,
};

/// How long the auth cookie lives. Token validity itself has no
/// server-side expiry; only the cookie ages out.
const AUTH_COOKIE_MAX_AGE_DAYS: i64 = 30;

/// The request payload for login.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// The response payload for authentication-related requests.
#[derive(Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
}

/// The response payload for session checks.
#[derive(Serialize)]
pub struct SessionResponse {
    pub success: bool,
    pub title: String,
}

/// Creates the auth cookie with the given value and max age.
fn create_auth_cookie(value: String, max_age_days: i64) -> Cookie<'static> {
    let mut cookie = Cookie::new(AUTH_COOKIE, value);

    let is_production =
        std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()) == "production";

    cookie.set_http_only(true);
    if is_production {
        cookie.set_secure(true);
    }
    cookie.set_same_site(tower_cookies::cookie::SameSite::Lax);
    cookie.set_max_age(Duration::days(max_age_days));
    cookie.set_path("/");

    cookie
}

/// Handles login: verifies the submitted password against the shared
/// secret and, on success, sets the derived session token as a cookie.
/// A wrong password yields a denial and no cookie.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    if !state.auth.verify(&payload.password) {
        tracing::warn!("❌ Login attempt with wrong password");
        return Err(AppError::Authentication("Wrong password".to_string()));
    }

    let token = state.auth.issue();
    cookies.add(create_auth_cookie(token, AUTH_COOKIE_MAX_AGE_DAYS));
    tracing::info!("✅ Login successful, session cookie set");

    let response = AuthResponse {
        success: true,
        message: "Login successful".to_string(),
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Handles logout by expiring the auth cookie. Nothing is revoked
/// server-side; the token stays valid until the secret rotates.
#[axum::debug_handler]
pub async fn logout(cookies: Cookies) -> Result<Response> {
    let mut cookie = Cookie::new(AUTH_COOKIE, "");
    cookie.set_max_age(Duration::seconds(0));
    cookie.set_path("/");
    cookies.remove(cookie);

    tracing::info!("👋 User logged out");

    let response = AuthResponse {
        success: true,
        message: "Logout successful".to_string(),
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Reports that the presented token is valid. Only reachable behind
/// the auth middleware; the UI uses it to pick login vs calendar.
#[axum::debug_handler]
pub async fn session(State(state): State<AppState>) -> Result<Response> {
    let response = SessionResponse {
        success: true,
        title: state.settings.title.clone(),
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}
