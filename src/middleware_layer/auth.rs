use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use tower_cookies::Cookies;

use crate::state::AppState;

/// The cookie carrying the session capability token.
pub const AUTH_COOKIE: &str = "auth";

/// A middleware that requires a valid session token to be present.
///
/// Reads the `auth` cookie and checks it against the token derived
/// from the current secret. Absence or mismatch denies the request;
/// there is no session store to consult.
pub async fn require_auth(
    State(state): State<AppState>,
    cookies: Cookies,
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = cookies.get(AUTH_COOKIE).ok_or_else(|| {
        tracing::debug!("No auth cookie found");
        StatusCode::UNAUTHORIZED
    })?;

    if !state.auth.authorize(token.value()) {
        tracing::warn!("❌ Stale or invalid session token presented");
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(request).await)
}
