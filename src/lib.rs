//! A single-user diary service: free-text entries keyed by calendar
//! date, one file per day on disk, protected by a shared-secret
//! capability token.

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_cookies::CookieManagerLayer;
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub mod config;
pub mod error;
pub mod state;

pub mod models {
    pub mod date;
    pub mod entry;
}

pub mod repositories {
    pub mod diary;
}

pub mod services {
    pub mod auth;
}

pub mod handlers {
    pub mod auth;
    pub mod diary;
}

pub mod middleware_layer {
    pub mod auth;
}

use state::AppState;

/// Builds the application router.
///
/// Login is the only open API route; everything else sits behind the
/// auth middleware. Unknown paths fall through to the static asset
/// directory.
pub fn app(state: AppState) -> Router {
    let login_routes = Router::new()
        .route("/api/login", post(handlers::auth::login))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/api/logout", post(handlers::auth::logout))
        .route("/api/session", get(handlers::auth::session))
        .route(
            "/api/diary/{date}",
            get(handlers::diary::read_entry).post(handlers::diary::save_entry),
        )
        .route("/api/diary-dates", get(handlers::diary::list_dates))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware_layer::auth::require_auth,
        ))
        .with_state(state);

    Router::new()
        .merge(login_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default())
                .on_request(DefaultOnRequest::default().level(Level::DEBUG))
                .on_response(DefaultOnResponse::default().level(Level::DEBUG))
                .on_failure(DefaultOnFailure::default().level(Level::ERROR)),
        )
        .layer(CookieManagerLayer::new())
        .fallback_service(ServeDir::new("static"))
}
