use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    models::{date::DateKey, entry::DiaryEntry},
    state::AppState,
};

/// The request payload for saving an entry.
#[derive(Deserialize)]
pub struct SaveEntryRequest {
    pub content: String,
}

/// The response payload for a successful save.
#[derive(Serialize)]
pub struct SaveEntryResponse {
    pub success: bool,
    pub message: String,
}

/// Returns the entry for the given date. Accepts both the compact and
/// the hyphenated encoding; a day that was never written reads as
/// empty content, not as an error.
#[axum::debug_handler]
pub async fn read_entry(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Response> {
    let key = DateKey::parse(&date)?;
    let content = state.store.read(key)?;

    let entry = DiaryEntry { date: key, content };
    Ok((StatusCode::OK, Json(entry)).into_response())
}

/// Saves the entry for the given date, fully replacing any prior
/// content. A failed write propagates as a storage error and never
/// reports success.
#[axum::debug_handler]
pub async fn save_entry(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<SaveEntryRequest>,
) -> Result<Response> {
    let key = DateKey::parse(&date)?;
    state.store.write(key, &payload.content)?;

    tracing::info!("✅ Entry saved for {}", key);

    let response = SaveEntryResponse {
        success: true,
        message: "Entry saved".to_string(),
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Lists every date with a stored entry, in ascending calendar order,
/// compact-encoded. The store itself guarantees no order; sorting
/// happens here, at the presentation boundary.
#[axum::debug_handler]
pub async fn list_dates(State(state): State<AppState>) -> Result<Response> {
    let mut dates = state.store.list_dates()?;
    dates.sort_unstable();

    Ok((StatusCode::OK, Json(dates)).into_response())
}
