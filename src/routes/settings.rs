//! Settings routes: the signed-in user's preferences.
//!
//! Storage is local file I/O, so each call runs on the blocking pool. Load
//! and save never fail; the only error surfaced here is a patch that is not
//! a valid partial `Settings` object.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;

use super::auth::AuthUser;
use crate::settings::{Settings, SettingsStore};
use crate::state::AppState;

async fn with_store<T, F>(state: &AppState, auth: &AuthUser, f: F) -> Result<T, StatusCode>
where
    F: FnOnce(SettingsStore) -> T + Send + 'static,
    T: Send + 'static,
{
    let store = state.settings.store_for(auth.user.id);
    tokio::task::spawn_blocking(move || f(store)).await.map_err(|e| {
        tracing::error!(error = %e, "settings task failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// `GET /api/settings`: stored settings merged over defaults.
pub async fn get_settings(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Settings>, StatusCode> {
    let settings = with_store(&state, &auth, |store| store.load()).await?;
    Ok(Json(settings))
}

/// `PUT /api/settings`: merge a partial object onto the current settings
/// and store the result.
pub async fn put_settings(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(patch): Json<serde_json::Value>,
) -> Result<Json<Settings>, StatusCode> {
    let updated = with_store(&state, &auth, move |store| {
        let next = store.load().merged(&patch)?;
        store.save(&next);
        Ok::<_, serde_json::Error>(next)
    })
    .await?
    .map_err(|e| {
        tracing::debug!(error = %e, "rejected settings patch");
        StatusCode::BAD_REQUEST
    })?;
    Ok(Json(updated))
}

/// `POST /api/settings/reset`: rewrite defaults.
pub async fn reset_settings(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Settings>, StatusCode> {
    let settings = with_store(&state, &auth, |store| store.reset()).await?;
    Ok(Json(settings))
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
