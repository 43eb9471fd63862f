//! DID list REST routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use uuid::Uuid;

use super::auth::AuthUser;
use crate::services::did::{self, Did, DidError, DidPatch, NewDid};
use crate::state::AppState;

pub(crate) fn did_error_to_status(err: DidError) -> StatusCode {
    match err {
        DidError::NotFound(_) => StatusCode::NOT_FOUND,
        DidError::InvalidTitle | DidError::EmptyPatch => StatusCode::BAD_REQUEST,
        DidError::Database(e) => {
            tracing::error!(error = %e, "did query failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// `GET /api/dids`: list the caller's DIDs, oldest first.
pub async fn list_dids(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Vec<Did>>, StatusCode> {
    let rows = did::list_dids(&state.pool, auth.user.id)
        .await
        .map_err(did_error_to_status)?;
    Ok(Json(rows))
}

/// `POST /api/dids`: add a DID.
pub async fn create_did(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<NewDid>,
) -> Result<(StatusCode, Json<Did>), StatusCode> {
    let row = did::create_did(&state.pool, auth.user.id, &body)
        .await
        .map_err(did_error_to_status)?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// `PATCH /api/dids/{id}`: rename and/or toggle a DID.
pub async fn update_did(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<DidPatch>,
) -> Result<Json<Did>, StatusCode> {
    let row = did::update_did(&state.pool, auth.user.id, id, &body)
        .await
        .map_err(did_error_to_status)?;
    Ok(Json(row))
}

/// `DELETE /api/dids/{id}`: remove a DID.
pub async fn delete_did(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    did::delete_did(&state.pool, auth.user.id, id)
        .await
        .map_err(did_error_to_status)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "dids_test.rs"]
mod tests;
