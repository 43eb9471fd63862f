//! DID list service: per-user CRUD over the `dids` table.
//!
//! DESIGN
//! ======
//! Every query is scoped by `user_id`, so one user's rows are invisible to
//! another. A row that exists but belongs to someone else is reported as
//! `NotFound`, never as forbidden.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

pub const MAX_TITLE_CHARS: usize = 280;

#[derive(Debug, thiserror::Error)]
pub enum DidError {
    #[error("did not found: {0}")]
    NotFound(Uuid),
    #[error("title must be 1-280 characters")]
    InvalidTitle,
    #[error("patch has no fields to update")]
    EmptyPatch,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// One entry in a user's DID list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Did {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub done: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewDid {
    pub title: String,
}

/// Partial update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DidPatch {
    pub title: Option<String>,
    pub done: Option<bool>,
}

impl DidPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.done.is_none()
    }
}

/// Trim a title and check its length.
///
/// # Errors
///
/// Returns `InvalidTitle` if the trimmed title is empty or too long.
pub fn validate_title(title: &str) -> Result<String, DidError> {
    let trimmed = title.trim();
    let len = trimmed.chars().count();
    if len == 0 || len > MAX_TITLE_CHARS {
        return Err(DidError::InvalidTitle);
    }
    Ok(trimmed.to_owned())
}

pub async fn list_dids(pool: &PgPool, user_id: Uuid) -> Result<Vec<Did>, DidError> {
    let rows = sqlx::query_as::<_, Did>(
        "SELECT id, user_id, title, done, created_at, updated_at
         FROM dids
         WHERE user_id = $1
         ORDER BY created_at, id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn create_did(pool: &PgPool, user_id: Uuid, new: &NewDid) -> Result<Did, DidError> {
    let title = validate_title(&new.title)?;
    let row = sqlx::query_as::<_, Did>(
        "INSERT INTO dids (id, user_id, title)
         VALUES ($1, $2, $3)
         RETURNING id, user_id, title, done, created_at, updated_at",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(title)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn update_did(pool: &PgPool, user_id: Uuid, did_id: Uuid, patch: &DidPatch) -> Result<Did, DidError> {
    if patch.is_empty() {
        return Err(DidError::EmptyPatch);
    }
    let title = patch.title.as_deref().map(validate_title).transpose()?;

    let row = sqlx::query_as::<_, Did>(
        "UPDATE dids
         SET title = COALESCE($3, title),
             done = COALESCE($4, done),
             updated_at = now()
         WHERE id = $1 AND user_id = $2
         RETURNING id, user_id, title, done, created_at, updated_at",
    )
    .bind(did_id)
    .bind(user_id)
    .bind(title)
    .bind(patch.done)
    .fetch_optional(pool)
    .await?;

    row.ok_or(DidError::NotFound(did_id))
}

pub async fn delete_did(pool: &PgPool, user_id: Uuid, did_id: Uuid) -> Result<(), DidError> {
    let result = sqlx::query("DELETE FROM dids WHERE id = $1 AND user_id = $2")
        .bind(did_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(DidError::NotFound(did_id));
    }
    Ok(())
}

#[cfg(test)]
#[path = "did_test.rs"]
mod tests;
