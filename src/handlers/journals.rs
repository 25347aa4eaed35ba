use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Utc;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::journal::{CreateJournalRequest, JournalEntry, NewJournalEntry};
use crate::AppState;

pub async fn create_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateJournalRequest>,
) -> AppResult<(StatusCode, Json<JournalEntry>)> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let entry = state
        .journals
        .create_entry(NewJournalEntry {
            user_id: auth_user.id,
            mood: body.mood,
            text: body.text.filter(|t| !t.is_empty()),
            created_at: body.created_at.unwrap_or_else(Utc::now),
        })
        .await?;

    tracing::info!(user_id = %auth_user.id, entry_id = %entry.id, "Journal entry created");
    Ok((StatusCode::CREATED, Json(entry)))
}

/// The caller's entries, newest first; entries without a timestamp last.
pub async fn list_entries(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<JournalEntry>>> {
    let mut entries = state.journals.entries_for_user(auth_user.id).await?;
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(Json(entries))
}
