use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JournalEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub mood: String,
    pub text: Option<String>,
    /// `None` when the stored timestamp is missing or could not be parsed.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Row handed to the store on create; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewJournalEntry {
    pub user_id: Uuid,
    pub mood: String,
    pub text: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateJournalRequest {
    #[validate(length(min = 1, max = 64, message = "Mood must be 1-64 characters"))]
    pub mood: String,

    #[validate(length(max = 20000, message = "Text must be at most 20000 characters"))]
    pub text: Option<String>,

    /// Defaults to server-now
    pub created_at: Option<DateTime<Utc>>,
}

/// Accepts RFC 3339 strings; anything else (wrong type, garbage, null)
/// becomes `None` instead of failing the whole payload.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}
