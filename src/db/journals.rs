use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::journal::{JournalEntry, NewJournalEntry};

/// Source of journal snapshots and sink for new entries.
#[async_trait]
pub trait JournalStore: Send + Sync {
    /// Every entry of the user, oldest insert first. Two calls over unchanged
    /// data return the same order.
    async fn entries_for_user(&self, user_id: Uuid) -> Result<Vec<JournalEntry>, sqlx::Error>;

    async fn create_entry(&self, entry: NewJournalEntry) -> Result<JournalEntry, sqlx::Error>;

    /// Cheap connectivity probe for readiness checks.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

const ENTRIES_FOR_USER_SQL: &str = r#"
    SELECT id, user_id, mood, text, created_at
    FROM journal_entries
    WHERE user_id = $1
    ORDER BY seq
"#;

pub struct PgJournalStore {
    db: PgPool,
}

impl PgJournalStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl JournalStore for PgJournalStore {
    async fn entries_for_user(&self, user_id: Uuid) -> Result<Vec<JournalEntry>, sqlx::Error> {
        sqlx::query_as::<_, JournalEntry>(ENTRIES_FOR_USER_SQL)
            .bind(user_id)
            .fetch_all(&self.db)
            .await
    }

    async fn create_entry(&self, entry: NewJournalEntry) -> Result<JournalEntry, sqlx::Error> {
        sqlx::query_as::<_, JournalEntry>(
            r#"
            INSERT INTO journal_entries (id, user_id, mood, text, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, mood, text, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(entry.user_id)
        .bind(&entry.mood)
        .bind(&entry.text)
        .bind(entry.created_at)
        .fetch_one(&self.db)
        .await
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.db)
            .await
            .map(|_| ())
    }
}
