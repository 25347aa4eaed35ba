use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::journal::JournalEntry;

/// Build an entry for a fixed test user. `at` is RFC 3339; `None` leaves the
/// timestamp missing.
pub fn entry(at: Option<&str>, mood: &str, text: Option<&str>) -> JournalEntry {
    JournalEntry {
        id: Uuid::new_v4(),
        user_id: Uuid::nil(),
        mood: mood.to_string(),
        text: text.map(str::to_string),
        created_at: at.map(|s| {
            DateTime::parse_from_rfc3339(s)
                .expect("test timestamp must be RFC 3339")
                .with_timezone(&Utc)
        }),
    }
}

/// Entry at the given UTC hour on Tuesday 2026-02-10.
pub fn entry_at_hour(hour: u32, mood: &str) -> JournalEntry {
    entry(Some(&format!("2026-02-10T{:02}:30:00Z", hour)), mood, None)
}
