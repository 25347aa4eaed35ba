use chrono::{Datelike, FixedOffset, Timelike, Weekday};
use serde::{Serialize, Serializer};

use crate::models::journal::JournalEntry;

/// Moods of all entries sharing one temporal key, in entry iteration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalBucket<K> {
    pub key: K,
    pub moods: Vec<String>,
}

/// Serialized as a `[key, [moods...]]` pair.
impl<K: Serialize> Serialize for TemporalBucket<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.key, &self.moods).serialize(serializer)
    }
}

pub type HourBucket = TemporalBucket<u32>;
pub type DayBucket = TemporalBucket<&'static str>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemporalBuckets {
    /// Keyed by hour-of-day, 0..=23.
    pub hours: Vec<HourBucket>,
    /// Keyed by English weekday name.
    pub days: Vec<DayBucket>,
}

/// Group moods by hour-of-day and weekday in the given timezone.
///
/// Buckets appear in order of first occurrence. Entries without a timestamp
/// are skipped.
pub fn bucket_entries(entries: &[JournalEntry], offset: FixedOffset) -> TemporalBuckets {
    let mut buckets = TemporalBuckets::default();

    for entry in entries {
        let Some(created_at) = entry.created_at else {
            continue;
        };
        let local = created_at.with_timezone(&offset);

        push_mood(&mut buckets.hours, local.hour(), &entry.mood);
        push_mood(&mut buckets.days, weekday_name(local.weekday()), &entry.mood);
    }

    buckets
}

/// Canonical en-US full weekday name.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

// At most 24 keys, so a linear scan keeps insertion order without a map.
fn push_mood<K: PartialEq>(buckets: &mut Vec<TemporalBucket<K>>, key: K, mood: &str) {
    match buckets.iter_mut().find(|b| b.key == key) {
        Some(bucket) => bucket.moods.push(mood.to_string()),
        None => buckets.push(TemporalBucket {
            key,
            moods: vec![mood.to_string()],
        }),
    }
}
