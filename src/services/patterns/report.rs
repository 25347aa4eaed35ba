use std::collections::BTreeMap;

use serde::Serialize;

use super::bucketing::{bucket_entries, DayBucket, HourBucket};
use super::hotspots::detect_hotspots;
use super::keywords::keyword_frequencies;
use super::PatternConfig;
use crate::models::journal::JournalEntry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternReport {
    pub anxiety_hours: Vec<HourBucket>,
    pub anxiety_days: Vec<DayBucket>,
    pub stress_keywords: BTreeMap<String, u32>,
}

/// Run bucketing, hotspot detection and keyword counting over one snapshot.
pub fn analyze(entries: &[JournalEntry], config: &PatternConfig) -> PatternReport {
    let buckets = bucket_entries(entries, config.utc_offset);

    PatternReport {
        anxiety_hours: detect_hotspots(
            buckets.hours,
            &config.anxiety_moods,
            config.anxiety_threshold,
        ),
        anxiety_days: detect_hotspots(
            buckets.days,
            &config.anxiety_moods,
            config.anxiety_threshold,
        ),
        stress_keywords: keyword_frequencies(entries, &config.lexicon),
    }
}
