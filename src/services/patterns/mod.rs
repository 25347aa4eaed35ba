//! # Stress pattern analysis
//!
//! Turns a user's journal snapshot into a [`PatternReport`]:
//!
//! - [`bucketing`] groups moods by local hour-of-day and weekday
//! - [`hotspots`] keeps the buckets with enough anxious/sad moods
//! - [`keywords`] counts entries mentioning each stress keyword
//! - [`report`] runs the three stages and merges their output
//!
//! Everything here is synchronous and side-effect free. Nothing is cached;
//! callers recompute from the full history on every request.

pub mod bucketing;
pub mod hotspots;
pub mod keywords;
pub mod report;

#[cfg(test)]
pub(crate) mod test_helpers;

use chrono::{FixedOffset, Offset, Utc};

pub use report::{analyze, PatternReport};

/// Minimum number of qualifying moods for a bucket to count as a hotspot.
pub const ANXIETY_THRESHOLD: usize = 2;

/// Mood labels counted towards the hotspot threshold (exact, case-sensitive).
pub const ANXIETY_MOODS: [&str; 2] = ["anxious", "sad"];

/// Keywords scanned for in entry text (case-insensitive substring).
pub const STRESS_LEXICON: [&str; 10] = [
    "stress",
    "tired",
    "anxiety",
    "panic",
    "pressure",
    "overwhelmed",
    "sad",
    "angry",
    "fear",
    "scared",
];

/// Tunables for one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternConfig {
    pub anxiety_moods: Vec<String>,
    pub anxiety_threshold: usize,
    pub lexicon: Vec<String>,
    /// Timezone used to derive hour-of-day and weekday.
    pub utc_offset: FixedOffset,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            anxiety_moods: ANXIETY_MOODS.iter().map(|m| m.to_string()).collect(),
            anxiety_threshold: ANXIETY_THRESHOLD,
            lexicon: STRESS_LEXICON.iter().map(|k| k.to_string()).collect(),
            utc_offset: Utc.fix(),
        }
    }
}
