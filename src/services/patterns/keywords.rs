use std::collections::BTreeMap;

use crate::models::journal::JournalEntry;

/// Count, per lexicon keyword, the entries whose text contains it.
///
/// Matching is a case-insensitive substring test, so an entry adds at most
/// one to each keyword no matter how often the word repeats. Every keyword
/// is present in the result under its configured spelling, with 0 when
/// nothing matched.
pub fn keyword_frequencies(entries: &[JournalEntry], lexicon: &[String]) -> BTreeMap<String, u32> {
    let mut counts: BTreeMap<String, u32> =
        lexicon.iter().map(|keyword| (keyword.clone(), 0)).collect();
    // Same iteration order as `counts`
    let needles: Vec<String> = counts.keys().map(|k| k.to_lowercase()).collect();

    let texts = entries
        .iter()
        .filter_map(|e| e.text.as_deref())
        .filter(|t| !t.is_empty());

    for text in texts {
        let lowered = text.to_lowercase();
        for (count, needle) in counts.values_mut().zip(&needles) {
            if lowered.contains(needle.as_str()) {
                *count += 1;
            }
        }
    }

    counts
}
