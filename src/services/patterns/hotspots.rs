use super::bucketing::TemporalBucket;

/// Keep the buckets whose moods contain at least `threshold` exact matches
/// from `anxiety_moods`. Order is preserved; matching is case-sensitive.
pub fn detect_hotspots<K>(
    buckets: Vec<TemporalBucket<K>>,
    anxiety_moods: &[String],
    threshold: usize,
) -> Vec<TemporalBucket<K>> {
    buckets
        .into_iter()
        .filter(|bucket| qualifying_moods(&bucket.moods, anxiety_moods) >= threshold)
        .collect()
}

pub fn qualifying_moods(moods: &[String], anxiety_moods: &[String]) -> usize {
    moods
        .iter()
        .filter(|mood| anxiety_moods.iter().any(|m| m == *mood))
        .count()
}
