use uuid::Uuid;

use crate::db::JournalStore;
use crate::models::journal::JournalEntry;
use crate::services::patterns::{self, PatternConfig, PatternReport};
use crate::services::summarizer::{Summarizer, SummarizerError};

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Failed to load journal entries: {0}")]
    Load(#[source] sqlx::Error),

    #[error("Insight generation failed: {0}")]
    Collaborator(#[from] SummarizerError),
}

/// Load the user's snapshot and compute their stress patterns.
pub async fn analyze_patterns(
    store: &dyn JournalStore,
    user_id: Uuid,
    config: &PatternConfig,
) -> Result<PatternReport, AnalysisError> {
    let entries = store
        .entries_for_user(user_id)
        .await
        .map_err(AnalysisError::Load)?;

    let report = patterns::analyze(&entries, config);

    tracing::debug!(
        user_id = %user_id,
        entries = entries.len(),
        anxiety_hours = report.anxiety_hours.len(),
        anxiety_days = report.anxiety_days.len(),
        "Stress patterns computed"
    );

    Ok(report)
}

/// Hand the user's combined journal text to the summarizer and return its
/// answer untouched.
pub async fn generate_insights(
    store: &dyn JournalStore,
    summarizer: &dyn Summarizer,
    user_id: Uuid,
) -> Result<String, AnalysisError> {
    let entries = store
        .entries_for_user(user_id)
        .await
        .map_err(AnalysisError::Load)?;

    let combined = combined_text(&entries);
    let insights = summarizer.summarize(&combined).await?;

    tracing::debug!(user_id = %user_id, entries = entries.len(), "Insights generated");
    Ok(insights)
}

/// Newline-joined entry text in snapshot order; entries without text
/// contribute an empty line.
pub fn combined_text(entries: &[JournalEntry]) -> String {
    entries
        .iter()
        .map(|e| e.text.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n")
}
