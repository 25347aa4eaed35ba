use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::services::analysis;
use crate::services::patterns::PatternReport;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct InsightResponse {
    pub insights: String,
}

pub async fn get_patterns(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<PatternReport>> {
    let report =
        analysis::analyze_patterns(state.journals.as_ref(), auth_user.id, &state.patterns).await?;
    Ok(Json(report))
}

pub async fn generate_insights(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<InsightResponse>> {
    let insights = analysis::generate_insights(
        state.journals.as_ref(),
        state.summarizer.as_ref(),
        auth_user.id,
    )
    .await?;
    Ok(Json(InsightResponse { insights }))
}
