//! Batch analysis handler

use std::sync::Arc;

use axum::{body::Bytes, extract::State, Json};
use tracing::info;

use crate::{AppError, AppState};
use tally_core::{
    input::{parse_request, require_expenses},
    AnalysisReport, AnalyzeRequest,
};

const ANALYSIS_FAILED: &str = "Analysis failed";

/// POST /analyze - Suggestions and detailed analysis for a batch
///
/// `userId` and `userName` are optional and only used for logging.
pub async fn analyze_expenses(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<AnalysisReport>, AppError> {
    let fail = |e: tally_core::Error| AppError::from_core(e, ANALYSIS_FAILED);

    let request: AnalyzeRequest = parse_request(&body).map_err(fail)?;
    let expenses = require_expenses(request.expenses).map_err(fail)?;

    let user_id = request.user_id.as_deref().unwrap_or("unknown");
    let user_name = request.user_name.as_deref().unwrap_or("User");
    info!(
        user_id,
        user_name,
        count = expenses.len(),
        "Analyzing expenses"
    );

    let report = state.analyzer.analyze_raw(&expenses).map_err(fail)?;
    Ok(Json(report))
}
