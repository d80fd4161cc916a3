//! Spending insights handler

use std::sync::Arc;

use axum::{body::Bytes, extract::State, Json};
use tracing::info;

use crate::{AppError, AppState};
use tally_core::{
    input::{parse_request, require_expenses},
    resolve_days, InsightsRequest, SpendingInsights,
};

const INSIGHTS_FAILED: &str = "Insights generation failed";

/// POST /insights - Totals and breakdowns over `days` (default 30)
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SpendingInsights>, AppError> {
    let fail = |e: tally_core::Error| AppError::from_core(e, INSIGHTS_FAILED);

    let request: InsightsRequest = parse_request(&body).map_err(fail)?;
    let expenses = require_expenses(request.expenses).map_err(fail)?;
    let days = resolve_days(request.days.as_ref()).map_err(fail)?;

    info!(count = expenses.len(), days, "Generating spending insights");

    let insights = state.analyzer.insights_raw(&expenses, days).map_err(fail)?;
    Ok(Json(insights))
}
