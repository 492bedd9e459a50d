use axum::extract::{Query, State};

use contracts::dashboards::d400_business_summary::{DashboardRequest, DashboardSummary};

use crate::api::{ok, ApiResult, AppState};
use crate::dashboards::d400_business_summary::service;

/// GET /api/dashboard
pub async fn get_summary(
    State(state): State<AppState>,
    Query(request): Query<DashboardRequest>,
) -> ApiResult<DashboardSummary> {
    ok(service::get_summary(state.erp(), &request, state.list_limit()).await?)
}
