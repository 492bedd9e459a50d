use axum::extract::{Query, State};

use contracts::domain::a010_opportunity::Opportunity;
use contracts::shared::api::ListParams;

use crate::api::{ok, ApiResult, AppState};
use crate::domain::a010_opportunity;

/// GET /api/crm/opportunities
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<Opportunity>> {
    let rows = a010_opportunity::service::list(state.erp(), &params, state.list_limit()).await?;
    ok(rows)
}
