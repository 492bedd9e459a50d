use axum::extract::{Query, State};

use contracts::domain::a001_customer::Customer;
use contracts::shared::api::ListParams;

use crate::api::{ok, ApiResult, AppState};
use crate::domain::a001_customer;

/// GET /api/crm/customers
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<Customer>> {
    let rows = a001_customer::service::list(state.erp(), &params, state.list_limit()).await?;
    ok(rows)
}
