use axum::extract::{Query, State};
use axum::Json;

use contracts::domain::a009_lead::{Lead, LeadDto};
use contracts::shared::api::{CreatedDocument, ListParams};

use crate::api::{ok, ApiResult, AppState};
use crate::domain::a009_lead;

/// GET /api/crm/leads
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<Lead>> {
    let rows = a009_lead::service::list(state.erp(), &params, state.list_limit()).await?;
    ok(rows)
}

/// POST /api/crm/leads
pub async fn create(
    State(state): State<AppState>,
    Json(dto): Json<LeadDto>,
) -> ApiResult<CreatedDocument> {
    ok(a009_lead::service::create(state.erp(), dto).await?)
}
