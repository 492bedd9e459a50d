use axum::extract::{Path, Query, State};
use axum::Json;

use contracts::domain::a007_stock_entry::{StockEntry, StockEntryDto};
use contracts::shared::api::{CreatedDocument, ListParams};

use crate::api::{ok, ApiResult, AppState};
use crate::domain::a007_stock_entry;

/// GET /api/stock-entries
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<StockEntry>> {
    let rows = a007_stock_entry::service::list(state.erp(), &params, state.list_limit()).await?;
    ok(rows)
}

/// GET /api/stock-entries/:name
pub async fn get_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<StockEntry> {
    ok(a007_stock_entry::service::get(state.erp(), &name).await?)
}

/// POST /api/stock-entries
pub async fn create(
    State(state): State<AppState>,
    Json(dto): Json<StockEntryDto>,
) -> ApiResult<CreatedDocument> {
    ok(a007_stock_entry::service::create(state.erp(), &state.config.erp.company, dto).await?)
}
