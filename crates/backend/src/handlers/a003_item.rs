use axum::extract::{Query, State};

use contracts::domain::a003_item::{Item, Warehouse};
use contracts::shared::api::ListParams;
use contracts::usecases::u501_pos_order::{StockCheckRequest, StockCheckResponse};

use crate::api::{ok, ApiResult, AppState};
use crate::domain::a003_item;

/// GET /api/stock/items
pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<Item>> {
    let rows = a003_item::service::list_items(state.erp(), &params, state.list_limit()).await?;
    ok(rows)
}

/// GET /api/stock/warehouses
pub async fn list_warehouses(State(state): State<AppState>) -> ApiResult<Vec<Warehouse>> {
    let rows = a003_item::service::list_warehouses(
        state.erp(),
        &state.config.erp.company,
        state.list_limit(),
    )
    .await?;
    ok(rows)
}

/// GET /api/stock/balance?item_code=..&warehouse=..&qty=..
pub async fn balance(
    State(state): State<AppState>,
    Query(request): Query<StockCheckRequest>,
) -> ApiResult<StockCheckResponse> {
    ok(a003_item::service::check_stock(state.erp(), &request).await?)
}
