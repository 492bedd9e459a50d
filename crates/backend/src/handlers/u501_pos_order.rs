use axum::extract::State;
use axum::Json;

use contracts::usecases::u501_pos_order::{
    PosBootstrap, PosOrderRequest, PosOrderResponse, StockCheckRequest, StockCheckResponse,
};

use crate::api::{ok, ApiResult, AppState};
use crate::usecases::u501_pos_order;

/// GET /api/pos
pub async fn bootstrap(State(state): State<AppState>) -> ApiResult<PosBootstrap> {
    ok(u501_pos_order::service::bootstrap(state.erp(), &state.config).await?)
}

/// POST /api/pos
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<PosOrderRequest>,
) -> ApiResult<PosOrderResponse> {
    tracing::info!(
        "POS order: customer '{}', {} line(s), paid {:.2}",
        request.customer,
        request.items.len(),
        request.paid_amount
    );
    ok(u501_pos_order::service::create_order(state.erp(), &state.config, request).await?)
}

/// POST /api/pos/stock-check
pub async fn stock_check(
    State(state): State<AppState>,
    Json(request): Json<StockCheckRequest>,
) -> ApiResult<StockCheckResponse> {
    ok(u501_pos_order::service::stock_check(state.erp(), &request).await?)
}
