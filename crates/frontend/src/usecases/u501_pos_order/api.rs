use contracts::usecases::u501_pos_order::{
    PosBootstrap, PosOrderRequest, PosOrderResponse, StockCheckRequest, StockCheckResponse,
};

use crate::shared::api_utils::{get_json, post_json};

/// Справочники экрана кассы одним запросом
pub async fn bootstrap() -> Result<PosBootstrap, String> {
    get_json("/api/pos").await
}

pub async fn stock_check(request: &StockCheckRequest) -> Result<StockCheckResponse, String> {
    post_json("/api/pos/stock-check", request).await
}

pub async fn create_order(request: &PosOrderRequest) -> Result<PosOrderResponse, String> {
    post_json("/api/pos", request).await
}
