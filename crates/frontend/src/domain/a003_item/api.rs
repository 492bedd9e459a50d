use contracts::domain::a003_item::{Item, Warehouse};
use contracts::shared::api::{ListParams, OptionItem};
use contracts::usecases::u501_pos_order::{StockCheckRequest, StockCheckResponse};

use crate::shared::api_utils::{get_json, with_query};

pub fn list_path(params: &ListParams) -> String {
    with_query("/api/stock/items", params)
}

/// Вся активная номенклатура для табличных частей форм
pub async fn fetch_catalog() -> Result<Vec<Item>, String> {
    get_json(&list_path(&ListParams::with_limit(0))).await
}

pub async fn fetch_warehouses() -> Result<Vec<Warehouse>, String> {
    get_json("/api/stock/warehouses").await
}

/// Склады как варианты выпадающего списка
pub async fn warehouse_options() -> Result<Vec<OptionItem>, String> {
    Ok(fetch_warehouses()
        .await?
        .into_iter()
        .map(|w| {
            let label = if w.warehouse_name.is_empty() {
                w.name.clone()
            } else {
                w.warehouse_name.clone()
            };
            OptionItem::new(w.name, label)
        })
        .collect())
}

pub async fn check_balance(request: &StockCheckRequest) -> Result<StockCheckResponse, String> {
    get_json(&with_query("/api/stock/balance", request)).await
}
