use contracts::domain::a007_stock_entry::{StockEntry, StockEntryDto};
use contracts::shared::api::{CreatedDocument, ListParams};

use crate::shared::api_utils::{doc_path, get_json, post_json, with_query};

const BASE: &str = "/api/stock-entries";

pub fn list_path(params: &ListParams) -> String {
    with_query(BASE, params)
}

pub async fn fetch_by_name(name: &str) -> Result<StockEntry, String> {
    get_json(&doc_path(BASE, name)).await
}

pub async fn create(dto: &StockEntryDto) -> Result<CreatedDocument, String> {
    post_json(BASE, dto).await
}
