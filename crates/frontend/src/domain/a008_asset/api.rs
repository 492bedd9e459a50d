use contracts::domain::a008_asset::{Asset, AssetMovementDto, AssetOptions};
use contracts::shared::api::{CreatedDocument, ListParams};

use crate::shared::api_utils::{doc_path, get_json, post_json, with_query};

const BASE: &str = "/api/asset/assets";

pub fn list_path(params: &ListParams) -> String {
    with_query(BASE, params)
}

pub async fn fetch_by_name(name: &str) -> Result<Asset, String> {
    get_json(&doc_path(BASE, name)).await
}

pub async fn fetch_options() -> Result<AssetOptions, String> {
    get_json("/api/asset/options").await
}

pub async fn create_movement(dto: &AssetMovementDto) -> Result<CreatedDocument, String> {
    post_json("/api/asset/movements", dto).await
}
