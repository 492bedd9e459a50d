use axum::extract::{Path, Query, State};
use axum::Json;

use contracts::domain::a008_asset::{Asset, AssetMovementDto, AssetOptions};
use contracts::shared::api::{CreatedDocument, ListParams};

use crate::api::{ok, ApiResult, AppState};
use crate::domain::a008_asset;

/// GET /api/asset/assets
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<Asset>> {
    let rows = a008_asset::service::list(state.erp(), &params, state.list_limit()).await?;
    ok(rows)
}

/// GET /api/asset/assets/:name
pub async fn get_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Asset> {
    ok(a008_asset::service::get(state.erp(), &name).await?)
}

/// GET /api/asset/options
pub async fn options(State(state): State<AppState>) -> ApiResult<AssetOptions> {
    ok(a008_asset::service::options(state.erp(), state.list_limit()).await?)
}

/// POST /api/asset/movements
pub async fn create_movement(
    State(state): State<AppState>,
    Json(dto): Json<AssetMovementDto>,
) -> ApiResult<CreatedDocument> {
    ok(a008_asset::service::create_movement(state.erp(), &state.config.erp.company, dto).await?)
}
