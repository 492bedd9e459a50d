use axum::extract::{Path, Query, State};
use axum::Json;

use contracts::domain::a006_payment_entry::{AccountingOptions, PaymentEntry, PaymentEntryDto};
use contracts::shared::api::{CreatedDocument, ListParams};

use crate::api::{ok, ApiResult, AppState};
use crate::domain::a006_payment_entry;

/// GET /api/accounting/payments
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<PaymentEntry>> {
    let rows = a006_payment_entry::service::list(state.erp(), &params, state.list_limit()).await?;
    ok(rows)
}

/// GET /api/accounting/payments/:name
pub async fn get_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<PaymentEntry> {
    ok(a006_payment_entry::service::get(state.erp(), &name).await?)
}

/// POST /api/accounting/payments
pub async fn create(
    State(state): State<AppState>,
    Json(dto): Json<PaymentEntryDto>,
) -> ApiResult<CreatedDocument> {
    ok(a006_payment_entry::service::create(state.erp(), &state.config.erp.company, dto).await?)
}

/// GET /api/accounting/options
pub async fn options(State(state): State<AppState>) -> ApiResult<AccountingOptions> {
    ok(a006_payment_entry::service::accounting_options(state.erp(), &state.config).await?)
}
