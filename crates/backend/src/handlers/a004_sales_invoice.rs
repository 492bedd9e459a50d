use axum::extract::{Path, Query, State};
use axum::Json;

use contracts::domain::a004_sales_invoice::{SalesInvoice, SalesInvoiceDto};
use contracts::shared::api::{CreatedDocument, ListParams};

use crate::api::{ok, ApiResult, AppState};
use crate::domain::a004_sales_invoice;

/// GET /api/accounting/sales-invoices
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<SalesInvoice>> {
    let rows = a004_sales_invoice::service::list(state.erp(), &params, state.list_limit()).await?;
    ok(rows)
}

/// GET /api/accounting/sales-invoices/:name
pub async fn get_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<SalesInvoice> {
    ok(a004_sales_invoice::service::get(state.erp(), &name).await?)
}

/// POST /api/accounting/sales-invoices
pub async fn create(
    State(state): State<AppState>,
    Json(dto): Json<SalesInvoiceDto>,
) -> ApiResult<CreatedDocument> {
    tracing::info!("Creating sales invoice for '{}'", dto.customer);
    ok(a004_sales_invoice::service::create(state.erp(), &state.config, dto).await?)
}
