use axum::extract::{Query, State};

use contracts::domain::a005_purchase_invoice::PurchaseInvoice;
use contracts::shared::api::ListParams;

use crate::api::{ok, ApiResult, AppState};
use crate::domain::a005_purchase_invoice;

/// GET /api/accounting/purchase-invoices
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<PurchaseInvoice>> {
    let rows =
        a005_purchase_invoice::service::list(state.erp(), &params, state.list_limit()).await?;
    ok(rows)
}
