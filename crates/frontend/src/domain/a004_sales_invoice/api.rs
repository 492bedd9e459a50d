use contracts::domain::a004_sales_invoice::{SalesInvoice, SalesInvoiceDto};
use contracts::domain::a006_payment_entry::AccountingOptions;
use contracts::shared::api::{CreatedDocument, ListParams};

use crate::shared::api_utils::{doc_path, get_json, post_json, with_query};

const BASE: &str = "/api/accounting/sales-invoices";

pub fn list_path(params: &ListParams) -> String {
    with_query(BASE, params)
}

pub async fn fetch_by_name(name: &str) -> Result<SalesInvoice, String> {
    get_json(&doc_path(BASE, name)).await
}

pub async fn create(dto: &SalesInvoiceDto) -> Result<CreatedDocument, String> {
    post_json(BASE, dto).await
}

pub async fn fetch_options() -> Result<AccountingOptions, String> {
    get_json("/api/accounting/options").await
}

