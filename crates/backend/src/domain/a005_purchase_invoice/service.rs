use contracts::domain::a005_purchase_invoice::PurchaseInvoice;
use contracts::shared::api::ListParams;

use crate::shared::erp::{list_as, list_query, with_eq, with_search, ErpBackend, ErpError};

/// Список счетов поставщиков
pub async fn list(
    erp: &dyn ErpBackend,
    params: &ListParams,
    max_limit: u32,
) -> Result<Vec<PurchaseInvoice>, ErpError> {
    let query = list_query::<PurchaseInvoice>(params, max_limit);
    let query = with_eq(query, "status", &params.status);
    let query = with_eq(query, "supplier", &params.supplier);
    let query = with_search(query, params, "supplier_name");
    list_as(erp, &query).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::erp::fake::FakeErp;
    use contracts::shared::erp::FilterOperator;

    #[tokio::test]
    async fn test_period_and_supplier_filters() {
        let erp = FakeErp::new();
        let params = ListParams {
            supplier: Some("SUP-1".into()),
            from_date: Some("2025-01-01".into()),
            to_date: Some("2025-03-31".into()),
            limit: Some(100),
            ..Default::default()
        };
        list(&erp, &params, 1000).await.unwrap();

        let query = &erp.queries_for("Purchase Invoice")[0];
        assert_eq!(query.limit, 100);
        assert_eq!(query.filters.len(), 2);
        assert_eq!(query.filters[0].field, "posting_date");
        assert_eq!(query.filters[0].operator, FilterOperator::Between);
        assert_eq!(query.filters[1].field, "supplier");
    }
}
