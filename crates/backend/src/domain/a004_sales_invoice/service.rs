use contracts::domain::a004_sales_invoice::{SalesInvoice, SalesInvoiceDto};
use contracts::domain::common::ErpDocument;
use contracts::shared::api::{CreatedDocument, ListParams};

use crate::api::ApiError;
use crate::shared::config::Config;
use crate::shared::erp::{
    created_document, get_as, list_as, list_query, with_eq, with_search, ErpBackend, ErpError,
};

/// Список счетов покупателям
pub async fn list(
    erp: &dyn ErpBackend,
    params: &ListParams,
    max_limit: u32,
) -> Result<Vec<SalesInvoice>, ErpError> {
    let query = list_query::<SalesInvoice>(params, max_limit);
    let query = with_eq(query, "status", &params.status);
    let query = with_eq(query, "customer", &params.customer);
    let query = with_search(query, params, "customer_name");
    list_as(erp, &query).await
}

/// Счёт со строками
pub async fn get(erp: &dyn ErpBackend, name: &str) -> Result<SalesInvoice, ErpError> {
    get_as(erp, SalesInvoice::doctype(), name).await
}

/// Создание счёта; при `submit` документ сразу проводится.
/// Ставка налога всегда берётся из настроек сервера.
pub async fn create(
    erp: &dyn ErpBackend,
    config: &Config,
    mut dto: SalesInvoiceDto,
) -> Result<CreatedDocument, ApiError> {
    dto.tax_rate = config.effective_tax_rate();
    dto.validate()?;
    if dto.company.as_deref().map_or(true, |c| c.trim().is_empty()) {
        dto.company = config.erp.company.clone();
    }

    let payload = dto.into_erp_payload(config.tax_account());
    let doc = erp.insert_doc(SalesInvoice::doctype(), payload).await?;
    let created = created_document(SalesInvoice::doctype(), &doc)?;

    tracing::info!(
        "Sales invoice {} created for '{}', total {:.2}",
        created.name,
        dto.customer,
        dto.totals().total
    );

    if dto.submit {
        erp.submit_doc(SalesInvoice::doctype(), &created.name).await?;
        tracing::info!("Sales invoice {} submitted", created.name);
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::erp::fake::FakeErp;
    use contracts::domain::a004_sales_invoice::InvoiceItemDto;
    use contracts::shared::erp::DocStatus;
    use serde_json::json;

    fn dto(submit: bool) -> SalesInvoiceDto {
        SalesInvoiceDto {
            customer: "CUST-1".into(),
            posting_date: "2025-03-01".into(),
            items: vec![InvoiceItemDto {
                item_code: "SKU-1".into(),
                qty: 2.0,
                rate: 100.0,
            }],
            submit,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_forwards_payload() {
        let erp = FakeErp::new();
        let mut config = Config::default();
        config.erp.company = Some("Моя компания".into());
        config.erp.tax_account = Some("VAT - C".into());

        let created = create(&erp, &config, dto(false)).await.unwrap();
        assert_eq!(created.doctype, "Sales Invoice");

        let inserted = erp.inserted.lock().unwrap();
        let (doctype, payload) = &inserted[0];
        assert_eq!(doctype, "Sales Invoice");
        assert_eq!(payload["company"], "Моя компания");
        assert_eq!(payload["due_date"], "2025-03-01");
        assert_eq!(payload["taxes"][0]["account_head"], "VAT - C");
        assert!(erp.submitted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_client_tax_rate_replaced_by_configured() {
        let erp = FakeErp::new();
        let mut config = Config::default();
        config.erp.tax_account = Some("VAT - C".into());
        config.pos.tax_rate = 0.2;

        let mut untaxed = dto(false);
        untaxed.tax_rate = 0.0;
        create(&erp, &config, untaxed).await.unwrap();

        let payload = erp.inserted.lock().unwrap()[0].1.clone();
        assert_eq!(payload["taxes"][0]["rate"], 20.0);
    }

    #[tokio::test]
    async fn test_invalid_client_tax_rate_ignored() {
        let erp = FakeErp::new();
        let mut odd = dto(false);
        odd.tax_rate = 5.0;

        create(&erp, &Config::default(), odd).await.unwrap();
        assert_eq!(erp.inserted.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_and_submit() {
        let erp = FakeErp::new();
        let created = create(&erp, &Config::default(), dto(true)).await.unwrap();

        let submitted = erp.submitted.lock().unwrap().clone();
        assert_eq!(submitted, vec![("Sales Invoice".to_string(), created.name.clone())]);

        let invoice = get(&erp, &created.name).await.unwrap();
        assert_eq!(invoice.docstatus, DocStatus::Submitted);
        assert!(erp.inserted.lock().unwrap()[0].1.get("taxes").is_none());
    }

    #[tokio::test]
    async fn test_invalid_form_not_sent() {
        let erp = FakeErp::new();
        let mut bad = dto(false);
        bad.customer = " ".into();
        bad.items.clear();

        let err = create(&erp, &Config::default(), bad).await.unwrap_err();
        match err {
            ApiError::Validation(errors) => {
                assert!(errors.has_field("customer"));
                assert!(errors.has_field("items"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(erp.inserted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_filters_by_customer() {
        let erp = FakeErp::new().with_docs(
            "Sales Invoice",
            vec![
                json!({"name": "SI-1", "customer": "CUST-1", "posting_date": "2025-01-10", "grand_total": 100.0, "docstatus": 1}),
                json!({"name": "SI-2", "customer": "CUST-2", "posting_date": "2025-01-11", "grand_total": 50.0, "docstatus": 1}),
            ],
        );
        let params = ListParams {
            customer: Some("CUST-2".into()),
            ..Default::default()
        };
        let rows = list(&erp, &params, 1000).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "SI-2");

        let query = &erp.queries_for("Sales Invoice")[0];
        assert_eq!(query.limit, 20);
        assert_eq!(query.order_by.as_deref(), Some("modified desc"));
    }
}
