use std::collections::{BTreeMap, HashSet};

use chrono::Local;

use contracts::domain::a003_item::Item;
use contracts::domain::a004_sales_invoice::SalesInvoice;
use contracts::domain::common::ErpDocument;
use contracts::shared::erp::{ErpFilter, ListQuery};
use contracts::shared::totals::round_money;
use contracts::usecases::u501_pos_order::{
    PosBootstrap, PosOrderRequest, PosOrderResponse, StockCheckRequest, StockCheckResponse,
};

use crate::api::ApiError;
use crate::domain::{a001_customer, a003_item, a006_payment_entry};
use crate::shared::config::Config;
use crate::shared::erp::{created_document, list_as, list_of, stock_balance, ErpBackend, ErpError};

/// Данные для открытия кассы: товары, покупатели, склады, способы оплаты
pub async fn bootstrap(erp: &dyn ErpBackend, config: &Config) -> Result<PosBootstrap, ErpError> {
    let limit = config.dashboard.list_limit;
    let items_query = list_of::<Item>()
        .filter(ErpFilter::eq("disabled", 0))
        .filter(ErpFilter::eq("is_sales_item", 1))
        .order_by("item_name asc")
        .limit(limit);

    let (items, customers, warehouses, modes_of_payment) = tokio::try_join!(
        list_as::<Item>(erp, &items_query),
        a001_customer::service::options(erp, limit),
        a003_item::service::list_warehouses(erp, &config.erp.company, limit),
        a006_payment_entry::service::enabled_modes(erp),
    )?;

    Ok(PosBootstrap {
        items,
        customers,
        warehouses,
        modes_of_payment,
        tax_rate: config.effective_tax_rate(),
        default_customer: config.pos.default_customer.clone(),
        default_warehouse: config.pos.default_warehouse.clone(),
    })
}

/// Проверка остатка перед добавлением в корзину
pub async fn stock_check(
    erp: &dyn ErpBackend,
    request: &StockCheckRequest,
) -> Result<StockCheckResponse, ApiError> {
    a003_item::service::check_stock(erp, request).await
}

/// Количество по каждому товару корзины (строки одного товара суммируются)
fn required_quantities(request: &PosOrderRequest) -> BTreeMap<String, f64> {
    let mut required = BTreeMap::new();
    for item in &request.items {
        *required.entry(item.item_code.trim().to_string()).or_insert(0.0) += item.qty;
    }
    required
}

/// Коды услуг и прочих нескладских позиций среди `codes`
async fn non_stock_items(
    erp: &dyn ErpBackend,
    codes: Vec<String>,
) -> Result<HashSet<String>, ErpError> {
    let query = ListQuery::new(Item::doctype())
        .fields(&["name", "is_stock_item"])
        .filter(ErpFilter::is_in("name", codes))
        .limit(0);
    let items: Vec<Item> = list_as(erp, &query).await?;
    Ok(items
        .into_iter()
        .filter(|i| !i.is_stock_item)
        .map(|i| i.name)
        .collect())
}

/// Строки, которых не хватает на складе; нескладские позиции не проверяются
async fn find_shortages(
    erp: &dyn ErpBackend,
    request: &PosOrderRequest,
) -> Result<Vec<StockCheckResponse>, ErpError> {
    let warehouse = request.warehouse.trim();
    let required = required_quantities(request);
    let skip = non_stock_items(erp, required.keys().cloned().collect()).await?;

    let mut shortages = Vec::new();
    for (item_code, qty) in required {
        if skip.contains(&item_code) {
            continue;
        }
        let available = stock_balance(erp, &item_code, warehouse).await?;
        let check = StockCheckResponse::new(&item_code, warehouse, qty, available);
        if !check.sufficient {
            shortages.push(check);
        }
    }
    Ok(shortages)
}

/// Оформление чека: проверка формы и остатков, создание POS-счёта,
/// проведение, расчёт сдачи. Ставка налога берётся из настроек сервера.
pub async fn create_order(
    erp: &dyn ErpBackend,
    config: &Config,
    mut request: PosOrderRequest,
) -> Result<PosOrderResponse, ApiError> {
    if request.pos_profile.is_none() {
        request.pos_profile = config.pos.pos_profile.clone();
    }
    request.tax_rate = config.effective_tax_rate();
    request.validate()?;

    let shortages = find_shortages(erp, &request).await?;
    if !shortages.is_empty() {
        let details: Vec<String> = shortages
            .iter()
            .map(|s| format!("{} (нужно {}, есть {})", s.item_code, s.requested, s.available))
            .collect();
        return Err(ApiError::Conflict(format!(
            "Недостаточно остатка на складе {}: {}",
            request.warehouse,
            details.join(", ")
        )));
    }

    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
    let payload = request.into_erp_payload(&today, config.tax_account());
    let doc = erp.insert_doc(SalesInvoice::doctype(), payload).await?;
    let created = created_document(SalesInvoice::doctype(), &doc)?;
    let submitted = erp.submit_doc(SalesInvoice::doctype(), &created.name).await?;

    let totals = request.totals();
    let grand_total = submitted
        .get("grand_total")
        .and_then(|v| v.as_f64())
        .unwrap_or(totals.total);
    let change_amount = round_money((request.paid_amount - grand_total).max(0.0));

    tracing::info!(
        "POS order {} for '{}': total {:.2}, paid {:.2}, change {:.2}",
        created.name,
        request.customer,
        grand_total,
        request.paid_amount,
        change_amount
    );

    Ok(PosOrderResponse {
        invoice: created.name,
        grand_total,
        change_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::erp::fake::FakeErp;
    use contracts::domain::a004_sales_invoice::InvoiceItemDto;
    use serde_json::json;

    fn order(paid: f64) -> PosOrderRequest {
        PosOrderRequest {
            customer: "Розничный покупатель".into(),
            pos_profile: None,
            warehouse: "Shop - C".into(),
            mode_of_payment: "Cash".into(),
            paid_amount: paid,
            items: vec![
                InvoiceItemDto {
                    item_code: "A".into(),
                    qty: 1.0,
                    rate: 40.0,
                },
                InvoiceItemDto {
                    item_code: "B".into(),
                    qty: 2.0,
                    rate: 30.0,
                },
                InvoiceItemDto {
                    item_code: "A".into(),
                    qty: 1.0,
                    rate: 40.0,
                },
            ],
            tax_rate: 0.15,
            posting_date: None,
        }
    }

    fn taxed_config() -> Config {
        let mut config = Config::default();
        config.erp.tax_account = Some("VAT - C".into());
        config
    }

    fn line(item_code: &str, qty: f64, rate: f64) -> InvoiceItemDto {
        InvoiceItemDto {
            item_code: item_code.into(),
            qty,
            rate,
        }
    }

    #[tokio::test]
    async fn test_order_created_and_submitted() {
        let erp = FakeErp::new()
            .with_stock("A", "Shop - C", 5.0)
            .with_stock("B", "Shop - C", 2.0);

        // 140 + 21 налог = 161
        let response = create_order(&erp, &taxed_config(), order(200.0)).await.unwrap();
        assert_eq!(response.grand_total, 161.0);
        assert_eq!(response.change_amount, 39.0);

        let inserted = erp.inserted.lock().unwrap();
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].1["is_pos"], 1);
        assert_eq!(inserted[0].1["payments"][0]["mode_of_payment"], "Cash");
        assert_eq!(
            erp.submitted.lock().unwrap()[0],
            ("Sales Invoice".to_string(), response.invoice.clone())
        );
    }

    #[tokio::test]
    async fn test_shortage_rejected_with_conflict() {
        // A нужно 2 (две строки по 1), на складе 1
        let erp = FakeErp::new()
            .with_stock("A", "Shop - C", 1.0)
            .with_stock("B", "Shop - C", 10.0);

        let err = create_order(&erp, &taxed_config(), order(500.0)).await.unwrap_err();
        match err {
            ApiError::Conflict(message) => {
                assert!(message.contains("A (нужно 2, есть 1)"));
                assert!(!message.contains("B ("));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(erp.inserted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_underpaid_order_not_checked() {
        let erp = FakeErp::new();
        let err = create_order(&erp, &taxed_config(), order(100.0)).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref e) if e.has_field("paid_amount")));
        assert!(erp.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pos_profile_from_config() {
        let erp = FakeErp::new()
            .with_stock("A", "Shop - C", 5.0)
            .with_stock("B", "Shop - C", 5.0);
        let mut config = taxed_config();
        config.pos.pos_profile = Some("Main POS".into());

        create_order(&erp, &config, order(161.0)).await.unwrap();

        let payload = erp.inserted.lock().unwrap()[0].1.clone();
        assert_eq!(payload["pos_profile"], "Main POS");
        assert_eq!(payload["taxes"][0]["rate"], 15.0);
    }

    #[tokio::test]
    async fn test_bootstrap_uses_config() {
        let erp = FakeErp::new()
            .with_docs(
                "Item",
                vec![
                    json!({"name": "A", "item_name": "Кофе", "standard_rate": 120.0, "disabled": 0, "is_sales_item": 1}),
                    json!({"name": "Z", "item_name": "Сырьё", "disabled": 0, "is_sales_item": 0}),
                ],
            )
            .with_docs("Mode of Payment", vec![json!({"name": "Cash", "enabled": 1})]);
        let mut config = taxed_config();
        config.pos.tax_rate = 0.2;
        config.pos.default_customer = Some("Розничный покупатель".into());

        let data = bootstrap(&erp, &config).await.unwrap();
        assert_eq!(data.items.len(), 1);
        assert_eq!(data.items[0].item_name, "Кофе");
        assert_eq!(data.modes_of_payment[0].name, "Cash");
        assert_eq!(data.tax_rate, 0.2);
        assert_eq!(data.default_customer.as_deref(), Some("Розничный покупатель"));
    }

    #[tokio::test]
    async fn test_service_item_not_checked_for_stock() {
        let erp = FakeErp::new()
            .with_docs(
                "Item",
                vec![
                    json!({"name": "SERVICE-FEE", "is_stock_item": 0}),
                    json!({"name": "A", "is_stock_item": 1}),
                ],
            )
            .with_stock("A", "Shop - C", 3.0);
        let mut request = order(0.0);
        request.items = vec![line("SERVICE-FEE", 1.0, 100.0), line("A", 1.0, 40.0)];
        request.paid_amount = 200.0;

        let response = create_order(&erp, &taxed_config(), request).await.unwrap();
        assert_eq!(response.grand_total, 161.0);

        let calls = erp.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1["item_code"], "A");
    }

    #[tokio::test]
    async fn test_client_tax_rate_replaced_by_configured() {
        let erp = FakeErp::new().with_stock("A", "Shop - C", 5.0);
        let mut request = order(100.0);
        request.items = vec![line("A", 1.0, 100.0)];
        request.tax_rate = 0.0;

        // 100 + 15 налог: оплаты 100 не хватает
        let err = create_order(&erp, &taxed_config(), request.clone()).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref e) if e.has_field("paid_amount")));

        request.paid_amount = 115.0;
        create_order(&erp, &taxed_config(), request).await.unwrap();
        let payload = erp.inserted.lock().unwrap()[0].1.clone();
        assert_eq!(payload["taxes"][0]["rate"], 15.0);
        assert_eq!(payload["payments"][0]["amount"], 115.0);
    }

    #[tokio::test]
    async fn test_no_tax_account_means_untaxed_order() {
        let erp = FakeErp::new().with_stock("A", "Shop - C", 5.0);
        let mut request = order(115.0);
        request.items = vec![line("A", 1.0, 100.0)];

        let response = create_order(&erp, &Config::default(), request).await.unwrap();
        assert_eq!(response.grand_total, 100.0);
        assert_eq!(response.change_amount, 15.0);

        let payload = erp.inserted.lock().unwrap()[0].1.clone();
        assert!(payload.get("taxes").is_none());
        assert_eq!(payload["payments"][0]["amount"], 100.0);
    }

    #[tokio::test]
    async fn test_bootstrap_without_tax_account_is_untaxed() {
        let data = bootstrap(&FakeErp::new(), &Config::default()).await.unwrap();
        assert_eq!(data.tax_rate, 0.0);
    }
}
