use std::collections::HashMap;

use contracts::dashboards::d400_business_summary::{
    CustomerRevenue, DashboardRequest, DashboardSummary,
};
use contracts::domain::a001_customer::Customer;
use contracts::domain::a003_item::Bin;
use contracts::domain::a004_sales_invoice::SalesInvoice;
use contracts::domain::a005_purchase_invoice::PurchaseInvoice;
use contracts::domain::a008_asset::Asset;
use contracts::domain::a009_lead::{Lead, CLOSED_LEAD_STATUSES};
use contracts::domain::a010_opportunity::{Opportunity, OPEN_OPPORTUNITY_STATUSES};
use contracts::domain::common::ErpDocument;
use contracts::shared::erp::{DocStatus, ErpFilter, ListQuery};
use contracts::shared::totals::round_money;

use crate::shared::erp::{list_as, with_eq, with_period, ErpBackend, ErpError};
use crate::shared::format::format_amount;

const TOP_CUSTOMERS: usize = 5;
const RECENT_SALES: usize = 5;

/// Проведённые документы за период, только поля для сумм
fn submitted_query(doctype: &str, fields: &[&str], request: &DashboardRequest, limit: u32) -> ListQuery {
    let query = ListQuery::new(doctype)
        .fields(fields)
        .filter(ErpFilter::eq("docstatus", DocStatus::Submitted.as_i64()))
        .order_by("posting_date desc")
        .limit(limit);
    let query = with_period(query, "posting_date", &request.from_date, &request.to_date);
    with_eq(query, "company", &request.company)
}

async fn count(erp: &dyn ErpBackend, query: &ListQuery) -> Result<usize, ErpError> {
    Ok(erp.get_list(query).await?.len())
}

/// Сводка по бизнесу.
///
/// По одному запросу списка на doctype, все запросы идут параллельно;
/// суммы считаются в памяти. Каждый список ограничен `limit` строками.
pub async fn get_summary(
    erp: &dyn ErpBackend,
    request: &DashboardRequest,
    limit: u32,
) -> Result<DashboardSummary, ErpError> {
    let sales_query = submitted_query(
        SalesInvoice::doctype(),
        &[
            "name",
            "customer",
            "customer_name",
            "posting_date",
            "grand_total",
            "outstanding_amount",
            "status",
            "docstatus",
        ],
        request,
        limit,
    );
    let purchase_query = submitted_query(
        PurchaseInvoice::doctype(),
        &["name", "supplier", "posting_date", "grand_total", "outstanding_amount", "docstatus"],
        request,
        limit,
    );
    let bins_query = ListQuery::new(Bin::doctype())
        .fields(&["item_code", "warehouse", "stock_value"])
        .filter(ErpFilter::gt("actual_qty", 0))
        .limit(limit);
    let customers_query = ListQuery::new(Customer::doctype())
        .fields(&["name"])
        .filter(ErpFilter::eq("disabled", 0))
        .limit(limit);
    let leads_query = ListQuery::new(Lead::doctype())
        .fields(&["name"])
        .filter(ErpFilter::not_in("status", CLOSED_LEAD_STATUSES))
        .limit(limit);
    let opportunities_query = ListQuery::new(Opportunity::doctype())
        .fields(&["name"])
        .filter(ErpFilter::is_in("status", OPEN_OPPORTUNITY_STATUSES))
        .limit(limit);
    let assets_query = ListQuery::new(Asset::doctype())
        .fields(&["name"])
        .filter(ErpFilter::ne("docstatus", DocStatus::Cancelled.as_i64()))
        .limit(limit);

    let (sales, purchases, bins, customer_count, open_lead_count, open_opportunity_count, asset_count) = tokio::try_join!(
        list_as::<SalesInvoice>(erp, &sales_query),
        list_as::<PurchaseInvoice>(erp, &purchase_query),
        list_as::<Bin>(erp, &bins_query),
        count(erp, &customers_query),
        count(erp, &leads_query),
        count(erp, &opportunities_query),
        count(erp, &assets_query),
    )?;

    for (doctype, rows) in [
        (SalesInvoice::doctype(), sales.len()),
        (PurchaseInvoice::doctype(), purchases.len()),
        (Bin::doctype(), bins.len()),
    ] {
        if rows as u32 >= limit {
            tracing::warn!("Dashboard: {} list hit the limit of {} rows, totals are partial", doctype, limit);
        }
    }

    let mut summary = summarize(sales, &purchases, &bins);
    summary.customer_count = customer_count;
    summary.open_lead_count = open_lead_count;
    summary.open_opportunity_count = open_opportunity_count;
    summary.asset_count = asset_count;

    tracing::info!(
        "Dashboard: revenue {}, expenses {}, inventory {}",
        format_amount(summary.total_revenue),
        format_amount(summary.total_expenses),
        format_amount(summary.inventory_value)
    );
    Ok(summary)
}

/// Суммы, топ покупателей и последние счета по уже загруженным спискам
pub fn summarize(
    sales: Vec<SalesInvoice>,
    purchases: &[PurchaseInvoice],
    bins: &[Bin],
) -> DashboardSummary {
    let total_revenue = round_money(sales.iter().map(|s| s.grand_total).sum());
    let receivables = round_money(sales.iter().map(|s| s.outstanding_amount).sum());
    let total_expenses = round_money(purchases.iter().map(|p| p.grand_total).sum());
    let payables = round_money(purchases.iter().map(|p| p.outstanding_amount).sum());
    let inventory_value = round_money(bins.iter().map(|b| b.stock_value).sum());

    let top_customers = top_customers(&sales);
    let sales_invoice_count = sales.len();

    let mut recent_sales = sales;
    recent_sales.sort_by(|a, b| {
        b.posting_date
            .cmp(&a.posting_date)
            .then_with(|| b.name.cmp(&a.name))
    });
    recent_sales.truncate(RECENT_SALES);

    DashboardSummary {
        total_revenue,
        total_expenses,
        net_profit: round_money(total_revenue - total_expenses),
        receivables,
        payables,
        inventory_value,
        sales_invoice_count,
        purchase_invoice_count: purchases.len(),
        recent_sales,
        top_customers,
        ..Default::default()
    }
}

fn top_customers(sales: &[SalesInvoice]) -> Vec<CustomerRevenue> {
    let mut by_customer: HashMap<&str, f64> = HashMap::new();
    for invoice in sales {
        let customer = invoice
            .customer_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&invoice.customer);
        *by_customer.entry(customer).or_insert(0.0) += invoice.grand_total;
    }

    let mut rows: Vec<CustomerRevenue> = by_customer
        .into_iter()
        .map(|(customer, revenue)| CustomerRevenue {
            customer: customer.to_string(),
            revenue: round_money(revenue),
        })
        .collect();
    rows.sort_by(|a, b| {
        b.revenue
            .total_cmp(&a.revenue)
            .then_with(|| a.customer.cmp(&b.customer))
    });
    rows.truncate(TOP_CUSTOMERS);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::erp::fake::FakeErp;
    use serde_json::{json, Value};

    fn sales_doc(name: &str, customer: &str, date: &str, total: f64, outstanding: f64, docstatus: i64) -> Value {
        json!({
            "name": name,
            "customer": customer,
            "customer_name": customer,
            "posting_date": date,
            "grand_total": total,
            "outstanding_amount": outstanding,
            "docstatus": docstatus,
        })
    }

    fn erp() -> FakeErp {
        FakeErp::new()
            .with_docs(
                "Sales Invoice",
                vec![
                    sales_doc("SI-1", "Альфа", "2025-01-05", 1000.0, 0.0, 1),
                    sales_doc("SI-2", "Бета", "2025-01-10", 500.0, 500.0, 1),
                    sales_doc("SI-3", "Альфа", "2025-02-01", 250.5, 100.0, 1),
                    sales_doc("SI-4", "Гамма", "2025-02-02", 9999.0, 9999.0, 0),
                ],
            )
            .with_docs(
                "Purchase Invoice",
                vec![
                    json!({"name": "PI-1", "supplier": "S", "posting_date": "2025-01-03", "grand_total": 600.0, "outstanding_amount": 200.0, "docstatus": 1}),
                    json!({"name": "PI-2", "supplier": "S", "posting_date": "2025-01-04", "grand_total": 70.0, "outstanding_amount": 0.0, "docstatus": 2}),
                ],
            )
            .with_docs(
                "Bin",
                vec![
                    json!({"item_code": "A", "warehouse": "W", "actual_qty": 3.0, "stock_value": 300.0}),
                    json!({"item_code": "B", "warehouse": "W", "actual_qty": 1.0, "stock_value": 45.25}),
                ],
            )
            .with_docs(
                "Customer",
                vec![
                    json!({"name": "Альфа", "disabled": 0}),
                    json!({"name": "Бета", "disabled": 0}),
                    json!({"name": "Старый", "disabled": 1}),
                ],
            )
            .with_docs(
                "Lead",
                vec![
                    json!({"name": "L-1", "status": "Open"}),
                    json!({"name": "L-2", "status": "Converted"}),
                    json!({"name": "L-3", "status": "Replied"}),
                ],
            )
            .with_docs(
                "Opportunity",
                vec![
                    json!({"name": "O-1", "status": "Open"}),
                    json!({"name": "O-2", "status": "Lost"}),
                ],
            )
            .with_docs("Asset", vec![json!({"name": "AST-1", "docstatus": 1})])
    }

    #[tokio::test]
    async fn test_summary_sums() {
        let erp = erp();
        let summary = get_summary(&erp, &DashboardRequest::default(), 1000).await.unwrap();

        assert_eq!(summary.total_revenue, 1750.5);
        assert_eq!(summary.receivables, 600.0);
        assert_eq!(summary.total_expenses, 600.0);
        assert_eq!(summary.payables, 200.0);
        assert_eq!(summary.net_profit, 1150.5);
        assert_eq!(summary.inventory_value, 345.25);
        assert_eq!(summary.sales_invoice_count, 3);
        assert_eq!(summary.purchase_invoice_count, 1);
        assert_eq!(summary.customer_count, 2);
        assert_eq!(summary.open_lead_count, 2);
        assert_eq!(summary.open_opportunity_count, 1);
        assert_eq!(summary.asset_count, 1);

        assert_eq!(summary.top_customers[0].customer, "Альфа");
        assert_eq!(summary.top_customers[0].revenue, 1250.5);
        assert_eq!(summary.recent_sales[0].name, "SI-3");
    }

    #[tokio::test]
    async fn test_one_query_per_doctype() {
        let erp = erp();
        get_summary(&erp, &DashboardRequest::default(), 1000).await.unwrap();
        assert_eq!(erp.query_count(), 7);
        assert!(erp.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_period_filter() {
        let erp = erp();
        let request = DashboardRequest {
            from_date: Some("2025-02-01".into()),
            to_date: Some("2025-02-28".into()),
            company: None,
        };
        let summary = get_summary(&erp, &request, 1000).await.unwrap();
        assert_eq!(summary.total_revenue, 250.5);
        assert_eq!(summary.total_expenses, 0.0);

        let query = &erp.queries_for("Sales Invoice")[0];
        assert!(query.filters.contains(&ErpFilter::between("posting_date", "2025-02-01", "2025-02-28")));
    }

    #[tokio::test]
    async fn test_erp_failure_propagates() {
        let erp = FakeErp::new().failing(502, "Bad Gateway");
        let result = get_summary(&erp, &DashboardRequest::default(), 1000).await;
        assert!(matches!(result, Err(ErpError::Status { status: 502, .. })));
    }

    #[test]
    fn test_top_customers_limited() {
        let sales: Vec<SalesInvoice> = (0..8)
            .map(|i| SalesInvoice {
                name: format!("SI-{}", i),
                customer: format!("C{}", i),
                grand_total: 100.0 * (i as f64 + 1.0),
                ..Default::default()
            })
            .collect();
        let top = top_customers(&sales);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].customer, "C7");
        assert_eq!(top[4].customer, "C3");
    }
}
