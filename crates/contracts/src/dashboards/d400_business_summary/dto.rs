use serde::{Deserialize, Serialize};

use crate::domain::a004_sales_invoice::SalesInvoice;

/// Request for business summary dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardRequest {
    /// Start date in format "YYYY-MM-DD"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,
    /// End date in format "YYYY-MM-DD"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

/// Response for business summary dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Σ grand_total проведённых счетов покупателям
    pub total_revenue: f64,
    /// Σ grand_total проведённых счетов поставщиков
    pub total_expenses: f64,
    pub net_profit: f64,
    /// Σ outstanding_amount счетов покупателям
    pub receivables: f64,
    /// Σ outstanding_amount счетов поставщиков
    pub payables: f64,
    /// Σ stock_value по всем Bin
    pub inventory_value: f64,
    pub sales_invoice_count: usize,
    pub purchase_invoice_count: usize,
    pub customer_count: usize,
    pub open_lead_count: usize,
    pub open_opportunity_count: usize,
    pub asset_count: usize,
    /// Последние счета покупателям (не более 5)
    pub recent_sales: Vec<SalesInvoice>,
    /// Покупатели с наибольшей выручкой (не более 5)
    pub top_customers: Vec<CustomerRevenue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRevenue {
    pub customer: String,
    pub revenue: f64,
}
