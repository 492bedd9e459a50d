use serde::{Deserialize, Serialize};

use crate::domain::a003_item::{Item, Warehouse};
use crate::domain::a006_payment_entry::ModeOfPayment;
use crate::shared::api::OptionItem;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockCheckResponse {
    pub item_code: String,
    pub warehouse: String,
    pub requested: f64,
    pub available: f64,
    pub sufficient: bool,
}

impl StockCheckResponse {
    pub fn new(item_code: &str, warehouse: &str, requested: f64, available: f64) -> Self {
        Self {
            item_code: item_code.to_string(),
            warehouse: warehouse.to_string(),
            requested,
            available,
            sufficient: available >= requested,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosOrderResponse {
    /// Номер созданного счёта в ERP
    pub invoice: String,
    pub grand_total: f64,
    pub change_amount: f64,
}

/// Данные для открытия кассового места
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PosBootstrap {
    pub items: Vec<Item>,
    pub customers: Vec<OptionItem>,
    pub warehouses: Vec<Warehouse>,
    pub modes_of_payment: Vec<ModeOfPayment>,
    pub tax_rate: f64,
    pub default_customer: Option<String>,
    pub default_warehouse: Option<String>,
}
