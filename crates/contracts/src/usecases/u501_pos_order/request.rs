use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::a004_sales_invoice::{
    items_payload, taxes_payload, validate_items, InvoiceItemDto, SalesInvoice,
};
use crate::domain::common::ErpDocument;
use crate::shared::totals::{Totals, DEFAULT_TAX_RATE};
use crate::shared::validation::{ValidationErrors, Validator};

/// Заказ кассового места
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosOrderRequest {
    pub customer: String,
    #[serde(default)]
    pub pos_profile: Option<String>,
    pub warehouse: String,
    pub mode_of_payment: String,
    pub paid_amount: f64,
    #[serde(default)]
    pub items: Vec<InvoiceItemDto>,
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
    #[serde(default)]
    pub posting_date: Option<String>,
}

fn default_tax_rate() -> f64 {
    DEFAULT_TAX_RATE
}

impl PosOrderRequest {
    pub fn totals(&self) -> Totals {
        Totals::compute(self.items.iter().map(|i| (i.qty, i.rate)), self.tax_rate)
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.required_str("customer", &self.customer, "Выберите покупателя")
            .required_str("warehouse", &self.warehouse, "Выберите склад")
            .required_str("mode_of_payment", &self.mode_of_payment, "Выберите способ оплаты")
            .non_empty_items("items", &self.items, "Корзина пуста");
        validate_items(&mut v, &self.items);

        if !(0.0..=1.0).contains(&self.tax_rate) {
            v.error("tax_rate", "Ставка налога должна быть от 0 до 1");
        }
        let total = self.totals().total;
        if !self.items.is_empty() && self.paid_amount < total {
            v.error(
                "paid_amount",
                format!("Оплачено {:.2}, к оплате {:.2}", self.paid_amount, total),
            );
        }
        v.finish()
    }

    /// Тело POS-счёта (`Sales Invoice` с `is_pos = 1`).
    /// В строку оплаты идёт итог, сдача считается отдельно.
    pub fn into_erp_payload(&self, posting_date: &str, tax_account: Option<&str>) -> Value {
        let totals = self.totals();
        let mut payload = json!({
            "doctype": SalesInvoice::doctype(),
            "is_pos": 1,
            "update_stock": 1,
            "customer": self.customer.trim(),
            "posting_date": self.posting_date.clone().unwrap_or_else(|| posting_date.to_string()),
            "set_warehouse": self.warehouse,
            "items": items_payload(&self.items),
            "payments": [{
                "mode_of_payment": self.mode_of_payment,
                "amount": totals.total,
            }],
        });
        if let Some(profile) = self.pos_profile.as_deref().filter(|p| !p.is_empty()) {
            payload["pos_profile"] = json!(profile);
        }
        if let Some(account) = tax_account {
            payload["taxes"] = taxes_payload(account, self.tax_rate);
        }
        payload
    }
}

/// Проверка остатка перед добавлением в корзину
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockCheckRequest {
    pub item_code: String,
    pub warehouse: String,
    pub qty: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> PosOrderRequest {
        PosOrderRequest {
            customer: "Розничный покупатель".into(),
            pos_profile: None,
            warehouse: "Shop - C".into(),
            mode_of_payment: "Cash".into(),
            paid_amount: 120.0,
            items: vec![InvoiceItemDto {
                item_code: "A".into(),
                qty: 2.0,
                rate: 50.0,
            }],
            tax_rate: 0.15,
            posting_date: None,
        }
    }

    #[test]
    fn test_underpaid_rejected() {
        let mut o = order();
        o.paid_amount = 100.0;
        assert!(o.validate().unwrap_err().has_field("paid_amount"));
        o.paid_amount = 115.0;
        assert!(o.validate().is_ok());
    }

    #[test]
    fn test_empty_cart_rejected() {
        let mut o = order();
        o.items.clear();
        o.customer.clear();
        let err = o.validate().unwrap_err();
        assert!(err.has_field("items"));
        assert!(err.has_field("customer"));
        assert!(!err.has_field("paid_amount"));
    }

    #[test]
    fn test_payload() {
        let p = order().into_erp_payload("2025-06-01", None);
        assert_eq!(p["is_pos"], 1);
        assert_eq!(p["posting_date"], "2025-06-01");
        assert_eq!(p["payments"][0]["amount"], 115.0);
        assert_eq!(p["set_warehouse"], "Shop - C");
    }
}
