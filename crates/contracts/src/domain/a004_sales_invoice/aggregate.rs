use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::common::de::null_as_default;
use crate::domain::common::ErpDocument;
use crate::shared::erp::DocStatus;
use crate::shared::totals::{line_amount, Totals, DEFAULT_TAX_RATE};
use crate::shared::validation::{parse_date, ValidationErrors, Validator};

// ============================================================================
// View model
// ============================================================================

/// Счёт покупателю (doctype "Sales Invoice")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesInvoice {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub posting_date: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub net_total: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_taxes_and_charges: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub grand_total: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub outstanding_amount: f64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub docstatus: DocStatus,
    #[serde(default)]
    pub company: Option<String>,
    /// Строки приходят только при загрузке документа целиком
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<InvoiceItem>,
}

/// Строка счёта
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub item_code: String,
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub qty: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rate: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
}

impl ErpDocument for SalesInvoice {
    fn module_index() -> &'static str {
        "a004"
    }

    fn doctype() -> &'static str {
        "Sales Invoice"
    }

    fn list_fields() -> &'static [&'static str] {
        &[
            "name",
            "customer",
            "customer_name",
            "posting_date",
            "due_date",
            "net_total",
            "total_taxes_and_charges",
            "grand_total",
            "outstanding_amount",
            "status",
            "docstatus",
            "company",
        ]
    }

    fn element_name() -> &'static str {
        "Счёт покупателю"
    }

    fn list_name() -> &'static str {
        "Счета покупателям"
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn date_field() -> Option<&'static str> {
        Some("posting_date")
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Строка формы нового счёта
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItemDto {
    pub item_code: String,
    pub qty: f64,
    pub rate: f64,
}

impl InvoiceItemDto {
    pub fn amount(&self) -> f64 {
        line_amount(self.qty, self.rate)
    }
}

/// DTO для создания счёта покупателю
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesInvoiceDto {
    pub customer: String,
    pub posting_date: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub items: Vec<InvoiceItemDto>,
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
    /// Провести документ сразу после создания
    #[serde(default)]
    pub submit: bool,
}

fn default_tax_rate() -> f64 {
    DEFAULT_TAX_RATE
}

impl Default for SalesInvoiceDto {
    fn default() -> Self {
        Self {
            customer: String::new(),
            posting_date: String::new(),
            due_date: None,
            company: None,
            items: Vec::new(),
            tax_rate: DEFAULT_TAX_RATE,
            submit: false,
        }
    }
}

impl SalesInvoiceDto {
    pub fn totals(&self) -> Totals {
        Totals::compute(self.items.iter().map(|i| (i.qty, i.rate)), self.tax_rate)
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.required_str("customer", &self.customer, "Покупатель обязателен для заполнения")
            .date("posting_date", &self.posting_date, "Дата документа обязательна")
            .non_empty_items("items", &self.items, "Добавьте хотя бы одну строку");

        validate_items(&mut v, &self.items);

        if !(0.0..=1.0).contains(&self.tax_rate) {
            v.error("tax_rate", "Ставка налога должна быть от 0 до 1");
        }

        if let Some(due) = self.due_date.as_deref().filter(|d| !d.trim().is_empty()) {
            match (parse_date(&self.posting_date), parse_date(due)) {
                (Some(posting), Some(due)) if due < posting => {
                    v.error("due_date", "Срок оплаты не может быть раньше даты документа");
                }
                (_, None) => {
                    v.error("due_date", format!("Некорректная дата: {}", due));
                }
                _ => {}
            }
        }

        v.finish()
    }

    /// Тело запроса `POST /api/resource/Sales Invoice`.
    /// Строка налога добавляется только если задан счёт налога.
    pub fn into_erp_payload(&self, tax_account: Option<&str>) -> Value {
        let due_date = self
            .due_date
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| self.posting_date.clone());

        let mut payload = json!({
            "doctype": SalesInvoice::doctype(),
            "customer": self.customer.trim(),
            "posting_date": self.posting_date,
            "due_date": due_date,
            "set_posting_time": 1,
            "items": items_payload(&self.items),
        });

        if let Some(company) = self.company.as_deref().filter(|c| !c.is_empty()) {
            payload["company"] = json!(company);
        }
        if let Some(account) = tax_account {
            payload["taxes"] = taxes_payload(account, self.tax_rate);
        }
        payload
    }
}

/// Общие проверки строк для счёта и POS-заказа
pub fn validate_items(v: &mut Validator, items: &[InvoiceItemDto]) {
    for (idx, item) in items.iter().enumerate() {
        let row = idx + 1;
        if item.item_code.trim().is_empty() {
            v.error(
                &format!("items[{}].item_code", idx),
                format!("Строка {}: не выбрана номенклатура", row),
            );
        }
        v.positive(
            &format!("items[{}].qty", idx),
            item.qty,
            &format!("Строка {}: количество должно быть больше нуля", row),
        );
        v.non_negative(
            &format!("items[{}].rate", idx),
            item.rate,
            &format!("Строка {}: цена не может быть отрицательной", row),
        );
    }
}

pub fn items_payload(items: &[InvoiceItemDto]) -> Value {
    Value::Array(
        items
            .iter()
            .map(|i| json!({ "item_code": i.item_code.trim(), "qty": i.qty, "rate": i.rate }))
            .collect(),
    )
}

/// Налог одной строкой "On Net Total"; ставка в ERP задаётся в процентах
pub fn taxes_payload(account: &str, tax_rate: f64) -> Value {
    let percent = (tax_rate * 100.0 * 10_000.0).round() / 10_000.0;
    json!([{
        "charge_type": "On Net Total",
        "account_head": account,
        "description": format!("Налог {}%", percent),
        "rate": percent,
    }])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> SalesInvoiceDto {
        SalesInvoiceDto {
            customer: "ООО Ромашка".into(),
            posting_date: "2025-03-01".into(),
            items: vec![InvoiceItemDto {
                item_code: "SKU-1".into(),
                qty: 2.0,
                rate: 100.0,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_invoice() {
        assert!(dto().validate().is_ok());
        assert_eq!(dto().totals().total, 230.0);
    }

    #[test]
    fn test_missing_required_fields() {
        let err = SalesInvoiceDto::default().validate().unwrap_err();
        assert!(err.has_field("customer"));
        assert!(err.has_field("posting_date"));
        assert!(err.has_field("items"));
    }

    #[test]
    fn test_bad_rows_and_due_date() {
        let mut d = dto();
        d.items.push(InvoiceItemDto {
            item_code: " ".into(),
            qty: 0.0,
            rate: -1.0,
        });
        d.due_date = Some("2025-02-01".into());
        let err = d.validate().unwrap_err();
        assert!(err.has_field("items[1].item_code"));
        assert!(err.has_field("items[1].qty"));
        assert!(err.has_field("items[1].rate"));
        assert!(err.has_field("due_date"));
    }

    #[test]
    fn test_tax_percent_rounded() {
        let taxes = taxes_payload("VAT - C", 0.07);
        assert_eq!(taxes[0]["rate"], 7.0);
        assert_eq!(taxes[0]["description"], "Налог 7%");
        assert_eq!(taxes_payload("VAT - C", 0.15)[0]["rate"], 15.0);
        assert_eq!(taxes_payload("VAT - C", 0.125)[0]["rate"], 12.5);
    }

    #[test]
    fn test_payload_defaults_due_date_and_taxes() {
        let p = dto().into_erp_payload(Some("VAT - C"));
        assert_eq!(p["due_date"], "2025-03-01");
        assert_eq!(p["items"][0]["item_code"], "SKU-1");
        assert_eq!(p["taxes"][0]["account_head"], "VAT - C");
        assert_eq!(p["taxes"][0]["rate"], 15.0);

        let p = dto().into_erp_payload(None);
        assert!(p.get("taxes").is_none());
    }

    #[test]
    fn test_parses_erp_row_with_nulls() {
        let inv: SalesInvoice = serde_json::from_value(serde_json::json!({
            "name": "ACC-SINV-0001",
            "customer": "ООО Ромашка",
            "posting_date": "2025-03-01",
            "grand_total": 230.0,
            "outstanding_amount": null,
            "docstatus": 1,
            "unknown_field": "x"
        }))
        .unwrap();
        assert_eq!(inv.outstanding_amount, 0.0);
        assert_eq!(inv.docstatus, DocStatus::Submitted);
        assert!(inv.items.is_empty());
    }
}
