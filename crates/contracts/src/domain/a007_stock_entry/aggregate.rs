use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::common::de::null_as_default;
use crate::domain::common::ErpDocument;
use crate::shared::erp::DocStatus;
use crate::shared::validation::{ValidationErrors, Validator};

/// Вид складской операции
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StockEntryType {
    #[default]
    #[serde(rename = "Material Receipt")]
    MaterialReceipt,
    #[serde(rename = "Material Issue")]
    MaterialIssue,
    #[serde(rename = "Material Transfer")]
    MaterialTransfer,
}

impl StockEntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockEntryType::MaterialReceipt => "Material Receipt",
            StockEntryType::MaterialIssue => "Material Issue",
            StockEntryType::MaterialTransfer => "Material Transfer",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockEntryType::MaterialReceipt => "Поступление",
            StockEntryType::MaterialIssue => "Списание",
            StockEntryType::MaterialTransfer => "Перемещение",
        }
    }

    pub fn needs_source(&self) -> bool {
        matches!(
            self,
            StockEntryType::MaterialIssue | StockEntryType::MaterialTransfer
        )
    }

    pub fn needs_target(&self) -> bool {
        matches!(
            self,
            StockEntryType::MaterialReceipt | StockEntryType::MaterialTransfer
        )
    }
}

/// Складской документ (doctype "Stock Entry")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockEntry {
    pub name: String,
    #[serde(default)]
    pub stock_entry_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub posting_date: String,
    #[serde(default)]
    pub from_warehouse: Option<String>,
    #[serde(default)]
    pub to_warehouse: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_amount: f64,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub docstatus: DocStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<StockEntryItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockEntryItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub item_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub qty: f64,
    #[serde(default)]
    pub s_warehouse: Option<String>,
    #[serde(default)]
    pub t_warehouse: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub basic_rate: f64,
}

impl ErpDocument for StockEntry {
    fn module_index() -> &'static str {
        "a007"
    }

    fn doctype() -> &'static str {
        "Stock Entry"
    }

    fn list_fields() -> &'static [&'static str] {
        &[
            "name",
            "stock_entry_type",
            "posting_date",
            "from_warehouse",
            "to_warehouse",
            "total_amount",
            "remarks",
            "docstatus",
        ]
    }

    fn element_name() -> &'static str {
        "Складская операция"
    }

    fn list_name() -> &'static str {
        "Складские операции"
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn date_field() -> Option<&'static str> {
        Some("posting_date")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockEntryItemDto {
    pub item_code: String,
    pub qty: f64,
    /// Цена поступления; для списания и перемещения берётся оценка ERP
    #[serde(default)]
    pub basic_rate: Option<f64>,
}

/// DTO для перемещения / поступления / списания
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockEntryDto {
    pub stock_entry_type: StockEntryType,
    pub posting_date: String,
    #[serde(default)]
    pub from_warehouse: Option<String>,
    #[serde(default)]
    pub to_warehouse: Option<String>,
    #[serde(default)]
    pub items: Vec<StockEntryItemDto>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

fn filled(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl StockEntryDto {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.date("posting_date", &self.posting_date, "Дата документа обязательна")
            .non_empty_items("items", &self.items, "Добавьте хотя бы одну строку");

        let kind = self.stock_entry_type;
        if kind.needs_source() {
            v.required_opt("from_warehouse", self.from_warehouse.as_deref(), "Укажите склад-отправитель");
        }
        if kind.needs_target() {
            v.required_opt("to_warehouse", self.to_warehouse.as_deref(), "Укажите склад-получатель");
        }
        if kind == StockEntryType::MaterialTransfer
            && filled(&self.from_warehouse).is_some()
            && filled(&self.from_warehouse) == filled(&self.to_warehouse)
        {
            v.error("to_warehouse", "Склады отправителя и получателя совпадают");
        }

        for (idx, item) in self.items.iter().enumerate() {
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
            if let Some(rate) = item.basic_rate {
                v.non_negative(
                    &format!("items[{}].basic_rate", idx),
                    rate,
                    &format!("Строка {}: цена не может быть отрицательной", row),
                );
            }
        }

        v.finish()
    }

    /// Тело запроса `POST /api/resource/Stock Entry`.
    /// Склады проставляются и в шапку, и в каждую строку.
    pub fn into_erp_payload(&self) -> Value {
        let kind = self.stock_entry_type;
        let source = filled(&self.from_warehouse).filter(|_| kind.needs_source());
        let target = filled(&self.to_warehouse).filter(|_| kind.needs_target());

        let items: Vec<Value> = self
            .items
            .iter()
            .map(|i| {
                let mut row = json!({ "item_code": i.item_code.trim(), "qty": i.qty });
                if let Some(s) = source {
                    row["s_warehouse"] = json!(s);
                }
                if let Some(t) = target {
                    row["t_warehouse"] = json!(t);
                }
                if let Some(rate) = i.basic_rate {
                    row["basic_rate"] = json!(rate);
                }
                row
            })
            .collect();

        let mut payload = json!({
            "doctype": StockEntry::doctype(),
            "stock_entry_type": kind.as_str(),
            "purpose": kind.as_str(),
            "posting_date": self.posting_date,
            "set_posting_time": 1,
            "items": items,
        });
        if let Some(s) = source {
            payload["from_warehouse"] = json!(s);
        }
        if let Some(t) = target {
            payload["to_warehouse"] = json!(t);
        }
        if let Some(remarks) = filled(&self.remarks) {
            payload["remarks"] = json!(remarks);
        }
        if let Some(company) = filled(&self.company) {
            payload["company"] = json!(company);
        }
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> StockEntryItemDto {
        StockEntryItemDto {
            item_code: "SKU-1".into(),
            qty: 3.0,
            basic_rate: None,
        }
    }

    #[test]
    fn test_receipt_requires_target_only() {
        let d = StockEntryDto {
            stock_entry_type: StockEntryType::MaterialReceipt,
            posting_date: "2025-04-01".into(),
            from_warehouse: Some("Ignored - C".into()),
            items: vec![item()],
            ..Default::default()
        };
        let err = d.validate().unwrap_err();
        assert!(err.has_field("to_warehouse"));
        assert!(!err.has_field("from_warehouse"));
    }

    #[test]
    fn test_transfer_same_warehouse_rejected() {
        let d = StockEntryDto {
            stock_entry_type: StockEntryType::MaterialTransfer,
            posting_date: "2025-04-01".into(),
            from_warehouse: Some("Stores - C".into()),
            to_warehouse: Some("Stores - C".into()),
            items: vec![item()],
            ..Default::default()
        };
        assert!(d.validate().unwrap_err().has_field("to_warehouse"));
    }

    #[test]
    fn test_row_quantity_and_rate_checked() {
        let d = StockEntryDto {
            stock_entry_type: StockEntryType::MaterialReceipt,
            posting_date: "2025-04-01".into(),
            to_warehouse: Some("Stores - C".into()),
            items: vec![
                StockEntryItemDto {
                    qty: 0.0,
                    ..item()
                },
                StockEntryItemDto {
                    basic_rate: Some(-1.0),
                    ..item()
                },
                StockEntryItemDto {
                    basic_rate: Some(0.0),
                    ..item()
                },
            ],
            ..Default::default()
        };
        let err = d.validate().unwrap_err();
        assert_eq!(err.fields().len(), 2);
        assert!(err.has_field("items[0].qty"));
        assert!(err.has_field("items[1].basic_rate"));
    }

    #[test]
    fn test_transfer_payload_sets_row_warehouses() {
        let d = StockEntryDto {
            stock_entry_type: StockEntryType::MaterialTransfer,
            posting_date: "2025-04-01".into(),
            from_warehouse: Some("Stores - C".into()),
            to_warehouse: Some("Shop - C".into()),
            items: vec![item()],
            ..Default::default()
        };
        assert!(d.validate().is_ok());
        let p = d.into_erp_payload();
        assert_eq!(p["stock_entry_type"], "Material Transfer");
        assert_eq!(p["items"][0]["s_warehouse"], "Stores - C");
        assert_eq!(p["items"][0]["t_warehouse"], "Shop - C");
    }

    #[test]
    fn test_receipt_payload_drops_source() {
        let d = StockEntryDto {
            stock_entry_type: StockEntryType::MaterialReceipt,
            posting_date: "2025-04-01".into(),
            from_warehouse: Some("Stores - C".into()),
            to_warehouse: Some("Shop - C".into()),
            items: vec![StockEntryItemDto {
                basic_rate: Some(12.5),
                ..item()
            }],
            ..Default::default()
        };
        let p = d.into_erp_payload();
        assert!(p.get("from_warehouse").is_none());
        assert!(p["items"][0].get("s_warehouse").is_none());
        assert_eq!(p["items"][0]["basic_rate"], 12.5);
    }
}
