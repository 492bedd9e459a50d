use serde::{Deserialize, Serialize};

use crate::domain::common::de::{int_bool, null_as_default};
use crate::domain::common::ErpDocument;

/// Номенклатура (doctype "Item")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub item_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub item_name: String,
    #[serde(default)]
    pub item_group: Option<String>,
    #[serde(default)]
    pub stock_uom: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub standard_rate: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub valuation_rate: f64,
    #[serde(default, deserialize_with = "int_bool")]
    pub is_stock_item: bool,
    #[serde(default, deserialize_with = "int_bool")]
    pub disabled: bool,
}

impl Item {
    /// Код для строк документов; у ERP name и item_code обычно совпадают
    pub fn code(&self) -> &str {
        if self.item_code.is_empty() {
            &self.name
        } else {
            &self.item_code
        }
    }
}

impl ErpDocument for Item {
    fn module_index() -> &'static str {
        "a003"
    }

    fn doctype() -> &'static str {
        "Item"
    }

    fn list_fields() -> &'static [&'static str] {
        &[
            "name",
            "item_code",
            "item_name",
            "item_group",
            "stock_uom",
            "standard_rate",
            "valuation_rate",
            "is_stock_item",
            "disabled",
        ]
    }

    fn element_name() -> &'static str {
        "Номенклатура"
    }

    fn list_name() -> &'static str {
        "Номенклатура"
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Склад (doctype "Warehouse")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub warehouse_name: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "int_bool")]
    pub is_group: bool,
}

impl ErpDocument for Warehouse {
    fn module_index() -> &'static str {
        "a003"
    }

    fn doctype() -> &'static str {
        "Warehouse"
    }

    fn list_fields() -> &'static [&'static str] {
        &["name", "warehouse_name", "company", "is_group"]
    }

    fn element_name() -> &'static str {
        "Склад"
    }

    fn list_name() -> &'static str {
        "Склады"
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Остаток по номенклатуре на складе (doctype "Bin")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub item_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub warehouse: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub actual_qty: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stock_value: f64,
}

impl ErpDocument for Bin {
    fn module_index() -> &'static str {
        "a003"
    }

    fn doctype() -> &'static str {
        "Bin"
    }

    fn list_fields() -> &'static [&'static str] {
        &["name", "item_code", "warehouse", "actual_qty", "stock_value"]
    }

    fn element_name() -> &'static str {
        "Остаток"
    }

    fn list_name() -> &'static str {
        "Остатки"
    }

    fn name(&self) -> &str {
        &self.name
    }
}
