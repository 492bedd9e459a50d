use serde::{Deserialize, Serialize};

use crate::domain::common::de::{int_bool, null_as_default};
use crate::domain::common::ErpDocument;

/// Поставщик (doctype "Supplier")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub supplier_name: String,
    #[serde(default)]
    pub supplier_group: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "int_bool")]
    pub disabled: bool,
}

impl ErpDocument for Supplier {
    fn module_index() -> &'static str {
        "a002"
    }

    fn doctype() -> &'static str {
        "Supplier"
    }

    fn list_fields() -> &'static [&'static str] {
        &["name", "supplier_name", "supplier_group", "country", "disabled"]
    }

    fn element_name() -> &'static str {
        "Поставщик"
    }

    fn list_name() -> &'static str {
        "Поставщики"
    }

    fn name(&self) -> &str {
        &self.name
    }
}
