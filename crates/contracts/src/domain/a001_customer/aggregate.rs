use serde::{Deserialize, Serialize};

use crate::domain::common::de::{int_bool, null_as_default};
use crate::domain::common::ErpDocument;

/// Покупатель (doctype "Customer")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer_name: String,
    #[serde(default)]
    pub customer_group: Option<String>,
    #[serde(default)]
    pub territory: Option<String>,
    #[serde(default)]
    pub mobile_no: Option<String>,
    #[serde(default)]
    pub email_id: Option<String>,
    #[serde(default, deserialize_with = "int_bool")]
    pub disabled: bool,
}

impl Customer {
    /// Наименование для отображения (name, если customer_name пуст)
    pub fn display_name(&self) -> &str {
        if self.customer_name.trim().is_empty() {
            &self.name
        } else {
            &self.customer_name
        }
    }
}

impl ErpDocument for Customer {
    fn module_index() -> &'static str {
        "a001"
    }

    fn doctype() -> &'static str {
        "Customer"
    }

    fn list_fields() -> &'static [&'static str] {
        &[
            "name",
            "customer_name",
            "customer_group",
            "territory",
            "mobile_no",
            "email_id",
            "disabled",
        ]
    }

    fn element_name() -> &'static str {
        "Покупатель"
    }

    fn list_name() -> &'static str {
        "Покупатели"
    }

    fn name(&self) -> &str {
        &self.name
    }
}
