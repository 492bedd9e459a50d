use serde::{Deserialize, Serialize};

use crate::domain::common::de::null_as_default;
use crate::domain::common::ErpDocument;
use crate::shared::erp::DocStatus;

/// Счёт поставщика (doctype "Purchase Invoice")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseInvoice {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub supplier: String,
    #[serde(default)]
    pub supplier_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub posting_date: String,
    #[serde(default)]
    pub bill_no: Option<String>,
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
}

impl ErpDocument for PurchaseInvoice {
    fn module_index() -> &'static str {
        "a005"
    }

    fn doctype() -> &'static str {
        "Purchase Invoice"
    }

    fn list_fields() -> &'static [&'static str] {
        &[
            "name",
            "supplier",
            "supplier_name",
            "posting_date",
            "bill_no",
            "grand_total",
            "outstanding_amount",
            "status",
            "docstatus",
            "company",
        ]
    }

    fn element_name() -> &'static str {
        "Счёт поставщика"
    }

    fn list_name() -> &'static str {
        "Счета поставщиков"
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn date_field() -> Option<&'static str> {
        Some("posting_date")
    }
}
