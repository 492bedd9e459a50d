use serde::{Deserialize, Serialize};

use crate::domain::common::de::null_as_default;
use crate::domain::common::ErpDocument;

/// Статусы открытой сделки
pub const OPEN_OPPORTUNITY_STATUSES: [&str; 2] = ["Open", "Replied"];

/// Сделка (doctype "Opportunity")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub name: String,
    #[serde(default)]
    pub opportunity_from: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub party_name: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub opportunity_amount: f64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub expected_closing: Option<String>,
    #[serde(default)]
    pub sales_stage: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub probability: f64,
}

impl Opportunity {
    pub fn is_open(&self) -> bool {
        self.status
            .as_deref()
            .map(|s| OPEN_OPPORTUNITY_STATUSES.contains(&s))
            .unwrap_or(false)
    }

    /// Взвешенная сумма: сумма × вероятность
    pub fn weighted_amount(&self) -> f64 {
        crate::shared::totals::round_money(self.opportunity_amount * self.probability / 100.0)
    }
}

impl ErpDocument for Opportunity {
    fn module_index() -> &'static str {
        "a010"
    }

    fn doctype() -> &'static str {
        "Opportunity"
    }

    fn list_fields() -> &'static [&'static str] {
        &[
            "name",
            "opportunity_from",
            "party_name",
            "customer_name",
            "opportunity_amount",
            "status",
            "expected_closing",
            "sales_stage",
            "probability",
        ]
    }

    fn element_name() -> &'static str {
        "Сделка"
    }

    fn list_name() -> &'static str {
        "Сделки"
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn date_field() -> Option<&'static str> {
        Some("expected_closing")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_amount() {
        let o = Opportunity {
            opportunity_amount: 1000.0,
            probability: 25.0,
            status: Some("Open".into()),
            ..Default::default()
        };
        assert!(o.is_open());
        assert_eq!(o.weighted_amount(), 250.0);
    }
}
