use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::common::de::null_as_default;
use crate::domain::common::ErpDocument;
use crate::shared::validation::{looks_like_email, ValidationErrors, Validator};

/// Статусы лида, которые не считаются открытыми
pub const CLOSED_LEAD_STATUSES: [&str; 3] = ["Converted", "Do Not Contact", "Lost Quotation"];

/// Лид (doctype "Lead")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lead_name: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub email_id: Option<String>,
    #[serde(default)]
    pub mobile_no: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub creation: Option<String>,
}

impl Lead {
    pub fn is_open(&self) -> bool {
        match self.status.as_deref() {
            Some(s) => !CLOSED_LEAD_STATUSES.contains(&s),
            None => true,
        }
    }
}

impl ErpDocument for Lead {
    fn module_index() -> &'static str {
        "a009"
    }

    fn doctype() -> &'static str {
        "Lead"
    }

    fn list_fields() -> &'static [&'static str] {
        &[
            "name",
            "lead_name",
            "company_name",
            "email_id",
            "mobile_no",
            "source",
            "status",
            "creation",
        ]
    }

    fn element_name() -> &'static str {
        "Лид"
    }

    fn list_name() -> &'static str {
        "Лиды"
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// DTO для создания лида
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadDto {
    #[serde(default)]
    pub lead_name: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub email_id: Option<String>,
    #[serde(default)]
    pub mobile_no: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn filled(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl LeadDto {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        if self.lead_name.trim().is_empty() && filled(&self.company_name).is_none() {
            v.error("lead_name", "Укажите имя контакта или организацию");
        }
        if let Some(email) = filled(&self.email_id) {
            if !looks_like_email(email) {
                v.error("email_id", format!("Некорректный e-mail: {}", email));
            }
        }
        v.finish()
    }

    pub fn into_erp_payload(&self) -> Value {
        let lead_name = if self.lead_name.trim().is_empty() {
            filled(&self.company_name).unwrap_or_default().to_string()
        } else {
            self.lead_name.trim().to_string()
        };

        let mut payload = json!({
            "doctype": Lead::doctype(),
            "lead_name": lead_name,
        });
        for (key, value) in [
            ("company_name", &self.company_name),
            ("email_id", &self.email_id),
            ("mobile_no", &self.mobile_no),
            ("source", &self.source),
            ("notes", &self.notes),
        ] {
            if let Some(v) = filled(value) {
                payload[key] = json!(v);
            }
        }
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_or_company_required() {
        assert!(LeadDto::default().validate().unwrap_err().has_field("lead_name"));

        let d = LeadDto {
            company_name: Some("ООО Вектор".into()),
            ..Default::default()
        };
        assert!(d.validate().is_ok());
        assert_eq!(d.into_erp_payload()["lead_name"], "ООО Вектор");
    }

    #[test]
    fn test_bad_email() {
        let d = LeadDto {
            lead_name: "Иван".into(),
            email_id: Some("ivan@".into()),
            ..Default::default()
        };
        assert!(d.validate().unwrap_err().has_field("email_id"));
    }

    #[test]
    fn test_is_open() {
        let mut l = Lead::default();
        assert!(l.is_open());
        l.status = Some("Converted".into());
        assert!(!l.is_open());
    }
}
