use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::common::de::null_as_default;
use crate::domain::common::ErpDocument;
use crate::shared::api::OptionItem;
use crate::shared::validation::{ValidationErrors, Validator};

/// Основное средство (doctype "Asset")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub asset_name: String,
    #[serde(default)]
    pub item_code: Option<String>,
    #[serde(default)]
    pub asset_category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub custodian: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gross_purchase_amount: f64,
    #[serde(default)]
    pub purchase_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ErpDocument for Asset {
    fn module_index() -> &'static str {
        "a008"
    }

    fn doctype() -> &'static str {
        "Asset"
    }

    fn list_fields() -> &'static [&'static str] {
        &[
            "name",
            "asset_name",
            "item_code",
            "asset_category",
            "location",
            "custodian",
            "gross_purchase_amount",
            "purchase_date",
            "status",
        ]
    }

    fn element_name() -> &'static str {
        "Основное средство"
    }

    fn list_name() -> &'static str {
        "Основные средства"
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn date_field() -> Option<&'static str> {
        Some("purchase_date")
    }
}

/// Категория ОС (doctype "Asset Category")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetCategory {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub asset_category_name: String,
}

impl ErpDocument for AssetCategory {
    fn module_index() -> &'static str {
        "a008"
    }

    fn doctype() -> &'static str {
        "Asset Category"
    }

    fn list_fields() -> &'static [&'static str] {
        &["name", "asset_category_name"]
    }

    fn element_name() -> &'static str {
        "Категория ОС"
    }

    fn list_name() -> &'static str {
        "Категории ОС"
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Местоположение (doctype "Location")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location_name: String,
}

impl ErpDocument for Location {
    fn module_index() -> &'static str {
        "a008"
    }

    fn doctype() -> &'static str {
        "Location"
    }

    fn list_fields() -> &'static [&'static str] {
        &["name", "location_name"]
    }

    fn element_name() -> &'static str {
        "Местоположение"
    }

    fn list_name() -> &'static str {
        "Местоположения"
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Справочники для формы перемещения ОС
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetOptions {
    pub assets: Vec<OptionItem>,
    pub categories: Vec<OptionItem>,
    pub locations: Vec<OptionItem>,
}

/// Назначение перемещения ОС
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AssetMovementPurpose {
    #[default]
    Transfer,
    Issue,
    Receipt,
}

impl AssetMovementPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetMovementPurpose::Transfer => "Transfer",
            AssetMovementPurpose::Issue => "Issue",
            AssetMovementPurpose::Receipt => "Receipt",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssetMovementPurpose::Transfer => "Перемещение",
            AssetMovementPurpose::Issue => "Выдача сотруднику",
            AssetMovementPurpose::Receipt => "Приём от сотрудника",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetMovementItemDto {
    pub asset: String,
    #[serde(default)]
    pub source_location: Option<String>,
    #[serde(default)]
    pub target_location: Option<String>,
    #[serde(default)]
    pub from_employee: Option<String>,
    #[serde(default)]
    pub to_employee: Option<String>,
}

/// DTO для создания перемещения ОС (doctype "Asset Movement")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetMovementDto {
    pub purpose: AssetMovementPurpose,
    pub transaction_date: String,
    #[serde(default)]
    pub assets: Vec<AssetMovementItemDto>,
    #[serde(default)]
    pub company: Option<String>,
}

pub const ASSET_MOVEMENT_DOCTYPE: &str = "Asset Movement";

fn filled(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl AssetMovementDto {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.date("transaction_date", &self.transaction_date, "Дата перемещения обязательна")
            .non_empty_items("assets", &self.assets, "Выберите хотя бы одно ОС");

        for (idx, row) in self.assets.iter().enumerate() {
            let n = idx + 1;
            if row.asset.trim().is_empty() {
                v.error(
                    &format!("assets[{}].asset", idx),
                    format!("Строка {}: не выбрано ОС", n),
                );
            }
            match self.purpose {
                AssetMovementPurpose::Transfer => {
                    if filled(&row.target_location).is_none() {
                        v.error(
                            &format!("assets[{}].target_location", idx),
                            format!("Строка {}: укажите новое местоположение", n),
                        );
                    } else if filled(&row.source_location) == filled(&row.target_location) {
                        v.error(
                            &format!("assets[{}].target_location", idx),
                            format!("Строка {}: местоположение не меняется", n),
                        );
                    }
                }
                AssetMovementPurpose::Issue => {
                    if filled(&row.to_employee).is_none() {
                        v.error(
                            &format!("assets[{}].to_employee", idx),
                            format!("Строка {}: укажите сотрудника", n),
                        );
                    }
                }
                AssetMovementPurpose::Receipt => {
                    if filled(&row.target_location).is_none() {
                        v.error(
                            &format!("assets[{}].target_location", idx),
                            format!("Строка {}: укажите местоположение", n),
                        );
                    }
                }
            }
        }

        v.finish()
    }

    pub fn into_erp_payload(&self) -> Value {
        let assets: Vec<Value> = self
            .assets
            .iter()
            .map(|row| {
                json!({
                    "asset": row.asset.trim(),
                    "source_location": filled(&row.source_location),
                    "target_location": filled(&row.target_location),
                    "from_employee": filled(&row.from_employee),
                    "to_employee": filled(&row.to_employee),
                })
            })
            .collect();

        let mut payload = json!({
            "doctype": ASSET_MOVEMENT_DOCTYPE,
            "purpose": self.purpose.as_str(),
            "transaction_date": self.transaction_date,
            "assets": assets,
        });
        if let Some(company) = filled(&self.company) {
            payload["company"] = json!(company);
        }
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_requires_new_location() {
        let d = AssetMovementDto {
            purpose: AssetMovementPurpose::Transfer,
            transaction_date: "2025-05-10".into(),
            assets: vec![AssetMovementItemDto {
                asset: "ACC-ASS-0001".into(),
                source_location: Some("Офис".into()),
                target_location: Some("Офис".into()),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(d.validate().unwrap_err().has_field("assets[0].target_location"));
    }

    #[test]
    fn test_issue_requires_employee() {
        let mut d = AssetMovementDto {
            purpose: AssetMovementPurpose::Issue,
            transaction_date: "2025-05-10".into(),
            assets: vec![AssetMovementItemDto {
                asset: "ACC-ASS-0001".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(d.validate().unwrap_err().has_field("assets[0].to_employee"));
        d.assets[0].to_employee = Some("HR-EMP-0001".into());
        assert!(d.validate().is_ok());
        assert_eq!(d.into_erp_payload()["assets"][0]["to_employee"], "HR-EMP-0001");
    }

    #[test]
    fn test_empty_movement() {
        let err = AssetMovementDto::default().validate().unwrap_err();
        assert!(err.has_field("transaction_date"));
        assert!(err.has_field("assets"));
    }
}
