//! Десериализация полей ERP: ERP отдаёт `null` для пустых полей
//! и 0/1 для флагов.

use serde::{Deserialize, Deserializer};

pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrBool {
    Int(i64),
    Bool(bool),
}

/// Флаг 0/1 (или true/false, или null) в bool
pub fn int_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<IntOrBool>::deserialize(deserializer)? {
        Some(IntOrBool::Int(v)) => v != 0,
        Some(IntOrBool::Bool(v)) => v,
        None => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize, Default)]
    struct Row {
        #[serde(default, deserialize_with = "null_as_default")]
        amount: f64,
        #[serde(default, deserialize_with = "int_bool")]
        disabled: bool,
    }

    #[test]
    fn test_nulls_and_flags() {
        let r: Row = serde_json::from_value(json!({"amount": null, "disabled": 1})).unwrap();
        assert_eq!(r.amount, 0.0);
        assert!(r.disabled);

        let r: Row = serde_json::from_value(json!({})).unwrap();
        assert!(!r.disabled);

        let r: Row = serde_json::from_value(json!({"amount": 5.5, "disabled": false})).unwrap();
        assert_eq!(r.amount, 5.5);
        assert!(!r.disabled);
    }
}
