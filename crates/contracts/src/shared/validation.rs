//! Проверка обязательных полей форм перед отправкой в ERP.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }
}

/// Накопитель ошибок: проверяет все поля, а не только первое
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: &str, message: impl Into<String>) -> &mut Self {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
        self
    }

    pub fn required_str(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.error(field, message);
        }
        self
    }

    pub fn required_opt(&mut self, field: &str, value: Option<&str>, message: &str) -> &mut Self {
        self.required_str(field, value.unwrap_or(""), message)
    }

    pub fn positive(&mut self, field: &str, value: f64, message: &str) -> &mut Self {
        if !(value > 0.0) {
            self.error(field, message);
        }
        self
    }

    pub fn non_negative(&mut self, field: &str, value: f64, message: &str) -> &mut Self {
        if !(value >= 0.0) {
            self.error(field, message);
        }
        self
    }

    pub fn non_empty_items<T>(&mut self, field: &str, items: &[T], message: &str) -> &mut Self {
        if items.is_empty() {
            self.error(field, message);
        }
        self
    }

    /// Дата в формате YYYY-MM-DD; пустое значение считается отсутствующим
    pub fn date(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.error(field, message);
        } else if parse_date(value).is_none() {
            self.error(field, format!("Некорректная дата: {}", value));
        }
        self
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn finish(&mut self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(std::mem::take(&mut self.errors)))
        }
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Простейшая проверка e-mail: `local@domain.tld`
pub fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_all_errors() {
        let err = Validator::new()
            .required_str("customer", "  ", "Покупатель обязателен")
            .positive("qty", 0.0, "Количество должно быть больше нуля")
            .required_str("company", "ACME", "Организация обязательна")
            .finish()
            .unwrap_err();

        assert_eq!(err.0.len(), 2);
        assert!(err.has_field("customer"));
        assert!(err.has_field("qty"));
        assert_eq!(
            err.to_string(),
            "Покупатель обязателен; Количество должно быть больше нуля"
        );
    }

    #[test]
    fn test_date_format() {
        let mut v = Validator::new();
        v.date("posting_date", "2025-02-30", "Дата обязательна");
        assert!(!v.is_valid());
        assert!(Validator::new().date("d", "2025-02-28", "x").finish().is_ok());
    }

    #[test]
    fn test_nan_is_not_positive() {
        assert!(Validator::new().positive("x", f64::NAN, "x").finish().is_err());
    }

    #[test]
    fn test_email() {
        assert!(looks_like_email("info@example.com"));
        assert!(!looks_like_email("info@example"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("a b@example.com"));
    }
}
