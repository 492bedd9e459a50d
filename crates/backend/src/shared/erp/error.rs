use thiserror::Error;

#[derive(Debug, Error)]
pub enum ErpError {
    #[error("Сетевая ошибка при запросе {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("ERP вернул HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Документ {doctype} '{name}' не найден в ERP")]
    NotFound { doctype: String, name: String },

    #[error("Ошибка разбора ответа ERP: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Ошибка настройки клиента ERP: {0}")]
    Config(String),
}

impl ErpError {
    /// Документ или ресурс отсутствует в ERP
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ErpError::NotFound { .. } | ErpError::Status { status: 404, .. }
        )
    }
}

/// Текст ошибки из тела ответа ERP.
///
/// Frappe кладёт сообщения в `_server_messages` (JSON-строка со списком
/// JSON-строк), `exception` или `message`.
pub fn extract_error_message(body: &str) -> String {
    let parsed: serde_json::Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => return truncate(body.trim(), 300),
    };

    if let Some(raw) = parsed.get("_server_messages").and_then(|v| v.as_str()) {
        if let Some(message) = first_server_message(raw) {
            return message;
        }
    }
    for key in ["exception", "message", "exc_type"] {
        if let Some(text) = parsed.get(key).and_then(|v| v.as_str()) {
            if !text.trim().is_empty() {
                return text.trim().to_string();
            }
        }
    }
    truncate(body.trim(), 300)
}

fn first_server_message(raw: &str) -> Option<String> {
    let messages: Vec<String> = serde_json::from_str(raw).ok()?;
    let first = messages.into_iter().next()?;
    match serde_json::from_str::<serde_json::Value>(&first) {
        Ok(obj) => obj
            .get("message")
            .and_then(|m| m.as_str())
            .map(|m| m.to_string()),
        Err(_) => Some(first),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}…", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_messages_preferred() {
        let body = r#"{"exception":"frappe.exceptions.ValidationError","_server_messages":"[\"{\\\"message\\\": \\\"Customer is mandatory\\\"}\"]"}"#;
        assert_eq!(extract_error_message(body), "Customer is mandatory");
    }

    #[test]
    fn test_exception_then_message() {
        assert_eq!(
            extract_error_message(r#"{"exception":"PermissionError: not allowed"}"#),
            "PermissionError: not allowed"
        );
        assert_eq!(extract_error_message(r#"{"message":"Not found"}"#), "Not found");
    }

    #[test]
    fn test_plain_text_body() {
        assert_eq!(extract_error_message("  Bad Gateway \n"), "Bad Gateway");
        let long = "x".repeat(400);
        assert_eq!(extract_error_message(&long).chars().count(), 301);
    }

    #[test]
    fn test_not_found_detection() {
        let e = ErpError::Status {
            status: 404,
            message: "DocType X not found".into(),
        };
        assert!(e.is_not_found());
        let e = ErpError::Status {
            status: 417,
            message: "ValidationError".into(),
        };
        assert!(!e.is_not_found());
    }
}
