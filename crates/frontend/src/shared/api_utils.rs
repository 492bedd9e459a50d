//! HTTP-обмен с backend: все маршруты `/api/*` отвечают конвертом `ApiResponse`.

use contracts::shared::api::ApiResponse;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Базовый адрес backend: тот же хост, порт 3000.
///
/// Пустая строка, если `window` недоступен.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// `base/name` с экранированием имени документа (в именах ERP бывают `/` и пробелы)
pub fn doc_path(base: &str, name: &str) -> String {
    format!("{}/{}", base, String::from(js_sys::encode_uri_component(name)))
}

/// Путь с query string; пустые параметры не попадают в строку
pub fn with_query<Q: Serialize>(path: &str, query: &Q) -> String {
    match serde_qs::to_string(query) {
        Ok(qs) if !qs.is_empty() => format!("{}?{}", path, qs),
        _ => path.to_string(),
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    let status = response.status();
    match response.json::<ApiResponse<T>>().await {
        Ok(envelope) => envelope.into_result(),
        Err(_) if !response.ok() => Err(format!("Ошибка сервера: HTTP {}", status)),
        Err(e) => Err(format!("Не удалось разобрать ответ: {}", e)),
    }
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let response = Request::get(&api_url(path))
        .header("Cache-Control", "no-cache")
        .send()
        .await
        .map_err(|e| format!("Сервер недоступен: {}", e))?;
    decode(response).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    let response = Request::post(&api_url(path))
        .json(body)
        .map_err(|e| format!("Не удалось сформировать запрос: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Сервер недоступен: {}", e))?;
    decode(response).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::api::ListParams;

    #[test]
    fn test_with_query_skips_empty_params() {
        assert_eq!(with_query("/api/crm/leads", &ListParams::default()), "/api/crm/leads");

        let params = ListParams {
            status: Some("Unpaid".into()),
            limit: Some(50),
            ..Default::default()
        };
        assert_eq!(
            with_query("/api/accounting/sales-invoices", &params),
            "/api/accounting/sales-invoices?limit=50&status=Unpaid"
        );
    }
}
