use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use contracts::shared::erp::{ErpEnvelope, ListQuery, ResourceEnvelope};

use super::error::extract_error_message;
use super::{ErpBackend, ErpError};
use crate::shared::config::ErpConfig;

/// HTTP-клиент REST API ERP
pub struct ErpClient {
    client: reqwest::Client,
    base_url: String,
    auth: Option<String>,
}

impl ErpClient {
    pub fn new(config: &ErpConfig) -> Result<Self, ErpError> {
        let base_url = config.url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ErpError::Config("не задан адрес ERP".into()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ErpError::Config(e.to_string()))?;

        let auth = match (config.api_key.as_deref(), config.api_secret.as_deref()) {
            (Some(key), Some(secret)) if !key.is_empty() && !secret.is_empty() => {
                Some(format!("token {}:{}", key, secret))
            }
            _ => None,
        };

        Ok(Self {
            client,
            base_url,
            auth,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/api/resource/{doctype}[/{name}]`, сегменты кодируются
    pub fn resource_url(&self, doctype: &str, name: Option<&str>) -> String {
        match name {
            Some(name) => format!(
                "{}/api/resource/{}/{}",
                self.base_url,
                urlencoding::encode(doctype),
                urlencoding::encode(name)
            ),
            None => format!(
                "{}/api/resource/{}",
                self.base_url,
                urlencoding::encode(doctype)
            ),
        }
    }

    pub fn method_url(&self, method: &str) -> String {
        format!("{}/api/method/{}", self.base_url, method)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");
        match &self.auth {
            Some(token) => builder.header(AUTHORIZATION, token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        url: &str,
    ) -> Result<T, ErpError> {
        let response = builder.send().await.map_err(|source| ErpError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        tracing::debug!("ERP response: {} for {}", status, url);

        let body = response.text().await.map_err(|source| ErpError::Transport {
            url: url.to_string(),
            source,
        })?;

        if !status.is_success() {
            let message = extract_error_message(&body);
            tracing::warn!("ERP error {} for {}: {}", status, url, message);
            return Err(ErpError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ErpBackend for ErpClient {
    async fn get_list(&self, query: &ListQuery) -> Result<Vec<Value>, ErpError> {
        let url = self.resource_url(&query.doctype, None);
        let pairs = query.query_pairs();
        tracing::debug!("ERP GET {} {:?}", url, pairs);

        let envelope: ResourceEnvelope<Vec<Value>> =
            self.send(self.request(Method::GET, &url).query(&pairs), &url).await?;
        Ok(envelope.data)
    }

    async fn get_doc(&self, doctype: &str, name: &str) -> Result<Value, ErpError> {
        let url = self.resource_url(doctype, Some(name));
        tracing::debug!("ERP GET {}", url);

        match self
            .send::<ResourceEnvelope<Value>>(self.request(Method::GET, &url), &url)
            .await
        {
            Ok(envelope) => Ok(envelope.data),
            Err(ErpError::Status { status: 404, .. }) => Err(ErpError::NotFound {
                doctype: doctype.to_string(),
                name: name.to_string(),
            }),
            Err(e) => Err(e),
        }
    }

    async fn insert_doc(&self, doctype: &str, doc: Value) -> Result<Value, ErpError> {
        let url = self.resource_url(doctype, None);
        tracing::debug!("ERP POST {}", url);

        let envelope: ResourceEnvelope<Value> = self
            .send(self.request(Method::POST, &url).json(&doc), &url)
            .await?;
        Ok(envelope.data)
    }

    async fn submit_doc(&self, doctype: &str, name: &str) -> Result<Value, ErpError> {
        let url = self.resource_url(doctype, Some(name));
        tracing::debug!("ERP PUT {} (submit)", url);

        let envelope: ResourceEnvelope<Value> = self
            .send(
                self.request(Method::PUT, &url).json(&json!({ "docstatus": 1 })),
                &url,
            )
            .await?;
        Ok(envelope.data)
    }

    async fn call_method(&self, method: &str, args: Value) -> Result<Value, ErpError> {
        let url = self.method_url(method);
        tracing::debug!("ERP POST {}", url);

        let envelope: ErpEnvelope<Value> = self
            .send(self.request(Method::POST, &url).json(&args), &url)
            .await?;
        Ok(envelope.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> ErpConfig {
        ErpConfig {
            url: url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_urls_are_encoded() {
        let client = ErpClient::new(&config("http://erp.local:8000/")).unwrap();
        assert_eq!(client.base_url(), "http://erp.local:8000");
        assert_eq!(
            client.resource_url("Sales Invoice", None),
            "http://erp.local:8000/api/resource/Sales%20Invoice"
        );
        assert_eq!(
            client.resource_url("Sales Invoice", Some("ACC-SINV-2025-00001")),
            "http://erp.local:8000/api/resource/Sales%20Invoice/ACC-SINV-2025-00001"
        );
        assert_eq!(
            client.method_url("erpnext.stock.utils.get_stock_balance"),
            "http://erp.local:8000/api/method/erpnext.stock.utils.get_stock_balance"
        );
    }

    #[test]
    fn test_token_auth() {
        let mut cfg = config("http://erp.local");
        assert!(ErpClient::new(&cfg).unwrap().auth.is_none());

        cfg.api_key = Some("k".into());
        cfg.api_secret = Some("s".into());
        assert_eq!(
            ErpClient::new(&cfg).unwrap().auth.as_deref(),
            Some("token k:s")
        );
    }

    #[test]
    fn test_empty_url_rejected() {
        assert!(matches!(
            ErpClient::new(&config(" ")),
            Err(ErpError::Config(_))
        ));
    }
}
