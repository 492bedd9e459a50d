use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use contracts::domain::common::ErpDocument;
use contracts::shared::api::CreatedDocument;
use contracts::shared::erp::ListQuery;

use super::ErpError;

pub const STOCK_BALANCE_METHOD: &str = "erpnext.stock.utils.get_stock_balance";

/// Операции ERP, которыми пользуются сервисы.
///
/// Реализация по HTTP - [`super::ErpClient`]; в тестах подменяется
/// in-memory реализацией.
#[async_trait]
pub trait ErpBackend: Send + Sync {
    /// `GET /api/resource/{doctype}` со списком полей и фильтров
    async fn get_list(&self, query: &ListQuery) -> Result<Vec<Value>, ErpError>;

    /// `GET /api/resource/{doctype}/{name}`
    async fn get_doc(&self, doctype: &str, name: &str) -> Result<Value, ErpError>;

    /// `POST /api/resource/{doctype}`; возвращает сохранённый документ
    async fn insert_doc(&self, doctype: &str, doc: Value) -> Result<Value, ErpError>;

    /// Провести документ (docstatus = 1)
    async fn submit_doc(&self, doctype: &str, name: &str) -> Result<Value, ErpError>;

    /// `POST /api/method/{method}`; возвращает поле `message`
    async fn call_method(&self, method: &str, args: Value) -> Result<Value, ErpError>;
}

/// Запрос списка с полями view-model
pub fn list_of<T: ErpDocument>() -> ListQuery {
    ListQuery::new(T::doctype()).fields(T::list_fields())
}

pub async fn list_as<T: DeserializeOwned>(
    erp: &dyn ErpBackend,
    query: &ListQuery,
) -> Result<Vec<T>, ErpError> {
    let rows = erp.get_list(query).await?;
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(ErpError::from))
        .collect()
}

pub async fn get_as<T: DeserializeOwned>(
    erp: &dyn ErpBackend,
    doctype: &str,
    name: &str,
) -> Result<T, ErpError> {
    let doc = erp.get_doc(doctype, name).await?;
    Ok(serde_json::from_value(doc)?)
}

/// Имя, присвоенное ERP новому документу
pub fn created_document(doctype: &str, doc: &Value) -> anyhow::Result<CreatedDocument> {
    let name = doc
        .get("name")
        .and_then(|n| n.as_str())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| anyhow::anyhow!("ERP не вернул имя созданного документа {}", doctype))?;
    Ok(CreatedDocument {
        doctype: doctype.to_string(),
        name: name.to_string(),
    })
}

/// Остаток товара на складе; `null` от ERP (нет движений) считается нулём
pub async fn stock_balance(
    erp: &dyn ErpBackend,
    item_code: &str,
    warehouse: &str,
) -> Result<f64, ErpError> {
    let value = erp
        .call_method(
            STOCK_BALANCE_METHOD,
            json!({ "item_code": item_code, "warehouse": warehouse }),
        )
        .await?;
    Ok(value.as_f64().unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::erp::fake::FakeErp;
    use contracts::domain::a001_customer::Customer;

    #[tokio::test]
    async fn test_list_as_decodes_rows() {
        let erp = FakeErp::new().with_docs(
            "Customer",
            vec![
                json!({"name": "C-1", "customer_name": "ООО Ромашка", "disabled": 0}),
                json!({"name": "C-2", "customer_name": null, "disabled": 1}),
            ],
        );

        let customers: Vec<Customer> = list_as(&erp, &list_of::<Customer>()).await.unwrap();
        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0].customer_name, "ООО Ромашка");
        assert!(customers[1].disabled);
    }

    #[tokio::test]
    async fn test_get_as_not_found() {
        let erp = FakeErp::new();
        let result: Result<Customer, _> = get_as(&erp, "Customer", "missing").await;
        assert!(matches!(result, Err(ErpError::NotFound { .. })));
    }

    #[test]
    fn test_created_document_requires_name() {
        let doc = created_document("Lead", &json!({"name": "CRM-LEAD-0001"})).unwrap();
        assert_eq!(doc.name, "CRM-LEAD-0001");
        assert!(created_document("Lead", &json!({"lead_name": "x"})).is_err());
    }

    #[tokio::test]
    async fn test_stock_balance_defaults_to_zero() {
        let erp = FakeErp::new().with_stock("A", "Main - C", 7.0);
        assert_eq!(stock_balance(&erp, "A", "Main - C").await.unwrap(), 7.0);
        assert_eq!(stock_balance(&erp, "B", "Main - C").await.unwrap(), 0.0);
    }
}
