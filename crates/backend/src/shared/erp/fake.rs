//! In-memory ERP для тестов сервисов и маршрутов

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use contracts::shared::erp::{ErpFilter, FilterOperator, ListQuery};

use super::{ErpBackend, ErpError, STOCK_BALANCE_METHOD};

#[derive(Default)]
pub struct FakeErp {
    docs: Mutex<HashMap<String, Vec<Value>>>,
    stock: Mutex<HashMap<(String, String), f64>>,
    failure: Mutex<Option<(u16, String)>>,
    pub queries: Mutex<Vec<ListQuery>>,
    pub inserted: Mutex<Vec<(String, Value)>>,
    pub submitted: Mutex<Vec<(String, String)>>,
    pub calls: Mutex<Vec<(String, Value)>>,
}

impl FakeErp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_docs(self, doctype: &str, docs: Vec<Value>) -> Self {
        self.docs
            .lock()
            .unwrap()
            .entry(doctype.to_string())
            .or_default()
            .extend(docs);
        self
    }

    pub fn with_stock(self, item_code: &str, warehouse: &str, qty: f64) -> Self {
        self.stock
            .lock()
            .unwrap()
            .insert((item_code.to_string(), warehouse.to_string()), qty);
        self
    }

    /// Все запросы завершаются ошибкой HTTP `status`
    pub fn failing(self, status: u16, message: &str) -> Self {
        *self.failure.lock().unwrap() = Some((status, message.to_string()));
        self
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn queries_for(&self, doctype: &str) -> Vec<ListQuery> {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.doctype == doctype)
            .cloned()
            .collect()
    }

    fn check_failure(&self) -> Result<(), ErpError> {
        match self.failure.lock().unwrap().clone() {
            Some((status, message)) => Err(ErpError::Status { status, message }),
            None => Ok(()),
        }
    }
}

fn compare(doc_value: &Value, filter_value: &Value) -> Option<std::cmp::Ordering> {
    match (doc_value, filter_value) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn like(doc_value: &Value, pattern: &Value) -> bool {
    let (Some(text), Some(pattern)) = (doc_value.as_str(), pattern.as_str()) else {
        return false;
    };
    let needle = pattern.trim_matches('%').to_lowercase();
    text.to_lowercase().contains(&needle)
}

fn matches(doc: &Value, filter: &ErpFilter) -> bool {
    use std::cmp::Ordering::*;

    let value = doc.get(&filter.field).cloned().unwrap_or(Value::Null);
    let cmp = compare(&value, &filter.value);
    let list = filter.value.as_array().cloned().unwrap_or_default();

    match filter.operator {
        FilterOperator::Eq => value == filter.value,
        FilterOperator::Ne => value != filter.value,
        FilterOperator::Gt => cmp == Some(Greater),
        FilterOperator::Gte => matches!(cmp, Some(Greater | Equal)),
        FilterOperator::Lt => cmp == Some(Less),
        FilterOperator::Lte => matches!(cmp, Some(Less | Equal)),
        FilterOperator::Like => like(&value, &filter.value),
        FilterOperator::NotLike => !like(&value, &filter.value),
        FilterOperator::In => list.contains(&value),
        FilterOperator::NotIn => !list.contains(&value),
        FilterOperator::Between => match list.as_slice() {
            [from, to] => {
                matches!(compare(&value, from), Some(Greater | Equal))
                    && matches!(compare(&value, to), Some(Less | Equal))
            }
            _ => false,
        },
        FilterOperator::Is => match filter.value.as_str() {
            Some("set") => !value.is_null(),
            Some("not set") => value.is_null(),
            _ => false,
        },
    }
}

#[async_trait]
impl ErpBackend for FakeErp {
    async fn get_list(&self, query: &ListQuery) -> Result<Vec<Value>, ErpError> {
        self.queries.lock().unwrap().push(query.clone());
        self.check_failure()?;

        let docs = self.docs.lock().unwrap();
        let rows = docs.get(&query.doctype).cloned().unwrap_or_default();
        let mut rows: Vec<Value> = rows
            .into_iter()
            .filter(|doc| query.filters.iter().all(|f| matches(doc, f)))
            .skip(query.start as usize)
            .collect();
        if query.limit > 0 {
            rows.truncate(query.limit as usize);
        }
        Ok(rows)
    }

    async fn get_doc(&self, doctype: &str, name: &str) -> Result<Value, ErpError> {
        self.check_failure()?;
        self.docs
            .lock()
            .unwrap()
            .get(doctype)
            .and_then(|docs| docs.iter().find(|d| d["name"] == name).cloned())
            .ok_or_else(|| ErpError::NotFound {
                doctype: doctype.to_string(),
                name: name.to_string(),
            })
    }

    async fn insert_doc(&self, doctype: &str, doc: Value) -> Result<Value, ErpError> {
        self.check_failure()?;
        let mut inserted = self.inserted.lock().unwrap();
        let mut doc = doc;
        if doc.get("name").and_then(|n| n.as_str()).is_none() {
            let prefix: String = doctype
                .split_whitespace()
                .filter_map(|w| w.chars().next())
                .collect();
            doc["name"] = json!(format!("{}-{:05}", prefix.to_uppercase(), inserted.len() + 1));
        }
        doc["docstatus"] = json!(0);
        inserted.push((doctype.to_string(), doc.clone()));
        self.docs
            .lock()
            .unwrap()
            .entry(doctype.to_string())
            .or_default()
            .push(doc.clone());
        Ok(doc)
    }

    async fn submit_doc(&self, doctype: &str, name: &str) -> Result<Value, ErpError> {
        self.check_failure()?;
        self.submitted
            .lock()
            .unwrap()
            .push((doctype.to_string(), name.to_string()));

        let mut docs = self.docs.lock().unwrap();
        let doc = docs
            .get_mut(doctype)
            .and_then(|docs| docs.iter_mut().find(|d| d["name"] == name))
            .ok_or_else(|| ErpError::NotFound {
                doctype: doctype.to_string(),
                name: name.to_string(),
            })?;
        doc["docstatus"] = json!(1);
        Ok(doc.clone())
    }

    async fn call_method(&self, method: &str, args: Value) -> Result<Value, ErpError> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), args.clone()));
        self.check_failure()?;

        if method == STOCK_BALANCE_METHOD {
            let key = (
                args["item_code"].as_str().unwrap_or_default().to_string(),
                args["warehouse"].as_str().unwrap_or_default().to_string(),
            );
            return Ok(self
                .stock
                .lock()
                .unwrap()
                .get(&key)
                .map(|qty| json!(qty))
                .unwrap_or(Value::Null));
        }
        Ok(Value::Null)
    }
}
