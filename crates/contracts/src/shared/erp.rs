//! Протокол ERP (Frappe/ERPNext): фильтры, запросы списков, конверты ответов.
//!
//! Фильтр передаётся в ERP как тройка `[field, operator, value]`,
//! список фильтров — как JSON-массив таких троек.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Оператор сравнения в фильтре ERP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<=")]
    Lte,
    #[serde(rename = "like")]
    Like,
    #[serde(rename = "not like")]
    NotLike,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "not in")]
    NotIn,
    #[serde(rename = "between")]
    Between,
    #[serde(rename = "is")]
    Is,
}

impl FilterOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "=",
            FilterOperator::Ne => "!=",
            FilterOperator::Gt => ">",
            FilterOperator::Lt => "<",
            FilterOperator::Gte => ">=",
            FilterOperator::Lte => "<=",
            FilterOperator::Like => "like",
            FilterOperator::NotLike => "not like",
            FilterOperator::In => "in",
            FilterOperator::NotIn => "not in",
            FilterOperator::Between => "between",
            FilterOperator::Is => "is",
        }
    }
}

/// Один фильтр `[field, operator, value]`
#[derive(Debug, Clone, PartialEq)]
pub struct ErpFilter {
    pub field: String,
    pub operator: FilterOperator,
    pub value: Value,
}

impl ErpFilter {
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOperator::Eq, value)
    }

    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOperator::Ne, value)
    }

    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOperator::Gt, value)
    }

    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOperator::Gte, value)
    }

    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOperator::Lt, value)
    }

    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOperator::Lte, value)
    }

    pub fn like(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::Like, pattern.into())
    }

    /// `like %term%`
    pub fn contains(field: impl Into<String>, term: &str) -> Self {
        Self::new(field, FilterOperator::Like, format!("%{}%", term))
    }

    pub fn is_in<I, V>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let list: Vec<Value> = values.into_iter().map(Into::into).collect();
        Self::new(field, FilterOperator::In, Value::Array(list))
    }

    pub fn not_in<I, V>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let list: Vec<Value> = values.into_iter().map(Into::into).collect();
        Self::new(field, FilterOperator::NotIn, Value::Array(list))
    }

    pub fn between(field: impl Into<String>, from: &str, to: &str) -> Self {
        Self::new(
            field,
            FilterOperator::Between,
            Value::Array(vec![Value::from(from), Value::from(to)]),
        )
    }
}

impl Serialize for ErpFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.field, self.operator, &self.value).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ErpFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (field, operator, value) = <(String, FilterOperator, Value)>::deserialize(deserializer)?;
        Ok(Self {
            field,
            operator,
            value,
        })
    }
}

pub const DEFAULT_LIST_LIMIT: u32 = 20;

/// Запрос списка документов (`frappe.client.get_list` / `GET /api/resource/{doctype}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    pub doctype: String,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub filters: Vec<ErpFilter>,
    #[serde(default)]
    pub order_by: Option<String>,
    /// 0 — без ограничения (семантика ERP)
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub start: u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIST_LIMIT
}

impl ListQuery {
    pub fn new(doctype: impl Into<String>) -> Self {
        Self {
            doctype: doctype.into(),
            fields: Vec::new(),
            filters: Vec::new(),
            order_by: None,
            limit: DEFAULT_LIST_LIMIT,
            start: 0,
        }
    }

    pub fn fields(mut self, fields: &[&str]) -> Self {
        self.fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn filter(mut self, filter: ErpFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn filters(mut self, filters: impl IntoIterator<Item = ErpFilter>) -> Self {
        self.filters.extend(filters);
        self
    }

    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn start(mut self, start: u32) -> Self {
        self.start = start;
        self
    }

    /// Параметры query string для `GET /api/resource/{doctype}`
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if !self.fields.is_empty() {
            let fields = serde_json::to_string(&self.fields).unwrap_or_else(|_| "[]".into());
            pairs.push(("fields".to_string(), fields));
        }
        if !self.filters.is_empty() {
            let filters = serde_json::to_string(&self.filters).unwrap_or_else(|_| "[]".into());
            pairs.push(("filters".to_string(), filters));
        }
        if let Some(order_by) = &self.order_by {
            pairs.push(("order_by".to_string(), order_by.clone()));
        }
        pairs.push(("limit_page_length".to_string(), self.limit.to_string()));
        if self.start > 0 {
            pairs.push(("limit_start".to_string(), self.start.to_string()));
        }
        pairs
    }
}

/// Ответ `/api/method/...`: `{ "message": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErpEnvelope<T> {
    pub message: T,
}

/// Ответ `/api/resource/...`: `{ "data": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceEnvelope<T> {
    pub data: T,
}

/// Состояние документа в ERP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocStatus {
    #[default]
    Draft,
    Submitted,
    Cancelled,
}

impl DocStatus {
    pub fn as_i64(&self) -> i64 {
        match self {
            DocStatus::Draft => 0,
            DocStatus::Submitted => 1,
            DocStatus::Cancelled => 2,
        }
    }

    pub fn from_i64(v: i64) -> Option<Self> {
        match v {
            0 => Some(DocStatus::Draft),
            1 => Some(DocStatus::Submitted),
            2 => Some(DocStatus::Cancelled),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocStatus::Draft => "Черновик",
            DocStatus::Submitted => "Проведён",
            DocStatus::Cancelled => "Отменён",
        }
    }
}

impl Serialize for DocStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_i64())
    }
}

impl<'de> Deserialize<'de> for DocStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = i64::deserialize(deserializer)?;
        DocStatus::from_i64(v)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown docstatus {}", v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_serializes_as_triple() {
        let f = ErpFilter::eq("customer", "ACME");
        assert_eq!(serde_json::to_value(&f).unwrap(), json!(["customer", "=", "ACME"]));

        let f = ErpFilter::between("posting_date", "2025-01-01", "2025-01-31");
        assert_eq!(
            serde_json::to_value(&f).unwrap(),
            json!(["posting_date", "between", ["2025-01-01", "2025-01-31"]])
        );
    }

    #[test]
    fn test_filter_parses_from_triple() {
        let f: ErpFilter = serde_json::from_value(json!(["status", "not in", ["Converted"]])).unwrap();
        assert_eq!(f.field, "status");
        assert_eq!(f.operator, FilterOperator::NotIn);
        assert_eq!(f.value, json!(["Converted"]));
    }

    #[test]
    fn test_unknown_operator_rejected() {
        let r: Result<ErpFilter, _> = serde_json::from_value(json!(["a", "~", 1]));
        assert!(r.is_err());
    }

    #[test]
    fn test_query_pairs() {
        let q = ListQuery::new("Sales Invoice")
            .fields(&["name", "grand_total"])
            .filter(ErpFilter::eq("docstatus", 1))
            .order_by("modified desc")
            .limit(1000);

        let pairs = q.query_pairs();
        assert_eq!(pairs[0], ("fields".into(), r#"["name","grand_total"]"#.into()));
        assert_eq!(pairs[1], ("filters".into(), r#"[["docstatus","=",1]]"#.into()));
        assert_eq!(pairs[2], ("order_by".into(), "modified desc".into()));
        assert_eq!(pairs[3], ("limit_page_length".into(), "1000".into()));
        assert_eq!(pairs.len(), 4);
    }

    #[test]
    fn test_query_pairs_minimal() {
        let pairs = ListQuery::new("Item").start(40).query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("limit_page_length".to_string(), "20".to_string()),
                ("limit_start".to_string(), "40".to_string()),
            ]
        );
    }

    #[test]
    fn test_docstatus_roundtrip_as_integer() {
        assert_eq!(serde_json::to_value(DocStatus::Submitted).unwrap(), json!(1));
        let s: DocStatus = serde_json::from_value(json!(2)).unwrap();
        assert_eq!(s, DocStatus::Cancelled);
        assert!(serde_json::from_value::<DocStatus>(json!(7)).is_err());
    }
}
