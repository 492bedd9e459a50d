use contracts::domain::common::ErpDocument;
use contracts::shared::api::ListParams;
use contracts::shared::erp::{ErpFilter, ListQuery, DEFAULT_LIST_LIMIT};

use super::list_of;

/// Непустое значение параметра
pub fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Итоговый лимит: по умолчанию 20, 0 - максимум, не больше `max_limit`
pub fn effective_limit(requested: Option<u32>, max_limit: u32) -> u32 {
    match requested {
        None => DEFAULT_LIST_LIMIT.min(max_limit),
        Some(0) => max_limit,
        Some(n) => n.min(max_limit),
    }
}

/// Общая часть запросов списков: поля view-model, сортировка
/// `modified desc`, лимит и фильтр по периоду.
///
/// Фильтры по статусу, контрагенту и поиск добавляет сервис: не у всех
/// doctype есть эти поля.
pub fn list_query<T: ErpDocument>(params: &ListParams, max_limit: u32) -> ListQuery {
    let query = list_of::<T>()
        .order_by("modified desc")
        .limit(effective_limit(params.limit, max_limit));

    match T::date_field() {
        Some(field) => with_period(query, field, &params.from_date, &params.to_date),
        None => query,
    }
}

/// `between`, `>=` или `<=` в зависимости от заданных границ
pub fn with_period(
    query: ListQuery,
    field: &str,
    from: &Option<String>,
    to: &Option<String>,
) -> ListQuery {
    match (filled(from), filled(to)) {
        (Some(from), Some(to)) => query.filter(ErpFilter::between(field, from, to)),
        (Some(from), None) => query.filter(ErpFilter::gte(field, from)),
        (None, Some(to)) => query.filter(ErpFilter::lte(field, to)),
        (None, None) => query,
    }
}

/// `field like %term%` если задан поиск
pub fn with_search(query: ListQuery, params: &ListParams, field: &str) -> ListQuery {
    match filled(&params.search) {
        Some(term) => query.filter(ErpFilter::contains(field, term)),
        None => query,
    }
}

/// `field = value` если параметр задан
pub fn with_eq(query: ListQuery, field: &str, value: &Option<String>) -> ListQuery {
    match filled(value) {
        Some(v) => query.filter(ErpFilter::eq(field, v)),
        None => query,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_customer::Customer;
    use contracts::domain::a004_sales_invoice::SalesInvoice;
    use contracts::shared::erp::FilterOperator;
    use serde_json::json;

    #[test]
    fn test_effective_limit() {
        assert_eq!(effective_limit(None, 1000), 20);
        assert_eq!(effective_limit(Some(50), 1000), 50);
        assert_eq!(effective_limit(Some(5000), 1000), 1000);
        assert_eq!(effective_limit(Some(0), 1000), 1000);
        assert_eq!(effective_limit(None, 10), 10);
    }

    #[test]
    fn test_params_translate_to_filters() {
        let params = ListParams {
            status: Some("Unpaid".into()),
            from_date: Some("2025-01-01".into()),
            to_date: Some("2025-01-31".into()),
            search: Some("ромашка".into()),
            customer: Some("  ".into()),
            ..Default::default()
        };

        let query = list_query::<SalesInvoice>(&params, 1000);
        let query = with_eq(query, "status", &params.status);
        let query = with_eq(query, "customer", &params.customer);
        let query = with_search(query, &params, "customer_name");

        assert_eq!(query.doctype, "Sales Invoice");
        assert_eq!(query.order_by.as_deref(), Some("modified desc"));
        assert_eq!(query.filters.len(), 3);
        assert_eq!(query.filters[0].operator, FilterOperator::Between);
        assert_eq!(query.filters[0].value, json!(["2025-01-01", "2025-01-31"]));
        assert_eq!(query.filters[1], ErpFilter::eq("status", "Unpaid"));
        assert_eq!(query.filters[2].value, json!("%ромашка%"));
    }

    #[test]
    fn test_open_ended_period_and_no_date_field() {
        let params = ListParams {
            from_date: Some("2025-03-01".into()),
            ..Default::default()
        };
        let q = list_query::<SalesInvoice>(&params, 1000);
        assert_eq!(q.filters, vec![ErpFilter::gte("posting_date", "2025-03-01")]);

        let q = list_query::<Customer>(&params, 1000);
        assert!(q.filters.is_empty());
    }
}
