use contracts::domain::a003_item::{Item, Warehouse};
use contracts::shared::api::ListParams;
use contracts::shared::erp::ErpFilter;
use contracts::shared::validation::{ValidationErrors, Validator};
use contracts::usecases::u501_pos_order::{StockCheckRequest, StockCheckResponse};

use crate::api::ApiError;
use crate::shared::erp::{
    list_as, list_of, list_query, stock_balance, with_eq, with_search, ErpBackend, ErpError,
};

/// Активная номенклатура; `search` ищет по наименованию
pub async fn list_items(
    erp: &dyn ErpBackend,
    params: &ListParams,
    max_limit: u32,
) -> Result<Vec<Item>, ErpError> {
    let query = list_query::<Item>(params, max_limit)
        .filter(ErpFilter::eq("disabled", 0))
        .order_by("item_name asc");
    let query = with_search(query, params, "item_name");
    list_as(erp, &query).await
}

/// Склады без групп (в групповой склад товар не приходуется)
pub async fn list_warehouses(
    erp: &dyn ErpBackend,
    company: &Option<String>,
    max_limit: u32,
) -> Result<Vec<Warehouse>, ErpError> {
    let query = list_of::<Warehouse>()
        .filter(ErpFilter::eq("is_group", 0))
        .order_by("warehouse_name asc")
        .limit(max_limit);
    let query = with_eq(query, "company", company);
    list_as(erp, &query).await
}

fn validate_check(request: &StockCheckRequest) -> Result<(), ValidationErrors> {
    Validator::new()
        .required_str("item_code", &request.item_code, "Не выбрана номенклатура")
        .required_str("warehouse", &request.warehouse, "Не выбран склад")
        .positive("qty", request.qty, "Количество должно быть больше нуля")
        .finish()
}

/// Хватает ли остатка на складе для `qty` единиц
pub async fn check_stock(
    erp: &dyn ErpBackend,
    request: &StockCheckRequest,
) -> Result<StockCheckResponse, ApiError> {
    validate_check(request)?;
    let available = stock_balance(erp, request.item_code.trim(), request.warehouse.trim()).await?;
    let response = StockCheckResponse::new(
        request.item_code.trim(),
        request.warehouse.trim(),
        request.qty,
        available,
    );
    if !response.sufficient {
        tracing::info!(
            "Stock shortage: {} at {}: requested {}, available {}",
            response.item_code,
            response.warehouse,
            response.requested,
            response.available
        );
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::erp::fake::FakeErp;
    use serde_json::json;

    fn request(qty: f64) -> StockCheckRequest {
        StockCheckRequest {
            item_code: "SKU-1".into(),
            warehouse: "Stores - C".into(),
            qty,
        }
    }

    #[tokio::test]
    async fn test_check_stock() {
        let erp = FakeErp::new().with_stock("SKU-1", "Stores - C", 3.0);

        let ok = check_stock(&erp, &request(3.0)).await.unwrap();
        assert!(ok.sufficient);
        assert_eq!(ok.available, 3.0);

        let short = check_stock(&erp, &request(4.0)).await.unwrap();
        assert!(!short.sufficient);
    }

    #[tokio::test]
    async fn test_check_stock_rejects_zero_qty() {
        let erp = FakeErp::new();
        let result = check_stock(&erp, &request(0.0)).await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert!(erp.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_warehouses_exclude_groups() {
        let erp = FakeErp::new().with_docs(
            "Warehouse",
            vec![
                json!({"name": "All Warehouses - C", "is_group": 1}),
                json!({"name": "Stores - C", "warehouse_name": "Stores", "is_group": 0}),
            ],
        );
        let warehouses = list_warehouses(&erp, &None, 100).await.unwrap();
        assert_eq!(warehouses.len(), 1);
        assert_eq!(warehouses[0].name, "Stores - C");
    }
}
