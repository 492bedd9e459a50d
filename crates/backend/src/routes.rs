use axum::{
    routing::{get, post},
    Json, Router,
};

use contracts::shared::api::ApiResponse;

use crate::api::AppState;
use crate::handlers;

async fn health() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::ok("ok"))
}

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        // D400 Dashboard
        .route(
            "/api/dashboard",
            get(handlers::d400_business_summary::get_summary),
        )
        // ========================================
        // ACCOUNTING
        // ========================================
        .route(
            "/api/accounting/sales-invoices",
            get(handlers::a004_sales_invoice::list).post(handlers::a004_sales_invoice::create),
        )
        .route(
            "/api/accounting/sales-invoices/:name",
            get(handlers::a004_sales_invoice::get_by_name),
        )
        .route(
            "/api/accounting/purchase-invoices",
            get(handlers::a005_purchase_invoice::list),
        )
        .route(
            "/api/accounting/payments",
            get(handlers::a006_payment_entry::list).post(handlers::a006_payment_entry::create),
        )
        .route(
            "/api/accounting/payments/:name",
            get(handlers::a006_payment_entry::get_by_name),
        )
        .route(
            "/api/accounting/options",
            get(handlers::a006_payment_entry::options),
        )
        // ========================================
        // STOCK
        // ========================================
        .route("/api/stock/items", get(handlers::a003_item::list_items))
        .route(
            "/api/stock/warehouses",
            get(handlers::a003_item::list_warehouses),
        )
        .route("/api/stock/balance", get(handlers::a003_item::balance))
        .route(
            "/api/stock-entries",
            get(handlers::a007_stock_entry::list).post(handlers::a007_stock_entry::create),
        )
        .route(
            "/api/stock-entries/:name",
            get(handlers::a007_stock_entry::get_by_name),
        )
        // ========================================
        // ASSETS
        // ========================================
        .route("/api/asset/assets", get(handlers::a008_asset::list))
        .route(
            "/api/asset/assets/:name",
            get(handlers::a008_asset::get_by_name),
        )
        .route("/api/asset/options", get(handlers::a008_asset::options))
        .route(
            "/api/asset/movements",
            post(handlers::a008_asset::create_movement),
        )
        // ========================================
        // CRM
        // ========================================
        .route(
            "/api/crm/leads",
            get(handlers::a009_lead::list).post(handlers::a009_lead::create),
        )
        .route(
            "/api/crm/opportunities",
            get(handlers::a010_opportunity::list),
        )
        .route("/api/crm/customers", get(handlers::a001_customer::list))
        // ========================================
        // POS
        // ========================================
        .route(
            "/api/pos",
            get(handlers::u501_pos_order::bootstrap).post(handlers::u501_pos_order::create_order),
        )
        .route(
            "/api/pos/stock-check",
            post(handlers::u501_pos_order::stock_check),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::shared::config::Config;
    use crate::shared::erp::fake::FakeErp;

    fn app(erp: FakeErp) -> (Router, Arc<FakeErp>) {
        let erp = Arc::new(erp);
        let state = AppState::new(Config::default(), erp.clone());
        (configure_routes().with_state(state), erp)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app(FakeErp::new());
        let (status, body) = send(app, get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "data": "ok"}));
    }

    #[tokio::test]
    async fn test_list_sales_invoices_with_filters() {
        let (app, erp) = app(FakeErp::new().with_docs(
            "Sales Invoice",
            vec![
                json!({"name": "SI-1", "customer": "ACME", "status": "Paid", "grand_total": 100.0}),
                json!({"name": "SI-2", "customer": "Globex", "status": "Unpaid", "grand_total": 50.0}),
            ],
        ));

        let (status, body) = send(
            app,
            get_request("/api/accounting/sales-invoices?customer=ACME&limit=5"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["name"], json!("SI-1"));
        assert_eq!(erp.queries_for("Sales Invoice")[0].limit, 5);
    }

    #[tokio::test]
    async fn test_unknown_document_is_404() {
        let (app, _) = app(FakeErp::new());
        let (status, body) = send(app, get_request("/api/accounting/payments/PE-404")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], json!(false));
    }

    #[tokio::test]
    async fn test_invalid_lead_is_400_with_fields() {
        let (app, erp) = app(FakeErp::new());
        let (status, body) = send(app, post_request("/api/crm/leads", json!({}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
        assert!(!body["fields"].as_array().unwrap().is_empty());
        assert!(erp.inserted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_lead() {
        let (app, erp) = app(FakeErp::new());
        let (status, body) = send(
            app,
            post_request("/api/crm/leads", json!({"lead_name": "Иван Петров"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["doctype"], json!("Lead"));
        assert_eq!(erp.inserted.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_erp_failure_is_502() {
        let (app, _) = app(FakeErp::new().failing(500, "database locked"));
        let (status, body) = send(app, get_request("/api/crm/opportunities")).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().contains("database locked"));
    }

    #[tokio::test]
    async fn test_stock_balance_query() {
        let (app, _) = app(FakeErp::new().with_stock("ITEM-A", "Stores", 3.0));
        let (status, body) = send(
            app,
            get_request("/api/stock/balance?item_code=ITEM-A&warehouse=Stores&qty=5"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["available"], json!(3.0));
        assert_eq!(body["data"]["sufficient"], json!(false));
    }

    #[tokio::test]
    async fn test_pos_shortage_is_409() {
        let (app, erp) = app(FakeErp::new().with_stock("ITEM-A", "Stores", 1.0));
        let order = json!({
            "customer": "Walk-in",
            "warehouse": "Stores",
            "mode_of_payment": "Cash",
            "paid_amount": 1000.0,
            "items": [{"item_code": "ITEM-A", "qty": 2.0, "rate": 10.0}]
        });

        let (status, body) = send(app, post_request("/api/pos", order)).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], json!(false));
        assert!(erp.inserted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_empty_erp() {
        let (app, erp) = app(FakeErp::new());
        let (status, body) = send(
            app,
            get_request("/api/dashboard?from_date=2025-01-01&to_date=2025-01-31"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total_revenue"], json!(0.0));
        assert_eq!(erp.query_count(), 7);
    }
}
