use contracts::domain::a001_customer::Customer;
use contracts::shared::api::{ListParams, OptionItem};
use contracts::shared::erp::ErpFilter;

use crate::shared::erp::{list_as, list_of, list_query, with_search, ErpBackend, ErpError};

/// Список покупателей с поиском по наименованию
pub async fn list(
    erp: &dyn ErpBackend,
    params: &ListParams,
    max_limit: u32,
) -> Result<Vec<Customer>, ErpError> {
    let query = with_search(list_query::<Customer>(params, max_limit), params, "customer_name");
    list_as(erp, &query).await
}

/// Активные покупатели для выпадающих списков
pub async fn options(erp: &dyn ErpBackend, max_limit: u32) -> Result<Vec<OptionItem>, ErpError> {
    let query = list_of::<Customer>()
        .filter(ErpFilter::eq("disabled", 0))
        .order_by("customer_name asc")
        .limit(max_limit);
    let customers: Vec<Customer> = list_as(erp, &query).await?;
    Ok(customers
        .iter()
        .map(|c| OptionItem::new(&c.name, c.display_name()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::erp::fake::FakeErp;
    use serde_json::json;

    fn erp() -> FakeErp {
        FakeErp::new().with_docs(
            "Customer",
            vec![
                json!({"name": "CUST-1", "customer_name": "ООО Ромашка", "disabled": 0}),
                json!({"name": "CUST-2", "customer_name": "", "disabled": 0}),
                json!({"name": "CUST-3", "customer_name": "Архив", "disabled": 1}),
            ],
        )
    }

    #[tokio::test]
    async fn test_options_skip_disabled() {
        let options = options(&erp(), 1000).await.unwrap();
        assert_eq!(
            options,
            vec![
                OptionItem::new("CUST-1", "ООО Ромашка"),
                OptionItem::new("CUST-2", "CUST-2"),
            ]
        );
    }

    #[tokio::test]
    async fn test_list_search() {
        let params = ListParams {
            search: Some("ромаш".into()),
            ..Default::default()
        };
        let customers = list(&erp(), &params, 1000).await.unwrap();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].name, "CUST-1");
    }
}
