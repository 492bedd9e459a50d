use contracts::domain::a007_stock_entry::{StockEntry, StockEntryDto};
use contracts::domain::common::ErpDocument;
use contracts::shared::api::{CreatedDocument, ListParams};

use crate::api::ApiError;
use crate::shared::erp::{created_document, get_as, list_as, list_query, with_eq, ErpBackend, ErpError};

/// Список складских документов; `status` задаёт вид операции
pub async fn list(
    erp: &dyn ErpBackend,
    params: &ListParams,
    max_limit: u32,
) -> Result<Vec<StockEntry>, ErpError> {
    let query = list_query::<StockEntry>(params, max_limit);
    let query = with_eq(query, "stock_entry_type", &params.status);
    list_as(erp, &query).await
}

pub async fn get(erp: &dyn ErpBackend, name: &str) -> Result<StockEntry, ErpError> {
    get_as(erp, StockEntry::doctype(), name).await
}

/// Перемещение, поступление или списание (черновик)
pub async fn create(
    erp: &dyn ErpBackend,
    company: &Option<String>,
    mut dto: StockEntryDto,
) -> Result<CreatedDocument, ApiError> {
    dto.validate()?;
    if dto.company.as_deref().map_or(true, |c| c.trim().is_empty()) {
        dto.company = company.clone();
    }

    let doc = erp
        .insert_doc(StockEntry::doctype(), dto.into_erp_payload())
        .await?;
    let created = created_document(StockEntry::doctype(), &doc)?;
    tracing::info!(
        "Stock entry {} created: {}, {} line(s)",
        created.name,
        dto.stock_entry_type.as_str(),
        dto.items.len()
    );
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::erp::fake::FakeErp;
    use contracts::domain::a007_stock_entry::{StockEntryItemDto, StockEntryType};

    fn transfer(from: &str, to: &str) -> StockEntryDto {
        StockEntryDto {
            stock_entry_type: StockEntryType::MaterialTransfer,
            posting_date: "2025-04-01".into(),
            from_warehouse: Some(from.into()),
            to_warehouse: Some(to.into()),
            items: vec![StockEntryItemDto {
                item_code: "SKU-1".into(),
                qty: 5.0,
                basic_rate: None,
            }],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_transfer_sets_row_warehouses() {
        let erp = FakeErp::new();
        create(&erp, &None, transfer("Stores - C", "Shop - C")).await.unwrap();

        let payload = erp.inserted.lock().unwrap()[0].1.clone();
        assert_eq!(payload["stock_entry_type"], "Material Transfer");
        assert_eq!(payload["items"][0]["s_warehouse"], "Stores - C");
        assert_eq!(payload["items"][0]["t_warehouse"], "Shop - C");
    }

    #[tokio::test]
    async fn test_same_warehouse_rejected() {
        let erp = FakeErp::new();
        let err = create(&erp, &None, transfer("Stores - C", "Stores - C"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref e) if e.has_field("to_warehouse")));
        assert_eq!(erp.inserted.lock().unwrap().len(), 0);
    }
}
