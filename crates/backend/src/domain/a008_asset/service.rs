use contracts::domain::a008_asset::{
    Asset, AssetCategory, AssetMovementDto, AssetOptions, Location, ASSET_MOVEMENT_DOCTYPE,
};
use contracts::domain::common::ErpDocument;
use contracts::shared::api::{CreatedDocument, ListParams, OptionItem};
use contracts::shared::erp::ErpFilter;

use crate::api::ApiError;
use crate::shared::erp::{
    created_document, get_as, list_as, list_of, list_query, with_eq, with_search, ErpBackend,
    ErpError,
};

/// Список ОС; `search` ищет по наименованию
pub async fn list(
    erp: &dyn ErpBackend,
    params: &ListParams,
    max_limit: u32,
) -> Result<Vec<Asset>, ErpError> {
    let query = list_query::<Asset>(params, max_limit);
    let query = with_eq(query, "status", &params.status);
    let query = with_search(query, params, "asset_name");
    list_as(erp, &query).await
}

pub async fn get(erp: &dyn ErpBackend, name: &str) -> Result<Asset, ErpError> {
    get_as(erp, Asset::doctype(), name).await
}

pub async fn categories(erp: &dyn ErpBackend) -> Result<Vec<OptionItem>, ErpError> {
    let rows: Vec<AssetCategory> = list_as(erp, &list_of::<AssetCategory>().limit(0)).await?;
    Ok(rows
        .into_iter()
        .map(|c| {
            let label = if c.asset_category_name.is_empty() {
                c.name.clone()
            } else {
                c.asset_category_name
            };
            OptionItem::new(c.name, label)
        })
        .collect())
}

pub async fn locations(erp: &dyn ErpBackend) -> Result<Vec<OptionItem>, ErpError> {
    let rows: Vec<Location> = list_as(erp, &list_of::<Location>().limit(0)).await?;
    Ok(rows
        .into_iter()
        .map(|l| {
            let label = if l.location_name.is_empty() {
                l.name.clone()
            } else {
                l.location_name
            };
            OptionItem::new(l.name, label)
        })
        .collect())
}

/// Справочники формы перемещения: ОС (кроме списанных), категории, местоположения
pub async fn options(erp: &dyn ErpBackend, max_limit: u32) -> Result<AssetOptions, ErpError> {
    let assets_query = list_of::<Asset>()
        .filter(ErpFilter::not_in("status", ["Scrapped", "Sold"]))
        .order_by("asset_name asc")
        .limit(max_limit);

    let (assets, categories, locations) = tokio::try_join!(
        list_as::<Asset>(erp, &assets_query),
        categories(erp),
        locations(erp),
    )?;

    let assets = assets
        .into_iter()
        .map(|a| {
            let label = format!("{} ({})", a.asset_name, a.name);
            OptionItem::new(a.name, label)
        })
        .collect();

    Ok(AssetOptions {
        assets,
        categories,
        locations,
    })
}

/// Перемещение ОС (черновик)
pub async fn create_movement(
    erp: &dyn ErpBackend,
    company: &Option<String>,
    mut dto: AssetMovementDto,
) -> Result<CreatedDocument, ApiError> {
    dto.validate()?;
    if dto.company.as_deref().map_or(true, |c| c.trim().is_empty()) {
        dto.company = company.clone();
    }

    let doc = erp
        .insert_doc(ASSET_MOVEMENT_DOCTYPE, dto.into_erp_payload())
        .await?;
    let created = created_document(ASSET_MOVEMENT_DOCTYPE, &doc)?;
    tracing::info!(
        "Asset movement {} created: {}, {} asset(s)",
        created.name,
        dto.purpose.as_str(),
        dto.assets.len()
    );
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::erp::fake::FakeErp;
    use contracts::domain::a008_asset::{AssetMovementItemDto, AssetMovementPurpose};
    use serde_json::json;

    #[tokio::test]
    async fn test_options_skip_scrapped_assets() {
        let erp = FakeErp::new()
            .with_docs(
                "Asset",
                vec![
                    json!({"name": "AST-1", "asset_name": "Ноутбук", "status": "Submitted"}),
                    json!({"name": "AST-2", "asset_name": "Принтер", "status": "Scrapped"}),
                ],
            )
            .with_docs("Location", vec![json!({"name": "Офис", "location_name": "Офис"})])
            .with_docs("Asset Category", vec![json!({"name": "IT", "asset_category_name": null})]);

        let options = options(&erp, 1000).await.unwrap();
        assert_eq!(options.assets, vec![OptionItem::new("AST-1", "Ноутбук (AST-1)")]);
        assert_eq!(options.locations, vec![OptionItem::new("Офис", "Офис")]);
        assert_eq!(options.categories, vec![OptionItem::new("IT", "IT")]);
    }

    #[tokio::test]
    async fn test_create_movement() {
        let erp = FakeErp::new();
        let dto = AssetMovementDto {
            purpose: AssetMovementPurpose::Transfer,
            transaction_date: "2025-05-01".into(),
            assets: vec![AssetMovementItemDto {
                asset: "AST-1".into(),
                source_location: Some("Офис".into()),
                target_location: Some("Склад".into()),
                ..Default::default()
            }],
            ..Default::default()
        };

        let created = create_movement(&erp, &Some("C".into()), dto).await.unwrap();
        assert_eq!(created.doctype, "Asset Movement");

        let payload = erp.inserted.lock().unwrap()[0].1.clone();
        assert_eq!(payload["purpose"], "Transfer");
        assert_eq!(payload["assets"][0]["target_location"], "Склад");
        assert_eq!(payload["company"], "C");
    }
}
