use contracts::domain::a002_supplier::Supplier;
use contracts::shared::api::OptionItem;
use contracts::shared::erp::ErpFilter;

use crate::shared::erp::{list_as, list_of, ErpBackend, ErpError};

/// Активные поставщики для выпадающих списков
pub async fn options(erp: &dyn ErpBackend, max_limit: u32) -> Result<Vec<OptionItem>, ErpError> {
    let query = list_of::<Supplier>()
        .filter(ErpFilter::eq("disabled", 0))
        .order_by("supplier_name asc")
        .limit(max_limit);
    let suppliers: Vec<Supplier> = list_as(erp, &query).await?;
    Ok(suppliers
        .into_iter()
        .map(|s| {
            let label = if s.supplier_name.trim().is_empty() {
                s.name.clone()
            } else {
                s.supplier_name
            };
            OptionItem::new(s.name, label)
        })
        .collect())
}
