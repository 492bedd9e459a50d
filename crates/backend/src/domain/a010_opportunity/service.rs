use contracts::domain::a010_opportunity::Opportunity;
use contracts::shared::api::ListParams;

use crate::shared::erp::{list_as, list_query, with_eq, with_search, ErpBackend, ErpError};

pub async fn list(
    erp: &dyn ErpBackend,
    params: &ListParams,
    max_limit: u32,
) -> Result<Vec<Opportunity>, ErpError> {
    let query = list_query::<Opportunity>(params, max_limit);
    let query = with_eq(query, "status", &params.status);
    let query = with_eq(query, "party_name", &params.party);
    let query = with_search(query, params, "customer_name");
    list_as(erp, &query).await
}
