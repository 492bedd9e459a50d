use contracts::shared::api::ListParams;

use crate::shared::api_utils::with_query;

pub fn list_path(params: &ListParams) -> String {
    with_query("/api/crm/customers", params)
}
