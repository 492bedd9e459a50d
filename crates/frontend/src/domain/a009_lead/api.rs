use contracts::domain::a009_lead::LeadDto;
use contracts::shared::api::{CreatedDocument, ListParams};

use crate::shared::api_utils::{post_json, with_query};

const BASE: &str = "/api/crm/leads";

pub fn list_path(params: &ListParams) -> String {
    with_query(BASE, params)
}

pub async fn create(dto: &LeadDto) -> Result<CreatedDocument, String> {
    post_json(BASE, dto).await
}
