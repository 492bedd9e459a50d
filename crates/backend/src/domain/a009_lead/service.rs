use contracts::domain::a009_lead::{Lead, LeadDto};
use contracts::domain::common::ErpDocument;
use contracts::shared::api::{CreatedDocument, ListParams};

use crate::api::ApiError;
use crate::shared::erp::{
    created_document, list_as, list_query, with_eq, with_search, ErpBackend, ErpError,
};

pub async fn list(
    erp: &dyn ErpBackend,
    params: &ListParams,
    max_limit: u32,
) -> Result<Vec<Lead>, ErpError> {
    let query = list_query::<Lead>(params, max_limit);
    let query = with_eq(query, "status", &params.status);
    let query = with_search(query, params, "lead_name");
    list_as(erp, &query).await
}

pub async fn create(erp: &dyn ErpBackend, dto: LeadDto) -> Result<CreatedDocument, ApiError> {
    dto.validate()?;
    let doc = erp.insert_doc(Lead::doctype(), dto.into_erp_payload()).await?;
    let created = created_document(Lead::doctype(), &doc)?;
    tracing::info!("Lead {} created", created.name);
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::erp::fake::FakeErp;

    #[tokio::test]
    async fn test_create_lead_from_company_only() {
        let erp = FakeErp::new();
        let dto = LeadDto {
            company_name: Some("ООО Вектор".into()),
            email_id: Some("sales@vector.ru".into()),
            ..Default::default()
        };
        create(&erp, dto).await.unwrap();

        let payload = erp.inserted.lock().unwrap()[0].1.clone();
        assert_eq!(payload["lead_name"], "ООО Вектор");
        assert_eq!(payload["email_id"], "sales@vector.ru");
    }

    #[tokio::test]
    async fn test_bad_email_rejected() {
        let erp = FakeErp::new();
        let dto = LeadDto {
            lead_name: "Иван".into(),
            email_id: Some("ivan@".into()),
            ..Default::default()
        };
        let err = create(&erp, dto).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref e) if e.has_field("email_id")));
    }
}
