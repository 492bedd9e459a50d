use contracts::domain::a006_payment_entry::{
    Account, AccountingOptions, ModeOfPayment, PaymentEntry, PaymentEntryDto,
};
use contracts::domain::common::ErpDocument;
use contracts::shared::api::{CreatedDocument, ListParams, OptionItem};
use contracts::shared::erp::ErpFilter;

use crate::api::ApiError;
use crate::domain::{a001_customer, a002_supplier};
use crate::shared::config::Config;
use crate::shared::erp::{
    created_document, get_as, list_as, list_of, list_query, with_eq, with_search, ErpBackend,
    ErpError,
};

/// Список платежей; `party` фильтрует по контрагенту, `status` по виду платежа
pub async fn list(
    erp: &dyn ErpBackend,
    params: &ListParams,
    max_limit: u32,
) -> Result<Vec<PaymentEntry>, ErpError> {
    let query = list_query::<PaymentEntry>(params, max_limit);
    let query = with_eq(query, "payment_type", &params.status);
    let query = with_eq(query, "party", &params.party);
    let query = with_search(query, params, "party_name");
    list_as(erp, &query).await
}

pub async fn get(erp: &dyn ErpBackend, name: &str) -> Result<PaymentEntry, ErpError> {
    get_as(erp, PaymentEntry::doctype(), name).await
}

/// Создание платежа (черновик)
pub async fn create(
    erp: &dyn ErpBackend,
    company: &Option<String>,
    mut dto: PaymentEntryDto,
) -> Result<CreatedDocument, ApiError> {
    dto.validate()?;
    if dto.company.as_deref().map_or(true, |c| c.trim().is_empty()) {
        dto.company = company.clone();
    }

    let doc = erp
        .insert_doc(PaymentEntry::doctype(), dto.into_erp_payload())
        .await?;
    let created = created_document(PaymentEntry::doctype(), &doc)?;
    tracing::info!(
        "Payment entry {} created: {} {:.2}",
        created.name,
        dto.payment_type.as_str(),
        dto.paid_amount
    );
    Ok(created)
}

/// Счета учёта без групп
pub async fn accounts(
    erp: &dyn ErpBackend,
    company: &Option<String>,
    max_limit: u32,
) -> Result<Vec<OptionItem>, ErpError> {
    let query = list_of::<Account>()
        .filter(ErpFilter::eq("is_group", 0))
        .order_by("account_name asc")
        .limit(max_limit);
    let query = with_eq(query, "company", company);
    let accounts: Vec<Account> = list_as(erp, &query).await?;
    Ok(accounts
        .into_iter()
        .map(|a| {
            let label = match a.account_type.as_deref().filter(|t| !t.is_empty()) {
                Some(kind) => format!("{} ({})", a.name, kind),
                None => a.name.clone(),
            };
            OptionItem::new(a.name, label)
        })
        .collect())
}

/// Включённые способы оплаты
pub async fn enabled_modes(erp: &dyn ErpBackend) -> Result<Vec<ModeOfPayment>, ErpError> {
    let query = list_of::<ModeOfPayment>()
        .filter(ErpFilter::eq("enabled", 1))
        .limit(0);
    list_as(erp, &query).await
}

pub async fn modes_of_payment(erp: &dyn ErpBackend) -> Result<Vec<OptionItem>, ErpError> {
    Ok(enabled_modes(erp)
        .await?
        .into_iter()
        .map(|m| OptionItem::new(m.name.clone(), m.name))
        .collect())
}

/// Справочники форм бухгалтерии, запрашиваются параллельно
pub async fn accounting_options(
    erp: &dyn ErpBackend,
    config: &Config,
) -> Result<AccountingOptions, ErpError> {
    let limit = config.dashboard.list_limit;
    let (customers, suppliers, accounts, modes_of_payment) = tokio::try_join!(
        a001_customer::service::options(erp, limit),
        a002_supplier::service::options(erp, limit),
        accounts(erp, &config.erp.company, limit),
        modes_of_payment(erp),
    )?;

    tracing::debug!(
        "Accounting options: {} customers, {} suppliers, {} accounts",
        customers.len(),
        suppliers.len(),
        accounts.len()
    );

    Ok(AccountingOptions {
        customers,
        suppliers,
        accounts,
        modes_of_payment,
        tax_rate: config.effective_tax_rate(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::erp::fake::FakeErp;
    use contracts::domain::a006_payment_entry::PaymentType;
    use serde_json::json;

    #[tokio::test]
    async fn test_options_bundle() {
        let erp = FakeErp::new()
            .with_docs("Customer", vec![json!({"name": "CUST-1", "customer_name": "Ромашка", "disabled": 0})])
            .with_docs("Supplier", vec![json!({"name": "SUP-1", "supplier_name": "", "disabled": 0})])
            .with_docs(
                "Account",
                vec![
                    json!({"name": "Cash - C", "account_type": "Cash", "is_group": 0}),
                    json!({"name": "Assets - C", "is_group": 1}),
                ],
            )
            .with_docs(
                "Mode of Payment",
                vec![
                    json!({"name": "Cash", "type": "Cash", "enabled": 1}),
                    json!({"name": "Cheque", "type": "Bank", "enabled": 0}),
                ],
            );

        let options = accounting_options(&erp, &Config::default()).await.unwrap();
        assert_eq!(options.customers, vec![OptionItem::new("CUST-1", "Ромашка")]);
        assert_eq!(options.suppliers, vec![OptionItem::new("SUP-1", "SUP-1")]);
        assert_eq!(options.accounts, vec![OptionItem::new("Cash - C", "Cash - C (Cash)")]);
        assert_eq!(options.modes_of_payment, vec![OptionItem::new("Cash", "Cash")]);
        assert_eq!(options.tax_rate, 0.0);
        assert_eq!(erp.query_count(), 4);
    }

    #[tokio::test]
    async fn test_options_tax_rate_with_tax_account() {
        let mut config = Config::default();
        config.erp.tax_account = Some("VAT - C".into());
        let options = accounting_options(&FakeErp::new(), &config).await.unwrap();
        assert_eq!(options.tax_rate, 0.15);
    }

    #[tokio::test]
    async fn test_create_payment() {
        let erp = FakeErp::new();
        let dto = PaymentEntryDto {
            payment_type: PaymentType::Receive,
            party_type: Some("Customer".into()),
            party: Some("CUST-1".into()),
            posting_date: "2025-03-05".into(),
            paid_amount: 500.0,
            paid_from: Some("Debtors - C".into()),
            paid_to: Some("Cash - C".into()),
            ..Default::default()
        };

        let created = create(&erp, &Some("C".into()), dto).await.unwrap();
        assert_eq!(created.doctype, "Payment Entry");

        let payload = erp.inserted.lock().unwrap()[0].1.clone();
        assert_eq!(payload["payment_type"], "Receive");
        assert_eq!(payload["company"], "C");
        assert_eq!(payload["party"], "CUST-1");
    }

    #[tokio::test]
    async fn test_create_payment_requires_party() {
        let erp = FakeErp::new();
        let dto = PaymentEntryDto {
            payment_type: PaymentType::Pay,
            posting_date: "2025-03-05".into(),
            paid_amount: 10.0,
            paid_from: Some("Cash - C".into()),
            paid_to: Some("Creditors - C".into()),
            ..Default::default()
        };
        let err = create(&erp, &None, dto).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref e) if e.has_field("party")));
    }
}
