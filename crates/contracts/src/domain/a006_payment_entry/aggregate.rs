use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::common::de::{int_bool, null_as_default};
use crate::domain::common::ErpDocument;
use crate::shared::api::OptionItem;
use crate::shared::erp::DocStatus;
use crate::shared::validation::{ValidationErrors, Validator};

/// Вид платежа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentType {
    #[default]
    Receive,
    Pay,
    #[serde(rename = "Internal Transfer")]
    InternalTransfer,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Receive => "Receive",
            PaymentType::Pay => "Pay",
            PaymentType::InternalTransfer => "Internal Transfer",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentType::Receive => "Поступление",
            PaymentType::Pay => "Оплата",
            PaymentType::InternalTransfer => "Перемещение",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "Receive" => Some(PaymentType::Receive),
            "Pay" => Some(PaymentType::Pay),
            "Internal Transfer" => Some(PaymentType::InternalTransfer),
            _ => None,
        }
    }

    /// Тип контрагента по умолчанию
    pub fn default_party_type(&self) -> Option<&'static str> {
        match self {
            PaymentType::Receive => Some("Customer"),
            PaymentType::Pay => Some("Supplier"),
            PaymentType::InternalTransfer => None,
        }
    }
}

/// Платёж (doctype "Payment Entry")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentEntry {
    pub name: String,
    #[serde(default)]
    pub payment_type: Option<String>,
    #[serde(default)]
    pub party_type: Option<String>,
    #[serde(default)]
    pub party: Option<String>,
    #[serde(default)]
    pub party_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub posting_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub paid_amount: f64,
    #[serde(default)]
    pub mode_of_payment: Option<String>,
    #[serde(default)]
    pub reference_no: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub docstatus: DocStatus,
}

impl ErpDocument for PaymentEntry {
    fn module_index() -> &'static str {
        "a006"
    }

    fn doctype() -> &'static str {
        "Payment Entry"
    }

    fn list_fields() -> &'static [&'static str] {
        &[
            "name",
            "payment_type",
            "party_type",
            "party",
            "party_name",
            "posting_date",
            "paid_amount",
            "mode_of_payment",
            "reference_no",
            "status",
            "docstatus",
        ]
    }

    fn element_name() -> &'static str {
        "Платёж"
    }

    fn list_name() -> &'static str {
        "Платежи"
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn date_field() -> Option<&'static str> {
        Some("posting_date")
    }
}

/// Счёт плана счетов (doctype "Account")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub account_name: String,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub root_type: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "int_bool")]
    pub is_group: bool,
}

impl ErpDocument for Account {
    fn module_index() -> &'static str {
        "a006"
    }

    fn doctype() -> &'static str {
        "Account"
    }

    fn list_fields() -> &'static [&'static str] {
        &["name", "account_name", "account_type", "root_type", "company", "is_group"]
    }

    fn element_name() -> &'static str {
        "Счёт учёта"
    }

    fn list_name() -> &'static str {
        "План счетов"
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Способ оплаты (doctype "Mode of Payment")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModeOfPayment {
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "int_bool")]
    pub enabled: bool,
}

impl ErpDocument for ModeOfPayment {
    fn module_index() -> &'static str {
        "a006"
    }

    fn doctype() -> &'static str {
        "Mode of Payment"
    }

    fn list_fields() -> &'static [&'static str] {
        &["name", "type", "enabled"]
    }

    fn element_name() -> &'static str {
        "Способ оплаты"
    }

    fn list_name() -> &'static str {
        "Способы оплаты"
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Справочники для форм счетов и платежей
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountingOptions {
    pub customers: Vec<OptionItem>,
    pub suppliers: Vec<OptionItem>,
    pub accounts: Vec<OptionItem>,
    pub modes_of_payment: Vec<OptionItem>,
    /// Ставка налога для новых счетов
    pub tax_rate: f64,
}

/// DTO для создания платежа
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentEntryDto {
    pub payment_type: PaymentType,
    #[serde(default)]
    pub party_type: Option<String>,
    #[serde(default)]
    pub party: Option<String>,
    pub posting_date: String,
    pub paid_amount: f64,
    #[serde(default)]
    pub mode_of_payment: Option<String>,
    /// Счёт списания
    #[serde(default)]
    pub paid_from: Option<String>,
    /// Счёт зачисления
    #[serde(default)]
    pub paid_to: Option<String>,
    #[serde(default)]
    pub reference_no: Option<String>,
    #[serde(default)]
    pub reference_date: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

fn filled(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl PaymentEntryDto {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.date("posting_date", &self.posting_date, "Дата платежа обязательна")
            .positive("paid_amount", self.paid_amount, "Сумма должна быть больше нуля")
            .required_opt("paid_from", self.paid_from.as_deref(), "Укажите счёт списания")
            .required_opt("paid_to", self.paid_to.as_deref(), "Укажите счёт зачисления");

        if self.payment_type != PaymentType::InternalTransfer {
            v.required_opt("party_type", self.party_type.as_deref(), "Укажите тип контрагента")
                .required_opt("party", self.party.as_deref(), "Укажите контрагента");
        } else if filled(&self.paid_from).is_some() && filled(&self.paid_from) == filled(&self.paid_to) {
            v.error("paid_to", "Счета списания и зачисления совпадают");
        }

        if filled(&self.reference_no).is_some() {
            v.date(
                "reference_date",
                self.reference_date.as_deref().unwrap_or(""),
                "Для номера документа укажите дату документа",
            );
        }

        v.finish()
    }

    /// Тело запроса `POST /api/resource/Payment Entry`
    pub fn into_erp_payload(&self) -> Value {
        let mut payload = json!({
            "doctype": PaymentEntry::doctype(),
            "payment_type": self.payment_type.as_str(),
            "posting_date": self.posting_date,
            "paid_amount": self.paid_amount,
            "received_amount": self.paid_amount,
            "paid_from": filled(&self.paid_from),
            "paid_to": filled(&self.paid_to),
        });

        if self.payment_type != PaymentType::InternalTransfer {
            let party_type = filled(&self.party_type).or(self.payment_type.default_party_type());
            payload["party_type"] = json!(party_type);
            payload["party"] = json!(filled(&self.party));
        }
        if let Some(mode) = filled(&self.mode_of_payment) {
            payload["mode_of_payment"] = json!(mode);
        }
        if let Some(reference_no) = filled(&self.reference_no) {
            payload["reference_no"] = json!(reference_no);
            payload["reference_date"] = json!(filled(&self.reference_date));
        }
        if let Some(remarks) = filled(&self.remarks) {
            payload["remarks"] = json!(remarks);
        }
        if let Some(company) = filled(&self.company) {
            payload["company"] = json!(company);
        }
        payload
    }
}
