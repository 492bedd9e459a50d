use contracts::domain::a006_payment_entry::{AccountingOptions, PaymentEntryDto, PaymentType};
use contracts::shared::validation::FieldError;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a006_payment_entry::api;
use crate::shared::components::{field_value, FormField, OptionSelect};
use crate::shared::format::{parse_amount, today};
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_DETAIL};
use crate::shared::toast::use_toast;

/// Форма нового платежа
#[component]
pub fn PaymentEntryNew() -> impl IntoView {
    let toast = use_toast();
    let options = RwSignal::new(AccountingOptions::default());

    let payment_type = RwSignal::new(PaymentType::Receive.as_str().to_string());
    let party = RwSignal::new(String::new());
    let posting_date = RwSignal::new(today());
    let paid_amount = RwSignal::new(String::new());
    let mode_of_payment = RwSignal::new(String::new());
    let paid_from = RwSignal::new(String::new());
    let paid_to = RwSignal::new(String::new());
    let reference_no = RwSignal::new(String::new());
    let reference_date = RwSignal::new(String::new());
    let remarks = RwSignal::new(String::new());

    let errors = RwSignal::new(Vec::<FieldError>::new());
    let saving = RwSignal::new(false);

    spawn_local(async move {
        match api::fetch_options().await {
            Ok(loaded) => options.set(loaded),
            Err(e) => toast.error(e),
        }
    });

    let kind = Memo::new(move |_| PaymentType::from_str_opt(&payment_type.get()).unwrap_or_default());

    // Смена вида платежа меняет список контрагентов
    Effect::new(move |prev: Option<PaymentType>| {
        let current = kind.get();
        if prev.is_some_and(|p| p != current) {
            party.set(String::new());
        }
        current
    });

    let parties = Signal::derive(move || match kind.get() {
        PaymentType::Receive => options.with(|o| o.customers.clone()),
        PaymentType::Pay => options.with(|o| o.suppliers.clone()),
        PaymentType::InternalTransfer => Vec::new(),
    });
    let accounts = Signal::derive(move || options.with(|o| o.accounts.clone()));
    let modes = Signal::derive(move || options.with(|o| o.modes_of_payment.clone()));

    let build_dto = move || {
        let kind = kind.get_untracked();
        PaymentEntryDto {
            payment_type: kind,
            party_type: kind.default_party_type().map(str::to_string),
            party: field_value(party),
            posting_date: posting_date.get_untracked(),
            // Нечисловой ввод отсекается проверкой суммы
            paid_amount: parse_amount(&paid_amount.get_untracked()).unwrap_or(f64::NAN),
            mode_of_payment: field_value(mode_of_payment),
            paid_from: field_value(paid_from),
            paid_to: field_value(paid_to),
            reference_no: field_value(reference_no),
            reference_date: field_value(reference_date),
            remarks: field_value(remarks),
            company: None,
        }
    };

    let reset = move || {
        party.set(String::new());
        posting_date.set(today());
        paid_amount.set(String::new());
        reference_no.set(String::new());
        reference_date.set(String::new());
        remarks.set(String::new());
        errors.set(Vec::new());
    };

    let save = move |_| {
        let dto = build_dto();
        if let Err(e) = dto.validate() {
            toast.error(e.to_string());
            errors.set(e.0);
            return;
        }
        errors.set(Vec::new());
        saving.set(true);
        spawn_local(async move {
            match api::create(&dto).await {
                Ok(created) => {
                    toast.success(format!("Платёж {} создан", created.name));
                    reset();
                }
                Err(e) => toast.error(e),
            }
            saving.set(false);
        });
    };

    view! {
        <PageFrame page_id="a006_payment_entry--detail" category=PAGE_CAT_DETAIL>
            <PageHeader title="Новый платёж">
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| reset()>
                    "Очистить"
                </Button>
                <Button appearance=ButtonAppearance::Primary on_click=save disabled=saving>
                    {move || if saving.get() { "Сохранение..." } else { "Сохранить" }}
                </Button>
            </PageHeader>

            <div class="page__content form">
                <div class="form__row">
                    <FormField label="Вид платежа" field="payment_type" errors=errors required=true>
                        <Select value=payment_type>
                            {[PaymentType::Receive, PaymentType::Pay, PaymentType::InternalTransfer]
                                .into_iter()
                                .map(|t| view! { <option value=t.as_str()>{t.label()}</option> })
                                .collect_view()}
                        </Select>
                    </FormField>
                    <FormField label="Дата" field="posting_date" errors=errors required=true>
                        <Input input_type=InputType::Date value=posting_date />
                    </FormField>
                    <FormField label="Сумма" field="paid_amount" errors=errors required=true>
                        <Input input_type=InputType::Number value=paid_amount placeholder="0,00" />
                    </FormField>
                </div>

                <Show when=move || kind.get() != PaymentType::InternalTransfer>
                    <div class="form__row">
                        {move || {
                            let label = if kind.get() == PaymentType::Pay { "Поставщик" } else { "Покупатель" };
                            view! {
                                <FormField label=label field="party" errors=errors required=true>
                                    <OptionSelect value=party options=parties />
                                </FormField>
                            }
                        }}
                        {move || errors.with(|e| e.iter().find(|x| x.field == "party_type").map(|x| view! {
                            <div class="form__error">{x.message.clone()}</div>
                        }))}
                    </div>
                </Show>

                <div class="form__row">
                    <FormField label="Счёт списания" field="paid_from" errors=errors required=true>
                        <OptionSelect value=paid_from options=accounts />
                    </FormField>
                    <FormField label="Счёт зачисления" field="paid_to" errors=errors required=true>
                        <OptionSelect value=paid_to options=accounts />
                    </FormField>
                    <FormField label="Способ оплаты" field="mode_of_payment" errors=errors>
                        <OptionSelect value=mode_of_payment options=modes />
                    </FormField>
                </div>

                <div class="form__row">
                    <FormField label="Номер документа" field="reference_no" errors=errors>
                        <Input value=reference_no />
                    </FormField>
                    <FormField label="Дата документа" field="reference_date" errors=errors>
                        <Input input_type=InputType::Date value=reference_date />
                    </FormField>
                </div>

                <FormField label="Комментарий" field="remarks" errors=errors>
                    <Textarea value=remarks />
                </FormField>
            </div>
        </PageFrame>
    }
}
