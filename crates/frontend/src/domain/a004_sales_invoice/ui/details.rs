use contracts::domain::a003_item::Item;
use contracts::domain::a004_sales_invoice::{InvoiceItemDto, SalesInvoiceDto};
use contracts::shared::api::OptionItem;
use contracts::shared::totals::{Totals, DEFAULT_TAX_RATE};
use contracts::shared::validation::FieldError;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a003_item::api as item_api;
use crate::domain::a004_sales_invoice::api;
use crate::shared::components::{FormField, ItemLine, ItemLinesEditor, OptionSelect};
use crate::shared::format::{format_money, format_number, today};
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_DETAIL};
use crate::shared::toast::use_toast;

/// Форма нового счёта покупателю
#[component]
pub fn SalesInvoiceNew() -> impl IntoView {
    let toast = use_toast();

    let customers = RwSignal::new(Vec::<OptionItem>::new());
    let catalog = RwSignal::new(Vec::<Item>::new());
    let tax_rate = RwSignal::new(DEFAULT_TAX_RATE);

    let customer = RwSignal::new(String::new());
    let posting_date = RwSignal::new(today());
    let due_date = RwSignal::new(String::new());
    let submit = RwSignal::new(false);
    let lines = RwSignal::new(vec![ItemLine::new()]);

    let errors = RwSignal::new(Vec::<FieldError>::new());
    let saving = RwSignal::new(false);

    spawn_local(async move {
        match api::fetch_options().await {
            Ok(options) => {
                customers.set(options.customers);
                tax_rate.set(options.tax_rate);
            }
            Err(e) => toast.error(e),
        }
    });
    spawn_local(async move {
        match item_api::fetch_catalog().await {
            Ok(list) => catalog.set(list),
            Err(e) => toast.error(e),
        }
    });

    let totals = Memo::new(move |_| {
        let rate = tax_rate.get();
        lines.with(|l| {
            Totals::compute(
                l.iter().map(|line| (line.qty_value(), line.rate_value().unwrap_or(0.0))),
                rate,
            )
        })
    });

    let build_dto = move || SalesInvoiceDto {
        customer: customer.get_untracked(),
        posting_date: posting_date.get_untracked(),
        due_date: Some(due_date.get_untracked()).filter(|d| !d.trim().is_empty()),
        company: None,
        items: lines.with_untracked(|l| {
            l.iter()
                .map(|line| InvoiceItemDto {
                    item_code: line.item_code.get_untracked(),
                    qty: line.qty_value(),
                    rate: line.rate_value().unwrap_or(0.0),
                })
                .collect()
        }),
        tax_rate: tax_rate.get_untracked(),
        submit: submit.get_untracked(),
    };

    let reset = move || {
        customer.set(String::new());
        posting_date.set(today());
        due_date.set(String::new());
        submit.set(false);
        lines.set(vec![ItemLine::new()]);
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
                    toast.success(format!("Счёт {} создан", created.name));
                    reset();
                }
                Err(e) => toast.error(e),
            }
            saving.set(false);
        });
    };

    view! {
        <PageFrame page_id="a004_sales_invoice--detail" category=PAGE_CAT_DETAIL>
            <PageHeader title="Новый счёт покупателю">
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| reset()>
                    "Очистить"
                </Button>
                <Button appearance=ButtonAppearance::Primary on_click=save disabled=saving>
                    {move || if saving.get() { "Сохранение..." } else { "Сохранить" }}
                </Button>
            </PageHeader>

            <div class="page__content form">
                <div class="form__row">
                    <FormField label="Покупатель" field="customer" errors=errors required=true>
                        <OptionSelect value=customer options=customers />
                    </FormField>
                    <FormField label="Дата" field="posting_date" errors=errors required=true>
                        <Input input_type=InputType::Date value=posting_date />
                    </FormField>
                    <FormField label="Срок оплаты" field="due_date" errors=errors>
                        <Input input_type=InputType::Date value=due_date />
                    </FormField>
                </div>

                <FormField label="Товары" field="items" errors=errors required=true>
                    <ItemLinesEditor lines=lines items=catalog errors=errors with_rate=true />
                </FormField>

                <div class="form__totals">
                    <div>"Без налога: " <strong>{move || format_money(totals.get().subtotal)}</strong></div>
                    <div>
                        {move || format!("Налог ({} %): ", format_number(tax_rate.get() * 100.0, 1))}
                        <strong>{move || format_money(totals.get().tax)}</strong>
                    </div>
                    <div class="form__total">"Итого: " <strong>{move || format_money(totals.get().total)}</strong></div>
                </div>

                <label class="form__checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || submit.get()
                        on:change=move |ev| submit.set(event_target_checked(&ev))
                    />
                    " Провести после создания"
                </label>
            </div>
        </PageFrame>
    }
}
