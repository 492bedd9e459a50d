use contracts::domain::a006_payment_entry::{PaymentEntry, PaymentType};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a006_payment_entry::api;
use crate::layout::global_context::use_app_context;
use crate::shared::components::{FilterPanel, ListFilter, PartyField, TableCellMoney};
use crate::shared::format::{format_date, format_money, or_dash};
use crate::shared::loader::load_into;
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::shared::toast::use_toast;

const PAYMENT_TYPES: [(&str, &str); 3] = [
    ("Receive", "Поступление"),
    ("Pay", "Оплата"),
    ("Internal Transfer", "Перемещение"),
];

fn type_label(payment_type: &Option<String>) -> String {
    payment_type
        .as_deref()
        .map(|t| {
            PaymentType::from_str_opt(t)
                .map(|p| p.label().to_string())
                .unwrap_or_else(|| t.to_string())
        })
        .unwrap_or_else(|| "—".to_string())
}

#[component]
pub fn PaymentEntryList() -> impl IntoView {
    let ctx = use_app_context();
    let toast = use_toast();
    let filter = ListFilter::new();
    let items = RwSignal::new(Vec::<PaymentEntry>::new());
    let loading = RwSignal::new(false);
    let selected = RwSignal::new(None::<PaymentEntry>);

    let load = move || {
        selected.set(None);
        let path = api::list_path(&filter.to_params(PartyField::Party));
        load_into(path, items, loading, toast);
    };
    load();

    let open_payment = move |name: String| {
        spawn_local(async move {
            match api::fetch_by_name(&name).await {
                Ok(payment) => selected.set(Some(payment)),
                Err(e) => toast.error(e),
            }
        });
    };

    // Поступления минус оплаты по загруженным строкам
    let balance = move || {
        items.with(|v| {
            v.iter()
                .map(|p| match p.payment_type.as_deref() {
                    Some("Receive") => p.paid_amount,
                    Some("Pay") => -p.paid_amount,
                    _ => 0.0,
                })
                .sum::<f64>()
        })
    };

    view! {
        <PageFrame page_id="a006_payment_entry--list" category=PAGE_CAT_LIST>
            <PageHeader title="Платежи" count=Signal::derive(move || items.with(|v| v.len()))>
                <span class="page__summary">"Сальдо: " {move || format_money(balance())}</span>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| ctx.open("a006_payment_entry_new")
                >
                    "Новый платёж"
                </Button>
            </PageHeader>

            <div class="page__content">
                <FilterPanel
                    filter=filter
                    statuses=PAYMENT_TYPES.to_vec()
                    with_period=true
                    party_label="Контрагент:"
                    search_placeholder="Наименование контрагента..."
                    loading=loading
                    on_apply=Callback::new(move |_| load())
                />

                <div class="table-wrapper">
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Номер"</TableHeaderCell>
                                <TableHeaderCell>"Дата"</TableHeaderCell>
                                <TableHeaderCell>"Вид"</TableHeaderCell>
                                <TableHeaderCell>"Контрагент"</TableHeaderCell>
                                <TableHeaderCell>"Сумма"</TableHeaderCell>
                                <TableHeaderCell>"Способ оплаты"</TableHeaderCell>
                                <TableHeaderCell>"Состояние"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || items.get()
                                key=|p| p.name.clone()
                                children=move |p| {
                                    let name = p.name.clone();
                                    let party = p.party_name.clone().filter(|s| !s.is_empty()).or(p.party.clone());
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <a href="#" class="table__link" on:click=move |e| {
                                                        e.prevent_default();
                                                        open_payment(name.clone());
                                                    }>{p.name.clone()}</a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell><TableCellLayout>{format_date(&p.posting_date)}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{type_label(&p.payment_type)}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout truncate=true>{or_dash(&party)}</TableCellLayout></TableCell>
                                            <TableCellMoney value=p.paid_amount />
                                            <TableCell><TableCellLayout>{or_dash(&p.mode_of_payment)}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{p.docstatus.label()}</TableCellLayout></TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>

                {move || selected.get().map(|p| view! {
                    <div class="detail-panel">
                        <div class="detail-panel__header">
                            <h3>{format!("{} от {}", p.name, format_date(&p.posting_date))}</h3>
                            <Button appearance=ButtonAppearance::Subtle on_click=move |_| selected.set(None)>"✕"</Button>
                        </div>
                        <div class="detail-panel__meta">
                            <span>"Вид: " {type_label(&p.payment_type)}</span>
                            <span>"Тип контрагента: " {or_dash(&p.party_type)}</span>
                            <span>"Контрагент: " {or_dash(&p.party)}</span>
                            <span>"Номер документа: " {or_dash(&p.reference_no)}</span>
                            <span>"Статус: " {or_dash(&p.status)}</span>
                        </div>
                        <div class="detail-panel__totals">
                            <strong>"Сумма: " {format_money(p.paid_amount)}</strong>
                        </div>
                    </div>
                })}
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_label() {
        assert_eq!(type_label(&Some("Pay".into())), "Оплата");
        assert_eq!(type_label(&Some("Custom".into())), "Custom");
        assert_eq!(type_label(&None), "—");
    }
}
