use contracts::domain::a004_sales_invoice::SalesInvoice;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a004_sales_invoice::api;
use crate::layout::global_context::use_app_context;
use crate::shared::components::{FilterPanel, ListFilter, PartyField, StatusBadge, TableCellMoney};
use crate::shared::format::{format_date, format_money, format_qty, or_dash};
use crate::shared::loader::load_into;
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::shared::toast::use_toast;

const STATUSES: [(&str, &str); 6] = [
    ("Draft", "Черновик"),
    ("Unpaid", "Не оплачен"),
    ("Partly Paid", "Оплачен частично"),
    ("Paid", "Оплачен"),
    ("Overdue", "Просрочен"),
    ("Return", "Возврат"),
];

#[component]
pub fn SalesInvoiceList() -> impl IntoView {
    let ctx = use_app_context();
    let toast = use_toast();
    let filter = ListFilter::new();
    let items = RwSignal::new(Vec::<SalesInvoice>::new());
    let loading = RwSignal::new(false);
    let selected = RwSignal::new(None::<SalesInvoice>);

    let load = move || {
        selected.set(None);
        let path = api::list_path(&filter.to_params(PartyField::Customer));
        load_into(path, items, loading, toast);
    };
    load();

    // Список приходит без табличной части, строки дочитываются по имени
    let open_invoice = move |name: String| {
        spawn_local(async move {
            match api::fetch_by_name(&name).await {
                Ok(invoice) => selected.set(Some(invoice)),
                Err(e) => toast.error(e),
            }
        });
    };

    let totals = move || {
        items.with(|v| {
            (
                v.iter().map(|i| i.grand_total).sum::<f64>(),
                v.iter().map(|i| i.outstanding_amount).sum::<f64>(),
            )
        })
    };

    view! {
        <PageFrame page_id="a004_sales_invoice--list" category=PAGE_CAT_LIST>
            <PageHeader title="Счета покупателям" count=Signal::derive(move || items.with(|v| v.len()))>
                <span class="page__summary">
                    {move || {
                        let (total, outstanding) = totals();
                        format!("Сумма: {} · Долг: {}", format_money(total), format_money(outstanding))
                    }}
                </span>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| ctx.open("a004_sales_invoice_new")
                >
                    "Новый счёт"
                </Button>
            </PageHeader>

            <div class="page__content">
                <FilterPanel
                    filter=filter
                    statuses=STATUSES.to_vec()
                    with_period=true
                    party_label="Покупатель:"
                    search_placeholder="Наименование покупателя..."
                    loading=loading
                    on_apply=Callback::new(move |_| load())
                />

                <div class="table-wrapper">
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Номер"</TableHeaderCell>
                                <TableHeaderCell>"Дата"</TableHeaderCell>
                                <TableHeaderCell>"Покупатель"</TableHeaderCell>
                                <TableHeaderCell>"Срок оплаты"</TableHeaderCell>
                                <TableHeaderCell>"Сумма"</TableHeaderCell>
                                <TableHeaderCell>"Долг"</TableHeaderCell>
                                <TableHeaderCell>"Статус"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || items.get()
                                key=|i| i.name.clone()
                                children=move |i| {
                                    let name = i.name.clone();
                                    let customer = i.customer_name.clone().filter(|s| !s.is_empty()).unwrap_or(i.customer.clone());
                                    let due = i.due_date.as_deref().map(format_date).unwrap_or_else(|| "—".to_string());
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <a href="#" class="table__link" on:click=move |e| {
                                                        e.prevent_default();
                                                        open_invoice(name.clone());
                                                    }>{i.name.clone()}</a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell><TableCellLayout>{format_date(&i.posting_date)}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout truncate=true>{customer}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{due}</TableCellLayout></TableCell>
                                            <TableCellMoney value=i.grand_total />
                                            <TableCellMoney value=i.outstanding_amount bold=true />
                                            <TableCell><StatusBadge status=i.status.clone() /></TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>

                {move || selected.get().map(|invoice| view! {
                    <InvoicePreview invoice=invoice on_close=Callback::new(move |_| selected.set(None)) />
                })}
            </div>
        </PageFrame>
    }
}

#[component]
fn InvoicePreview(invoice: SalesInvoice, on_close: Callback<()>) -> impl IntoView {
    let title = format!("{} от {}", invoice.name, format_date(&invoice.posting_date));
    let customer = invoice.customer_name.clone().filter(|s| !s.is_empty()).unwrap_or(invoice.customer.clone());

    view! {
        <div class="detail-panel">
            <div class="detail-panel__header">
                <h3>{title}</h3>
                <span>{invoice.docstatus.label()}</span>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>"✕"</Button>
            </div>
            <div class="detail-panel__meta">
                <span>"Покупатель: " {customer}</span>
                <span>"Организация: " {or_dash(&invoice.company)}</span>
            </div>
            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Товар"</TableHeaderCell>
                        <TableHeaderCell>"Кол-во"</TableHeaderCell>
                        <TableHeaderCell>"Цена"</TableHeaderCell>
                        <TableHeaderCell>"Сумма"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {invoice.items.clone().into_iter().map(|line| {
                        let label = line.item_name.clone().unwrap_or_else(|| line.item_code.clone());
                        view! {
                            <TableRow>
                                <TableCell><TableCellLayout truncate=true>{label}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{format_qty(line.qty)}</TableCellLayout></TableCell>
                                <TableCellMoney value=line.rate />
                                <TableCellMoney value=line.amount />
                            </TableRow>
                        }
                    }).collect_view()}
                </TableBody>
            </Table>
            <div class="detail-panel__totals">
                <span>"Без налога: " {format_money(invoice.net_total)}</span>
                <span>"Налог: " {format_money(invoice.total_taxes_and_charges)}</span>
                <strong>"Итого: " {format_money(invoice.grand_total)}</strong>
            </div>
        </div>
    }
}
