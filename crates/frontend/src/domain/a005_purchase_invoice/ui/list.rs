use contracts::domain::a005_purchase_invoice::PurchaseInvoice;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a005_purchase_invoice::api;
use crate::shared::components::{FilterPanel, ListFilter, PartyField, StatusBadge, TableCellMoney};
use crate::shared::format::{format_date, format_money, or_dash};
use crate::shared::loader::load_into;
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::shared::toast::use_toast;

const STATUSES: [(&str, &str); 5] = [
    ("Draft", "Черновик"),
    ("Unpaid", "Не оплачен"),
    ("Partly Paid", "Оплачен частично"),
    ("Paid", "Оплачен"),
    ("Overdue", "Просрочен"),
];

#[component]
pub fn PurchaseInvoiceList() -> impl IntoView {
    let toast = use_toast();
    let filter = ListFilter::new();
    let items = RwSignal::new(Vec::<PurchaseInvoice>::new());
    let loading = RwSignal::new(false);

    let load = move || {
        let path = api::list_path(&filter.to_params(PartyField::Supplier));
        load_into(path, items, loading, toast);
    };
    load();

    let total_outstanding = move || items.with(|v| v.iter().map(|i| i.outstanding_amount).sum::<f64>());

    view! {
        <PageFrame page_id="a005_purchase_invoice--list" category=PAGE_CAT_LIST>
            <PageHeader title="Счета поставщиков" count=Signal::derive(move || items.with(|v| v.len()))>
                <span class="page__summary">
                    "К оплате: " {move || format_money(total_outstanding())}
                </span>
            </PageHeader>

            <div class="page__content">
                <FilterPanel
                    filter=filter
                    statuses=STATUSES.to_vec()
                    with_period=true
                    party_label="Поставщик:"
                    search_placeholder="Наименование поставщика..."
                    loading=loading
                    on_apply=Callback::new(move |_| load())
                />

                <div class="table-wrapper">
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Номер"</TableHeaderCell>
                                <TableHeaderCell>"Дата"</TableHeaderCell>
                                <TableHeaderCell>"Поставщик"</TableHeaderCell>
                                <TableHeaderCell>"Вх. номер"</TableHeaderCell>
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
                                    let supplier = i.supplier_name.clone().filter(|s| !s.is_empty()).unwrap_or(i.supplier.clone());
                                    view! {
                                        <TableRow>
                                            <TableCell><TableCellLayout>{i.name.clone()}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{format_date(&i.posting_date)}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout truncate=true>{supplier}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{or_dash(&i.bill_no)}</TableCellLayout></TableCell>
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
            </div>
        </PageFrame>
    }
}
