use contracts::domain::a010_opportunity::Opportunity;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a010_opportunity::api;
use crate::shared::components::{FilterPanel, ListFilter, PartyField, StatusBadge, TableCellMoney};
use crate::shared::format::{format_date, format_money, format_number, or_dash};
use crate::shared::loader::load_into;
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::shared::toast::use_toast;

const STATUSES: [(&str, &str); 5] = [
    ("Open", "Открыта"),
    ("Replied", "Отвечено"),
    ("Quotation", "Предложение"),
    ("Converted", "Выиграна"),
    ("Lost", "Проиграна"),
];

#[component]
pub fn OpportunityList() -> impl IntoView {
    let toast = use_toast();
    let filter = ListFilter::new();
    let items = RwSignal::new(Vec::<Opportunity>::new());
    let loading = RwSignal::new(false);

    let load = move || {
        let path = api::list_path(&filter.to_params(PartyField::Party));
        load_into(path, items, loading, toast);
    };
    load();

    // Взвешенная воронка по открытым сделкам
    let pipeline = move || {
        items.with(|v| {
            v.iter()
                .filter(|o| o.is_open())
                .map(|o| o.weighted_amount())
                .sum::<f64>()
        })
    };

    view! {
        <PageFrame page_id="a010_opportunity--list" category=PAGE_CAT_LIST>
            <PageHeader title="Сделки" count=Signal::derive(move || items.with(|v| v.len()))>
                <span class="page__summary">
                    "Воронка (взвеш.): " {move || format_money(pipeline())}
                </span>
            </PageHeader>

            <div class="page__content">
                <FilterPanel
                    filter=filter
                    statuses=STATUSES.to_vec()
                    party_label="Клиент:"
                    loading=loading
                    on_apply=Callback::new(move |_| load())
                />

                <div class="table-wrapper">
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Номер"</TableHeaderCell>
                                <TableHeaderCell>"Клиент"</TableHeaderCell>
                                <TableHeaderCell>"Стадия"</TableHeaderCell>
                                <TableHeaderCell>"Сумма"</TableHeaderCell>
                                <TableHeaderCell>"Вероятность"</TableHeaderCell>
                                <TableHeaderCell>"Закрытие"</TableHeaderCell>
                                <TableHeaderCell>"Статус"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || items.get()
                                key=|o| o.name.clone()
                                children=move |o| {
                                    let client = o.customer_name.clone().filter(|s| !s.is_empty()).unwrap_or(o.party_name.clone());
                                    let closing = o.expected_closing.as_deref().map(format_date).unwrap_or_else(|| "—".to_string());
                                    view! {
                                        <TableRow>
                                            <TableCell><TableCellLayout>{o.name.clone()}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout truncate=true>{client}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{or_dash(&o.sales_stage)}</TableCellLayout></TableCell>
                                            <TableCellMoney value=o.opportunity_amount />
                                            <TableCell><TableCellLayout>{format!("{} %", format_number(o.probability, 0))}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{closing}</TableCellLayout></TableCell>
                                            <TableCell><StatusBadge status=o.status.clone() /></TableCell>
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
