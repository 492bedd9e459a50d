use contracts::domain::a009_lead::Lead;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a009_lead::api;
use crate::layout::global_context::use_app_context;
use crate::shared::components::{FilterPanel, ListFilter, PartyField, StatusBadge};
use crate::shared::format::{format_date, or_dash};
use crate::shared::loader::load_into;
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::shared::toast::use_toast;

const STATUSES: [(&str, &str); 7] = [
    ("Lead", "Новый"),
    ("Open", "Открыт"),
    ("Replied", "Отвечено"),
    ("Opportunity", "Сделка"),
    ("Interested", "Заинтересован"),
    ("Converted", "Конвертирован"),
    ("Do Not Contact", "Не связываться"),
];

#[component]
pub fn LeadList() -> impl IntoView {
    let ctx = use_app_context();
    let toast = use_toast();
    let filter = ListFilter::new();
    let items = RwSignal::new(Vec::<Lead>::new());
    let loading = RwSignal::new(false);

    let load = move || {
        let path = api::list_path(&filter.to_params(PartyField::None));
        load_into(path, items, loading, toast);
    };
    load();

    let open_count = move || items.with(|v| v.iter().filter(|l| l.is_open()).count());

    view! {
        <PageFrame page_id="a009_lead--list" category=PAGE_CAT_LIST>
            <PageHeader title="Лиды" count=Signal::derive(move || items.with(|v| v.len()))>
                <span class="page__summary">"В работе: " {open_count}</span>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| ctx.open("a009_lead_new")>
                    "Новый лид"
                </Button>
            </PageHeader>

            <div class="page__content">
                <FilterPanel
                    filter=filter
                    statuses=STATUSES.to_vec()
                    with_period=true
                    search_placeholder="Имя контакта..."
                    loading=loading
                    on_apply=Callback::new(move |_| load())
                />

                <div class="table-wrapper">
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Контакт"</TableHeaderCell>
                                <TableHeaderCell>"Организация"</TableHeaderCell>
                                <TableHeaderCell>"E-mail"</TableHeaderCell>
                                <TableHeaderCell>"Телефон"</TableHeaderCell>
                                <TableHeaderCell>"Источник"</TableHeaderCell>
                                <TableHeaderCell>"Создан"</TableHeaderCell>
                                <TableHeaderCell>"Статус"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || items.get()
                                key=|l| l.name.clone()
                                children=move |l| {
                                    let created = l.creation.as_deref()
                                        .map(|c| format_date(c.get(..10).unwrap_or(c)))
                                        .unwrap_or_else(|| "—".to_string());
                                    view! {
                                        <TableRow>
                                            <TableCell><TableCellLayout truncate=true>{l.lead_name.clone()}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout truncate=true>{or_dash(&l.company_name)}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{or_dash(&l.email_id)}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{or_dash(&l.mobile_no)}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{or_dash(&l.source)}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{created}</TableCellLayout></TableCell>
                                            <TableCell><StatusBadge status=l.status.clone() /></TableCell>
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
