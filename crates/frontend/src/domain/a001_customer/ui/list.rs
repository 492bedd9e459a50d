use contracts::domain::a001_customer::Customer;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a001_customer::api;
use crate::shared::components::{FilterPanel, ListFilter, PartyField};
use crate::shared::format::or_dash;
use crate::shared::loader::load_into;
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::shared::toast::use_toast;

#[component]
pub fn CustomerList() -> impl IntoView {
    let toast = use_toast();
    let filter = ListFilter::new();
    let items = RwSignal::new(Vec::<Customer>::new());
    let loading = RwSignal::new(false);

    let load = move || {
        let path = api::list_path(&filter.to_params(PartyField::None));
        load_into(path, items, loading, toast);
    };
    load();

    view! {
        <PageFrame page_id="a001_customer--list" category=PAGE_CAT_LIST>
            <PageHeader title="Покупатели" count=Signal::derive(move || items.with(|v| v.len()))>
                {()}
            </PageHeader>

            <div class="page__content">
                <FilterPanel
                    filter=filter
                    search_placeholder="Наименование покупателя..."
                    loading=loading
                    on_apply=Callback::new(move |_| load())
                />

                <div class="table-wrapper">
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Код"</TableHeaderCell>
                                <TableHeaderCell>"Наименование"</TableHeaderCell>
                                <TableHeaderCell>"Группа"</TableHeaderCell>
                                <TableHeaderCell>"Регион"</TableHeaderCell>
                                <TableHeaderCell>"Телефон"</TableHeaderCell>
                                <TableHeaderCell>"E-mail"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || items.get()
                                key=|c| c.name.clone()
                                children=move |c| {
                                    let display_name = c.display_name().to_string();
                                    let disabled = c.disabled;
                                    view! {
                                    <TableRow>
                                        <TableCell><TableCellLayout>{c.name.clone()}</TableCellLayout></TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                {display_name}
                                                {disabled.then(|| view! { <span class="badge badge--neutral">" отключён"</span> })}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell><TableCellLayout>{or_dash(&c.customer_group)}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{or_dash(&c.territory)}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{or_dash(&c.mobile_no)}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{or_dash(&c.email_id)}</TableCellLayout></TableCell>
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
