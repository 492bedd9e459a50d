use contracts::domain::a008_asset::Asset;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a008_asset::api;
use crate::layout::global_context::use_app_context;
use crate::shared::components::{FilterPanel, ListFilter, PartyField, StatusBadge, TableCellMoney};
use crate::shared::format::{format_date, format_money, or_dash};
use crate::shared::loader::load_into;
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::shared::toast::use_toast;

const STATUSES: [(&str, &str); 5] = [
    ("Submitted", "В эксплуатации"),
    ("Partially Depreciated", "Частично амортизировано"),
    ("Fully Depreciated", "Полностью амортизировано"),
    ("Sold", "Продано"),
    ("Scrapped", "Списано"),
];

#[component]
pub fn AssetList() -> impl IntoView {
    let ctx = use_app_context();
    let toast = use_toast();
    let filter = ListFilter::new();
    let items = RwSignal::new(Vec::<Asset>::new());
    let loading = RwSignal::new(false);
    let selected = RwSignal::new(None::<Asset>);

    let load = move || {
        selected.set(None);
        let path = api::list_path(&filter.to_params(PartyField::None));
        load_into(path, items, loading, toast);
    };
    load();

    let open_asset = move |name: String| {
        spawn_local(async move {
            match api::fetch_by_name(&name).await {
                Ok(asset) => selected.set(Some(asset)),
                Err(e) => toast.error(e),
            }
        });
    };

    let total_cost = move || items.with(|v| v.iter().map(|a| a.gross_purchase_amount).sum::<f64>());

    view! {
        <PageFrame page_id="a008_asset--list" category=PAGE_CAT_LIST>
            <PageHeader title="Основные средства" count=Signal::derive(move || items.with(|v| v.len()))>
                <span class="page__summary">"Стоимость: " {move || format_money(total_cost())}</span>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| ctx.open("a008_asset_movement")
                >
                    "Перемещение ОС"
                </Button>
            </PageHeader>

            <div class="page__content">
                <FilterPanel
                    filter=filter
                    statuses=STATUSES.to_vec()
                    with_period=true
                    search_placeholder="Наименование ОС..."
                    loading=loading
                    on_apply=Callback::new(move |_| load())
                />

                <div class="table-wrapper">
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Код"</TableHeaderCell>
                                <TableHeaderCell>"Наименование"</TableHeaderCell>
                                <TableHeaderCell>"Категория"</TableHeaderCell>
                                <TableHeaderCell>"Местоположение"</TableHeaderCell>
                                <TableHeaderCell>"Ответственный"</TableHeaderCell>
                                <TableHeaderCell>"Стоимость"</TableHeaderCell>
                                <TableHeaderCell>"Статус"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || items.get()
                                key=|a| a.name.clone()
                                children=move |a| {
                                    let name = a.name.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <a href="#" class="table__link" on:click=move |e| {
                                                        e.prevent_default();
                                                        open_asset(name.clone());
                                                    }>{a.name.clone()}</a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell><TableCellLayout truncate=true>{a.asset_name.clone()}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{or_dash(&a.asset_category)}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{or_dash(&a.location)}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{or_dash(&a.custodian)}</TableCellLayout></TableCell>
                                            <TableCellMoney value=a.gross_purchase_amount />
                                            <TableCell><StatusBadge status=a.status.clone() /></TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>

                {move || selected.get().map(|a| view! {
                    <div class="detail-panel">
                        <div class="detail-panel__header">
                            <h3>{format!("{} · {}", a.name, a.asset_name)}</h3>
                            <Button appearance=ButtonAppearance::Subtle on_click=move |_| selected.set(None)>"✕"</Button>
                        </div>
                        <div class="detail-panel__meta">
                            <span>"Номенклатура: " {or_dash(&a.item_code)}</span>
                            <span>"Дата покупки: " {a.purchase_date.as_deref().map(format_date).unwrap_or_else(|| "—".to_string())}</span>
                            <span>"Местоположение: " {or_dash(&a.location)}</span>
                            <span>"Ответственный: " {or_dash(&a.custodian)}</span>
                        </div>
                        <div class="detail-panel__totals">
                            <strong>"Стоимость: " {format_money(a.gross_purchase_amount)}</strong>
                        </div>
                    </div>
                })}
            </div>
        </PageFrame>
    }
}
