use contracts::domain::a003_item::Item;
use contracts::usecases::u501_pos_order::StockCheckRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a003_item::api;
use crate::shared::components::{FilterPanel, ListFilter, OptionSelect, PartyField, TableCellMoney};
use crate::shared::format::{format_qty, or_dash};
use crate::shared::loader::load_into;
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::shared::toast::use_toast;

#[component]
pub fn ItemList() -> impl IntoView {
    let toast = use_toast();
    let filter = ListFilter::new();
    let items = RwSignal::new(Vec::<Item>::new());
    let loading = RwSignal::new(false);

    let warehouses = RwSignal::new(Vec::new());
    let warehouse = RwSignal::new(String::new());
    // item_code → остаток на выбранном складе
    let balances = RwSignal::new(std::collections::HashMap::<String, f64>::new());

    let load = move || {
        let path = api::list_path(&filter.to_params(PartyField::None));
        load_into(path, items, loading, toast);
    };
    load();

    spawn_local(async move {
        match api::warehouse_options().await {
            Ok(list) => warehouses.set(list),
            Err(e) => toast.error(e),
        }
    });

    let check_balance = move |item_code: String| {
        let wh = warehouse.get_untracked();
        if wh.is_empty() {
            toast.error("Выберите склад для проверки остатка");
            return;
        }
        let request = StockCheckRequest {
            item_code: item_code.clone(),
            warehouse: wh,
            qty: 0.0,
        };
        spawn_local(async move {
            match api::check_balance(&request).await {
                Ok(resp) => balances.update(|b| {
                    b.insert(item_code, resp.available);
                }),
                Err(e) => toast.error(e),
            }
        });
    };

    Effect::new(move |_| {
        warehouse.track();
        balances.update(|b| b.clear());
    });

    view! {
        <PageFrame page_id="a003_item--list" category=PAGE_CAT_LIST>
            <PageHeader title="Товары" count=Signal::derive(move || items.with(|v| v.len()))>
                <div style="width: 240px;">
                    <OptionSelect value=warehouse options=warehouses placeholder="Склад для остатков" />
                </div>
            </PageHeader>

            <div class="page__content">
                <FilterPanel
                    filter=filter
                    search_placeholder="Наименование товара..."
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
                                <TableHeaderCell>"Ед."</TableHeaderCell>
                                <TableHeaderCell>"Цена"</TableHeaderCell>
                                <TableHeaderCell>"Себестоимость"</TableHeaderCell>
                                <TableHeaderCell>"Остаток"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || items.get()
                                key=|i| i.name.clone()
                                children=move |i| {
                                    let code = i.code().to_string();
                                    let code_for_balance = code.clone();
                                    let is_stock = i.is_stock_item;
                                    view! {
                                        <TableRow>
                                            <TableCell><TableCellLayout>{code.clone()}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout truncate=true>{i.item_name.clone()}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{or_dash(&i.item_group)}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{or_dash(&i.stock_uom)}</TableCellLayout></TableCell>
                                            <TableCellMoney value=i.standard_rate />
                                            <TableCellMoney value=i.valuation_rate />
                                            <TableCell>
                                                <TableCellLayout>
                                                    {move || {
                                                        let code = code_for_balance.clone();
                                                        match balances.with(|b| b.get(&code).copied()) {
                                                            Some(qty) => format_qty(qty).into_any(),
                                                            None if is_stock => view! {
                                                                <a href="#" class="table__link" on:click=move |e| {
                                                                    e.prevent_default();
                                                                    check_balance(code.clone());
                                                                }>"проверить"</a>
                                                            }.into_any(),
                                                            None => "—".into_any(),
                                                        }
                                                    }}
                                                </TableCellLayout>
                                            </TableCell>
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
