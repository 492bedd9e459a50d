use contracts::domain::a007_stock_entry::{StockEntry, StockEntryType};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a007_stock_entry::api;
use crate::layout::global_context::use_app_context;
use crate::shared::components::{FilterPanel, ListFilter, PartyField, TableCellMoney};
use crate::shared::format::{format_date, format_qty, or_dash};
use crate::shared::loader::load_into;
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::shared::toast::use_toast;

const ENTRY_TYPES: [(&str, &str); 3] = [
    ("Material Receipt", "Поступление"),
    ("Material Issue", "Списание"),
    ("Material Transfer", "Перемещение"),
];

fn entry_type_label(value: &Option<String>) -> String {
    let known = [
        StockEntryType::MaterialReceipt,
        StockEntryType::MaterialIssue,
        StockEntryType::MaterialTransfer,
    ];
    match value.as_deref() {
        Some(v) => known
            .iter()
            .find(|t| t.as_str() == v)
            .map(|t| t.label().to_string())
            .unwrap_or_else(|| v.to_string()),
        None => "—".to_string(),
    }
}

#[component]
pub fn StockEntryList() -> impl IntoView {
    let ctx = use_app_context();
    let toast = use_toast();
    let filter = ListFilter::new();
    let items = RwSignal::new(Vec::<StockEntry>::new());
    let loading = RwSignal::new(false);
    let selected = RwSignal::new(None::<StockEntry>);

    let load = move || {
        selected.set(None);
        let path = api::list_path(&filter.to_params(PartyField::None));
        load_into(path, items, loading, toast);
    };
    load();

    let open_entry = move |name: String| {
        spawn_local(async move {
            match api::fetch_by_name(&name).await {
                Ok(entry) => selected.set(Some(entry)),
                Err(e) => toast.error(e),
            }
        });
    };

    view! {
        <PageFrame page_id="a007_stock_entry--list" category=PAGE_CAT_LIST>
            <PageHeader title="Складские документы" count=Signal::derive(move || items.with(|v| v.len()))>
                <Button on_click=move |_| ctx.open("a007_stock_entry_receipt")>"Поступление"</Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| ctx.open("a007_stock_entry_transfer")
                >
                    "Перемещение"
                </Button>
            </PageHeader>

            <div class="page__content">
                <FilterPanel
                    filter=filter
                    statuses=ENTRY_TYPES.to_vec()
                    with_period=true
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
                                <TableHeaderCell>"Откуда"</TableHeaderCell>
                                <TableHeaderCell>"Куда"</TableHeaderCell>
                                <TableHeaderCell>"Сумма"</TableHeaderCell>
                                <TableHeaderCell>"Состояние"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || items.get()
                                key=|e| e.name.clone()
                                children=move |entry| {
                                    let name = entry.name.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <a href="#" class="table__link" on:click=move |e| {
                                                        e.prevent_default();
                                                        open_entry(name.clone());
                                                    }>{entry.name.clone()}</a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell><TableCellLayout>{format_date(&entry.posting_date)}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{entry_type_label(&entry.stock_entry_type)}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{or_dash(&entry.from_warehouse)}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{or_dash(&entry.to_warehouse)}</TableCellLayout></TableCell>
                                            <TableCellMoney value=entry.total_amount />
                                            <TableCell><TableCellLayout>{entry.docstatus.label()}</TableCellLayout></TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>

                {move || selected.get().map(|entry| view! {
                    <div class="detail-panel">
                        <div class="detail-panel__header">
                            <h3>{format!("{} от {}", entry.name, format_date(&entry.posting_date))}</h3>
                            <Button appearance=ButtonAppearance::Subtle on_click=move |_| selected.set(None)>"✕"</Button>
                        </div>
                        <div class="detail-panel__meta">
                            <span>{entry_type_label(&entry.stock_entry_type)}</span>
                            <span>"Комментарий: " {or_dash(&entry.remarks)}</span>
                        </div>
                        <Table>
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell>"Товар"</TableHeaderCell>
                                    <TableHeaderCell>"Кол-во"</TableHeaderCell>
                                    <TableHeaderCell>"Со склада"</TableHeaderCell>
                                    <TableHeaderCell>"На склад"</TableHeaderCell>
                                    <TableHeaderCell>"Цена"</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                {entry.items.clone().into_iter().map(|line| view! {
                                    <TableRow>
                                        <TableCell><TableCellLayout>{line.item_code.clone()}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{format_qty(line.qty)}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{or_dash(&line.s_warehouse)}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{or_dash(&line.t_warehouse)}</TableCellLayout></TableCell>
                                        <TableCellMoney value=line.basic_rate />
                                    </TableRow>
                                }).collect_view()}
                            </TableBody>
                        </Table>
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
    fn test_entry_type_label() {
        assert_eq!(entry_type_label(&Some("Material Transfer".into())), "Перемещение");
        assert_eq!(entry_type_label(&Some("Repack".into())), "Repack");
        assert_eq!(entry_type_label(&None), "—");
    }
}
