use contracts::domain::a003_item::Item;
use contracts::domain::a007_stock_entry::{StockEntryDto, StockEntryItemDto, StockEntryType};
use contracts::shared::api::OptionItem;
use contracts::shared::validation::FieldError;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a003_item::api as item_api;
use crate::domain::a007_stock_entry::api;
use crate::shared::components::{field_value, FormField, ItemLine, ItemLinesEditor, OptionSelect};
use crate::shared::format::today;
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_DETAIL};
use crate::shared::toast::use_toast;

/// Форма складского документа; вид операции задаёт, какие склады нужны
#[component]
pub fn StockEntryNew(entry_type: StockEntryType) -> impl IntoView {
    let toast = use_toast();
    // Цена нужна только при поступлении
    let with_rate = entry_type == StockEntryType::MaterialReceipt;

    let warehouses = RwSignal::new(Vec::<OptionItem>::new());
    let catalog = RwSignal::new(Vec::<Item>::new());

    let posting_date = RwSignal::new(today());
    let from_warehouse = RwSignal::new(String::new());
    let to_warehouse = RwSignal::new(String::new());
    let remarks = RwSignal::new(String::new());
    let lines = RwSignal::new(vec![ItemLine::new()]);

    let errors = RwSignal::new(Vec::<FieldError>::new());
    let saving = RwSignal::new(false);

    spawn_local(async move {
        match item_api::warehouse_options().await {
            Ok(list) => warehouses.set(list),
            Err(e) => toast.error(e),
        }
    });
    spawn_local(async move {
        match item_api::fetch_catalog().await {
            Ok(list) => catalog.set(list.into_iter().filter(|i| i.is_stock_item).collect()),
            Err(e) => toast.error(e),
        }
    });

    let build_dto = move || StockEntryDto {
        stock_entry_type: entry_type,
        posting_date: posting_date.get_untracked(),
        from_warehouse: entry_type.needs_source().then(|| field_value(from_warehouse)).flatten(),
        to_warehouse: entry_type.needs_target().then(|| field_value(to_warehouse)).flatten(),
        items: lines.with_untracked(|l| {
            l.iter()
                .map(|line| StockEntryItemDto {
                    item_code: line.item_code.get_untracked(),
                    qty: line.qty_value(),
                    basic_rate: if with_rate { line.rate_value() } else { None },
                })
                .collect()
        }),
        remarks: field_value(remarks),
        company: None,
    };

    let reset = move || {
        posting_date.set(today());
        remarks.set(String::new());
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
                    toast.success(format!("{} {} создано", entry_type.label(), created.name));
                    reset();
                }
                Err(e) => toast.error(e),
            }
            saving.set(false);
        });
    };

    let (page_id, title) = match entry_type {
        StockEntryType::MaterialReceipt => ("a007_stock_entry_receipt--detail", "Поступление товаров"),
        StockEntryType::MaterialIssue => ("a007_stock_entry_issue--detail", "Списание товаров"),
        StockEntryType::MaterialTransfer => ("a007_stock_entry_transfer--detail", "Перемещение товаров"),
    };

    view! {
        <PageFrame page_id=page_id category=PAGE_CAT_DETAIL>
            <PageHeader title=title>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| reset()>
                    "Очистить"
                </Button>
                <Button appearance=ButtonAppearance::Primary on_click=save disabled=saving>
                    {move || if saving.get() { "Сохранение..." } else { "Сохранить" }}
                </Button>
            </PageHeader>

            <div class="page__content form">
                <div class="form__row">
                    <FormField label="Дата" field="posting_date" errors=errors required=true>
                        <Input input_type=InputType::Date value=posting_date />
                    </FormField>
                    {entry_type.needs_source().then(|| view! {
                        <FormField label="Склад-отправитель" field="from_warehouse" errors=errors required=true>
                            <OptionSelect value=from_warehouse options=warehouses />
                        </FormField>
                    })}
                    {entry_type.needs_target().then(|| view! {
                        <FormField label="Склад-получатель" field="to_warehouse" errors=errors required=true>
                            <OptionSelect value=to_warehouse options=warehouses />
                        </FormField>
                    })}
                </div>

                <FormField label="Товары" field="items" errors=errors required=true>
                    <ItemLinesEditor lines=lines items=catalog errors=errors with_rate=with_rate />
                </FormField>

                <FormField label="Комментарий" field="remarks" errors=errors>
                    <Textarea value=remarks />
                </FormField>
            </div>
        </PageFrame>
    }
}
