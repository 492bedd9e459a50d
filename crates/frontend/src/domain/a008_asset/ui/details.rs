use std::sync::atomic::{AtomicU64, Ordering};

use contracts::domain::a008_asset::{
    Asset, AssetMovementDto, AssetMovementItemDto, AssetMovementPurpose, AssetOptions,
};
use contracts::shared::api::ListParams;
use contracts::shared::validation::FieldError;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a008_asset::api;
use crate::shared::api_utils::get_json;
use crate::shared::components::{field_value, FormField, OptionSelect};
use crate::shared::format::today;
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_DETAIL};
use crate::shared::toast::use_toast;

static NEXT_ROW_ID: AtomicU64 = AtomicU64::new(1);

const PURPOSES: [AssetMovementPurpose; 3] = [
    AssetMovementPurpose::Transfer,
    AssetMovementPurpose::Issue,
    AssetMovementPurpose::Receipt,
];

#[derive(Clone, Copy)]
struct MovementRow {
    id: u64,
    asset: RwSignal<String>,
    source_location: RwSignal<String>,
    target_location: RwSignal<String>,
    from_employee: RwSignal<String>,
    to_employee: RwSignal<String>,
}

impl MovementRow {
    fn new() -> Self {
        Self {
            id: NEXT_ROW_ID.fetch_add(1, Ordering::Relaxed),
            asset: RwSignal::new(String::new()),
            source_location: RwSignal::new(String::new()),
            target_location: RwSignal::new(String::new()),
            from_employee: RwSignal::new(String::new()),
            to_employee: RwSignal::new(String::new()),
        }
    }

    fn to_dto(&self) -> AssetMovementItemDto {
        AssetMovementItemDto {
            asset: self.asset.get_untracked(),
            source_location: field_value(self.source_location),
            target_location: field_value(self.target_location),
            from_employee: field_value(self.from_employee),
            to_employee: field_value(self.to_employee),
        }
    }
}

fn purpose_from_str(value: &str) -> AssetMovementPurpose {
    PURPOSES
        .into_iter()
        .find(|p| p.as_str() == value)
        .unwrap_or_default()
}

/// Форма перемещения основных средств
#[component]
pub fn AssetMovementNew() -> impl IntoView {
    let toast = use_toast();
    let options = RwSignal::new(AssetOptions::default());
    // Текущее местоположение и ответственный по каждому ОС
    let registry = RwSignal::new(Vec::<Asset>::new());

    let purpose = RwSignal::new(AssetMovementPurpose::Transfer.as_str().to_string());
    let transaction_date = RwSignal::new(today());
    let rows = RwSignal::new(vec![MovementRow::new()]);

    let errors = RwSignal::new(Vec::<FieldError>::new());
    let saving = RwSignal::new(false);

    spawn_local(async move {
        match api::fetch_options().await {
            Ok(loaded) => options.set(loaded),
            Err(e) => toast.error(e),
        }
    });
    spawn_local(async move {
        match get_json::<Vec<Asset>>(&api::list_path(&ListParams::with_limit(0))).await {
            Ok(list) => registry.set(list),
            Err(e) => toast.error(e),
        }
    });

    let kind = Memo::new(move |_| purpose_from_str(&purpose.get()));
    let assets = Signal::derive(move || options.with(|o| o.assets.clone()));
    let locations = Signal::derive(move || options.with(|o| o.locations.clone()));

    let build_dto = move || AssetMovementDto {
        purpose: kind.get_untracked(),
        transaction_date: transaction_date.get_untracked(),
        assets: rows.with_untracked(|r| r.iter().map(MovementRow::to_dto).collect()),
        company: None,
    };

    let reset = move || {
        transaction_date.set(today());
        rows.set(vec![MovementRow::new()]);
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
            match api::create_movement(&dto).await {
                Ok(created) => {
                    toast.success(format!("Перемещение ОС {} создано", created.name));
                    reset();
                }
                Err(e) => toast.error(e),
            }
            saving.set(false);
        });
    };

    view! {
        <PageFrame page_id="a008_asset_movement--detail" category=PAGE_CAT_DETAIL>
            <PageHeader title="Перемещение ОС">
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| reset()>
                    "Очистить"
                </Button>
                <Button appearance=ButtonAppearance::Primary on_click=save disabled=saving>
                    {move || if saving.get() { "Сохранение..." } else { "Сохранить" }}
                </Button>
            </PageHeader>

            <div class="page__content form">
                <div class="form__row">
                    <FormField label="Назначение" field="purpose" errors=errors required=true>
                        <Select value=purpose>
                            {PURPOSES
                                .into_iter()
                                .map(|p| view! { <option value=p.as_str()>{p.label()}</option> })
                                .collect_view()}
                        </Select>
                    </FormField>
                    <FormField label="Дата" field="transaction_date" errors=errors required=true>
                        <Input input_type=InputType::Date value=transaction_date />
                    </FormField>
                </div>

                <FormField label="Основные средства" field="assets" errors=errors required=true>
                    <div class="item-lines">
                        <For
                            each=move || rows.get()
                            key=|row| row.id
                            children=move |row| {
                                let id = row.id;
                                let index = move || rows.with(|r| r.iter().position(|x| x.id == id).unwrap_or(0));

                                // Откуда и от кого подставляются из карточки ОС
                                Effect::new(move |_| {
                                    let code = row.asset.get();
                                    let current = registry.with(|list| {
                                        list.iter()
                                            .find(|a| a.name == code)
                                            .map(|a| (a.location.clone(), a.custodian.clone()))
                                    });
                                    if let Some((location, custodian)) = current {
                                        row.source_location.set(location.unwrap_or_default());
                                        row.from_employee.set(custodian.unwrap_or_default());
                                    }
                                });

                                let row_errors = move || {
                                    let key = format!("assets[{}].", index());
                                    errors.with(|e| {
                                        e.iter()
                                            .filter(|x| x.field.starts_with(&key))
                                            .map(|x| x.message.clone())
                                            .collect::<Vec<_>>()
                                            .join("; ")
                                    })
                                };

                                view! {
                                    <div class="item-lines__row">
                                        <div style="flex: 2;">
                                            <OptionSelect value=row.asset options=assets placeholder="— ОС —" />
                                        </div>
                                        <div style="flex: 1;">
                                            <Input value=row.source_location placeholder="Откуда" disabled=true />
                                        </div>
                                        {move || match kind.get() {
                                            AssetMovementPurpose::Issue => view! {
                                                <div style="flex: 1;">
                                                    <Input value=row.to_employee placeholder="Сотрудник" />
                                                </div>
                                            }.into_any(),
                                            _ => view! {
                                                <div style="flex: 1;">
                                                    <OptionSelect value=row.target_location options=locations placeholder="— куда —" />
                                                </div>
                                            }.into_any(),
                                        }}
                                        <Button
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| rows.update(|r| r.retain(|x| x.id != id))
                                        >
                                            "✕"
                                        </Button>
                                    </div>
                                    {move || {
                                        let text = row_errors();
                                        (!text.is_empty()).then(|| view! { <div class="form__error">{text}</div> })
                                    }}
                                }
                            }
                        />
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| rows.update(|r| r.push(MovementRow::new()))
                        >
                            "+ Добавить ОС"
                        </Button>
                    </div>
                </FormField>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purpose_from_str() {
        assert_eq!(purpose_from_str("Issue"), AssetMovementPurpose::Issue);
        assert_eq!(purpose_from_str("unknown"), AssetMovementPurpose::Transfer);
    }
}
