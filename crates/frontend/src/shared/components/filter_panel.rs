use contracts::shared::api::ListParams;
use leptos::prelude::*;
use thaw::*;

use super::form_field::field_value;

/// Состояние фильтра списка; превращается в `ListParams` для query string
#[derive(Clone, Copy)]
pub struct ListFilter {
    pub search: RwSignal<String>,
    pub status: RwSignal<String>,
    pub party: RwSignal<String>,
    pub from_date: RwSignal<String>,
    pub to_date: RwSignal<String>,
    pub limit: RwSignal<String>,
}

impl ListFilter {
    pub fn new() -> Self {
        Self {
            search: RwSignal::new(String::new()),
            status: RwSignal::new(String::new()),
            party: RwSignal::new(String::new()),
            from_date: RwSignal::new(String::new()),
            to_date: RwSignal::new(String::new()),
            limit: RwSignal::new("50".to_string()),
        }
    }

    /// `party` уходит в поле, которое понимает конкретный список
    pub fn to_params(&self, party_field: PartyField) -> ListParams {
        let party = field_value(self.party);
        let mut params = ListParams {
            limit: field_value(self.limit).and_then(|l| l.parse().ok()),
            status: field_value(self.status),
            from_date: field_value(self.from_date),
            to_date: field_value(self.to_date),
            search: field_value(self.search),
            ..Default::default()
        };
        match party_field {
            PartyField::Customer => params.customer = party,
            PartyField::Supplier => params.supplier = party,
            PartyField::Party => params.party = party,
            PartyField::None => {}
        }
        params
    }

    pub fn reset(&self) {
        self.search.set(String::new());
        self.status.set(String::new());
        self.party.set(String::new());
        self.from_date.set(String::new());
        self.to_date.set(String::new());
    }
}

impl Default for ListFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum PartyField {
    Customer,
    Supplier,
    Party,
    None,
}

/// Панель фильтров списка: поиск, статус, период, лимит строк
#[component]
pub fn FilterPanel(
    filter: ListFilter,
    /// Пары (значение, подпись) для выбора статуса; пустой список скрывает поле
    #[prop(optional)]
    statuses: Vec<(&'static str, &'static str)>,
    /// Показывать поля периода
    #[prop(optional)]
    with_period: bool,
    #[prop(optional, into)]
    search_placeholder: Option<String>,
    /// Подпись поля контрагента; без неё поле скрыто
    #[prop(optional)]
    party_label: Option<&'static str>,
    #[prop(into)] loading: Signal<bool>,
    on_apply: Callback<()>,
) -> impl IntoView {
    let has_statuses = !statuses.is_empty();
    let statuses = StoredValue::new(statuses);
    let placeholder = search_placeholder.unwrap_or_else(|| "Поиск...".to_string());

    view! {
        <div class="filter-panel">
            <div class="filter-panel-content">
                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <div style="flex: 1; max-width: 320px;">
                        <Flex vertical=true gap=FlexGap::Small>
                            <Label>"Поиск:"</Label>
                            <Input value=filter.search placeholder=placeholder />
                        </Flex>
                    </div>

                    {party_label.map(|label| view! {
                        <div style="width: 220px;">
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>{label}</Label>
                                <Input value=filter.party placeholder="Код контрагента" />
                            </Flex>
                        </div>
                    })}

                    <Show when=move || has_statuses>
                        <div style="width: 200px;">
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Статус:"</Label>
                                <Select value=filter.status>
                                    <option value="">"— все —"</option>
                                    {statuses.get_value().into_iter().map(|(value, label)| {
                                        view! { <option value=value>{label}</option> }
                                    }).collect_view()}
                                </Select>
                            </Flex>
                        </div>
                    </Show>

                    <Show when=move || with_period>
                        <Flex vertical=true gap=FlexGap::Small>
                            <Label>"Период:"</Label>
                            <Flex gap=FlexGap::Small>
                                <Input input_type=InputType::Date value=filter.from_date />
                                <Input input_type=InputType::Date value=filter.to_date />
                            </Flex>
                        </Flex>
                    </Show>

                    <div style="width: 100px;">
                        <Flex vertical=true gap=FlexGap::Small>
                            <Label>"Строк:"</Label>
                            <Select value=filter.limit>
                                <option value="20">"20"</option>
                                <option value="50">"50"</option>
                                <option value="200">"200"</option>
                                <option value="0">"все"</option>
                            </Select>
                        </Flex>
                    </div>

                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| on_apply.run(())
                        disabled=loading
                    >
                        {move || if loading.get() { "Загрузка..." } else { "Обновить" }}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| {
                            filter.reset();
                            on_apply.run(());
                        }
                    >
                        "Сбросить"
                    </Button>
                </Flex>
            </div>
        </div>
    }
}
