use contracts::shared::api::OptionItem;
use leptos::prelude::*;
use thaw::*;

/// Выпадающий список из `OptionItem`, загруженных с backend
#[component]
pub fn OptionSelect(
    value: RwSignal<String>,
    #[prop(into)] options: Signal<Vec<OptionItem>>,
    #[prop(optional, into)] placeholder: Option<String>,
) -> impl IntoView {
    let placeholder = placeholder.unwrap_or_else(|| "— выберите —".to_string());

    view! {
        <Select value=value>
            <option value="">{placeholder}</option>
            {move || options.get().into_iter().map(|o| {
                view! { <option value=o.value>{o.label}</option> }
            }).collect_view()}
        </Select>
    }
}
