use contracts::shared::validation::FieldError;
use leptos::prelude::*;
use thaw::*;

/// Значение поля ввода без пробелов по краям; пустое значение - `None`
pub fn field_value(signal: RwSignal<String>) -> Option<String> {
    let value = signal.get_untracked().trim().to_string();
    (!value.is_empty()).then_some(value)
}

/// Подпись, поле ввода и текст ошибки под ним
#[component]
pub fn FormField(
    #[prop(into)] label: String,
    /// Имя поля DTO, по которому ищется ошибка
    field: &'static str,
    errors: RwSignal<Vec<FieldError>>,
    #[prop(optional)] required: bool,
    children: Children,
) -> impl IntoView {
    let error = move || {
        errors.with(|list| {
            list.iter()
                .find(|e| e.field == field)
                .map(|e| e.message.clone())
        })
    };

    view! {
        <div class="form__group" class:form__group--invalid=move || error().is_some()>
            <Label>
                {label}
                {required.then(|| view! { <span class="form__required">" *"</span> })}
            </Label>
            {children()}
            {move || error().map(|msg| view! { <div class="form__error">{msg}</div> })}
        </div>
    }
}
