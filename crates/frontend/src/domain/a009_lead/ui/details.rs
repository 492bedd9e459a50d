use contracts::domain::a009_lead::LeadDto;
use contracts::shared::validation::FieldError;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a009_lead::api;
use crate::shared::components::{field_value, FormField};
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_DETAIL};
use crate::shared::toast::use_toast;

const SOURCES: [&str; 6] = [
    "Advertisement",
    "Cold Calling",
    "Exhibition",
    "Reference",
    "Website",
    "Existing Customer",
];

#[component]
pub fn LeadNew() -> impl IntoView {
    let toast = use_toast();

    let lead_name = RwSignal::new(String::new());
    let company_name = RwSignal::new(String::new());
    let email_id = RwSignal::new(String::new());
    let mobile_no = RwSignal::new(String::new());
    let source = RwSignal::new(String::new());
    let notes = RwSignal::new(String::new());

    let errors = RwSignal::new(Vec::<FieldError>::new());
    let saving = RwSignal::new(false);

    let reset = move || {
        for field in [lead_name, company_name, email_id, mobile_no, source, notes] {
            field.set(String::new());
        }
        errors.set(Vec::new());
    };

    let save = move |_| {
        let dto = LeadDto {
            lead_name: lead_name.get_untracked().trim().to_string(),
            company_name: field_value(company_name),
            email_id: field_value(email_id),
            mobile_no: field_value(mobile_no),
            source: field_value(source),
            notes: field_value(notes),
        };
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
                    toast.success(format!("Лид {} создан", created.name));
                    reset();
                }
                Err(e) => toast.error(e),
            }
            saving.set(false);
        });
    };

    view! {
        <PageFrame page_id="a009_lead--detail" category=PAGE_CAT_DETAIL>
            <PageHeader title="Новый лид">
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| reset()>
                    "Очистить"
                </Button>
                <Button appearance=ButtonAppearance::Primary on_click=save disabled=saving>
                    {move || if saving.get() { "Сохранение..." } else { "Сохранить" }}
                </Button>
            </PageHeader>

            <div class="page__content form">
                <div class="form__row">
                    <FormField label="Имя контакта" field="lead_name" errors=errors required=true>
                        <Input value=lead_name placeholder="Иван Петров" />
                    </FormField>
                    <FormField label="Организация" field="company_name" errors=errors>
                        <Input value=company_name />
                    </FormField>
                </div>
                <div class="form__row">
                    <FormField label="E-mail" field="email_id" errors=errors>
                        <Input input_type=InputType::Email value=email_id placeholder="name@example.com" />
                    </FormField>
                    <FormField label="Телефон" field="mobile_no" errors=errors>
                        <Input input_type=InputType::Tel value=mobile_no />
                    </FormField>
                    <FormField label="Источник" field="source" errors=errors>
                        <Select value=source>
                            <option value="">"— не указан —"</option>
                            {SOURCES.into_iter().map(|s| view! { <option value=s>{s}</option> }).collect_view()}
                        </Select>
                    </FormField>
                </div>
                <FormField label="Заметки" field="notes" errors=errors>
                    <Textarea value=notes />
                </FormField>
            </div>
        </PageFrame>
    }
}
