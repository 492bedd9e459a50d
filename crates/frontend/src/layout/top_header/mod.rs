use crate::layout::global_context::use_app_context;
use crate::layout::registry::page_label;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if ctx.left_open.get() { "Скрыть навигацию" } else { "Показать навигацию" }
                >
                    "☰"
                </button>
                <span class="top-header__title">"ERP"</span>
                <span class="top-header__page">{move || page_label(&ctx.active.get())}</span>
            </div>
        </div>
    }
}
