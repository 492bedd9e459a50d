use crate::layout::global_context::use_app_context;
use crate::layout::registry::render_page;
use leptos::prelude::*;

/// Центральная область: активная страница из контекста
#[component]
pub fn Center() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div data-zone="center" class="app-main" style="flex: 1; overflow: auto;">
            {move || render_page(&ctx.active.get())}
        </div>
    }
}
