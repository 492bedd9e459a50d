use crate::layout::global_context::AppGlobalContext;
use crate::layout::Shell;
use crate::shared::toast::ToastService;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppGlobalContext::new();
    provide_context(ctx);
    provide_context(ToastService::new());

    ctx.init_router_integration();

    view! { <Shell /> }
}
