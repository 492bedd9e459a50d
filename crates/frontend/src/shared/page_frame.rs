//! PageFrame: корневая обёртка каждой страницы центральной области.
//!
//! На корневом элементе всегда есть:
//!   - `id` в формате `"{entity}--{category}"`, например `"a004_sales_invoice--list"`
//!   - `data-page-category` со значением одной из констант `PAGE_CAT_*`

use leptos::prelude::*;

/// Список документов с фильтрами
pub const PAGE_CAT_LIST: &str = "list";
/// Форма создания документа
pub const PAGE_CAT_DETAIL: &str = "detail";
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";
/// Рабочее место (POS)
pub const PAGE_CAT_USECASE: &str = "usecase";

#[component]
pub fn PageFrame(
    /// `{entity}--{category}`, например `"a009_lead--list"`
    page_id: &'static str,
    /// Одна из констант `PAGE_CAT_*`
    category: &'static str,
    children: Children,
) -> impl IntoView {
    let class = match category {
        PAGE_CAT_DETAIL => "page page--detail",
        PAGE_CAT_DASHBOARD => "page page--dashboard",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            {children()}
        </div>
    }
}

/// Заголовок страницы: название, необязательный счётчик, кнопки справа
#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(optional, into)] count: MaybeProp<usize>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="page__header">
            <div class="page__header-left">
                <h1 class="page__title">{title}</h1>
                {move || count.get().map(|c| view! { <span class="badge badge--primary">{c}</span> })}
            </div>
            <div class="page__header-right">{children()}</div>
        </div>
    }
}
