pub mod center;
pub mod global_context;
pub mod left;
pub mod registry;
pub mod top_header;

use crate::shared::toast::ToastHost;
use leptos::prelude::*;

/// Каркас приложения:
/// ```text
/// +-----------------------------+
/// |          TopHeader          |
/// +---------+-------------------+
/// | Sidebar |  активная страница |
/// +---------+-------------------+
/// ```
#[component]
pub fn Shell() -> impl IntoView {
    view! {
        <div class="app-layout">
            <top_header::TopHeader />
            <div class="app-body">
                <left::Left>
                    <left::Sidebar />
                </left::Left>
                <center::Center />
            </div>
            <ToastHost />
        </div>
    }
}
