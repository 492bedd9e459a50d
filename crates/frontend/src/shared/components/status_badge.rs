use leptos::prelude::*;

fn tone(status: &str) -> &'static str {
    match status {
        "Paid" | "Submitted" | "Converted" | "Completed" | "Closed" | "Reconciled" => "badge--good",
        "Overdue" | "Cancelled" | "Lost" | "Do Not Contact" | "Scrapped" => "badge--bad",
        "Unpaid" | "Partly Paid" | "Open" | "Replied" | "Draft" => "badge--warn",
        _ => "badge--neutral",
    }
}

/// Статус документа ERP цветной меткой
#[component]
pub fn StatusBadge(#[prop(into)] status: Option<String>) -> impl IntoView {
    match status.filter(|s| !s.is_empty()) {
        Some(s) => {
            let class = format!("badge {}", tone(&s));
            view! { <span class=class>{s}</span> }.into_any()
        }
        None => view! { <span class="badge badge--neutral">"—"</span> }.into_any(),
    }
}
