use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CardTone {
    #[default]
    Neutral,
    Good,
    Bad,
}

/// KPI-карточка дашборда
#[component]
pub fn StatCard(
    #[prop(into)] label: String,
    icon_name: &'static str,
    /// Уже отформатированное значение; None пока идёт загрузка
    #[prop(into)]
    value: Signal<Option<String>>,
    #[prop(optional, into)] tone: Signal<CardTone>,
    #[prop(optional, into)] subtitle: MaybeProp<String>,
) -> impl IntoView {
    let class = move || match tone.get() {
        CardTone::Good => "stat-card stat-card--success",
        CardTone::Bad => "stat-card stat-card--error",
        CardTone::Neutral => "stat-card",
    };

    view! {
        <div class=class>
            <div class="stat-card__icon">{icon(icon_name)}</div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">
                    {move || value.get().unwrap_or_else(|| "—".to_string())}
                </div>
                {move || subtitle.get().map(|s| view! { <div class="stat-card__subtitle">{s}</div> })}
            </div>
        </div>
    }
}
