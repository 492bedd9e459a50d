use contracts::dashboards::d400_business_summary::{DashboardRequest, DashboardSummary};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::dashboards::d400_business_summary::api;
use crate::shared::components::{CardTone, StatCard, TableCellMoney};
use crate::shared::format::{format_date, format_money, format_number};
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_DASHBOARD};
use crate::shared::toast::use_toast;

fn optional(value: String) -> Option<String> {
    let value = value.trim().to_string();
    (!value.is_empty()).then_some(value)
}

#[component]
pub fn BusinessSummaryDashboard() -> impl IntoView {
    let toast = use_toast();
    let from_date = RwSignal::new(String::new());
    let to_date = RwSignal::new(String::new());
    let data = RwSignal::new(None::<DashboardSummary>);
    let loading = RwSignal::new(false);

    let load = move || {
        let request = DashboardRequest {
            from_date: optional(from_date.get_untracked()),
            to_date: optional(to_date.get_untracked()),
            company: None,
        };
        loading.set(true);
        spawn_local(async move {
            match api::get_summary(&request).await {
                Ok(summary) => data.set(Some(summary)),
                Err(e) => toast.error(e),
            }
            loading.set(false);
        });
    };

    load();

    let money = move |f: fn(&DashboardSummary) -> f64| {
        Signal::derive(move || data.with(|d| d.as_ref().map(|s| format_money(f(s)))))
    };
    let count = move |f: fn(&DashboardSummary) -> usize| {
        Signal::derive(move || data.with(|d| d.as_ref().map(|s| format_number(f(s) as f64, 0))))
    };
    let profit_tone = Signal::derive(move || {
        data.with(|d| match d {
            Some(s) if s.net_profit > 0.0 => CardTone::Good,
            Some(s) if s.net_profit < 0.0 => CardTone::Bad,
            _ => CardTone::Neutral,
        })
    });

    view! {
        <PageFrame page_id="d400_business_summary--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader title="Сводка по бизнесу">
                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <Input input_type=InputType::Date value=from_date />
                    <Input input_type=InputType::Date value=to_date />
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| load()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {move || if loading.get() { "Загрузка..." } else { "Обновить" }}
                    </Button>
                </Flex>
            </PageHeader>

            <div class="page__content">
                <div class="stat-grid">
                    <StatCard label="Выручка" icon_name="invoices" value=money(|s| s.total_revenue) />
                    <StatCard label="Расходы" icon_name="purchases" value=money(|s| s.total_expenses) />
                    <StatCard label="Прибыль" icon_name="payments" value=money(|s| s.net_profit) tone=profit_tone />
                    <StatCard label="Дебиторская задолженность" icon_name="customers" value=money(|s| s.receivables) />
                    <StatCard label="Кредиторская задолженность" icon_name="purchases" value=money(|s| s.payables) />
                    <StatCard label="Товарные запасы" icon_name="inventory" value=money(|s| s.inventory_value) />
                </div>
                <div class="stat-grid">
                    <StatCard label="Счета покупателям" icon_name="invoices" value=count(|s| s.sales_invoice_count) />
                    <StatCard label="Счета поставщиков" icon_name="purchases" value=count(|s| s.purchase_invoice_count) />
                    <StatCard label="Покупатели" icon_name="customers" value=count(|s| s.customer_count) />
                    <StatCard label="Открытые лиды" icon_name="lead" value=count(|s| s.open_lead_count) />
                    <StatCard label="Открытые сделки" icon_name="payments" value=count(|s| s.open_opportunity_count) />
                    <StatCard label="Основные средства" icon_name="asset" value=count(|s| s.asset_count) />
                </div>

                <div class="dashboard__columns">
                    <div class="dashboard__panel">
                        <h3>"Последние продажи"</h3>
                        <Table>
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell>"Номер"</TableHeaderCell>
                                    <TableHeaderCell>"Дата"</TableHeaderCell>
                                    <TableHeaderCell>"Покупатель"</TableHeaderCell>
                                    <TableHeaderCell>"Сумма"</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                <For
                                    each=move || data.with(|d| d.as_ref().map(|s| s.recent_sales.clone()).unwrap_or_default())
                                    key=|inv| inv.name.clone()
                                    children=move |inv| {
                                        let customer = inv.customer_name.clone().unwrap_or_else(|| inv.customer.clone());
                                        view! {
                                            <TableRow>
                                                <TableCell><TableCellLayout>{inv.name.clone()}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout>{format_date(&inv.posting_date)}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout truncate=true>{customer}</TableCellLayout></TableCell>
                                                <TableCellMoney value=inv.grand_total />
                                            </TableRow>
                                        }
                                    }
                                />
                            </TableBody>
                        </Table>
                    </div>

                    <div class="dashboard__panel">
                        <h3>"Крупнейшие покупатели"</h3>
                        <Table>
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell>"Покупатель"</TableHeaderCell>
                                    <TableHeaderCell>"Выручка"</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                <For
                                    each=move || data.with(|d| d.as_ref().map(|s| s.top_customers.clone()).unwrap_or_default())
                                    key=|row| row.customer.clone()
                                    children=move |row| view! {
                                        <TableRow>
                                            <TableCell><TableCellLayout truncate=true>{row.customer.clone()}</TableCellLayout></TableCell>
                                            <TableCellMoney value=row.revenue bold=true />
                                        </TableRow>
                                    }
                                />
                            </TableBody>
                        </Table>
                    </div>
                </div>
            </div>
        </PageFrame>
    }
}
