//! Боковое меню со сворачиваемыми группами

use crate::layout::global_context::use_app_context;
use crate::layout::registry::page_label;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<(&'static str, &'static str)>, // (page key, icon)
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "dashboards",
            label: "Дашборды",
            icon: "dashboard",
            items: vec![("d400_business_summary", "dashboard")],
        },
        MenuGroup {
            id: "accounting",
            label: "Бухгалтерия",
            icon: "invoices",
            items: vec![
                ("a004_sales_invoice", "invoices"),
                ("a004_sales_invoice_new", "invoices"),
                ("a006_payment_entry", "payments"),
                ("a006_payment_entry_new", "payments"),
                ("a005_purchase_invoice", "purchases"),
            ],
        },
        MenuGroup {
            id: "stock",
            label: "Склад",
            icon: "inventory",
            items: vec![
                ("a003_item", "products"),
                ("a007_stock_entry", "inventory"),
                ("a007_stock_entry_transfer", "shipments"),
                ("a007_stock_entry_receipt", "inventory"),
            ],
        },
        MenuGroup {
            id: "assets",
            label: "Активы",
            icon: "asset",
            items: vec![("a008_asset", "asset"), ("a008_asset_movement", "shipments")],
        },
        MenuGroup {
            id: "crm",
            label: "CRM",
            icon: "customers",
            items: vec![
                ("a009_lead", "lead"),
                ("a009_lead_new", "lead"),
                ("a010_opportunity", "payments"),
                ("a001_customer", "customers"),
            ],
        },
        MenuGroup {
            id: "pos",
            label: "Продажи",
            icon: "pos",
            items: vec![("u501_pos_order", "pos")],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_app_context();
    let expanded_groups = RwSignal::new(vec![
        "dashboards".to_string(),
        "accounting".to_string(),
        "pos".to_string(),
    ]);

    view! {
        <div class="app-sidebar__content">
            {get_menu_groups().into_iter().map(|group| {
                let group_id = group.id.to_string();
                let gid_click = group_id.clone();
                let gid_chevron = group_id.clone();
                let gid_show = group_id.clone();
                let items = StoredValue::new(group.items.clone());

                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            style:padding-left="12px"
                            on:click=move |_| {
                                let gid = gid_click.clone();
                                expanded_groups.update(move |list| {
                                    if let Some(pos) = list.iter().position(|x| x == &gid) {
                                        list.remove(pos);
                                    } else {
                                        list.push(gid);
                                    }
                                });
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=move || expanded_groups.get().contains(&gid_chevron)
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>

                        <Show when=move || expanded_groups.get().contains(&gid_show)>
                            <div class="app-sidebar__children">
                                {items.get_value().into_iter().map(|(key, icon_name)| {
                                    view! {
                                        <div
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || ctx.active.get() == key
                                            style:padding-left="10px"
                                            on:click=move |_| ctx.open(key)
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(icon_name)}
                                                <span>{page_label(key)}</span>
                                            </div>
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
