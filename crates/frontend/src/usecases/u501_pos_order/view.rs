use std::collections::HashMap;

use contracts::domain::a003_item::Item;
use contracts::shared::api::OptionItem;
use contracts::usecases::u501_pos_order::{
    Cart, PosBootstrap, PosOrderRequest, PosOrderResponse, StockCheckRequest,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::api;
use crate::shared::components::OptionSelect;
use crate::shared::format::{format_money, format_number, format_qty, parse_amount};
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_USECASE};
use crate::shared::toast::use_toast;

fn warehouse_options(bootstrap: &PosBootstrap) -> Vec<OptionItem> {
    bootstrap
        .warehouses
        .iter()
        .map(|w| {
            let label = if w.warehouse_name.is_empty() { &w.name } else { &w.warehouse_name };
            OptionItem::new(w.name.clone(), label.clone())
        })
        .collect()
}

fn mode_options(bootstrap: &PosBootstrap) -> Vec<OptionItem> {
    bootstrap
        .modes_of_payment
        .iter()
        .filter(|m| m.enabled)
        .map(|m| OptionItem::new(m.name.clone(), m.name.clone()))
        .collect()
}

fn matches_search(item: &Item, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    term.is_empty()
        || item.item_name.to_lowercase().contains(&term)
        || item.code().to_lowercase().contains(&term)
}

/// Экран кассы: подбор товаров, корзина, оплата
#[component]
pub fn PosScreen() -> impl IntoView {
    let toast = use_toast();

    let bootstrap = RwSignal::new(PosBootstrap::default());
    let loading = RwSignal::new(true);

    let customer = RwSignal::new(String::new());
    let warehouse = RwSignal::new(String::new());
    let mode_of_payment = RwSignal::new(String::new());
    let search = RwSignal::new(String::new());
    let paid = RwSignal::new(String::new());

    let cart = RwSignal::new(Cart::default());
    // Подтверждённые остатки по выбранному складу: item_code → доступно
    let available = RwSignal::new(HashMap::<String, f64>::new());
    let pending = RwSignal::new(false);
    let last_receipt = RwSignal::new(None::<PosOrderResponse>);

    spawn_local(async move {
        match api::bootstrap().await {
            Ok(data) => {
                customer.set(data.default_customer.clone().unwrap_or_default());
                warehouse.set(
                    data.default_warehouse
                        .clone()
                        .or_else(|| data.warehouses.first().map(|w| w.name.clone()))
                        .unwrap_or_default(),
                );
                if let Some(mode) = data.modes_of_payment.iter().find(|m| m.enabled) {
                    mode_of_payment.set(mode.name.clone());
                }
                cart.set(Cart::new(data.tax_rate));
                bootstrap.set(data);
            }
            Err(e) => toast.error(e),
        }
        loading.set(false);
    });

    // Остатки зависят от склада
    Effect::new(move |_| {
        warehouse.track();
        available.update(|a| a.clear());
    });

    let customers = Signal::derive(move || bootstrap.with(|b| b.customers.clone()));
    let warehouses = Signal::derive(move || bootstrap.with(warehouse_options));
    let modes = Signal::derive(move || bootstrap.with(mode_options));

    let visible_items = move || {
        let term = search.get();
        bootstrap.with(|b| {
            b.items
                .iter()
                .filter(|i| matches_search(i, &term))
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    let totals = Memo::new(move |_| cart.with(|c| c.totals()));
    let change = move || {
        let paid = parse_amount(&paid.get()).unwrap_or(0.0);
        totals.get().change_for(paid)
    };

    // Количество меняется только после подтверждения остатка
    let set_line_qty = move |item: Item, qty: f64| {
        let code = item.code().to_string();
        let is_stock = item.is_stock_item;
        let apply = {
            let code = code.clone();
            move || {
                cart.update(|c| {
                    if c.qty_of(&code) == 0.0 {
                        c.add(&item);
                    }
                    c.set_qty(&code, qty);
                })
            }
        };

        if qty <= 0.0 || !is_stock {
            apply();
            return;
        }
        let known = available.with_untracked(|a| a.get(&code).copied());
        if known.is_some_and(|avail| avail >= qty) {
            apply();
            return;
        }

        let wh = warehouse.get_untracked();
        if wh.is_empty() {
            toast.error("Выберите склад");
            return;
        }
        let request = StockCheckRequest {
            item_code: code,
            warehouse: wh,
            qty,
        };
        pending.set(true);
        spawn_local(async move {
            match api::stock_check(&request).await {
                Ok(resp) => {
                    available.update(|a| {
                        a.insert(resp.item_code.clone(), resp.available);
                    });
                    if resp.sufficient {
                        apply();
                    } else {
                        toast.error(format!(
                            "Недостаточно остатка {}: доступно {}",
                            resp.item_code,
                            format_qty(resp.available)
                        ));
                    }
                }
                Err(e) => toast.error(e),
            }
            pending.set(false);
        });
    };

    let find_item = move |code: &str| {
        bootstrap.with_untracked(|b| b.items.iter().find(|i| i.code() == code).cloned())
    };

    let checkout = move |_| {
        let order = PosOrderRequest {
            customer: customer.get_untracked(),
            pos_profile: None,
            warehouse: warehouse.get_untracked(),
            mode_of_payment: mode_of_payment.get_untracked(),
            paid_amount: parse_amount(&paid.get_untracked()).unwrap_or(0.0),
            items: cart.with_untracked(|c| c.to_items()),
            tax_rate: cart.with_untracked(|c| c.tax_rate),
            posting_date: None,
        };
        if let Err(e) = order.validate() {
            toast.error(e.to_string());
            return;
        }
        pending.set(true);
        spawn_local(async move {
            match api::create_order(&order).await {
                Ok(receipt) => {
                    toast.success(format!(
                        "Чек {} на {}",
                        receipt.invoice,
                        format_money(receipt.grand_total)
                    ));
                    last_receipt.set(Some(receipt));
                    cart.update(|c| c.clear());
                    paid.set(String::new());
                    available.update(|a| a.clear());
                }
                Err(e) => toast.error(e),
            }
            pending.set(false);
        });
    };

    view! {
        <PageFrame page_id="u501_pos_order--usecase" category=PAGE_CAT_USECASE>
            <PageHeader title="Касса">
                <span class="page__summary">
                    {move || format!("Налог {} %", format_number(cart.with(|c| c.tax_rate) * 100.0, 1))}
                </span>
            </PageHeader>

            <div class="page__content pos">
                <div class="pos__catalog">
                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <div style="flex: 1;">
                            <Input value=search placeholder="Поиск товара..." />
                        </div>
                        <div style="width: 220px;">
                            <OptionSelect value=warehouse options=warehouses placeholder="— склад —" />
                        </div>
                    </Flex>

                    <Show
                        when=move || !loading.get()
                        fallback=|| view! { <div class="pos__empty">"Загрузка..."</div> }
                    >
                        <div class="pos__grid">
                            <For
                                each=visible_items
                                key=|i| i.name.clone()
                                children=move |item| {
                                    let code = item.code().to_string();
                                    let title = item.item_name.clone();
                                    let price = format_money(item.standard_rate);
                                    let stock_hint = {
                                        let code = code.clone();
                                        move || available.with(|a| a.get(&code).map(|q| format!("остаток {}", format_qty(*q))))
                                    };
                                    view! {
                                        <button
                                            class="pos__tile"
                                            disabled=move || pending.get()
                                            on:click=move |_| {
                                                let next = cart.with_untracked(|c| c.qty_of(item.code())) + 1.0;
                                                set_line_qty(item.clone(), next);
                                            }
                                        >
                                            <span class="pos__tile-name">{title}</span>
                                            <span class="pos__tile-code">{code}</span>
                                            <span class="pos__tile-price">{price}</span>
                                            <span class="pos__tile-stock">{stock_hint}</span>
                                        </button>
                                    }
                                }
                            />
                        </div>
                    </Show>
                </div>

                <div class="pos__cart">
                    <OptionSelect value=customer options=customers placeholder="— покупатель —" />

                    <table class="pos__lines">
                        <tbody>
                            <For
                                each=move || cart.with(|c| c.lines.clone())
                                key=|l| (l.item_code.clone(), l.qty.to_bits())
                                children=move |line| {
                                    let code = line.item_code.clone();
                                    let minus_code = code.clone();
                                    let plus_code = code.clone();
                                    let qty = line.qty;
                                    view! {
                                        <tr>
                                            <td class="pos__line-name">{line.item_name.clone()}</td>
                                            <td class="pos__line-qty">
                                                <button on:click=move |_| {
                                                    cart.update(|c| c.set_qty(&minus_code, qty - 1.0));
                                                }>"−"</button>
                                                <span>{format_qty(qty)}</span>
                                                <button
                                                    disabled=move || pending.get()
                                                    on:click=move |_| {
                                                        if let Some(item) = find_item(&plus_code) {
                                                            set_line_qty(item, qty + 1.0);
                                                        }
                                                    }
                                                >"+"</button>
                                            </td>
                                            <td class="text-right">{format_money(line.amount())}</td>
                                            <td>
                                                <button on:click=move |_| cart.update(|c| c.remove(&code))>"✕"</button>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>

                    <Show when=move || cart.with(|c| c.is_empty())>
                        <div class="pos__empty">"Корзина пуста"</div>
                    </Show>

                    <div class="pos__totals">
                        <div>"Подытог: " <strong>{move || format_money(totals.get().subtotal)}</strong></div>
                        <div>"Налог: " <strong>{move || format_money(totals.get().tax)}</strong></div>
                        <div class="pos__total">"К оплате: " <strong>{move || format_money(totals.get().total)}</strong></div>
                    </div>

                    <Flex vertical=true gap=FlexGap::Small>
                        <OptionSelect value=mode_of_payment options=modes placeholder="— способ оплаты —" />
                        <Input input_type=InputType::Number value=paid placeholder="Получено" />
                        <div>"Сдача: " <strong>{move || format_money(change())}</strong></div>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=checkout
                            disabled=Signal::derive(move || pending.get() || cart.with(|c| c.is_empty()))
                        >
                            "Оплатить"
                        </Button>
                    </Flex>

                    {move || last_receipt.get().map(|r| view! {
                        <div class="pos__receipt">
                            <div>"Чек: " <strong>{r.invoice.clone()}</strong></div>
                            <div>"Итого: " {format_money(r.grand_total)}</div>
                            <div>"Сдача: " {format_money(r.change_amount)}</div>
                        </div>
                    })}
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a006_payment_entry::ModeOfPayment;

    #[test]
    fn test_matches_search() {
        let item = Item {
            name: "ITEM-001".into(),
            item_code: "ITEM-001".into(),
            item_name: "Кофе зерновой".into(),
            ..Default::default()
        };
        assert!(matches_search(&item, ""));
        assert!(matches_search(&item, "кофе"));
        assert!(matches_search(&item, "item-0"));
        assert!(!matches_search(&item, "чай"));
    }

    #[test]
    fn test_only_enabled_modes() {
        let bootstrap = PosBootstrap {
            modes_of_payment: vec![
                ModeOfPayment { name: "Cash".into(), kind: None, enabled: true },
                ModeOfPayment { name: "Cheque".into(), kind: None, enabled: false },
            ],
            ..Default::default()
        };
        assert_eq!(mode_options(&bootstrap), vec![OptionItem::new("Cash", "Cash")]);
    }
}
