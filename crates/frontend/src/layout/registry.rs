//! Реестр страниц: ключ активной страницы → подпись и View.
//! Все ключи собраны здесь в одном месте.

use leptos::prelude::*;

use crate::dashboards::d400_business_summary::ui::BusinessSummaryDashboard;
use crate::domain::a001_customer::ui::list::CustomerList;
use crate::domain::a003_item::ui::list::ItemList;
use crate::domain::a004_sales_invoice::ui::details::SalesInvoiceNew;
use crate::domain::a004_sales_invoice::ui::list::SalesInvoiceList;
use crate::domain::a005_purchase_invoice::ui::list::PurchaseInvoiceList;
use crate::domain::a006_payment_entry::ui::details::PaymentEntryNew;
use crate::domain::a006_payment_entry::ui::list::PaymentEntryList;
use crate::domain::a007_stock_entry::ui::details::StockEntryNew;
use crate::domain::a007_stock_entry::ui::list::StockEntryList;
use crate::domain::a008_asset::ui::details::AssetMovementNew;
use crate::domain::a008_asset::ui::list::AssetList;
use crate::domain::a009_lead::ui::details::LeadNew;
use crate::domain::a009_lead::ui::list::LeadList;
use crate::domain::a010_opportunity::ui::list::OpportunityList;
use crate::usecases::u501_pos_order::view::PosScreen;
use contracts::domain::a007_stock_entry::StockEntryType;

pub const DEFAULT_PAGE: &str = "d400_business_summary";

/// (ключ, подпись)
pub const PAGES: &[(&str, &str)] = &[
    ("d400_business_summary", "Сводка"),
    ("a004_sales_invoice", "Счета покупателям"),
    ("a004_sales_invoice_new", "Новый счёт"),
    ("a006_payment_entry", "Платежи"),
    ("a006_payment_entry_new", "Новый платёж"),
    ("a005_purchase_invoice", "Счета поставщиков"),
    ("a003_item", "Товары"),
    ("a007_stock_entry", "Складские документы"),
    ("a007_stock_entry_transfer", "Перемещение товаров"),
    ("a007_stock_entry_receipt", "Поступление товаров"),
    ("a008_asset", "Основные средства"),
    ("a008_asset_movement", "Перемещение ОС"),
    ("a009_lead", "Лиды"),
    ("a009_lead_new", "Новый лид"),
    ("a010_opportunity", "Сделки"),
    ("a001_customer", "Покупатели"),
    ("u501_pos_order", "Касса"),
];

pub fn page_label(key: &str) -> &'static str {
    PAGES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
        .unwrap_or("Страница")
}

pub fn is_known_page(key: &str) -> bool {
    PAGES.iter().any(|(k, _)| *k == key)
}

pub fn render_page(key: &str) -> AnyView {
    match key {
        "d400_business_summary" => view! { <BusinessSummaryDashboard /> }.into_any(),
        "a004_sales_invoice" => view! { <SalesInvoiceList /> }.into_any(),
        "a004_sales_invoice_new" => view! { <SalesInvoiceNew /> }.into_any(),
        "a006_payment_entry" => view! { <PaymentEntryList /> }.into_any(),
        "a006_payment_entry_new" => view! { <PaymentEntryNew /> }.into_any(),
        "a005_purchase_invoice" => view! { <PurchaseInvoiceList /> }.into_any(),
        "a003_item" => view! { <ItemList /> }.into_any(),
        "a007_stock_entry" => view! { <StockEntryList /> }.into_any(),
        "a007_stock_entry_transfer" => {
            view! { <StockEntryNew entry_type=StockEntryType::MaterialTransfer /> }.into_any()
        }
        "a007_stock_entry_receipt" => {
            view! { <StockEntryNew entry_type=StockEntryType::MaterialReceipt /> }.into_any()
        }
        "a008_asset" => view! { <AssetList /> }.into_any(),
        "a008_asset_movement" => view! { <AssetMovementNew /> }.into_any(),
        "a009_lead" => view! { <LeadList /> }.into_any(),
        "a009_lead_new" => view! { <LeadNew /> }.into_any(),
        "a010_opportunity" => view! { <OpportunityList /> }.into_any(),
        "a001_customer" => view! { <CustomerList /> }.into_any(),
        "u501_pos_order" => view! { <PosScreen /> }.into_any(),
        _ => view! {
            <div class="placeholder">{format!("Неизвестная страница: {}", key)}</div>
        }
        .into_any(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_keys_are_unique() {
        let mut keys: Vec<&str> = PAGES.iter().map(|(k, _)| *k).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), PAGES.len());
        assert!(is_known_page(DEFAULT_PAGE));
    }

    #[test]
    fn test_page_label() {
        assert_eq!(page_label("u501_pos_order"), "Касса");
        assert_eq!(page_label("unknown"), "Страница");
    }
}
