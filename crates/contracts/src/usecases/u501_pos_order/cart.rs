//! Корзина кассового места: добавление, удаление, изменение количества.

use serde::{Deserialize, Serialize};

use crate::domain::a003_item::Item;
use crate::domain::a004_sales_invoice::InvoiceItemDto;
use crate::shared::totals::{line_amount, Totals, DEFAULT_TAX_RATE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub item_code: String,
    pub item_name: String,
    pub qty: f64,
    pub rate: f64,
}

impl CartLine {
    pub fn amount(&self) -> f64 {
        line_amount(self.qty, self.rate)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
    pub tax_rate: f64,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(DEFAULT_TAX_RATE)
    }
}

impl Cart {
    pub fn new(tax_rate: f64) -> Self {
        Self {
            lines: Vec::new(),
            tax_rate,
        }
    }

    /// Добавить единицу товара: увеличивает количество существующей строки
    pub fn add(&mut self, item: &Item) {
        let code = item.code();
        if let Some(line) = self.lines.iter_mut().find(|l| l.item_code == code) {
            line.qty += 1.0;
            return;
        }
        let item_name = if item.item_name.is_empty() {
            code.to_string()
        } else {
            item.item_name.clone()
        };
        self.lines.push(CartLine {
            item_code: code.to_string(),
            item_name,
            qty: 1.0,
            rate: item.standard_rate,
        });
    }

    pub fn remove(&mut self, item_code: &str) {
        self.lines.retain(|l| l.item_code != item_code);
    }

    /// Установить количество; 0 и меньше удаляет строку
    pub fn set_qty(&mut self, item_code: &str, qty: f64) {
        if !(qty > 0.0) {
            self.remove(item_code);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.item_code == item_code) {
            line.qty = qty;
        }
    }

    pub fn qty_of(&self, item_code: &str) -> f64 {
        self.lines
            .iter()
            .find(|l| l.item_code == item_code)
            .map(|l| l.qty)
            .unwrap_or(0.0)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn totals(&self) -> Totals {
        Totals::compute(self.lines.iter().map(|l| (l.qty, l.rate)), self.tax_rate)
    }

    pub fn to_items(&self) -> Vec<InvoiceItemDto> {
        self.lines
            .iter()
            .map(|l| InvoiceItemDto {
                item_code: l.item_code.clone(),
                qty: l.qty,
                rate: l.rate,
            })
            .collect()
    }
}
