//! Расчёт итогов документа: подытог, налог по ставке, итого.

use serde::{Deserialize, Serialize};

/// Ставка налога по умолчанию (15%)
pub const DEFAULT_TAX_RATE: f64 = 0.15;

/// Округление денежной суммы до копеек
pub fn round_money(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn line_amount(qty: f64, rate: f64) -> f64 {
    round_money(qty * rate)
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: f64,
    pub tax_rate: f64,
    pub tax: f64,
    pub total: f64,
}

impl Totals {
    pub fn from_subtotal(subtotal: f64, tax_rate: f64) -> Self {
        let subtotal = round_money(subtotal);
        let tax = round_money(subtotal * tax_rate);
        Self {
            subtotal,
            tax_rate,
            tax,
            total: round_money(subtotal + tax),
        }
    }

    /// `lines` — пары (количество, цена)
    pub fn compute<I>(lines: I, tax_rate: f64) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let subtotal: f64 = lines.into_iter().map(|(qty, rate)| line_amount(qty, rate)).sum();
        Self::from_subtotal(subtotal, tax_rate)
    }

    /// Сдача покупателю; 0 если оплачено меньше итога
    pub fn change_for(&self, paid: f64) -> f64 {
        round_money((paid - self.total).max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_is_subtotal_times_rate() {
        let t = Totals::from_subtotal(200.0, 0.15);
        assert_eq!(t.subtotal, 200.0);
        assert_eq!(t.tax, 30.0);
        assert_eq!(t.total, 230.0);
    }

    #[test]
    fn test_compute_from_lines() {
        let t = Totals::compute(vec![(2.0, 10.5), (1.0, 4.0)], DEFAULT_TAX_RATE);
        assert_eq!(t.subtotal, 25.0);
        assert_eq!(t.tax, 3.75);
        assert_eq!(t.total, 28.75);
    }

    #[test]
    fn test_empty_lines() {
        let t = Totals::compute(Vec::new(), 0.1);
        assert_eq!(t, Totals { subtotal: 0.0, tax_rate: 0.1, tax: 0.0, total: 0.0 });
    }

    #[test]
    fn test_change() {
        let t = Totals::from_subtotal(100.0, 0.10);
        assert_eq!(t.change_for(120.0), 10.0);
        assert_eq!(t.change_for(50.0), 0.0);
    }
}
