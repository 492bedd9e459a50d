//! Форматирование сумм и дат для таблиц и карточек

/// Разделитель тысяч пробелом, дробная часть через запятую
pub fn format_number(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    let mut result: String = grouped.chars().rev().collect();

    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !is_zero {
        result.insert(0, '-');
    }
    if let Some(frac) = frac_part {
        result.push(',');
        result.push_str(frac);
    }
    result
}

pub fn format_money(value: f64) -> String {
    format_number(value, 2)
}

/// Количество: без дробной части, если она нулевая
pub fn format_qty(value: f64) -> String {
    if value.fract() == 0.0 {
        format_number(value, 0)
    } else {
        format_number(value, 3)
    }
}

/// `2025-01-31` → `31.01.2025`
pub fn format_date(iso_date: &str) -> String {
    let date_part = iso_date.split(['T', ' ']).next().unwrap_or(iso_date);
    let mut parts = date_part.splitn(3, '-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(y), Some(m), Some(d)) if y.len() == 4 => format!("{}.{}.{}", d, m, y),
        _ => iso_date.to_string(),
    }
}

pub fn or_dash(value: &Option<String>) -> String {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "—".to_string(),
    }
}

/// Текущая дата в формате ERP
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Число из поля ввода; запятая допускается как десятичный разделитель
pub fn parse_amount(text: &str) -> Option<f64> {
    let normalized: String = text
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234567.891), "1 234 567,89");
        assert_eq!(format_money(0.0), "0,00");
        assert_eq!(format_money(-1500.5), "-1 500,50");
        assert_eq!(format_money(-0.001), "0,00");
    }

    #[test]
    fn test_format_qty() {
        assert_eq!(format_qty(12.0), "12");
        assert_eq!(format_qty(1.5), "1,500");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2025-01-31"), "31.01.2025");
        assert_eq!(format_date("2025-01-31 10:15:00"), "31.01.2025");
        assert_eq!(format_date("вчера"), "вчера");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 1 234,50 "), Some(1234.5));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
    }
}
