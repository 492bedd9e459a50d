/// Форматирует число с разделителями тысяч (точками)
pub fn format_number(n: usize) -> String {
    group_digits(&n.to_string(), '.')
}

/// Денежная сумма для логов: "1.234.567,89"
pub fn format_amount(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let int_part = group_digits(&(cents / 100).to_string(), '.');
    format!(
        "{}{},{:02}",
        if negative { "-" } else { "" },
        int_part,
        cents % 100
    )
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut result = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(separator);
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1.000");
        assert_eq!(format_number(1234567), "1.234.567");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0,00");
        assert_eq!(format_amount(1234567.891), "1.234.567,89");
        assert_eq!(format_amount(-15.5), "-15,50");
    }
}
