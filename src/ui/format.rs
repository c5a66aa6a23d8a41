//! Number formatting shared by the terminal output and the HTML dashboard

use crate::core::constants::display;

/// `1234567` -> `1,234,567`
pub fn format_thousands(value: u64) -> String {
    group_digits(&value.to_string())
}

/// Insert a comma every three digits from the right
fn group_digits(digits: &str) -> String {
    let len = digits.chars().count();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Fixed decimals with grouped thousands, e.g. `1,234.50`
pub fn format_decimal(value: f64, decimals: usize) -> String {
    let rendered = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match rendered.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (rendered.as_str(), None),
    };

    let is_zero = rendered.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    let grouped = group_digits(integer);

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Whole currency amount, e.g. `1,234 €`
pub fn format_currency(value: f64) -> String {
    format!("{} {}", format_decimal(value, 0), display::CURRENCY)
}

/// Currency amount with cents, e.g. `12.34 €`
pub fn format_currency_cents(value: f64) -> String {
    format!("{} {}", format_decimal(value, 2), display::CURRENCY)
}

/// Percentage with one decimal, e.g. `95.1%`
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}
