//! Display formatting for amounts and dates.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Formats a dollar amount with grouped thousands and no decimals,
/// e.g. `$1,234,567`. Fractional cents are truncated for display.
pub fn currency(amount: Decimal) -> String {
    let whole = amount.trunc();
    let negative = whole.is_sign_negative();
    let digits = whole.abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Formats a parsed date as `Mon D, YYYY` (e.g. `Jul 14, 2025`).
pub fn human_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Formats a raw trade-date string, falling back to the raw text when it
/// is not a valid ISO date.
pub fn trade_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => human_date(date),
        Err(_) => raw.to_string(),
    }
}
