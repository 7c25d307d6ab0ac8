//! Display helpers for amounts and dates

use bigdecimal::{BigDecimal, FromPrimitive, RoundingMode};
use chrono::{DateTime, NaiveDate, NaiveDateTime, ParseError};

pub const DEFAULT_CURRENCY: &str = "USD";

/// Display symbol for a currency code, if one is known
pub fn currency_symbol(code: &str) -> Option<&'static str> {
    let symbol = match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "INR" => "₹",
        "JPY" => "¥",
        "CAD" => "C$",
        "AUD" => "A$",
        "CNY" => "¥",
        "CHF" => "CHF",
        "SGD" => "S$",
        _ => return None,
    };
    Some(symbol)
}

/// Two decimals, ties rounded away from zero. Zero never carries a sign.
fn two_decimals(amount: f64) -> String {
    // from_f64 is exact, so a tie is a real tie in the binary value
    match BigDecimal::from_f64(amount) {
        Some(value) => value.with_scale_round(2, RoundingMode::HalfUp).to_string(),
        None => amount.to_string(),
    }
}

/// Render an amount with its currency symbol and two decimals.
/// Unknown codes are used verbatim as the prefix.
pub fn format_currency(amount: f64, currency: &str) -> String {
    let symbol = currency_symbol(currency).unwrap_or(currency);
    format!("{}{}", symbol, two_decimals(amount))
}

/// Render a date as e.g. "January 5, 2024".
///
/// Accepts RFC 3339 timestamps, naive ISO timestamps and plain dates.
pub fn format_date(input: &str) -> Result<String, ParseError> {
    let input = input.trim();
    let date = DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(input, "%Y-%m-%d"))?;
    Ok(date.format("%B %-d, %Y").to_string())
}
