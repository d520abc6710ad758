//! Brazilian-Portuguese number conversion.
//!
//! In pt-BR reports `.` is always a thousands separator and `,` is always the
//! decimal separator ("3.673,62" means 3673.62). Normalization strips the
//! thousands dots first and only then substitutes the decimal comma; doing it
//! in the other order would corrupt grouped values.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Strip currency symbols and spacing, then normalize separators.
fn normalize_br_number(s: &str) -> String {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    cleaned.replace('.', "").replace(',', ".")
}

/// Parse a pt-BR formatted monetary value (e.g. "R$ 3.673,62" or "1.234").
pub fn parse_br_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(&normalize_br_number(s)).ok()
}

/// Parse a pt-BR formatted number as a float (e.g. "0,6" or "32,5").
pub fn parse_br_float(s: &str) -> Option<f64> {
    f64::from_str(&normalize_br_number(s)).ok()
}

/// Parse a pt-BR formatted whole count (e.g. "38" or "1.234").
///
/// A value with a decimal part is not a count and fails.
pub fn parse_br_count(s: &str) -> Option<u32> {
    let normalized = normalize_br_number(s);
    if normalized.contains('.') {
        return None;
    }
    u32::from_str(&normalized).ok()
}

/// Format an amount in pt-BR style (3.673,62).
pub fn format_brl(amount: Decimal) -> String {
    let s = format!("{:.2}", amount);
    let parts: Vec<&str> = s.split('.').collect();

    if parts.len() != 2 {
        return s;
    }

    let integer_part = parts[0];
    let decimal_part = parts[1];

    // Add thousand separators
    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(*c);
    }

    format!("{},{}", formatted, decimal_part)
}
