//! Formatting helpers shared across front ends.

use rust_decimal::Decimal;

/// Format an amount with two decimals and thousands separators (e.g., "1,234.50").
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let text = format!("{:.2}", rounded.abs());
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac}")
}

/// Format a percentage share the way the pie chart labels it (e.g., "42.9%").
pub fn format_share(share: f64) -> String {
    format!("{:.1}%", share)
}
