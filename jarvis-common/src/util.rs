//! Utility functions for Jarvis services.

/// Round to `decimals` places, half away from zero.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Format a dollar amount with thousands separators and no cents, e.g. `-$1,234,567`.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "n/a".to_string();
    }

    let rounded = amount.abs().round() as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0.0 && rounded > 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Format a dollar amount compactly, e.g. `$1.2M`, `$350K`.
pub fn format_currency_compact(amount: f64) -> String {
    const THOUSAND: f64 = 1_000.0;
    const MILLION: f64 = 1_000_000.0;
    const BILLION: f64 = 1_000_000_000.0;

    if !amount.is_finite() {
        return "n/a".to_string();
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    let abs = amount.abs();

    if abs >= BILLION {
        format!("{sign}${:.1}B", abs / BILLION)
    } else if abs >= MILLION {
        format!("{sign}${:.1}M", abs / MILLION)
    } else if abs >= THOUSAND {
        format!("{sign}${:.0}K", abs / THOUSAND)
    } else {
        format!("{sign}${abs:.0}")
    }
}
