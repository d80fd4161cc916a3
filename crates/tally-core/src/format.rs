//! Currency formatting for user-facing messages

/// Format an amount with two decimals and comma thousands separators,
/// prefixed by `symbol` (e.g. `₹12,150.00`)
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };

    format!("{}{}{}.{}", symbol, sign, group_thousands(whole), fraction)
}

/// Insert a comma every three digits from the right
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
