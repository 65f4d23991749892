/// Currency symbol used for every displayed amount.
pub const CURRENCY_SYMBOL: &str = "₦";

/// Format an amount as naira with thousands separators, e.g. `₦12,500`.
pub fn format_naira(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}", CURRENCY_SYMBOL, grouped)
}
