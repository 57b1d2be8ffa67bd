/// Format an amount as euros with Dutch separators: €1.234,56
pub fn money(val: f64) -> String {
    let negative = val < 0.0;
    let abs = val.abs();
    let cents = format!("{:.2}", abs);
    let parts: Vec<&str> = cents.split('.').collect();
    let int_part = parts[0];
    let dec_part = parts[1];

    let mut grouped = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    if negative {
        format!("-\u{20ac}{grouped},{dec_part}")
    } else {
        format!("\u{20ac}{grouped},{dec_part}")
    }
}

/// Format a signed view of a stored transaction: outgoing amounts render
/// negative even though the store keeps them non-negative.
pub fn signed_money(amount: f64, incoming: bool) -> String {
    if incoming {
        money(amount)
    } else {
        money(-amount)
    }
}
