//! Small shared utilities

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Format an amount in minor units as whole currency units, e.g. `9000` → `"90 ₽"`.
///
/// Sub-unit remainders are dropped; catalog prices are whole-ruble in
/// practice and notification text favors readability over precision.
pub fn format_amount(minor: i64) -> String {
    format!("{} ₽", minor / 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_amount_drops_minor_remainder() {
        assert_eq!(format_amount(9000), "90 ₽");
        assert_eq!(format_amount(4550), "45 ₽");
        assert_eq!(format_amount(0), "0 ₽");
    }
}
