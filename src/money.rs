//! Monetary amounts are stored as integer cents and only converted to a
//! decimal representation at the API boundary.

/// Convert stored cents to the decimal amount exposed over the API.
pub fn cents_to_decimal(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Convert a client-supplied decimal amount to cents, rounding to the
/// nearest cent so values like `19.999` do not truncate to `1999`.
pub fn decimal_to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_cents_to_decimal() {
        assert_eq!(cents_to_decimal(1999), 19.99);
        assert_eq!(cents_to_decimal(0), 0.0);
        assert_eq!(cents_to_decimal(100), 1.0);
    }

    #[test]
    fn converts_decimal_to_cents() {
        assert_eq!(decimal_to_cents(19.99), 1999);
        assert_eq!(decimal_to_cents(10.0), 1000);
        assert_eq!(decimal_to_cents(0.1), 10);
    }

    #[test]
    fn rounds_instead_of_truncating() {
        assert_eq!(decimal_to_cents(19.999), 2000);
        assert_eq!(decimal_to_cents(0.005), 1);
        // 29.99 is not exactly representable; rounding keeps it stable.
        assert_eq!(decimal_to_cents(29.99), 2999);
    }

    #[test]
    fn round_trips_typical_prices() {
        for cents in [1, 99, 100, 1999, 123_456_789] {
            assert_eq!(decimal_to_cents(cents_to_decimal(cents)), cents);
        }
    }
}
