use alloy_primitives::U256;

/// Token quantity scaled by [`AMOUNT_DECIMALS`].
pub type Amount = U256;

/// Epoch numbers and epoch timestamps come back from the DAO as `uint256`.
pub type EpochId = U256;

pub const AMOUNT_DECIMALS: usize = 18;

/// Render an 18-decimal amount as fixed point, e.g. `1500000000000000000` -> `1.5`.
///
/// Trailing fractional zeros are trimmed but one fractional digit is always
/// kept, so whole amounts print as `1.0` and zero prints as `0.0`.
pub fn format_amount(amount: Amount) -> String {
    let digits = amount.to_string();

    let (whole, fraction) = if digits.len() > AMOUNT_DECIMALS {
        let split = digits.len() - AMOUNT_DECIMALS;
        (digits[..split].to_string(), digits[split..].to_string())
    } else {
        ("0".to_string(), format!("{digits:0>width$}", width = AMOUNT_DECIMALS))
    };

    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{fraction}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ether(whole: u64) -> Amount {
        U256::from(whole) * U256::from(10u64).pow(U256::from(AMOUNT_DECIMALS))
    }

    #[test]
    fn zero_keeps_one_fractional_digit() {
        assert_eq!(format_amount(U256::ZERO), "0.0");
    }

    #[test]
    fn whole_amounts_render_with_trailing_zero() {
        assert_eq!(format_amount(ether(1)), "1.0");
        assert_eq!(format_amount(ether(1_234_567)), "1234567.0");
    }

    #[test]
    fn fractional_amounts_trim_trailing_zeros() {
        let one_and_a_half = ether(1) + U256::from(500_000_000_000_000_000u64);
        assert_eq!(format_amount(one_and_a_half), "1.5");
    }

    #[test]
    fn sub_unit_amounts_are_left_padded() {
        assert_eq!(format_amount(U256::from(1u64)), "0.000000000000000001");
        assert_eq!(
            format_amount(U256::from(120_000_000_000_000_000u64)),
            "0.12"
        );
    }

    #[test]
    fn max_amount_does_not_panic() {
        let rendered = format_amount(U256::MAX);
        assert!(rendered.starts_with("115792089237316195423570985008687907853269984665640564039457"));
        assert!(rendered.contains('.'));
    }
}
