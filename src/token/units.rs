//! Token unit conversions.

use alloy::primitives::U256;

use crate::token::{TokenError, TokenResult};

/// `amount` whole tokens expressed in base units for a token with `decimals`.
pub fn whole_tokens(amount: u64, decimals: u8) -> TokenResult<U256> {
    let scale = U256::from(10u64)
        .checked_pow(U256::from(decimals))
        .ok_or_else(|| TokenError::Overflow(format!("10^{}", decimals)))?;

    U256::from(amount)
        .checked_mul(scale)
        .ok_or_else(|| TokenError::Overflow(format!("{} * 10^{}", amount, decimals)))
}

/// Render base units as a decimal string with `decimals` fractional digits,
/// trailing zeros trimmed.
pub fn format_units(value: U256, decimals: u8) -> String {
    let digits = value.to_string();
    if decimals == 0 {
        return digits;
    }

    let decimals = decimals as usize;
    let padded = if digits.len() <= decimals {
        format!("{}{}", "0".repeat(decimals - digits.len() + 1), digits)
    } else {
        digits
    };

    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_tokens() {
        assert_eq!(
            whole_tokens(1, 18).unwrap(),
            U256::from(1_000_000_000_000_000_000u64)
        );
        assert_eq!(whole_tokens(3, 6).unwrap(), U256::from(3_000_000u64));
        assert_eq!(whole_tokens(7, 0).unwrap(), U256::from(7u64));
    }

    #[test]
    fn test_whole_tokens_overflow() {
        assert!(whole_tokens(1, 255).is_err());
    }

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(U256::from(1_500_000u64), 6), "1.5");
        assert_eq!(format_units(U256::from(2_000_000u64), 6), "2");
        assert_eq!(format_units(U256::from(25u64), 3), "0.025");
        assert_eq!(format_units(U256::ZERO, 18), "0");
        assert_eq!(format_units(U256::from(42u64), 0), "42");
    }
}
