//! Fixed-point formatting of token amounts.

use alloy::primitives::U256;

/// Format a base-unit amount as a decimal string with the given number of
/// decimal places. Trailing fractional zeros are trimmed, but at least one
/// fractional digit is kept: `0` → `"0.0"`, `1_500_000` @ 6 → `"1.5"`.
pub fn format_units(value: U256, decimals: u32) -> String {
    if decimals == 0 {
        return value.to_string();
    }

    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let integer = value / divisor;
    let fraction = value % divisor;

    let digits = fraction.to_string();
    let mut frac = String::with_capacity(decimals as usize);
    for _ in 0..(decimals as usize - digits.len()) {
        frac.push('0');
    }
    frac.push_str(&digits);
    while frac.len() > 1 && frac.ends_with('0') {
        frac.pop();
    }

    format!("{integer}.{frac}")
}
