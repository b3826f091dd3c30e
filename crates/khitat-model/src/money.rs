// SPDX-License-Identifier: Apache-2.0

pub const DEFAULT_CURRENCY: &str = "USD";

/// Increment used by the cart's +/- amount controls.
pub const AMOUNT_STEP: u64 = 50;

/// Decreasing is refused at or below this amount.
pub const MIN_STEPPED_AMOUNT: u64 = 50;

/// AUD to USD at 0.65, rounded up to the next whole dollar.
#[must_use]
pub fn aud_to_usd(aud: u64) -> u64 {
    aud.saturating_mul(65).saturating_add(99) / 100
}

#[must_use]
pub fn stepped_up(amount: u64, step: u64) -> u64 {
    amount.saturating_add(step)
}

/// `None` when the decrease control would be disabled or the result would not be positive.
#[must_use]
pub fn stepped_down(amount: u64, step: u64) -> Option<u64> {
    if amount <= MIN_STEPPED_AMOUNT {
        return None;
    }
    match amount.saturating_sub(step) {
        0 => None,
        next => Some(next),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aud_conversion_rounds_up() {
        assert_eq!(aud_to_usd(0), 0);
        assert_eq!(aud_to_usd(100), 65);
        assert_eq!(aud_to_usd(1), 1);
        assert_eq!(aud_to_usd(10), 7);
    }

    #[test]
    fn stepper_refuses_to_drop_below_minimum() {
        assert_eq!(stepped_down(50, AMOUNT_STEP), None);
        assert_eq!(stepped_down(40, AMOUNT_STEP), None);
        assert_eq!(stepped_down(100, AMOUNT_STEP), Some(50));
        assert_eq!(stepped_down(60, 100), None);
        assert_eq!(stepped_up(50, AMOUNT_STEP), 100);
    }
}
