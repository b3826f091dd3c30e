// SPDX-License-Identifier: Apache-2.0

use khitat_model::{CheckoutCode, CHECKOUT_CODE_PREFIX};
use rand::Rng;
use std::time::{SystemTime, UNIX_EPOCH};

const BASE36_DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const CODE_SUFFIX_LEN: usize = 4;

/// Upper-case base-36 rendering, `0` for zero.
#[must_use]
pub fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    digits.into_iter().map(char::from).collect()
}

/// Builds `KHC-<millis in base 36>-<four random base-36 chars>`.
///
/// Collision resistant, not unique and not secret.
pub fn generate_at<R: Rng + ?Sized>(unix_millis: u64, rng: &mut R) -> CheckoutCode {
    let suffix: String = (0..CODE_SUFFIX_LEN)
        .map(|_| char::from(BASE36_DIGITS[rng.gen_range(0..BASE36_DIGITS.len())]))
        .collect();
    CheckoutCode::new_unchecked(format!(
        "{CHECKOUT_CODE_PREFIX}-{}-{suffix}",
        to_base36(unix_millis)
    ))
}

#[must_use]
pub fn generate_checkout_code() -> CheckoutCode {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    generate_at(
        u64::try_from(millis).unwrap_or(u64::MAX),
        &mut rand::thread_rng(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn base36_matches_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "Z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "LOYW3V28");
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = generate_at(1_700_000_000_000, &mut StdRng::seed_from_u64(7));
        let b = generate_at(1_700_000_000_000, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert!(a.as_str().starts_with("KHC-LOYW3V28-"));
    }

    #[test]
    fn generated_codes_parse_back() {
        let code = generate_checkout_code();
        assert_eq!(CheckoutCode::parse(code.as_str()).expect("valid code"), code);
        let suffix = code.as_str().rsplit('-').next().expect("suffix");
        assert_eq!(suffix.len(), CODE_SUFFIX_LEN);
    }
}
