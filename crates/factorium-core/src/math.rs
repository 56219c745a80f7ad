//! Exact factorial.

use num_bigint::BigUint;

/// `n!` in arbitrary precision. `0! == 1`.
pub fn factorial(n: u64) -> BigUint {
    (2..=n).fold(BigUint::from(1u8), |acc, k| acc * k)
}
