use num_bigint::BigUint;
use thiserror::Error;

/// Errors surfaced by the substrate. All of them are deterministic in their
/// inputs: retrying with the same operands can never succeed, so callers
/// must change operands (or reject the key) instead of looping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("no modular inverse: gcd({value}, {modulus}) != 1")]
    NoInverse { value: BigUint, modulus: BigUint },

    #[error("matrix not invertible: gcd(det = {determinant}, modulus = {modulus}) != 1")]
    SingularMatrix { determinant: u64, modulus: u64 },

    #[error("digit count must be >= 1, got {digit_count}")]
    InvalidDigitCount { digit_count: u32 },

    #[error("prime search exhausted after {attempts} candidates ({digit_count} digits)")]
    SearchExhausted { digit_count: u32, attempts: u64 },

    #[error("matrix dimensions incompatible: {left_rows}x{left_cols} * {right_rows}x{right_cols}")]
    DimensionMismatch {
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },

    #[error("matrices use different moduli: {left} vs {right}")]
    ModulusMismatch { left: u64, right: u64 },

    #[error("symbol {symbol:?} is not in the 27-letter alphabet")]
    UnsupportedSymbol { symbol: char },
}
