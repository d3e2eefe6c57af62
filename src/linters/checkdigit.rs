//! Modulo-10 weighted check digit, e.g. for GTINs and other GS1 keys.
//!
//! Grounded on `gs1_validateParity` in `ai.c`, which alternates weights 3/1
//! (or 1/3, depending on parity of length) across all but the final digit
//! and compares the computed parity to the last digit.

use crate::error::LinterErrorKind;
use crate::linters::cset::LintResult;

pub fn check_digit(value: &str) -> LintResult {
    let digits: Vec<u32> = value.chars().map(|c| c.to_digit(10).unwrap_or(0)).collect();
    if digits.is_empty() {
        return Ok(());
    }

    let weight_first = if digits.len() % 2 == 0 { 3 } else { 1 };
    let mut weight = weight_first;
    let mut sum = 0u32;
    for &d in &digits[..digits.len() - 1] {
        sum += weight * d;
        weight = 4 - weight;
    }
    let expected = (10 - sum % 10) % 10;
    let actual = digits[digits.len() - 1];

    if expected != actual {
        Err((LinterErrorKind::IncorrectCheckDigit, 0, value.len() - 1))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_gtin14_passes() {
        assert!(check_digit("00012345678905").is_ok());
    }

    #[test]
    fn bad_check_digit_fails() {
        let err = check_digit("00012345678901").unwrap_err();
        assert_eq!(err.0, LinterErrorKind::IncorrectCheckDigit);
    }
}
