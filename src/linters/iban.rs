//! IBAN (ISO 13616) mod-97 check, used by AI (8007) Component/Part Number...
//! no — by the IBAN component of payment-reference AIs.

use crate::error::LinterErrorKind;
use crate::linters::cset::LintResult;

pub fn iban(value: &str) -> LintResult {
    if value.len() < 5 || value.len() > 34 {
        return Err((LinterErrorKind::InvalidIban, 0, value.len()));
    }
    let bytes = value.as_bytes();
    if !bytes[0].is_ascii_uppercase() || !bytes[1].is_ascii_uppercase() {
        return Err((LinterErrorKind::InvalidIban, 0, 2));
    }

    // Move the first four characters to the end, then map letters to
    // two-digit numbers (A=10..Z=35) before reducing mod 97.
    let rearranged: String = value[4..].chars().chain(value[0..4].chars()).collect();

    let mut remainder: u64 = 0;
    for c in rearranged.chars() {
        let digit_val = if c.is_ascii_digit() {
            c.to_digit(10).unwrap() as u64
        } else if c.is_ascii_uppercase() {
            (c as u64) - ('A' as u64) + 10
        } else {
            return Err((LinterErrorKind::InvalidIban, 0, value.len()));
        };

        remainder = if digit_val >= 10 {
            (remainder * 100 + digit_val) % 97
        } else {
            (remainder * 10 + digit_val) % 97
        };
    }

    if remainder == 1 {
        Ok(())
    } else {
        Err((LinterErrorKind::InvalidIban, 0, value.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_iban() {
        assert!(iban("GB82WEST12345698765432").is_ok());
    }

    #[test]
    fn rejects_bad_checksum() {
        assert!(iban("GB82WEST12345698765431").is_err());
    }
}
