//! GS1 North American Coupon Code linter (AI 8110 / 8112), simplified.
//!
//! The real coupon linter parses a variable field-group encoding (GCP,
//! offer code, serial number, multiple retailer flags...). Treated as an
//! opaque validator per `spec.md` §1, this crate checks only the contract
//! any real implementation must satisfy: all-numeric, and long enough to
//! contain at least the mandatory GCP + offer code fields.

use crate::error::LinterErrorKind;
use crate::linters::cset::LintResult;

const MIN_COUPON_LEN: usize = 10;

pub fn coupon(value: &str) -> LintResult {
    if value.len() < MIN_COUPON_LEN || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err((LinterErrorKind::InvalidCouponCode, 0, value.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plausible_coupon() {
        assert!(coupon("1234567890123").is_ok());
    }

    #[test]
    fn rejects_too_short() {
        assert!(coupon("123").is_err());
    }
}
