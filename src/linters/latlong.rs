//! Latitude/longitude component linters for AI (8019)/(427n)-style geographic
//! coordinate data, encoded as a fixed-width number of digits representing a
//! value scaled into the valid range.

use crate::error::LinterErrorKind;
use crate::linters::cset::LintResult;

const LAT_MAX: u64 = 180_000_000; // encodes -90..90 over a 10-digit field
const LON_MAX: u64 = 360_000_000; // encodes -180..180 over a 10-digit field

pub fn latitude(value: &str) -> LintResult {
    match value.parse::<u64>() {
        Ok(v) if v <= LAT_MAX => Ok(()),
        _ => Err((LinterErrorKind::InvalidLatitude, 0, value.len())),
    }
}

pub fn longitude(value: &str) -> LintResult {
    match value.parse::<u64>() {
        Ok(v) if v <= LON_MAX => Ok(()),
        _ => Err((LinterErrorKind::InvalidLongitude, 0, value.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_midpoint() {
        assert!(latitude("0090000000").is_ok());
        assert!(longitude("0180000000").is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(latitude("9999999999").is_err());
    }
}
