//! `YYMMDD` date component linter, used by AIs such as (11) Production Date,
//! (17) Expiration Date, (7003) Expiration Date and Time, etc.
//!
//! A day-of-month of `00` is accepted where the specific day within the
//! month is not meaningful (e.g. a defined end-of-month marker), matching
//! the tolerance real GS1 date linters apply.

use crate::error::LinterErrorKind;
use crate::linters::cset::LintResult;

const DAYS_IN_MONTH: [u8; 13] = [0, 31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

pub fn yymmdd(value: &str) -> LintResult {
    if value.len() != 6 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err((LinterErrorKind::InvalidDate, 0, value.len()));
    }

    let mm: u32 = value[2..4].parse().unwrap();
    let dd: u32 = value[4..6].parse().unwrap();

    if !(1..=12).contains(&mm) {
        return Err((LinterErrorKind::InvalidDate, 2, 2));
    }
    if dd != 0 && dd > DAYS_IN_MONTH[mm as usize] as u32 {
        return Err((LinterErrorKind::InvalidDate, 4, 2));
    }

    Ok(())
}
