//! ISO 3166-1 numeric country code linter.
//!
//! The engine treats this as an opaque, pluggable validator identified by
//! name (`spec.md` §1 Out of scope); this crate ships a small, representative
//! table rather than the full ISO 3166-1 numeric registry so the contract
//! (three digits, known code) is exercised without vendoring the registry.

use crate::error::LinterErrorKind;
use crate::linters::cset::LintResult;

const KNOWN_NUMERIC_CODES: &[&str] = &[
    "004", "008", "012", "036", "040", "044", "050", "056", "076", "124", "156", "170", "276",
    "344", "356", "372", "392", "410", "484", "528", "554", "578", "608", "616", "643", "702",
    "724", "752", "756", "784", "826", "840", "999",
];

pub fn iso3166(value: &str) -> LintResult {
    if value.len() != 3 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err((LinterErrorKind::InvalidIsoCountryCode, 0, value.len()));
    }
    if !KNOWN_NUMERIC_CODES.contains(&value) {
        return Err((LinterErrorKind::InvalidIsoCountryCode, 0, 3));
    }
    Ok(())
}
