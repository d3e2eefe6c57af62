//! Linter Registry (`spec.md` §2.3, §4.3).
//!
//! A component's character set picks the cset linter that always runs
//! first; `Component::linters` names zero or more additional linters that
//! run afterwards, in order. Named rather than function-pointer dispatch so
//! the registry can be printed/logged and round-tripped through the AI
//! table's (de)serialization.

pub mod checkdigit;
pub mod coupon;
pub mod cset;
pub mod date;
pub mod iban;
pub mod iso3166;
pub mod latlong;

use serde::{Deserialize, Serialize};

use crate::error::LinterErrorKind;
pub use cset::LintResult;

/// Character set identifier for a component, `spec.md` §3 `cset` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharSet {
    #[serde(rename = "N")]
    Numeric,
    #[serde(rename = "X")]
    Cset82,
    #[serde(rename = "Y")]
    Cset39,
    #[serde(rename = "Z")]
    Cset64,
}

impl CharSet {
    pub fn linter(self) -> fn(&str) -> LintResult {
        match self {
            CharSet::Numeric => cset::cset_numeric,
            CharSet::Cset82 => cset::cset_82,
            CharSet::Cset39 => cset::cset_39,
            CharSet::Cset64 => cset::cset_64,
        }
    }
}

/// Named additional linter, run after the cset linter for a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinterName {
    CheckDigit,
    Yymmdd,
    Iso3166,
    Iban,
    Latitude,
    Longitude,
    Coupon,
    Pieces,
}

impl LinterName {
    pub fn run(self, value: &str) -> LintResult {
        match self {
            LinterName::CheckDigit => checkdigit::check_digit(value),
            LinterName::Yymmdd => date::yymmdd(value),
            LinterName::Iso3166 => iso3166::iso3166(value),
            LinterName::Iban => iban::iban(value),
            LinterName::Latitude => latlong::latitude(value),
            LinterName::Longitude => latlong::longitude(value),
            LinterName::Coupon => coupon::coupon(value),
            LinterName::Pieces => pieces(value),
        }
    }
}

/// Validates the `NNNN` "piece x of y" shape used by AI (8011)/(8017)-style
/// component values: the piece number must not exceed the total count.
fn pieces(value: &str) -> LintResult {
    if value.len() != 4 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err((LinterErrorKind::NonConformantLength, 0, value.len()));
    }
    let piece: u32 = value[0..2].parse().unwrap();
    let total: u32 = value[2..4].parse().unwrap();
    if total == 0 || piece > total {
        Err((LinterErrorKind::NonConformantLength, 0, value.len()))
    } else {
        Ok(())
    }
}
