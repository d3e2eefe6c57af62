//! Character-set linters.
//!
//! Each of these is the linter that is always run first for a component,
//! chosen by `Component::cset` rather than appearing in `Component::linters`.
//! Grounded on `gs1_lint_csetnumeric`/`gs1_lint_cset82`/`gs1_lint_cset39`/
//! `gs1_lint_cset64` referenced (but not defined, as they are an out-of-scope
//! collaborator) in `ai.c::validate_ai_val`.

use crate::error::LinterErrorKind;

pub type LintResult = Result<(), (LinterErrorKind, usize, usize)>;

/// GS1 AI value character set X: "CSET 82", the 82 characters permitted in
/// human-readable AI values (a subset of printable ASCII).
const CSET_82: &str = "!\"%&'()*+,-./0123456789:;<=>?ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

/// CSET 39: the Code 39 symbology alphabet used by some AIs (digits, upper
/// case letters, space, and a handful of symbols).
const CSET_39: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ -.$/+%";

/// CSET 64: the standard base64 alphabet, used by AIs whose value is
/// base64-encoded binary data.
const CSET_64: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

fn first_invalid(value: &str, alphabet: &str) -> Option<usize> {
    value.bytes().position(|b| !alphabet.as_bytes().contains(&b))
}

pub fn cset_numeric(value: &str) -> LintResult {
    match value.bytes().position(|b| !b.is_ascii_digit()) {
        Some(pos) => Err((LinterErrorKind::NotNumeric, pos, value.len() - pos)),
        None => Ok(()),
    }
}

pub fn cset_82(value: &str) -> LintResult {
    match first_invalid(value, CSET_82) {
        Some(pos) => Err((LinterErrorKind::InvalidCharacter, pos, value.len() - pos)),
        None => Ok(()),
    }
}

pub fn cset_39(value: &str) -> LintResult {
    match first_invalid(value, CSET_39) {
        Some(pos) => Err((LinterErrorKind::InvalidCharacter, pos, value.len() - pos)),
        None => Ok(()),
    }
}

pub fn cset_64(value: &str) -> LintResult {
    match first_invalid(value, CSET_64) {
        Some(pos) => Err((LinterErrorKind::InvalidCharacter, pos, value.len() - pos)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_accepts_digits_only() {
        assert!(cset_numeric("12345").is_ok());
        assert_eq!(
            cset_numeric("123a5").unwrap_err().0,
            LinterErrorKind::NotNumeric
        );
    }

    #[test]
    fn cset82_rejects_backslash() {
        assert!(cset_82("ABC123abc").is_ok());
        assert!(cset_82("AB\\C").is_err());
    }

    #[test]
    fn cset64_accepts_padding_free_base64() {
        assert!(cset_64("SGVsbG8").is_ok());
        assert!(cset_64("SGVsbG8=").is_err());
    }
}
