//! Component Validator (`spec.md` §2.5, §4.3).
//!
//! Grounded on `ai.c::validate_ai_val` (per-component linter dispatch and
//! markup construction) and `ai.c::gs1_aiValLengthContentCheck` (the
//! pre-linter length/content gate).

use crate::ai_table::AiEntry;
use crate::error::{EngineError, ErrorKind};

/// Rejects a value that is obviously too short, too long, or contains the
/// separator character, before any component linter runs — so a truncated
/// value reports "too short" rather than a confusing downstream checksum
/// failure.
pub fn ai_val_length_content_check(ai: &str, entry: &AiEntry, value: &str) -> Result<(), EngineError> {
    if value.len() < entry.min_length() {
        return Err(EngineError::new(
            ErrorKind::AiValueTooShort,
            format!("AI ({ai}) value is too short"),
        ));
    }
    if value.len() > entry.max_length() {
        return Err(EngineError::new(
            ErrorKind::AiValueTooLong,
            format!("AI ({ai}) value is too long"),
        ));
    }
    if value.contains('^') {
        return Err(EngineError::new(
            ErrorKind::IllegalSeparatorInValue,
            format!("AI ({ai}) contains illegal ^ character"),
        ));
    }
    Ok(())
}

/// Walks `entry`'s components left-to-right over `value`, running the cset
/// linter then each additional linter per component. Returns the number of
/// bytes consumed (which may be less than `value.len()` when the entry's
/// value is itself embedded in a longer unbracketed buffer).
pub fn validate_ai_value(ai: &str, entry: &AiEntry, value: &str) -> Result<usize, EngineError> {
    if value.is_empty() {
        return Err(EngineError::new(
            ErrorKind::AiValueTooShort,
            format!("AI ({ai}) data is empty"),
        ));
    }

    let bytes = value.as_bytes();
    let mut consumed = 0usize;

    for component in &entry.components {
        let remaining = bytes.len() - consumed;
        let complen = remaining.min(component.max as usize);
        let compval = &value[consumed..consumed + complen];

        if component.optional && complen == 0 {
            continue;
        }

        if complen < component.min as usize {
            return Err(EngineError::new(
                ErrorKind::AiValueTooShort,
                format!("AI ({ai}) data is too short"),
            ));
        }

        if let Err((kind, pos, len)) = (component.cset.linter())(compval) {
            return Err(lint_failure(ai, value, consumed, kind, pos, len));
        }
        for linter in &component.linters {
            if let Err((kind, pos, len)) = linter.run(compval) {
                return Err(lint_failure(ai, value, consumed, kind, pos, len));
            }
        }

        consumed += complen;
    }

    Ok(consumed)
}

fn lint_failure(
    ai: &str,
    value: &str,
    component_start: usize,
    kind: crate::error::LinterErrorKind,
    pos: usize,
    len: usize,
) -> EngineError {
    let errpos = component_start + pos;
    let prefix = &value[..errpos];
    let region = &value[errpos..errpos + len];
    let suffix = &value[errpos + len..];
    let markup = format!("({ai}){prefix}|{region}|{suffix}");
    EngineError::new(
        ErrorKind::LinterFailure(kind, errpos, len),
        format!("AI ({ai}): {kind}"),
    )
    .with_markup(markup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai_table::AiTable;

    fn lookup<'a>(table: &'a AiTable, ai: &str) -> &'a AiEntry {
        table.entries().iter().find(|e| e.ai == ai).unwrap()
    }

    #[test]
    fn valid_gtin_passes() {
        let table = AiTable::embedded();
        let entry = lookup(&table, "01");
        let consumed = validate_ai_value("01", entry, "12345678901231").unwrap();
        assert_eq!(consumed, 14);
    }

    #[test]
    fn bad_check_digit_reports_markup() {
        let table = AiTable::embedded();
        let entry = lookup(&table, "01");
        let err = validate_ai_value("01", entry, "95012345678902").unwrap_err();
        let markup = err.markup.expect("checksum failure must carry markup");
        assert_eq!(markup, "(01)|9501234567890|2");
    }

    #[test]
    fn too_short_value_is_rejected_before_linting() {
        let table = AiTable::embedded();
        let entry = lookup(&table, "01");
        assert!(validate_ai_value("01", entry, "123").is_err());
    }

    #[test]
    fn length_content_gate_rejects_separator() {
        let table = AiTable::embedded();
        let entry = lookup(&table, "10");
        assert!(ai_val_length_content_check("10", entry, "AB^CD").is_err());
    }

    #[test]
    fn length_content_gate_rejects_too_long() {
        let table = AiTable::embedded();
        let entry = lookup(&table, "242");
        assert!(ai_val_length_content_check("242", entry, "1234567").is_err());
    }
}
