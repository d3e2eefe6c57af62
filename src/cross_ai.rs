//! Cross-AI Validator (`spec.md` §2.8, §4.6).
//!
//! Grounded on `ai.c::validateAImutex` / `validateAIrequisites` /
//! `validateAIrepeats` and `gs1_loadValidationTable`. Each pass tokenizes
//! `entry.attributes` on whitespace and inspects the other AIs already
//! extracted.

use crate::error::{EngineError, ErrorKind};
use crate::extracted::{AiValueKind, ExtractedAi};

/// Which built-in cross-AI pass a `ValidationEntry` wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    MutexAis,
    RequisiteAis,
    RepeatedAis,
}

/// One row of the `validation_table` (`spec.md` §3/§4.6): `(name, locked,
/// enabled, function)`. `MutexAis` and `RepeatedAis` are locked (cannot be
/// disabled); `RequisiteAis` is not, matching the C table's
/// `(true,true)`/`(false,true)`/`(true,true)` `(locked, default-enabled)`
/// triples.
#[derive(Debug, Clone)]
pub struct ValidationEntry {
    pub kind: Validation,
    pub locked: bool,
    pub enabled: bool,
}

impl ValidationEntry {
    pub fn name(&self) -> &'static str {
        match self.kind {
            Validation::MutexAis => "MutexAIs",
            Validation::RequisiteAis => "RequisiteAIs",
            Validation::RepeatedAis => "RepeatedAIs",
        }
    }
}

/// The default validation table, matching `gs1_loadValidationTable`'s
/// execution order: mutex, then requisites, then repeats.
pub fn default_validation_table() -> Vec<ValidationEntry> {
    vec![
        ValidationEntry {
            kind: Validation::MutexAis,
            locked: true,
            enabled: true,
        },
        ValidationEntry {
            kind: Validation::RequisiteAis,
            locked: false,
            enabled: true,
        },
        ValidationEntry {
            kind: Validation::RepeatedAis,
            locked: true,
            enabled: true,
        },
    ]
}

/// Runs every enabled pass in table order; the first failure short-circuits.
pub fn validate_ais(ai_data: &[ExtractedAi], data_str: &str, table: &[ValidationEntry]) -> Result<(), EngineError> {
    for entry in table {
        if !entry.enabled {
            continue;
        }
        match entry.kind {
            Validation::MutexAis => validate_mutex(ai_data, data_str)?,
            Validation::RequisiteAis => validate_requisites(ai_data, data_str)?,
            Validation::RepeatedAis => validate_repeats(ai_data, data_str)?,
        }
    }
    Ok(())
}

/// A digit-or-`n` pattern matches a same-length AI when every non-`n`
/// character is identical (`spec.md` §4.6, §6).
fn pattern_matches(pattern: &str, ai: &str) -> bool {
    if pattern.len() != ai.len() {
        return false;
    }
    pattern
        .bytes()
        .zip(ai.bytes())
        .all(|(p, a)| p == b'n' || p == a)
}

/// Finds an AI in `ai_data` (other than `ignore_ai`) whose digits match one
/// of `pattern`'s comma-separated tokens... actually `pattern` here is a
/// single token; callers split on `,` themselves. Mirrors `aiExists`.
fn ai_exists(ai_data: &[ExtractedAi], data_str: &str, pattern: &str, ignore_ai: &str) -> Option<String> {
    for candidate in ai_data {
        if candidate.kind != AiValueKind::AiValue {
            continue;
        }
        let ai = candidate.ai(data_str);
        if ai == ignore_ai {
            continue;
        }
        if pattern_matches(pattern, ai) {
            return Some(ai.to_string());
        }
    }
    None
}

fn attribute_tokens(attributes: &str, prefix: &str) -> impl Iterator<Item = &str> {
    attributes
        .split_whitespace()
        .filter_map(move |tok| tok.strip_prefix(prefix))
}

fn validate_mutex(ai_data: &[ExtractedAi], data_str: &str) -> Result<(), EngineError> {
    for entry in ai_data {
        if entry.kind != AiValueKind::AiValue {
            continue;
        }
        let ai = entry.ai(data_str);
        for token in attribute_tokens(&entry.ai_entry.attributes, "ex=") {
            for pattern in token.split(',') {
                if let Some(matched) = ai_exists(ai_data, data_str, pattern, ai) {
                    return Err(EngineError::new(
                        ErrorKind::MutexViolation(ai.to_string(), matched.clone()),
                        format!("It is invalid to pair AI ({ai}) with AI ({matched})"),
                    ));
                }
            }
        }
    }
    Ok(())
}

fn validate_requisites(ai_data: &[ExtractedAi], data_str: &str) -> Result<(), EngineError> {
    for entry in ai_data {
        if entry.kind != AiValueKind::AiValue {
            continue;
        }
        let ai = entry.ai(data_str);
        for token in attribute_tokens(&entry.ai_entry.attributes, "req=") {
            let satisfied = token
                .split(',')
                .any(|pattern| ai_exists(ai_data, data_str, pattern, ai).is_some());
            if !satisfied {
                return Err(EngineError::new(
                    ErrorKind::RequisitesUnsatisfied(ai.to_string(), token.to_string()),
                    format!("Required AIs for AI ({ai}) are not satisfied: {token}"),
                ));
            }
        }
    }
    Ok(())
}

fn validate_repeats(ai_data: &[ExtractedAi], data_str: &str) -> Result<(), EngineError> {
    for (i, a) in ai_data.iter().enumerate() {
        if a.kind != AiValueKind::AiValue {
            continue;
        }
        for b in &ai_data[i + 1..] {
            if b.kind != AiValueKind::AiValue {
                continue;
            }
            if a.ai(data_str) == b.ai(data_str) && a.value(data_str) != b.value(data_str) {
                return Err(EngineError::new(
                    ErrorKind::RepeatMismatch(a.ai(data_str).to_string()),
                    format!(
                        "Multiple instances of AI ({}) have different values",
                        a.ai(data_str)
                    ),
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai_table::AiTable;
    use crate::unbracketed::process_ai_data;

    fn extract(data_str: &str) -> Vec<ExtractedAi> {
        let table = AiTable::embedded();
        let lbp = table.compute_length_by_prefix();
        process_ai_data(&table, &lbp, data_str, true, false).unwrap()
    }

    #[test]
    fn mutex_pattern_with_wildcard_triggers_on_second_ai() {
        let data_str = "^3940123439419999";
        // (3940)1234(3941)9999 -- both match the self-referencing "394n"
        // pattern; each entry excludes only itself, so the second triggers.
        let ai_data = extract(data_str);
        let table = default_validation_table();
        let err = validate_ais(&ai_data, data_str, &table).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::MutexViolation(..)));
    }

    #[test]
    fn requisite_not_satisfied_fails() {
        // (21)ABC123 alone: AI 21 requires one of {01, 8006}.
        let data_str = "^21ABC123";
        let ai_data = extract(data_str);
        let table = default_validation_table();
        let err = validate_ais(&ai_data, data_str, &table).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::RequisitesUnsatisfied(..)));
    }

    #[test]
    fn requisite_satisfied_by_companion_ai_passes() {
        let data_str = "^0112345678901231211ABC123";
        let ai_data = extract(data_str);
        let table = default_validation_table();
        assert!(validate_ais(&ai_data, data_str, &table).is_ok());
    }

    #[test]
    fn repeated_ai_with_identical_value_is_allowed() {
        let data_str = "^10ABC^10ABC";
        let ai_data = extract(data_str);
        let table = default_validation_table();
        assert!(validate_ais(&ai_data, data_str, &table).is_ok());
    }

    #[test]
    fn repeated_ai_with_differing_value_fails() {
        let data_str = "^10ABC^10XYZ";
        let ai_data = extract(data_str);
        let table = default_validation_table();
        let err = validate_ais(&ai_data, data_str, &table).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::RepeatMismatch(..)));
    }

    #[test]
    fn locked_entries_cannot_be_disabled_by_convention() {
        let table = default_validation_table();
        assert!(table.iter().find(|e| e.kind == Validation::MutexAis).unwrap().locked);
        assert!(table.iter().find(|e| e.kind == Validation::RepeatedAis).unwrap().locked);
        assert!(!table.iter().find(|e| e.kind == Validation::RequisiteAis).unwrap().locked);
    }
}
