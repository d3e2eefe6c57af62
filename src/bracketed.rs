//! Bracketed Parser (`spec.md` §2.6, §4.4).
//!
//! Grounded on `ai.c::gs1_parseAIdata`. Consumes `(AI)value` sequences,
//! producing the normalized unbracketed buffer (`^` = FNC1) and an extracted
//! AI list, then re-validates the buffer through the unbracketed processor
//! for parity with direct unbracketed input.

use crate::ai_table::AiTable;
use crate::error::{EngineError, ErrorKind};
use crate::extracted::ExtractedAi;
use crate::lookup::lookup_ai;
use crate::unbracketed::process_ai_data;
use crate::validate::ai_val_length_content_check;

/// Mirrors `gs1_parseAIdata`. Returns the normalized `data_str` (with `^`
/// separators) and the extracted AI list, the latter taken from re-running
/// the unbracketed processor over the freshly built buffer.
pub fn parse_ai_data(
    table: &AiTable,
    length_by_prefix: &[u8; 100],
    ai_data: &str,
    permit_unknown_ais: bool,
) -> Result<(String, Vec<ExtractedAi>), EngineError> {
    let mut data_str = String::new();
    let mut fnc1_required = true;
    let bytes = ai_data.as_bytes();
    let mut p = 0usize;

    while p < bytes.len() {
        if bytes[p] != b'(' {
            return Err(parse_failure());
        }
        p += 1;

        let close = ai_data[p..].find(')').map(|i| p + i).ok_or_else(parse_failure)?;
        let ai_str = &ai_data[p..close];

        let entry = lookup_ai(table, length_by_prefix, ai_str, Some(ai_str.len() as u8), permit_unknown_ais)
            .ok_or_else(|| {
                EngineError::new(ErrorKind::UnknownAI, format!("Unrecognised AI: {ai_str}"))
            })?;

        if fnc1_required {
            data_str.push('^');
        }
        data_str.push_str(ai_str);
        fnc1_required = entry.requires_fnc1;

        let mut r = close + 1;
        if r >= bytes.len() {
            return Err(parse_failure());
        }

        let value_start = data_str.len();

        loop {
            let next_open = ai_data[r..].find('(').map(|i| r + i);
            let segment_end = next_open.unwrap_or(ai_data.len());

            if segment_end < ai_data.len() && segment_end > 0 && bytes[segment_end - 1] == b'\\' {
                // Escaped data bracket: copy up to the escape, literal '(', keep going.
                data_str.push_str(&ai_data[r..segment_end - 1]);
                data_str.push('(');
                r = segment_end + 1;
                continue;
            }

            data_str.push_str(&ai_data[r..segment_end]);
            p = segment_end;
            break;
        }

        let value = &data_str[value_start..];
        ai_val_length_content_check(ai_str, entry, value)?;

        if value.is_empty() {
            return Err(parse_failure());
        }
    }

    // Re-validate the buffer we just built, extracting the AI list, for
    // parity with directly-supplied unbracketed input (P3).
    let extracted = process_ai_data(table, length_by_prefix, &data_str, true, permit_unknown_ais)?;
    Ok((data_str, extracted))
}

fn parse_failure() -> EngineError {
    EngineError::new(ErrorKind::ParseStructure, "Failed to parse AI data")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai_table::AiTable;

    fn setup() -> (AiTable, [u8; 100]) {
        let table = AiTable::embedded();
        let lbp = table.compute_length_by_prefix();
        (table, lbp)
    }

    #[test]
    fn parses_two_ais() {
        let (table, lbp) = setup();
        let (data_str, extracted) =
            parse_ai_data(&table, &lbp, "(01)12345678901231(10)12345", false).unwrap();
        assert_eq!(data_str, "^01123456789012311012345");
        assert_eq!(extracted.len(), 2);
    }

    #[test]
    fn bad_check_digit_fails() {
        let (table, lbp) = setup();
        let err = parse_ai_data(&table, &lbp, "(01)95012345678902(3103)000123", false).unwrap_err();
        assert!(matches!(err.kind, crate::error::ErrorKind::LinterFailure(..)));
    }

    #[test]
    fn escaped_paren_is_preserved_in_value() {
        let (table, lbp) = setup();
        // Only `(` needs escaping; a literal `)` in the value (here closing
        // out the escaped bracket) is not itself special.
        let (data_str, _) = parse_ai_data(&table, &lbp, r"(10)AB\(C)", false).unwrap();
        assert_eq!(data_str, "^10AB(C)");
    }

    #[test]
    fn unrecognised_ai_is_rejected() {
        let (table, lbp) = setup();
        assert!(parse_ai_data(&table, &lbp, "(77)XYZ", false).is_err());
    }
}
