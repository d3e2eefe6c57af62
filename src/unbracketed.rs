//! Unbracketed Processor (`spec.md` §2.7, §4.5).
//!
//! Grounded on `ai.c::gs1_processAIdata`. Walks an unbracketed `^`-delimited
//! string, identifying AIs by prefix (never vivifying the fully generic
//! unknown-AI entry here, since its value is variable-length and we would
//! have no way to know where it ends) and slicing each value at the next
//! `^` or at the AI's fixed length.

use crate::ai_table::AiTable;
use crate::constants::MAX_AIS;
use crate::error::{EngineError, ErrorKind};
use crate::extracted::{AiValueKind, DlPathOrder, ExtractedAi};
use crate::lookup::lookup_ai;
use crate::validate::validate_ai_value;

/// Mirrors `gs1_processAIdata`. When `extract` is false only validation is
/// performed (used by the bracketed parser's re-validation pass); when true
/// the returned `Vec` holds one `ExtractedAi` per AI found.
pub fn process_ai_data(
    table: &AiTable,
    length_by_prefix: &[u8; 100],
    data_str: &str,
    extract: bool,
    permit_unknown_ais: bool,
) -> Result<Vec<ExtractedAi>, EngineError> {
    let mut out = Vec::new();

    if !data_str.starts_with('^') {
        return Err(EngineError::new(
            ErrorKind::ParseStructure,
            "Missing FNC1 in first position",
        ));
    }
    let mut pos = 1usize; // byte offset into data_str, past the leading '^'

    if pos >= data_str.len() {
        return Err(EngineError::new(ErrorKind::ParseStructure, "The AI data is empty"));
    }

    while pos < data_str.len() {
        let remaining = &data_str[pos..];

        // AI length is unknown here (prefix-only lookup); the fully generic
        // unknown-AI entry (variable length, no way to bound it) is refused
        // when extracting.
        let entry = lookup_ai(table, length_by_prefix, remaining, None, permit_unknown_ais)
            .filter(|e| !(extract && e.ai.is_empty()))
            .ok_or_else(|| {
                let preview: String = remaining.chars().take(4).collect();
                EngineError::new(
                    ErrorKind::UnknownAI,
                    format!("No known AI is a prefix of: {preview}..."),
                )
            })?;

        let ai_offset = pos;
        let ai_len = entry.ai.len();
        let value_start = ai_offset + ai_len;

        let value_end = match data_str[value_start..].find('^') {
            Some(rel) => value_start + rel,
            None => data_str.len(),
        };

        let slice = &data_str[value_start..value_end];
        let consumed = validate_ai_value(&entry.ai, entry, slice)?;

        if extract {
            if out.len() >= MAX_AIS {
                return Err(EngineError::new(ErrorKind::TooManyAIs, "Too many AIs"));
            }
            out.push(ExtractedAi {
                kind: AiValueKind::AiValue,
                ai_entry: entry.clone(),
                ai_offset,
                ai_len: ai_len as u8,
                value_offset: value_start,
                value_len: consumed as u16,
                dl_path_order: DlPathOrder::Attribute,
            });
        }

        pos = value_start + consumed;
        if entry.requires_fnc1 && pos < data_str.len() && data_str.as_bytes()[pos] != b'^' {
            return Err(EngineError::new(
                ErrorKind::AiValueTooLong,
                format!("AI ({}) data is too long", entry.ai),
            ));
        }

        // Skip one FNC1, even after a fixed-length AI (tolerated per
        // spec.md's preserved Open Question).
        if pos < data_str.len() && data_str.as_bytes()[pos] == b'^' {
            pos += 1;
        }
    }

    Ok(out)
}
