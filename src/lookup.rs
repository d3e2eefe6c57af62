//! AI Lookup (`spec.md` §2.4, §4.2).
//!
//! Grounded on `ai.c::gs1_lookupAIentry`: binary search for an exact or
//! prefix match, falling back to vivification of a synthetic "unknown AI"
//! entry when `permit_unknown_ais` is set.

use crate::ai_table::{unknown_entries, AiEntry, AiTable};

/// Mirrors `gs1_lookupAIentry`. `known_len` is `None` when the caller has no
/// a-priori length for the candidate AI (used by the unbracketed processor,
/// which must discover the AI's length from the table itself).
pub fn lookup_ai<'a>(
    table: &'a AiTable,
    length_by_prefix: &[u8; 100],
    data: &str,
    known_len: Option<u8>,
    permit_unknown_ais: bool,
) -> Option<&'a AiEntry> {
    if let Some(len) = known_len {
        if len == 1 || len > 4 {
            return None;
        }
    }

    let probe_len = known_len.map(|l| l as usize).unwrap_or(2);
    let data_bytes = data.as_bytes();
    if data_bytes.len() < probe_len || !data_bytes[..probe_len].iter().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let entries = table.entries();
    let mut s = 0usize;
    let mut e = entries.len();
    while s < e {
        let m = s + (e - s) / 2;
        let entry = &entries[m];
        let entry_len = entry.ai.len();
        let entry_bytes = entry.ai.as_bytes();
        let cmp_bound = entry_len.min(data_bytes.len());
        let cmp = entry_bytes[..cmp_bound].cmp(&data_bytes[..cmp_bound]);

        if cmp == std::cmp::Ordering::Equal && data_bytes.len() >= entry_len {
            if let Some(len) = known_len {
                if len as usize != entry_len {
                    return None; // prefix match, but incorrect length
                }
            }
            return Some(entry);
        }

        if let Some(len) = known_len {
            let len = len as usize;
            if data_bytes.len() >= len
                && entry_bytes.len() >= len
                && entry_bytes[..len] == data_bytes[..len]
            {
                return None; // don't vivify an AI that is a prefix of a known AI
            }
        }

        match cmp {
            std::cmp::Ordering::Less => s = m + 1,
            _ => e = m,
        }
    }

    if !permit_unknown_ais {
        return None;
    }

    vivify(length_by_prefix, data, known_len)
}

fn vivify<'a>(length_by_prefix: &[u8; 100], data: &str, known_len: Option<u8>) -> Option<&'a AiEntry> {
    let bytes = data.as_bytes();
    if bytes.len() < 2 || !bytes[..2].iter().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let prefix_idx = (bytes[0] - b'0') as usize * 10 + (bytes[1] - b'0') as usize;
    let ai_len_by_prefix = length_by_prefix[prefix_idx];

    if let Some(len) = known_len {
        if ai_len_by_prefix != 0 && ai_len_by_prefix != len {
            return None;
        }
    }

    if ai_len_by_prefix != 0 && !bytes[..ai_len_by_prefix as usize].iter().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let fixed = crate::ai_table::prefix::fixed_value_length_by_prefix(bytes);
    let e = unknown_entries();
    use crate::ai_table::prefix::VL;
    Some(match (ai_len_by_prefix, fixed) {
        (2, v) if v == VL => &e.generic2,
        (2, 2) => &e.fixed2_2,
        (2, 14) => &e.fixed2_14,
        (2, 16) => &e.fixed2_16,
        (2, 18) => &e.fixed2_18,
        (3, v) if v == VL => &e.generic3,
        (3, 13) => &e.fixed3_13,
        (4, v) if v == VL => &e.generic4,
        (4, 6) => &e.fixed4_6,
        _ => &e.generic,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai_table::AiTable;

    fn ctx() -> (AiTable, [u8; 100]) {
        let table = AiTable::embedded();
        let lbp = table.compute_length_by_prefix();
        (table, lbp)
    }

    #[test]
    fn exact_known_ai_is_found() {
        let (table, lbp) = ctx();
        let entry = lookup_ai(&table, &lbp, "01", Some(2), false).expect("AI 01 must be in the table");
        assert_eq!(entry.ai, "01");
    }

    #[test]
    fn unknown_ai_without_permit_is_rejected() {
        let (table, lbp) = ctx();
        assert!(lookup_ai(&table, &lbp, "89", Some(2), false).is_none());
    }

    #[test]
    fn unknown_ai_with_no_prefix_constraint_vivifies_fully_generic() {
        // No table entry shares the "89" prefix, so ai_length_by_prefix has
        // no opinion on its length and the fully generic entry is returned.
        let (table, lbp) = ctx();
        let entry = lookup_ai(&table, &lbp, "89", Some(2), true).expect("should vivify");
        assert_eq!(entry.ai, "");
        assert!(entry.requires_fnc1);
    }

    #[test]
    fn unknown_four_digit_ai_sharing_a_known_prefix_vivifies_as_variable_length() {
        // Prefix "39" is used by the 3940-3949 family (all length 4), so
        // ai_length_by_prefix[39] == 4, but "3999" itself is absent.
        let (table, lbp) = ctx();
        let entry = lookup_ai(&table, &lbp, "3999", Some(4), true).expect("should vivify");
        assert_eq!(entry.ai, "XXXX");
        assert!(entry.requires_fnc1);
    }

    #[test]
    fn unknown_three_digit_ai_with_fixed_prefix_vivifies_fixed() {
        // prefix "41" is fixed-length 13 in the policy table; "419" shares
        // that prefix but is not itself a table entry.
        let (table, lbp) = ctx();
        let entry = lookup_ai(&table, &lbp, "419", Some(3), true).expect("should vivify");
        assert_eq!(entry.ai, "XXX");
        assert!(!entry.requires_fnc1);
        assert_eq!(entry.components[0].min, 13);
    }

    #[test]
    fn prefix_collision_with_known_ai_refuses_to_vivify() {
        // "4" alone is a prefix of the known AI "410", so a 1-length probe
        // is already rejected by the length bound, but a same-length
        // collision against a *longer* known AI must also refuse.
        let (table, lbp) = ctx();
        assert!(lookup_ai(&table, &lbp, "41", Some(2), true).is_none());
    }

    #[test]
    fn length_mismatch_against_exact_match_is_rejected() {
        let (table, lbp) = ctx();
        assert!(lookup_ai(&table, &lbp, "013", Some(3), false).is_none());
    }
}
