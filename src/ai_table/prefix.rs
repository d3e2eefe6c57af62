//! Prefix Tables (`spec.md` §2.2, §4.2).
//!
//! Two 100-slot tables keyed by two-digit AI prefix. `FIXED_VALUE_LENGTH_BY_PREFIX`
//! is a hard-coded policy table, independent of whatever AI table is loaded,
//! consulted only when vivifying an unknown AI. `ai_length_by_prefix` is
//! instead *derived* from the active AI table at load time (see
//! `ai_table::AiTable::compute_length_by_prefix`) and therefore lives in
//! `EngineContext`, not here.

/// Sentinel for "variable-length" in `FIXED_VALUE_LENGTH_BY_PREFIX`.
pub const VL: u8 = 0;

/// `fixedAIprefixLengths` from `ai.c`: AI prefixes that are pre-defined as
/// fixed-length and do not require FNC1 termination, consulted only when
/// vivifying an unknown AI (not all prefixes are in active use in the real
/// AI table, so this cannot be derived from it).
#[rustfmt::skip]
pub const FIXED_VALUE_LENGTH_BY_PREFIX: [u8; 100] = [
    18, 14, 14, 14, 16, VL, VL, VL, VL, VL, // (00) - (09)
    VL,  6,  6,  6,  6,  6,  6,  6,  6,  6, // (10) - (19)
     2, VL, VL, VL, VL, VL, VL, VL, VL, VL, // (20) - (29)
    VL,  6,  6,  6,  6,  6,  6, VL, VL, VL, // (30) - (39)
    VL, 13, VL, VL, VL, VL, VL, VL, VL, VL, // (40) - (49)
    VL, VL, VL, VL, VL, VL, VL, VL, VL, VL, // (50) - (59)
    VL, VL, VL, VL, VL, VL, VL, VL, VL, VL, // (60) - (69)
    VL, VL, VL, VL, VL, VL, VL, VL, VL, VL, // (70) - (79)
    VL, VL, VL, VL, VL, VL, VL, VL, VL, VL, // (80) - (89)
    VL, VL, VL, VL, VL, VL, VL, VL, VL, VL, // (90) - (99)
];

/// Indexes `FIXED_VALUE_LENGTH_BY_PREFIX` by the two leading digits of `ai`.
pub fn fixed_value_length_by_prefix(ai: &[u8]) -> u8 {
    debug_assert!(ai.len() >= 2 && ai[0].is_ascii_digit() && ai[1].is_ascii_digit());
    let idx = (ai[0] - b'0') as usize * 10 + (ai[1] - b'0') as usize;
    FIXED_VALUE_LENGTH_BY_PREFIX[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gtin_prefixes_are_fixed() {
        assert_eq!(fixed_value_length_by_prefix(b"00"), 18);
        assert_eq!(fixed_value_length_by_prefix(b"01"), 14);
        assert_eq!(fixed_value_length_by_prefix(b"02"), 14);
        assert_eq!(fixed_value_length_by_prefix(b"03"), 14);
        assert_eq!(fixed_value_length_by_prefix(b"04"), 16);
    }

    #[test]
    fn variable_measure_prefixes_are_fixed_six() {
        for prefix in [b"31", b"32", b"33", b"34", b"35", b"36"] {
            assert_eq!(fixed_value_length_by_prefix(prefix), 6);
        }
    }

    #[test]
    fn unused_prefixes_are_variable_length() {
        assert_eq!(fixed_value_length_by_prefix(b"89"), VL);
        assert_eq!(fixed_value_length_by_prefix(b"23"), VL);
    }
}
