//! Shared size limits, grounded on `ai.c`'s `MAX_AIS`/`MAX_AI_LEN` and the
//! contrib binding's buffer sizing.

/// Upper bound on the number of AIs extracted from a single input (I4).
pub const MAX_AIS: usize = 150;

/// Longest permitted AI value, summed across all of an entry's components.
pub const MAX_AI_LEN: usize = 90;

/// Longest permitted normalized `data_str` buffer.
pub const MAX_DATA_LEN: usize = 8192;
