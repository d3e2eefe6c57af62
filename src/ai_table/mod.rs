//! AI Table (`spec.md` §2.1, §3, §4.1).
//!
//! A static, lexicographically ordered registry of AI definitions. The
//! embedded default lives in [`data`]; callers may supply a dynamically
//! loaded table via [`AiTable::load`] (e.g. parsed from a GS1 Syntax
//! Dictionary export with `serde_json`).

pub mod data;
pub mod prefix;

use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, ErrorKind};
use crate::linters::{CharSet, LinterName};

/// One component of an AI's value grammar (`spec.md` §3 Component).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub cset: CharSet,
    pub min: u8,
    pub max: u8,
    pub optional: bool,
    #[serde(default)]
    pub linters: Vec<LinterName>,
}

impl Component {
    pub const fn mandatory(cset: CharSet, min: u8, max: u8) -> Self {
        Component {
            cset,
            min,
            max,
            optional: false,
            linters: Vec::new(),
        }
    }
}

/// One AI table entry (`spec.md` §3 AI Entry), or one of the synthetic
/// "unknown AI" entries returned by vivification (§4.2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiEntry {
    pub ai: String,
    pub requires_fnc1: bool,
    pub components: Vec<Component>,
    #[serde(default)]
    pub attributes: String,
    #[serde(default)]
    pub title: String,
}

impl AiEntry {
    pub fn min_length(&self) -> usize {
        self.components
            .iter()
            .filter(|c| !c.optional)
            .map(|c| c.min as usize)
            .sum()
    }

    pub fn max_length(&self) -> usize {
        self.components.iter().map(|c| c.max as usize).sum()
    }
}

fn unknown_entry(ai: &str, requires_fnc1: bool, min: u8, max: u8) -> AiEntry {
    AiEntry {
        ai: ai.to_string(),
        requires_fnc1,
        components: vec![Component::mandatory(CharSet::Cset82, min, max)],
        attributes: String::new(),
        title: "UNKNOWN".to_string(),
    }
}

/// Pseudo AI table entries used to vivify an AI that is not present in the
/// loaded table, one per `(ai_len, fixed_value_len)` combination listed in
/// `spec.md` §4.2's vivification table. Grounded on `ai.c`'s `unknownAI*`
/// statics.
pub struct UnknownEntries {
    pub generic: AiEntry,
    pub generic2: AiEntry,
    pub generic3: AiEntry,
    pub generic4: AiEntry,
    pub fixed2_2: AiEntry,
    pub fixed2_14: AiEntry,
    pub fixed2_16: AiEntry,
    pub fixed2_18: AiEntry,
    pub fixed3_13: AiEntry,
    pub fixed4_6: AiEntry,
}

pub fn unknown_entries() -> &'static UnknownEntries {
    static ENTRIES: OnceLock<UnknownEntries> = OnceLock::new();
    ENTRIES.get_or_init(|| UnknownEntries {
        generic: unknown_entry("", true, 1, 90),
        generic2: unknown_entry("XX", true, 1, 90),
        generic3: unknown_entry("XXX", true, 1, 90),
        generic4: unknown_entry("XXXX", true, 1, 90),
        fixed2_2: unknown_entry("XX", false, 2, 2),
        fixed2_14: unknown_entry("XX", false, 14, 14),
        fixed2_16: unknown_entry("XX", false, 16, 16),
        fixed2_18: unknown_entry("XX", false, 18, 18),
        fixed3_13: unknown_entry("XXX", false, 13, 13),
        fixed4_6: unknown_entry("XXXX", false, 6, 6),
    })
}

/// An active AI table: either the embedded default or a dynamically loaded
/// replacement. Cheaply cloneable (`Arc`), matching the single-context
/// ownership model described in `spec.md` §5.
#[derive(Debug, Clone)]
pub struct AiTable {
    entries: Arc<Vec<AiEntry>>,
}

impl AiTable {
    /// The embedded fallback table, built once and shared across contexts.
    pub fn embedded() -> AiTable {
        static EMBEDDED: OnceLock<Arc<Vec<AiEntry>>> = OnceLock::new();
        let entries = EMBEDDED
            .get_or_init(|| Arc::new(data::embedded_table()))
            .clone();
        AiTable { entries }
    }

    /// Loads and validates a dynamically supplied table (I1, I5, I6). The
    /// table is sorted here rather than trusted to arrive pre-sorted, since
    /// I5 only requires the *active* table be sorted, not its source.
    pub fn load(mut entries: Vec<AiEntry>) -> Result<AiTable, EngineError> {
        entries.sort_by(|a, b| a.ai.cmp(&b.ai));

        let mut by_prefix: [Option<usize>; 100] = [None; 100];
        for entry in &entries {
            if entry.ai.len() < 2 || !entry.ai.bytes().all(|b| b.is_ascii_digit()) {
                continue;
            }
            let prefix = prefix_index(entry.ai.as_bytes());
            let entry_len = entry.ai.len();
            match by_prefix[prefix] {
                None => by_prefix[prefix] = Some(entry_len),
                Some(len) if len != entry_len => {
                    return Err(EngineError::new(
                        ErrorKind::TableBroken,
                        format!(
                            "AI table invariant I1 violated: prefix {:02} has entries of \
                             differing length",
                            prefix
                        ),
                    ));
                }
                _ => {}
            }
        }

        for entry in &entries {
            if entry.requires_fnc1 || entry.ai.len() < 2 {
                continue;
            }
            if !entry.ai.bytes().all(|b| b.is_ascii_digit()) {
                continue;
            }
            let fixed = prefix::fixed_value_length_by_prefix(entry.ai.as_bytes());
            if fixed != prefix::VL && fixed as usize != entry.max_length() {
                return Err(EngineError::new(
                    ErrorKind::TableBroken,
                    format!(
                        "AI table invariant I6 violated: AI ({}) is fixed-length but its \
                         component lengths sum to {}, not {}",
                        entry.ai,
                        entry.max_length(),
                        fixed
                    ),
                ));
            }
        }

        Ok(AiTable {
            entries: Arc::new(entries),
        })
    }

    /// Loads a dynamically supplied table from a JSON array of [`AiEntry`]
    /// (e.g. a GS1 Syntax Dictionary export converted to JSON), then runs it
    /// through the same I1/I6 checks as [`AiTable::load`].
    pub fn load_json(json: &str) -> Result<AiTable, EngineError> {
        let entries: Vec<AiEntry> = serde_json::from_str(json).map_err(|e| {
            EngineError::new(
                ErrorKind::TableBroken,
                format!("AI table JSON is malformed: {e}"),
            )
        })?;
        Self::load(entries)
    }

    pub fn entries(&self) -> &[AiEntry] {
        &self.entries
    }

    /// Derives `ai_length_by_prefix[100]` from the active table (§3).
    pub fn compute_length_by_prefix(&self) -> [u8; 100] {
        let mut table = [0u8; 100];
        for entry in self.entries.iter() {
            if entry.ai.len() < 2 || !entry.ai.bytes().all(|b| b.is_ascii_digit()) {
                continue;
            }
            table[prefix_index(entry.ai.as_bytes())] = entry.ai.len() as u8;
        }
        table
    }
}

fn prefix_index(ai: &[u8]) -> usize {
    (ai[0] - b'0') as usize * 10 + (ai[1] - b'0') as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_table_is_sorted() {
        let table = AiTable::embedded();
        let ais: Vec<&str> = table.entries().iter().map(|e| e.ai.as_str()).collect();
        let mut sorted = ais.clone();
        sorted.sort();
        assert_eq!(ais, sorted, "embedded AI table must be lexicographically sorted (I5)");
    }

    #[test]
    fn embedded_table_satisfies_i1() {
        let table = AiTable::embedded();
        let mut by_prefix: [Option<usize>; 100] = [None; 100];
        for entry in table.entries() {
            let idx = prefix_index(entry.ai.as_bytes());
            match by_prefix[idx] {
                None => by_prefix[idx] = Some(entry.ai.len()),
                Some(len) => assert_eq!(
                    len,
                    entry.ai.len(),
                    "prefix {:02} has AIs of differing length",
                    idx
                ),
            }
        }
    }

    #[test]
    fn embedded_table_satisfies_i6() {
        let table = AiTable::embedded();
        for entry in table.entries() {
            if entry.requires_fnc1 || entry.ai.len() < 2 {
                continue;
            }
            let fixed = prefix::fixed_value_length_by_prefix(entry.ai.as_bytes());
            if fixed != prefix::VL {
                assert_eq!(
                    fixed as usize,
                    entry.max_length(),
                    "AI ({}) fixed length disagrees with policy table",
                    entry.ai
                );
            }
        }
    }

    #[test]
    fn loading_table_with_mixed_prefix_lengths_fails() {
        let bad = vec![
            AiEntry {
                ai: "30".to_string(),
                requires_fnc1: true,
                components: vec![Component::mandatory(CharSet::Numeric, 1, 8)],
                attributes: String::new(),
                title: String::new(),
            },
            AiEntry {
                ai: "3000".to_string(),
                requires_fnc1: true,
                components: vec![Component::mandatory(CharSet::Numeric, 1, 8)],
                attributes: String::new(),
                title: String::new(),
            },
        ];
        assert!(AiTable::load(bad).is_err());
    }

    #[test]
    fn load_json_parses_and_validates_a_table() {
        let json = r#"[
            {
                "ai": "90",
                "requires_fnc1": true,
                "components": [
                    {"cset": "Cset82", "min": 1, "max": 30, "optional": false, "linters": []}
                ],
                "attributes": "",
                "title": "INTERNAL"
            }
        ]"#;
        let table = AiTable::load_json(json).unwrap();
        assert_eq!(table.entries().len(), 1);
        assert_eq!(table.entries()[0].ai, "90");
    }

    #[test]
    fn load_json_rejects_malformed_json() {
        assert!(AiTable::load_json("not json").is_err());
    }
}
