//! Extracted AI Value (`spec.md` §3).
//!
//! One entry in the per-input AI list produced by the bracketed parser, the
//! unbracketed processor, or the scan-data codec. Slices are `(offset,
//! length)` pairs into the context's `data_str` buffer rather than raw
//! pointers, per `spec.md` §9's re-architecture note.

use crate::ai_table::AiEntry;

/// Where in a Digital Link URI path this value was found; defaults to
/// `Attribute` for non-URI inputs (bracketed/unbracketed/scan data).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DlPathOrder {
    Attribute,
    Key,
    Qualifier(u8),
}

/// Distinguishes a real extracted AI value from placeholder markers the
/// Digital Link layer could splice into the same list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiValueKind {
    AiValue,
    DlPathAttribute,
}

#[derive(Debug, Clone)]
pub struct ExtractedAi {
    pub kind: AiValueKind,
    pub ai_entry: AiEntry,
    pub ai_offset: usize,
    pub ai_len: u8,
    pub value_offset: usize,
    pub value_len: u16,
    pub dl_path_order: DlPathOrder,
}

impl ExtractedAi {
    pub fn ai<'d>(&self, data_str: &'d str) -> &'d str {
        &data_str[self.ai_offset..self.ai_offset + self.ai_len as usize]
    }

    pub fn value<'d>(&self, data_str: &'d str) -> &'d str {
        &data_str[self.value_offset..self.value_offset + self.value_len as usize]
    }
}
