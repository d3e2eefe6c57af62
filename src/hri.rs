//! Human Readable Interpretation rendering (`spec.md` §2.11, §4.9).
//!
//! Grounded on `gs1_encoder_getHRI` in the contrib binding: one line per
//! extracted AI, either `(AI) value` or, when data titles are requested,
//! `TITLE (AI) value`.

use crate::extracted::{AiValueKind, ExtractedAi};

pub fn build_hri(ai_data: &[ExtractedAi], data_str: &str, include_data_titles: bool) -> Vec<String> {
    ai_data
        .iter()
        .filter(|e| e.kind == AiValueKind::AiValue)
        .map(|e| {
            let ai = e.ai(data_str);
            let value = e.value(data_str);
            if include_data_titles {
                format!("{} ({ai}) {value}", e.ai_entry.title)
            } else {
                format!("({ai}) {value}")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai_table::AiTable;
    use crate::unbracketed::process_ai_data;

    #[test]
    fn renders_with_and_without_titles() {
        let table = AiTable::embedded();
        let lbp = table.compute_length_by_prefix();
        let data_str = "^011231231231231999TESTING123";
        let ai_data = process_ai_data(&table, &lbp, data_str, true, false).unwrap();

        assert_eq!(
            build_hri(&ai_data, data_str, false),
            vec!["(01) 12312312312319", "(99) TESTING123"]
        );
        assert_eq!(
            build_hri(&ai_data, data_str, true),
            vec!["GTIN (01) 12312312312319", "INTERNAL (99) TESTING123"]
        );
    }
}
