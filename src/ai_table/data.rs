//! Embedded AI table: a curated subset of the ~600-entry real GS1 AI table,
//! covering the primary identification keys, the variable-measure family,
//! the logistic/date families, and a sample of each cross-AI attribute shape
//! so the validators in `cross_ai.rs` have real data to exercise. Any AI
//! outside this subset is handled via vivification (`ai_table::unknown_entries`)
//! when `permit_unknown_ais` is set, or rejected as `UnknownAI` otherwise.

use super::{AiEntry, Component};
use crate::linters::{CharSet, LinterName};

fn n(min: u8, max: u8) -> Component {
    Component::mandatory(CharSet::Numeric, min, max)
}

fn x(min: u8, max: u8) -> Component {
    Component::mandatory(CharSet::Cset82, min, max)
}

fn linted(mut c: Component, linters: &[LinterName]) -> Component {
    c.linters = linters.to_vec();
    c
}

fn optional(mut c: Component) -> Component {
    c.optional = true;
    c
}

fn entry(ai: &str, requires_fnc1: bool, components: Vec<Component>, attributes: &str, title: &str) -> AiEntry {
    AiEntry {
        ai: ai.to_string(),
        requires_fnc1,
        components,
        attributes: attributes.to_string(),
        title: title.to_string(),
    }
}

/// Builds the embedded table. Not sorted here; `AiTable::embedded` relies on
/// the table being written in sorted order, checked by
/// `ai_table::tests::embedded_table_is_sorted`.
pub fn embedded_table() -> Vec<AiEntry> {
    vec![
        entry("00", false, vec![linted(n(18, 18), &[LinterName::CheckDigit])], "", "SSCC"),
        entry("01", false, vec![linted(n(14, 14), &[LinterName::CheckDigit])], "", "GTIN"),
        entry("02", false, vec![linted(n(14, 14), &[LinterName::CheckDigit])], "", "CONTENT"),
        entry("10", true, vec![x(1, 20)], "", "BATCH/LOT"),
        entry("11", false, vec![linted(n(6, 6), &[LinterName::Yymmdd])], "", "PROD DATE"),
        entry("12", false, vec![linted(n(6, 6), &[LinterName::Yymmdd])], "", "DUE DATE"),
        entry("13", false, vec![linted(n(6, 6), &[LinterName::Yymmdd])], "", "PACK DATE"),
        entry("15", false, vec![linted(n(6, 6), &[LinterName::Yymmdd])], "", "BEST BEFORE"),
        entry("16", false, vec![linted(n(6, 6), &[LinterName::Yymmdd])], "", "SELL BY"),
        entry("17", false, vec![linted(n(6, 6), &[LinterName::Yymmdd])], "", "USE BY"),
        entry("20", false, vec![n(2, 2)], "", "VARIANT"),
        entry("21", true, vec![x(1, 20)], "req=01,8006", "SERIAL"),
        entry("22", true, vec![x(1, 20)], "", "CPV"),
        entry("240", true, vec![x(1, 30)], "", "ADDITIONAL ID"),
        entry("241", true, vec![x(1, 30)], "", "CUST. PART No."),
        entry("242", true, vec![n(1, 6)], "", "MTO VARIANT"),
        entry("243", true, vec![x(1, 20)], "", "PCN"),
        entry("250", true, vec![x(1, 30)], "", "SECONDARY SERIAL"),
        entry("251", true, vec![x(1, 30)], "", "REF. TO SOURCE"),
        entry(
            "253",
            true,
            vec![linted(n(13, 13), &[LinterName::CheckDigit]), optional(x(0, 17))],
            "",
            "GDTI",
        ),
        entry("254", true, vec![x(1, 20)], "", "GLN EXTENSION COMPONENT"),
        entry(
            "255",
            true,
            vec![linted(n(13, 13), &[LinterName::CheckDigit]), optional(n(0, 12))],
            "",
            "GCN",
        ),
        entry("30", true, vec![n(1, 8)], "", "VAR. COUNT"),
        entry("3100", false, vec![n(6, 6)], "", "NET WEIGHT (kg)"),
        entry("3101", false, vec![n(6, 6)], "", "NET WEIGHT (kg)"),
        entry("3102", false, vec![n(6, 6)], "", "NET WEIGHT (kg)"),
        entry("3103", false, vec![n(6, 6)], "", "NET WEIGHT (kg)"),
        entry("3104", false, vec![n(6, 6)], "", "NET WEIGHT (kg)"),
        entry("3105", false, vec![n(6, 6)], "", "NET WEIGHT (kg)"),
        entry("3200", false, vec![n(6, 6)], "", "NET WEIGHT (lb)"),
        entry("3201", false, vec![n(6, 6)], "", "NET WEIGHT (lb)"),
        entry("3202", false, vec![n(6, 6)], "", "NET WEIGHT (lb)"),
        entry("3300", false, vec![n(6, 6)], "", "GROSS WEIGHT (kg)"),
        entry("3301", false, vec![n(6, 6)], "", "GROSS WEIGHT (kg)"),
        entry("3302", false, vec![n(6, 6)], "", "GROSS WEIGHT (kg)"),
        entry("3400", false, vec![n(6, 6)], "", "NET VOLUME (l)"),
        entry("3401", false, vec![n(6, 6)], "", "NET VOLUME (l)"),
        entry("3402", false, vec![n(6, 6)], "", "NET VOLUME (l)"),
        entry("3940", false, vec![n(4, 4)], "ex=394n", "AMOUNT PAYABLE"),
        entry("3941", false, vec![n(4, 4)], "ex=394n", "AMOUNT PAYABLE"),
        entry("3942", false, vec![n(4, 4)], "ex=394n", "AMOUNT PAYABLE"),
        entry("3943", false, vec![n(4, 4)], "ex=394n", "AMOUNT PAYABLE"),
        entry("3944", false, vec![n(4, 4)], "ex=394n", "AMOUNT PAYABLE"),
        entry("3945", false, vec![n(4, 4)], "ex=394n", "AMOUNT PAYABLE"),
        entry("3946", false, vec![n(4, 4)], "ex=394n", "AMOUNT PAYABLE"),
        entry("3947", false, vec![n(4, 4)], "ex=394n", "AMOUNT PAYABLE"),
        entry("3948", false, vec![n(4, 4)], "ex=394n", "AMOUNT PAYABLE"),
        entry("3949", false, vec![n(4, 4)], "ex=394n", "AMOUNT PAYABLE"),
        entry("400", true, vec![x(1, 30)], "", "ORDER NUMBER"),
        entry("401", true, vec![x(1, 30)], "", "CONSIGNMENT No."),
        entry("402", false, vec![linted(n(17, 17), &[LinterName::CheckDigit])], "", "SHIPMENT No."),
        entry("403", true, vec![x(1, 30)], "", "ROUTE"),
        entry("410", false, vec![linted(n(13, 13), &[LinterName::CheckDigit])], "", "SHIP TO LOC"),
        entry("411", false, vec![linted(n(13, 13), &[LinterName::CheckDigit])], "", "BILL TO"),
        entry("412", false, vec![linted(n(13, 13), &[LinterName::CheckDigit])], "", "PURCHASE FROM"),
        entry("413", false, vec![linted(n(13, 13), &[LinterName::CheckDigit])], "", "SHIP FOR LOC"),
        entry("414", false, vec![linted(n(13, 13), &[LinterName::CheckDigit])], "", "LOC No."),
        entry("415", false, vec![linted(n(13, 13), &[LinterName::CheckDigit])], "", "PAY TO"),
        entry("416", false, vec![linted(n(13, 13), &[LinterName::CheckDigit])], "", "PROD/SERV LOC"),
        entry("417", false, vec![linted(n(13, 13), &[LinterName::CheckDigit])], "", "PARTY"),
        entry("4300", true, vec![x(1, 35)], "", "SHIP TO COMP"),
        entry("4301", true, vec![x(1, 35)], "", "SHIP TO NAME"),
        entry("4302", true, vec![x(1, 35)], "", "SHIP TO ADD1"),
        entry(
            "8006",
            false,
            vec![
                linted(n(14, 14), &[LinterName::CheckDigit]),
                linted(n(4, 4), &[LinterName::Pieces]),
            ],
            "",
            "ITIP",
        ),
        entry("8008", true, vec![n(8, 12)], "", "PROD TIME"),
        entry("90", true, vec![x(1, 30)], "", "INTERNAL"),
        entry("91", true, vec![x(1, 90)], "", "INTERNAL"),
        entry("92", true, vec![x(1, 90)], "", "INTERNAL"),
        entry("93", true, vec![x(1, 90)], "", "INTERNAL"),
        entry("94", true, vec![x(1, 90)], "", "INTERNAL"),
        entry("95", true, vec![x(1, 90)], "", "INTERNAL"),
        entry("96", true, vec![x(1, 90)], "", "INTERNAL"),
        entry("97", true, vec![x(1, 90)], "", "INTERNAL"),
        entry("98", true, vec![x(1, 90)], "", "INTERNAL"),
        entry("99", true, vec![x(1, 90)], "", "INTERNAL"),
    ]
}
