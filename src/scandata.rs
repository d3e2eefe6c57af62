//! Scan-Data Codec (`spec.md` §2.9, §4.7).
//!
//! Grounded on `scandata.c`: `gs1_generateScanData` builds the symbology-
//! prefixed linear (and optional composite) scan data for a `data_str`;
//! `gs1_processScanData` is its inverse. `scancat` reproduces the FNC1/GS
//! transcoding and escaping rules exactly, including the C source's
//! peculiar "drop exactly one leading backslash" unescape.

use crate::ai_table::AiTable;
use crate::error::{EngineError, ErrorKind};
use crate::extracted::ExtractedAi;
use crate::linters::checkdigit::check_digit;
use crate::unbracketed::process_ai_data;

/// Barcode symbologies the codec knows how to target, mirroring
/// `gs1_encoder_symbologies` (minus its `sNONE` sentinel, modeled here as
/// `Option<Symbology>` at call sites).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbology {
    DataBarOmni,
    DataBarTruncated,
    DataBarStacked,
    DataBarStackedOmni,
    DataBarLimited,
    DataBarExpanded,
    UpcA,
    UpcE,
    Ean13,
    Ean8,
    Gs1_128CcA,
    Gs1_128CcC,
    Qr,
    Dm,
}

struct SymIdEntry {
    identifier: &'static str,
    ai_mode: bool,
    default_sym: Symbology,
}

const SYM_ID_TABLE: &[SymIdEntry] = &[
    SymIdEntry { identifier: "]C1", ai_mode: true, default_sym: Symbology::Gs1_128CcA },
    SymIdEntry { identifier: "]E0", ai_mode: false, default_sym: Symbology::Ean13 },
    SymIdEntry { identifier: "]E4", ai_mode: false, default_sym: Symbology::Ean8 },
    SymIdEntry { identifier: "]e0", ai_mode: true, default_sym: Symbology::DataBarExpanded },
    SymIdEntry { identifier: "]d1", ai_mode: false, default_sym: Symbology::Dm },
    SymIdEntry { identifier: "]d2", ai_mode: true, default_sym: Symbology::Dm },
    SymIdEntry { identifier: "]Q1", ai_mode: false, default_sym: Symbology::Qr },
    SymIdEntry { identifier: "]Q3", ai_mode: true, default_sym: Symbology::Qr },
];

/// Appends the FNC1/GS-transcoded form of `input` to `out`, mirroring
/// `scancat`. In GS1 mode (`input` starts with `^`) embedded `^` become the
/// ASCII GS character and a single trailing `^` is dropped. Otherwise a
/// leading run of backslashes immediately followed by `^` has its first
/// backslash stripped (undoing the escaping `gs1_processScanData` applies
/// on the way in).
fn scancat(out: &mut String, input: &str) {
    if let Some(rest) = input.strip_prefix('^') {
        let mut last_was_caret = false;
        for c in rest.chars() {
            if c == '^' {
                out.push('\u{1D}');
                last_was_caret = true;
            } else {
                out.push(c);
                last_was_caret = false;
            }
        }
        if last_was_caret {
            out.pop();
        }
    } else {
        let mut r = input;
        while let Some(stripped) = r.strip_prefix('\\') {
            r = stripped;
        }
        if r.starts_with('^') {
            out.push_str(&input[1..]);
        } else {
            out.push_str(input);
        }
    }
}

fn generate_failure(msg: impl Into<String>) -> EngineError {
    EngineError::new(ErrorKind::ScanDataBadPrimary, msg.into())
}

fn strip_prefix_n<'a>(data: &'a str, pattern: &str, n: usize) -> &'a str {
    if data.len() >= n && data.as_bytes()[..n] == pattern.as_bytes()[..n] {
        &data[n..]
    } else {
        data
    }
}

fn finish_primary(stripped: &str, digits: usize, add_check_digit: bool, leading_zero: bool) -> Result<String, EngineError> {
    let expected_len = if add_check_digit { digits - 1 } else { digits };
    if stripped.len() != expected_len {
        return Err(generate_failure(if add_check_digit {
            format!("Primary data must be {} digits without check digit", digits - 1)
        } else {
            format!("Primary data must be {digits} digits")
        }));
    }
    if !stripped.bytes().all(|b| b.is_ascii_digit()) {
        return Err(generate_failure("Primary data must be all digits"));
    }

    let mut primary = String::with_capacity(digits + 1);
    if leading_zero {
        primary.push('0');
    }
    primary.push_str(stripped);

    if add_check_digit {
        primary.push('-');
    } else if check_digit(&primary).is_err() {
        return Err(generate_failure("Primary data check digit is incorrect"));
    }

    Ok(primary)
}

fn normalise_ean13(data: &str, add_check_digit: bool, is_ean13: bool) -> Result<String, EngineError> {
    let digits = if is_ean13 { 13 } else { 12 };
    let stripped = strip_prefix_n(data, "^0100", 17 - digits);
    finish_primary(stripped, digits, add_check_digit, !is_ean13)
}

fn normalise_ean8(data: &str, add_check_digit: bool) -> Result<String, EngineError> {
    let stripped = strip_prefix_n(data, "^01000000", 9);
    finish_primary(stripped, 8, add_check_digit, false)
}

fn normalise_upce(data: &str, add_check_digit: bool) -> Result<String, EngineError> {
    let stripped = strip_prefix_n(data, "^0100", 5);
    finish_primary(stripped, 12, add_check_digit, false)
}

fn normalise_rss14(data: &str, add_check_digit: bool) -> Result<String, EngineError> {
    let stripped = strip_prefix_n(data, "^01", 3);
    finish_primary(stripped, 14, add_check_digit, false)
}

fn normalise_rss_lim(data: &str, add_check_digit: bool) -> Result<String, EngineError> {
    let stripped = strip_prefix_n(data, "^01", 3);
    let primary = finish_primary(stripped, 14, add_check_digit, false)?;
    let numeric: f64 = primary.trim_end_matches('-').parse().unwrap_or(0.0);
    if numeric > 19999999999999.0 {
        return Err(generate_failure("Primary data item value is too large"));
    }
    Ok(primary)
}

fn generate_composite_ai(
    out: &mut String,
    table: &AiTable,
    length_by_prefix: &[u8; 100],
    linear: &str,
    cc: &str,
) -> Result<(), EngineError> {
    if !linear.starts_with('^') {
        return Err(generate_failure("Linear component must be AI data"));
    }
    out.push_str("]e0");
    scancat(out, linear);

    if !cc.starts_with('^') {
        return Err(generate_failure("Composite component must be AI data"));
    }

    let linear_ais = process_ai_data(table, length_by_prefix, linear, true, true)?;
    let last_requires_fnc1 = linear_ais.last().map(|e| e.ai_entry.requires_fnc1).unwrap_or(false);
    if last_requires_fnc1 {
        out.push('\u{1D}');
    }
    scancat(out, cc);
    Ok(())
}

/// Mirrors `gs1_generateScanData`: builds the symbology-prefixed scan data
/// for a `data_str` that may carry a `|`-delimited composite component.
pub fn generate_scan_data(
    table: &AiTable,
    length_by_prefix: &[u8; 100],
    sym: Symbology,
    data_str: &str,
    add_check_digit: bool,
) -> Result<String, EngineError> {
    let mut out = String::new();

    match sym {
        Symbology::Qr | Symbology::Dm => {
            let is_gs1 = data_str.starts_with('^');
            let prefix = match (sym, is_gs1) {
                (Symbology::Qr, true) => "]Q3",
                (Symbology::Qr, false) => "]Q1",
                (Symbology::Dm, true) => "]d2",
                (Symbology::Dm, false) => "]d1",
                _ => unreachable!(),
            };
            out.push_str(prefix);
            scancat(&mut out, data_str);
        }

        Symbology::Gs1_128CcA | Symbology::Gs1_128CcC => match data_str.find('|') {
            None => {
                if !data_str.starts_with('^') {
                    return Err(generate_failure("Linear component must be AI data"));
                }
                out.push_str("]C1");
                scancat(&mut out, data_str);
            }
            Some(sep) => generate_composite_ai(&mut out, table, length_by_prefix, &data_str[..sep], &data_str[sep + 1..])?,
        },

        Symbology::DataBarExpanded => match data_str.find('|') {
            None => {
                if !data_str.starts_with('^') {
                    return Err(generate_failure("Linear component must be AI data"));
                }
                out.push_str("]e0");
                scancat(&mut out, data_str);
            }
            Some(sep) => generate_composite_ai(&mut out, table, length_by_prefix, &data_str[..sep], &data_str[sep + 1..])?,
        },

        Symbology::DataBarOmni
        | Symbology::DataBarTruncated
        | Symbology::DataBarStacked
        | Symbology::DataBarStackedOmni
        | Symbology::DataBarLimited => {
            let (linear, cc) = split_cc(data_str);
            let primary = if sym == Symbology::DataBarLimited {
                normalise_rss_lim(linear, add_check_digit)?
            } else {
                normalise_rss14(linear, add_check_digit)?
            };
            out.push_str("]e001");
            scancat(&mut out, &primary);
            if let Some(cc) = cc {
                if !cc.starts_with('^') {
                    return Err(generate_failure("Composite component must be AI data"));
                }
                scancat(&mut out, cc);
            }
        }

        Symbology::UpcA | Symbology::UpcE | Symbology::Ean13 | Symbology::Ean8 => {
            let (linear, cc) = split_cc(data_str);
            let (primary, prefix) = match sym {
                Symbology::Ean8 => (normalise_ean8(linear, add_check_digit)?, "]E4"),
                Symbology::UpcE => (normalise_upce(linear, add_check_digit)?, "]E00"),
                _ => (normalise_ean13(linear, add_check_digit, sym == Symbology::Ean13)?, "]E0"),
            };
            out.push_str(prefix);
            scancat(&mut out, &primary);
            if let Some(cc) = cc {
                if !cc.starts_with('^') {
                    return Err(generate_failure("Composite component must be AI data"));
                }
                out.push_str("|]e0");
                scancat(&mut out, cc);
            }
        }
    }

    Ok(out)
}

fn split_cc(data_str: &str) -> (&str, Option<&str>) {
    match data_str.find('|') {
        Some(i) => (&data_str[..i], Some(&data_str[i + 1..])),
        None => (data_str, None),
    }
}

fn process_failure(msg: impl Into<String>) -> EngineError {
    EngineError::new(ErrorKind::ScanDataUnsupportedSymId, msg.into())
}

fn missing_sym_id_failure(msg: impl Into<String>) -> EngineError {
    EngineError::new(ErrorKind::ScanDataMissingSymId, msg.into())
}

fn build_ai_data_str(raw: &str) -> Result<String, EngineError> {
    if raw.contains('^') {
        return Err(EngineError::new(
            ErrorKind::IllegalSeparatorInValue,
            "Scan data contains illegal ^ character",
        ));
    }
    let mut s = String::with_capacity(raw.len() + 1);
    s.push('^');
    for c in raw.chars() {
        s.push(if c == '\u{1D}' { '^' } else { c });
    }
    Ok(s)
}

fn finish_ai_mode(
    table: &AiTable,
    length_by_prefix: &[u8; 100],
    sym: Symbology,
    prefix: &str,
    raw_ai_data: &str,
    permit_unknown_ais: bool,
) -> Result<(Symbology, String, Vec<ExtractedAi>), EngineError> {
    let ai_part = build_ai_data_str(raw_ai_data)?;
    let mut extracted = process_ai_data(table, length_by_prefix, &ai_part, true, permit_unknown_ais)?;

    let offset = prefix.len();
    if offset > 0 {
        for e in &mut extracted {
            e.ai_offset += offset;
            e.value_offset += offset;
        }
    }

    let mut data_str = String::with_capacity(prefix.len() + ai_part.len());
    data_str.push_str(prefix);
    data_str.push_str(&ai_part);
    Ok((sym, data_str, extracted))
}

/// Mirrors `gs1_processScanData`: parses a captured scan (symbology
/// identifier plus payload) into a symbology, normalized `data_str`, and
/// (for AI-bearing symbologies) the extracted AI list.
///
/// GS1 Digital Link URI detection/extraction for plain (non-AI) scan data is
/// left to the caller (the engine context owns the `DigitalLinkResolver`).
pub fn process_scan_data(
    table: &AiTable,
    length_by_prefix: &[u8; 100],
    scan_data: &str,
    permit_unknown_ais: bool,
) -> Result<(Symbology, String, Vec<ExtractedAi>), EngineError> {
    if !scan_data.starts_with(']') || scan_data.len() < 3 {
        return Err(missing_sym_id_failure("Missing symbology identifier"));
    }

    let ident = &scan_data[..3];
    let entry = SYM_ID_TABLE
        .iter()
        .find(|e| e.identifier == ident)
        .ok_or_else(|| process_failure("Unsupported symbology identifier"))?;
    let sym = entry.default_sym;
    let rest = &scan_data[3..];

    if matches!(sym, Symbology::Ean13 | Symbology::Ean8) {
        let primary_len = if sym == Symbology::Ean13 { 13 } else { 8 };
        if rest.len() < primary_len {
            return Err(process_failure("Primary scan data is too short"));
        }

        let cc = if rest.len() >= primary_len + 4 && &rest[primary_len..primary_len + 4] == "|]e0" {
            Some(&rest[primary_len + 4..])
        } else if rest.len() > primary_len {
            return Err(process_failure("Primary message is too long"));
        } else {
            None
        };

        let primary = &rest[..primary_len];
        if !primary.bytes().all(|b| b.is_ascii_digit()) {
            return Err(process_failure("Primary message number only contain digits"));
        }
        if check_digit(primary).is_err() {
            return Err(process_failure("Primary message check digit is incorrect"));
        }

        return match cc {
            None => Ok((sym, primary.to_string(), Vec::new())),
            Some(cc_data) => {
                let prefix = format!("{primary}|");
                finish_ai_mode(table, length_by_prefix, sym, &prefix, cc_data, permit_unknown_ais)
            }
        };
    }

    if entry.ai_mode {
        return finish_ai_mode(table, length_by_prefix, sym, "", rest, permit_unknown_ais);
    }

    // Plain data: re-escape a leading run of backslashes followed by `^` so
    // it can't be mistaken for our internal FNC1 sentinel later.
    let mut q = rest;
    while let Some(stripped) = q.strip_prefix('\\') {
        q = stripped;
    }
    let mut data_str = String::with_capacity(rest.len() + 1);
    if q.starts_with('^') {
        data_str.push('\\');
    }
    data_str.push_str(rest);

    Ok((sym, data_str, Vec::new()))
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
    fn scancat_strips_trailing_fnc1_and_converts_embedded() {
        let mut out = String::new();
        scancat(&mut out, "^011231231231233310ABC123^99TESTING^");
        assert_eq!(out, "011231231231233310ABC123\u{1D}99TESTING");
    }

    #[test]
    fn scancat_drops_one_leading_backslash_before_caret() {
        let mut out = String::new();
        scancat(&mut out, "\\^TESTING");
        assert_eq!(out, "^TESTING");

        let mut out2 = String::new();
        scancat(&mut out2, "\\\\^TESTING");
        assert_eq!(out2, "\\^TESTING");
    }

    #[test]
    fn generate_qr_plain_and_gs1() {
        let (table, lbp) = setup();
        assert_eq!(
            generate_scan_data(&table, &lbp, Symbology::Qr, "TESTING", false).unwrap(),
            "]Q1TESTING"
        );
        assert_eq!(
            generate_scan_data(
                &table,
                &lbp,
                Symbology::Qr,
                "^011231231231233310ABC123^99TESTING",
                false
            )
            .unwrap(),
            "]Q3011231231231233310ABC123\u{1D}99TESTING"
        );
    }

    #[test]
    fn generate_databar_expanded_composite_with_variable_length_last_linear_ai() {
        let (table, lbp) = setup();
        let out = generate_scan_data(
            &table,
            &lbp,
            Symbology::DataBarExpanded,
            "^011231231231233310ABC123^99TESTING|^98COMPOSITE^97XYZ",
            false,
        )
        .unwrap();
        assert_eq!(
            out,
            "]e0011231231231233310ABC123\u{1D}99TESTING\u{1D}98COMPOSITE\u{1D}97XYZ"
        );
    }

    #[test]
    fn generate_databar_expanded_composite_with_fixed_length_last_linear_ai() {
        let (table, lbp) = setup();
        let out = generate_scan_data(
            &table,
            &lbp,
            Symbology::DataBarExpanded,
            "^011231231231233310ABC123^11991225|^98COMPOSITE^97XYZ",
            false,
        )
        .unwrap();
        assert_eq!(out, "]e0011231231231233310ABC123\u{1D}1199122598COMPOSITE\u{1D}97XYZ");
    }

    #[test]
    fn generate_upca_with_composite() {
        let (table, lbp) = setup();
        let out = generate_scan_data(
            &table,
            &lbp,
            Symbology::UpcA,
            "416000336108|^99COMPOSITE^98XYZ",
            false,
        )
        .unwrap();
        assert_eq!(out, "]E00416000336108|]e099COMPOSITE\u{1D}98XYZ");
    }

    #[test]
    fn process_ean13_primary_only() {
        let (table, lbp) = setup();
        let (sym, data_str, extracted) =
            process_scan_data(&table, &lbp, "]E02112345678900", false).unwrap();
        assert_eq!(sym, Symbology::Ean13);
        assert_eq!(data_str, "2112345678900");
        assert!(extracted.is_empty());
    }

    #[test]
    fn process_ean13_bad_check_digit_fails() {
        let (table, lbp) = setup();
        assert!(process_scan_data(&table, &lbp, "]E02112345678901", false).is_err());
    }

    #[test]
    fn process_ean13_with_composite() {
        let (table, lbp) = setup();
        let (sym, data_str, extracted) = process_scan_data(
            &table,
            &lbp,
            "]E02112345678900|]e099COMPOSITE\u{1D}98XYZ",
            false,
        )
        .unwrap();
        assert_eq!(sym, Symbology::Ean13);
        assert_eq!(data_str, "2112345678900|^99COMPOSITE^98XYZ");
        assert_eq!(extracted.len(), 2);
        assert_eq!(extracted[0].ai(&data_str), "99");
        assert_eq!(extracted[0].value(&data_str), "COMPOSITE");
    }

    #[test]
    fn process_unknown_symbology_is_rejected() {
        let (table, lbp) = setup();
        assert!(process_scan_data(&table, &lbp, "]XX", false).is_err());
    }

    #[test]
    fn process_gs1_128_round_trips_ai_data() {
        let (table, lbp) = setup();
        let (sym, data_str, extracted) = process_scan_data(
            &table,
            &lbp,
            "]C1011231231231233310ABC123\u{1D}99TESTING",
            false,
        )
        .unwrap();
        assert_eq!(sym, Symbology::Gs1_128CcA);
        assert_eq!(data_str, "^011231231231233310ABC123^99TESTING");
        assert_eq!(extracted.len(), 3);
    }
}
