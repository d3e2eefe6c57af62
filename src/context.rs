//! Engine Context (`spec.md` §2.1, §9).
//!
//! Owns the tables and per-call state a single validate/convert session
//! needs: the AI table (and its derived prefix-length table), the
//! validation-pass table, engine options, and the last `data_str`/AI-list
//! pair produced by whichever entry point (bracketed, unbracketed, or scan
//! data) was last invoked. Mirrors the single `gs1_encoder` struct in the
//! C source; unlike it, nothing here is shared across threads, so no
//! internal locking is attempted (matching `spec.md`'s single-context,
//! single-thread concurrency model).

use crate::ai_table::AiTable;
use crate::bracketed::parse_ai_data;
use crate::cross_ai::{default_validation_table, validate_ais, Validation, ValidationEntry};
use crate::digital_link::DigitalLinkResolver;
use crate::error::{EngineError, ErrorKind};
use crate::extracted::ExtractedAi;
use crate::hri::build_hri;
use crate::scandata::{generate_scan_data, process_scan_data, Symbology};
use crate::unbracketed::process_ai_data;
use log::{debug, trace};

pub struct EngineContext {
    ai_table: AiTable,
    length_by_prefix: [u8; 100],
    validation_table: Vec<ValidationEntry>,

    pub permit_unknown_ais: bool,
    pub add_check_digit: bool,
    pub include_data_titles_in_hri: bool,
    pub sym: Option<Symbology>,

    data_str: String,
    /// The `^`-prefixed unbracketed AI data that `ai_data`'s offsets are
    /// relative to. Equal to `data_str` except when `data_str` is a Digital
    /// Link URI, in which case this holds the element string the resolver
    /// extracted from it (`data_str` stays the literal URI the caller set).
    element_str: String,
    ai_data: Vec<ExtractedAi>,
    last_err_markup: Option<String>,
    dl_ignored_query_params: Vec<String>,

    dl_resolver: Option<Box<dyn DigitalLinkResolver>>,
}

impl EngineContext {
    pub fn new() -> Self {
        let ai_table = AiTable::embedded();
        let length_by_prefix = ai_table.compute_length_by_prefix();
        EngineContext {
            ai_table,
            length_by_prefix,
            validation_table: default_validation_table(),
            permit_unknown_ais: false,
            add_check_digit: false,
            include_data_titles_in_hri: false,
            sym: None,
            data_str: String::new(),
            element_str: String::new(),
            ai_data: Vec::new(),
            last_err_markup: None,
            dl_ignored_query_params: Vec::new(),
            dl_resolver: None,
        }
    }

    pub fn set_dl_resolver(&mut self, resolver: Box<dyn DigitalLinkResolver>) {
        self.dl_resolver = Some(resolver);
    }

    fn reset(&mut self) {
        self.data_str.clear();
        self.element_str.clear();
        self.ai_data.clear();
    }

    fn run_cross_ai_validation(&self) -> Result<(), EngineError> {
        validate_ais(&self.ai_data, &self.element_str, &self.validation_table)
    }

    pub fn data_str(&self) -> &str {
        &self.data_str
    }

    pub fn ai_data(&self) -> &[ExtractedAi] {
        &self.ai_data
    }

    /// Markup for the linter failure behind the most recent failed call, or
    /// `None` if the last call succeeded or failed for a non-linter reason.
    pub fn get_err_markup(&self) -> Option<&str> {
        self.last_err_markup.as_deref()
    }

    pub fn get_dl_ignored_query_params(&self) -> &[String] {
        &self.dl_ignored_query_params
    }

    /// Accepts `(AI)value(AI)value...` bracketed input (`spec.md` §4.4).
    pub fn set_ai_data_str(&mut self, ai_data: &str) -> Result<(), EngineError> {
        trace!("set_ai_data_str: {}", ai_data);
        self.reset();
        self.last_err_markup = None;
        let result = (|| {
            let (data_str, extracted) =
                parse_ai_data(&self.ai_table, &self.length_by_prefix, ai_data, self.permit_unknown_ais)?;
            self.element_str = data_str.clone();
            self.data_str = data_str;
            self.ai_data = extracted;
            self.run_cross_ai_validation()
        })();
        if let Err(ref e) = result {
            debug!("set_ai_data_str failed: {}", e.message);
            self.last_err_markup = e.markup.clone();
            self.reset();
        }
        result
    }

    /// Returns the bracketed rendering of the current `data_str`, or `None`
    /// when it was not produced from (or does not resemble) AI data.
    pub fn get_ai_data_str(&self) -> Option<String> {
        if self.ai_data.is_empty() {
            return None;
        }
        let mut out = String::new();
        for e in &self.ai_data {
            out.push('(');
            out.push_str(e.ai(&self.element_str));
            out.push(')');
            out.push_str(e.value(&self.element_str));
        }
        Some(out)
    }

    /// Accepts a raw `data_str`: `^`-led unbracketed AI data, or (if it
    /// doesn't start with `^`) plain data, optionally a Digital Link URI.
    pub fn set_data_str(&mut self, data_str: &str) -> Result<(), EngineError> {
        trace!("set_data_str: {}", data_str);
        self.reset();
        self.last_err_markup = None;
        self.dl_ignored_query_params.clear();
        let result = (|| {
            if crate::digital_link::looks_like_uri(data_str) {
                let resolver = self.dl_resolver.as_ref().ok_or_else(|| {
                    EngineError::new(
                        ErrorKind::ParseStructure,
                        "No Digital Link resolver is configured",
                    )
                })?;
                let extracted = resolver.extract_ais_from_url(data_str)?;
                self.dl_ignored_query_params = resolver.ignored_query_params(data_str);
                self.ai_data = process_ai_data(
                    &self.ai_table,
                    &self.length_by_prefix,
                    &extracted,
                    true,
                    self.permit_unknown_ais,
                )?;
                self.element_str = extracted;
                self.data_str = data_str.to_string();
                self.run_cross_ai_validation()?;
                return Ok(());
            }

            if data_str.starts_with('^') {
                self.ai_data = process_ai_data(
                    &self.ai_table,
                    &self.length_by_prefix,
                    data_str,
                    true,
                    self.permit_unknown_ais,
                )?;
                self.element_str = data_str.to_string();
                self.run_cross_ai_validation()?;
            }

            self.data_str = data_str.to_string();
            Ok(())
        })();
        if let Err(ref e) = result {
            debug!("set_data_str failed: {}", e.message);
            self.last_err_markup = e.markup.clone();
            self.reset();
        }
        result
    }

    pub fn get_scan_data(&self) -> Result<Option<String>, EngineError> {
        let Some(sym) = self.sym else {
            return Ok(None);
        };
        let out = generate_scan_data(&self.ai_table, &self.length_by_prefix, sym, &self.data_str, self.add_check_digit)?;
        Ok(Some(out))
    }

    pub fn set_scan_data(&mut self, scan_data: &str) -> Result<(), EngineError> {
        trace!("set_scan_data: {}", scan_data);
        self.reset();
        self.last_err_markup = None;
        let result = (|| {
            let (sym, data_str, extracted) = process_scan_data(
                &self.ai_table,
                &self.length_by_prefix,
                scan_data,
                self.permit_unknown_ais,
            )?;
            if !extracted.is_empty() {
                validate_ais(&extracted, &data_str, &self.validation_table)?;
            }
            self.sym = Some(sym);
            self.element_str = data_str.clone();
            self.data_str = data_str;
            self.ai_data = extracted;
            Ok(())
        })();
        if let Err(ref e) = result {
            debug!("set_scan_data failed: {}", e.message);
            self.last_err_markup = e.markup.clone();
            self.sym = None;
            self.reset();
        }
        result
    }

    pub fn get_hri(&self) -> Vec<String> {
        build_hri(&self.ai_data, &self.element_str, self.include_data_titles_in_hri)
    }

    pub fn get_dl_uri(&self, stem: Option<&str>) -> Result<String, EngineError> {
        let resolver = self.dl_resolver.as_ref().ok_or_else(|| {
            EngineError::new(
                ErrorKind::ParseStructure,
                "No Digital Link resolver is configured",
            )
        })?;
        let stem = stem.unwrap_or("https://id.gs1.org");
        resolver.uri_from_ai_data(stem, &self.element_str)
    }

    pub fn get_validation_enabled(&self, which: Validation) -> bool {
        self.validation_table
            .iter()
            .find(|e| e.kind == which)
            .map(|e| e.enabled)
            .unwrap_or(false)
    }

    pub fn set_validation_enabled(&mut self, which: Validation, enabled: bool) -> Result<(), EngineError> {
        let entry = self
            .validation_table
            .iter_mut()
            .find(|e| e.kind == which)
            .ok_or_else(|| EngineError::new(ErrorKind::ParseStructure, "Unknown validation"))?;
        if entry.locked {
            return Err(EngineError::new(
                ErrorKind::ParseStructure,
                format!("{} validation cannot be disabled", entry.name()),
            ));
        }
        entry.enabled = enabled;
        Ok(())
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ai_data_round_trips_through_bracketed_and_back() {
        let mut ctx = EngineContext::new();
        ctx.set_ai_data_str("(01)12312312312319(99)TESTING123").unwrap();
        assert_eq!(ctx.data_str(), "^011231231231231999TESTING123");
        assert_eq!(
            ctx.get_ai_data_str().unwrap(),
            "(01)12312312312319(99)TESTING123"
        );
    }

    #[test]
    fn requisite_failure_surfaces_through_set_ai_data_str() {
        let mut ctx = EngineContext::new();
        let err = ctx.set_ai_data_str("(21)ABC123").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::RequisitesUnsatisfied(..)));
    }

    #[test]
    fn scan_data_round_trips() {
        let mut ctx = EngineContext::new();
        ctx.set_ai_data_str("(01)12312312312319(99)TESTING123").unwrap();
        ctx.sym = Some(Symbology::Dm);
        let scan = ctx.get_scan_data().unwrap().unwrap();
        assert_eq!(scan, "]d2011231231231231999TESTING123");

        let mut ctx2 = EngineContext::new();
        ctx2.set_scan_data(&scan).unwrap();
        assert_eq!(ctx2.data_str(), "^011231231231231999TESTING123");
    }

    #[test]
    fn requisite_ais_validation_can_be_disabled() {
        let mut ctx = EngineContext::new();
        ctx.set_validation_enabled(Validation::RequisiteAis, false).unwrap();
        assert!(ctx.set_ai_data_str("(21)ABC123").is_ok());
    }

    #[test]
    fn mutex_ais_validation_cannot_be_disabled() {
        let mut ctx = EngineContext::new();
        assert!(ctx.set_validation_enabled(Validation::MutexAis, false).is_err());
    }

    #[test]
    fn dl_uri_data_str_stays_literal_while_ai_data_is_derived() {
        use crate::digital_link::StubResolver;
        let mut ctx = EngineContext::new();
        ctx.set_dl_resolver(Box::new(StubResolver));
        ctx.set_data_str("https://id.gs1.org/01/09521234543213?test=1").unwrap();

        assert_eq!(ctx.data_str(), "https://id.gs1.org/01/09521234543213?test=1");
        assert_eq!(ctx.get_ai_data_str().unwrap(), "(01)09521234543213");
        assert_eq!(ctx.get_hri(), vec!["(01) 09521234543213"]);
        assert_eq!(ctx.get_dl_ignored_query_params().to_vec(), vec!["test".to_string()]);
        assert_eq!(
            ctx.get_dl_uri(Some("https://example.com")).unwrap(),
            "https://example.com/01/09521234543213"
        );
    }

    #[test]
    fn hri_reflects_include_data_titles_flag() {
        let mut ctx = EngineContext::new();
        ctx.set_ai_data_str("(01)12312312312319(99)TESTING123").unwrap();
        assert_eq!(
            ctx.get_hri(),
            vec!["(01) 12312312312319", "(99) TESTING123"]
        );
        ctx.include_data_titles_in_hri = true;
        assert_eq!(
            ctx.get_hri(),
            vec!["GTIN (01) 12312312312319", "INTERNAL (99) TESTING123"]
        );
    }
}
