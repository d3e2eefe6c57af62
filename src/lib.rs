//! GS1 Syntax Engine
//!
//! Validates and converts between GS1 bracketed AI data (`(01)12345...`),
//! unbracketed AI data (`^` = FNC1), and barcode scan data (symbology
//! identifier plus payload). [`GS1Encoder`] is the single entry point;
//! everything else is organized by processing stage (AI table, lookup,
//! component validator, bracketed/unbracketed/scan-data codecs, cross-AI
//! validation, HRI rendering, Digital Link boundary).

pub mod ai_table;
pub mod bracketed;
pub mod constants;
pub mod context;
pub mod cross_ai;
pub mod digital_link;
pub mod error;
pub mod extracted;
pub mod hri;
pub mod linters;
pub mod lookup;
pub mod scandata;
pub mod unbracketed;
pub mod validate;

pub use context::EngineContext;
pub use cross_ai::Validation;
pub use digital_link::DigitalLinkResolver;
pub use error::GS1EncoderError;
pub use scandata::Symbology;

/// A validate/convert session. Not `Send`/`Sync`: each thread that wants to
/// work with GS1 data should own its own `GS1Encoder`.
pub struct GS1Encoder {
    ctx: EngineContext,
}

const VERSION: &str = env!("CARGO_PKG_VERSION");

impl GS1Encoder {
    pub fn new() -> Result<Self, GS1EncoderError> {
        Ok(GS1Encoder {
            ctx: EngineContext::new(),
        })
    }

    /// Installs the collaborator responsible for Digital Link URI
    /// encode/decode; without one, [`GS1Encoder::get_dl_uri`] and URI-typed
    /// [`GS1Encoder::set_data_str`] input return [`GS1EncoderError::Unsupported`].
    pub fn with_dl_resolver(mut self, resolver: Box<dyn DigitalLinkResolver>) -> Self {
        self.ctx.set_dl_resolver(resolver);
        self
    }

    pub fn get_version(&self) -> &'static str {
        VERSION
    }

    pub fn get_sym(&self) -> Option<Symbology> {
        self.ctx.sym
    }

    pub fn set_sym(&mut self, sym: Symbology) {
        self.ctx.sym = Some(sym);
    }

    pub fn get_add_check_digit(&self) -> bool {
        self.ctx.add_check_digit
    }

    pub fn set_add_check_digit(&mut self, value: bool) {
        self.ctx.add_check_digit = value;
    }

    pub fn get_permit_unknown_ais(&self) -> bool {
        self.ctx.permit_unknown_ais
    }

    pub fn set_permit_unknown_ais(&mut self, value: bool) {
        self.ctx.permit_unknown_ais = value;
    }

    pub fn get_validation_enabled(&self, validation: Validation) -> bool {
        self.ctx.get_validation_enabled(validation)
    }

    pub fn set_validation_enabled(&mut self, validation: Validation, enabled: bool) -> Result<(), GS1EncoderError> {
        self.ctx.set_validation_enabled(validation, enabled).map_err(Into::into)
    }

    pub fn get_include_data_titles_in_hri(&self) -> bool {
        self.ctx.include_data_titles_in_hri
    }

    pub fn set_include_data_titles_in_hri(&mut self, value: bool) {
        self.ctx.include_data_titles_in_hri = value;
    }

    pub fn get_data_str(&self) -> &str {
        self.ctx.data_str()
    }

    pub fn set_data_str(&mut self, value: &str) -> Result<(), GS1EncoderError> {
        self.ctx.set_data_str(value).map_err(Into::into)
    }

    pub fn get_ai_data_str(&self) -> Option<String> {
        self.ctx.get_ai_data_str()
    }

    pub fn set_ai_data_str(&mut self, value: &str) -> Result<(), GS1EncoderError> {
        self.ctx.set_ai_data_str(value).map_err(Into::into)
    }

    pub fn get_scan_data(&self) -> Result<Option<String>, GS1EncoderError> {
        self.ctx.get_scan_data().map_err(Into::into)
    }

    pub fn set_scan_data(&mut self, value: &str) -> Result<(), GS1EncoderError> {
        self.ctx
            .set_scan_data(value)
            .map_err(|e| GS1EncoderError::GS1ScanDataError(e.message))
    }

    pub fn get_dl_uri(&self, stem: Option<&str>) -> Result<String, GS1EncoderError> {
        self.ctx
            .get_dl_uri(stem)
            .map_err(|e| GS1EncoderError::GS1DigitalLinkError(e.message))
    }

    pub fn get_hri(&self) -> Vec<String> {
        self.ctx.get_hri()
    }

    /// Query parameters ignored while resolving the last Digital Link URI
    /// passed to [`GS1Encoder::set_data_str`], if any.
    pub fn get_dl_ignored_query_params(&self) -> &[String] {
        self.ctx.get_dl_ignored_query_params()
    }

    /// Markup locating the error region in the component value that failed
    /// linting during the most recent call, e.g. `"(01)|9501234567890|2"`.
    /// `None` if the last call succeeded or failed for a non-linter reason.
    pub fn get_err_markup(&self) -> Option<&str> {
        self.ctx.get_err_markup()
    }
}

impl Default for GS1Encoder {
    fn default() -> Self {
        Self::new().expect("engine initialisation cannot fail")
    }
}
