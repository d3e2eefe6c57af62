//! Error types.
//!
//! `ErrorKind` is the structured, internal classification described in the
//! engine design (ParseStructure, UnknownAI, LinterFailure, ...). It never
//! escapes the crate directly: callers see one of the four `GS1EncoderError`
//! variants, matching the public error surface of the C-backed binding this
//! crate supersedes.

use std::fmt;

use thiserror::Error;

/// Structured classification of an engine-internal failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    ParseStructure,
    UnknownAI,
    AiValueTooShort,
    AiValueTooLong,
    IllegalSeparatorInValue,
    LinterFailure(LinterErrorKind, usize, usize),
    TableBroken,
    TooManyAIs,
    MutexViolation(String, String),
    RequisitesUnsatisfied(String, String),
    RepeatMismatch(String),
    ScanDataMissingSymId,
    ScanDataUnsupportedSymId,
    ScanDataBadPrimary,
}

/// The reason a linter rejected a component value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinterErrorKind {
    NotNumeric,
    InvalidCharacter,
    IncorrectCheckDigit,
    InvalidDate,
    InvalidIsoCountryCode,
    InvalidIban,
    InvalidLatitude,
    InvalidLongitude,
    InvalidCouponCode,
    NonConformantLength,
}

impl fmt::Display for LinterErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LinterErrorKind::NotNumeric => "not numeric",
            LinterErrorKind::InvalidCharacter => "invalid character",
            LinterErrorKind::IncorrectCheckDigit => "incorrect check digit",
            LinterErrorKind::InvalidDate => "invalid date",
            LinterErrorKind::InvalidIsoCountryCode => "invalid ISO country code",
            LinterErrorKind::InvalidIban => "invalid IBAN",
            LinterErrorKind::InvalidLatitude => "invalid latitude",
            LinterErrorKind::InvalidLongitude => "invalid longitude",
            LinterErrorKind::InvalidCouponCode => "invalid coupon code",
            LinterErrorKind::NonConformantLength => "non-conformant length",
        };
        f.write_str(s)
    }
}

/// Internal error carrying both a human-readable message and the structured
/// kind, plus the markup string for linter failures. Mirrors
/// `ctx->errMsg`/`ctx->linterErr`/`ctx->linterErrMarkup` in the C source.
#[derive(Debug, Clone)]
pub struct EngineError {
    pub kind: ErrorKind,
    pub message: String,
    pub markup: Option<String>,
}

impl EngineError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        EngineError {
            kind,
            message: message.into(),
            markup: None,
        }
    }

    pub fn with_markup(mut self, markup: impl Into<String>) -> Self {
        self.markup = Some(markup.into());
        self
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EngineError {}

/// Public error type, matching the variants of the teacher contrib binding's
/// `GS1EncoderError`.
#[derive(Error, Debug)]
pub enum GS1EncoderError {
    #[error("{0}")]
    GS1GeneralError(String),
    #[error("{0}")]
    GS1ParameterError(String),
    #[error("{0}")]
    GS1ScanDataError(String),
    #[error("{0}")]
    GS1DigitalLinkError(String),
    /// A feature that is an explicit Non-goal of the core engine (e.g. the
    /// GS1 Digital Link codec) was invoked without an external collaborator
    /// configured to provide it.
    #[error("{0}")]
    Unsupported(String),
}

impl From<EngineError> for GS1EncoderError {
    fn from(e: EngineError) -> Self {
        GS1EncoderError::GS1ParameterError(e.message)
    }
}
