//! Digital Link URI boundary (`spec.md` §2.10, §4.8).
//!
//! Digital Link URI parsing/generation is a Non-goal of the core engine: the
//! teacher's contrib binding (`contrib/rust/lib.rs`) exposes `get_dl_uri`/
//! `get_dl_ignored_query_params` by calling through to `libgs1encoders`'s C
//! implementation, which this crate does not carry. Rather than drop the
//! methods, they're kept as a trait boundary the engine calls through but
//! never implements, so the public method names stay stable for anyone
//! porting code from the C-backed binding.

use crate::error::EngineError;

/// Error type for Digital Link URI translation, reusing the engine's
/// structured error since resolvers run inside the same failure/markup
/// machinery as the rest of the engine.
pub type DlError = EngineError;

/// Implemented by whatever layer knows how to turn a GS1 Digital Link URI
/// into an unbracketed element string (leading `^`, `^`-separated AIs) and
/// back. No production resolver ships in this crate; callers that never
/// touch DL URIs can skip wiring one in.
pub trait DigitalLinkResolver {
    /// Converts a `https://`/`http://` URI into an unbracketed AI element
    /// string for `process_unbracketed` to consume.
    fn extract_ais_from_url(&self, url: &str) -> Result<String, DlError>;

    /// Converts an unbracketed AI element string into a Digital Link URI
    /// rooted at `stem` (e.g. `https://id.gs1.org`).
    fn uri_from_ai_data(&self, stem: &str, ai_data: &str) -> Result<String, DlError>;

    /// Query parameters present on `url` that are not GS1 AIs and were
    /// dropped during the last `extract_ais_from_url` call. Defaults to
    /// none; a resolver that performs no DL URI parsing never needs this.
    fn ignored_query_params(&self, url: &str) -> Vec<String> {
        let _ = url;
        Vec::new()
    }
}

pub fn looks_like_uri(data_str: &str) -> bool {
    data_str.starts_with("https://") || data_str.starts_with("http://")
}

#[cfg(test)]
pub(crate) struct NullResolver;

#[cfg(test)]
impl DigitalLinkResolver for NullResolver {
    fn extract_ais_from_url(&self, _url: &str) -> Result<String, DlError> {
        Err(EngineError::new(
            crate::error::ErrorKind::ParseStructure,
            "Digital Link URI parsing is not wired up",
        ))
    }

    fn uri_from_ai_data(&self, _stem: &str, _ai_data: &str) -> Result<String, DlError> {
        Err(EngineError::new(
            crate::error::ErrorKind::ParseStructure,
            "Digital Link URI generation is not wired up",
        ))
    }
}

#[cfg(test)]
/// A minimal resolver good enough to exercise the boundary end-to-end:
/// understands `https://<stem>/01/<gtin>` and reports `test` as an ignored
/// query parameter, the way a real resolver would report a non-AI param.
pub(crate) struct StubResolver;

#[cfg(test)]
impl DigitalLinkResolver for StubResolver {
    fn extract_ais_from_url(&self, url: &str) -> Result<String, DlError> {
        let path = url.splitn(2, "/01/").nth(1).ok_or_else(|| {
            EngineError::new(crate::error::ErrorKind::ParseStructure, "Unrecognised DL URI")
        })?;
        let gtin = path.split(&['?', '/'][..]).next().unwrap_or("");
        Ok(format!("^01{gtin}"))
    }

    fn uri_from_ai_data(&self, stem: &str, ai_data: &str) -> Result<String, DlError> {
        let gtin = ai_data.strip_prefix("^01").ok_or_else(|| {
            EngineError::new(crate::error::ErrorKind::ParseStructure, "No GTIN to encode")
        })?;
        Ok(format!("{stem}/01/{gtin}"))
    }

    fn ignored_query_params(&self, url: &str) -> Vec<String> {
        if url.contains('?') {
            vec!["test".to_string()]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_http_and_https() {
        assert!(looks_like_uri("https://example.com/01/12345"));
        assert!(looks_like_uri("http://example.com/01/12345"));
        assert!(!looks_like_uri("^0112345678901231"));
    }

    #[test]
    fn stub_resolver_extracts_gtin_and_round_trips() {
        let resolver = StubResolver;
        let ai_data = resolver
            .extract_ais_from_url("https://id.gs1.org/01/09521234543213")
            .unwrap();
        assert_eq!(ai_data, "^0109521234543213");
        let uri = resolver.uri_from_ai_data("https://id.gs1.org", &ai_data).unwrap();
        assert_eq!(uri, "https://id.gs1.org/01/09521234543213");
    }

    #[test]
    fn stub_resolver_reports_ignored_query_params() {
        let resolver = StubResolver;
        assert!(resolver
            .ignored_query_params("https://id.gs1.org/01/09521234543213?test=1")
            .contains(&"test".to_string()));
        assert!(resolver
            .ignored_query_params("https://id.gs1.org/01/09521234543213")
            .is_empty());
    }
}
