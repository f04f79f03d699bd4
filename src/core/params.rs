// LogLens - core/params.rs
//
// Launch-parameter ingestion. Parses the deep-link parameter string
// (`type`, `q`, `its`, `ite`) into `NavParams`, the explicit input to
// page initialisation. Malformed values degrade silently to defaults:
// they are logged at warn level and never abort startup.

use crate::core::model::LogSource;
use crate::util::constants;
use crate::util::error::ParamError;
use chrono::{DateTime, Utc};

/// Navigation parameters, populated once at launch.
///
/// Absent parameters stay `None` and leave the corresponding UI
/// element at its default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavParams {
    /// Initial editor text (`q`).
    pub query: Option<String>,

    /// Initial log source (`type`).
    pub source: Option<LogSource>,

    /// Range start (`its`, RFC 3339).
    pub range_start: Option<DateTime<Utc>>,

    /// Range end (`ite`, RFC 3339).
    pub range_end: Option<DateTime<Utc>>,
}

impl NavParams {
    /// Parse a `key=value&key=value` parameter string.
    ///
    /// Unknown keys are ignored. Malformed values produce a warning
    /// and leave the field at its default; parse failures are returned
    /// alongside the result for callers that want to surface them.
    pub fn parse(raw: &str) -> (NavParams, Vec<ParamError>) {
        let mut params = NavParams::default();
        let mut errors = Vec::new();

        for pair in raw.split('&').filter(|p| !p.is_empty()) {
            let Some((key, value)) = pair.split_once('=') else {
                errors.push(ParamError::MalformedPair {
                    pair: pair.to_string(),
                });
                continue;
            };

            match key {
                k if k == constants::PARAM_QUERY => {
                    params.query = Some(value.to_string());
                }
                k if k == constants::PARAM_SOURCE => match LogSource::from_param(value) {
                    Some(source) => params.source = Some(source),
                    None => errors.push(ParamError::UnknownSource {
                        value: value.to_string(),
                    }),
                },
                k if k == constants::PARAM_RANGE_START => {
                    match parse_instant(constants::PARAM_RANGE_START, value) {
                        Ok(instant) => params.range_start = Some(instant),
                        Err(e) => errors.push(e),
                    }
                }
                k if k == constants::PARAM_RANGE_END => {
                    match parse_instant(constants::PARAM_RANGE_END, value) {
                        Ok(instant) => params.range_end = Some(instant),
                        Err(e) => errors.push(e),
                    }
                }
                other => {
                    tracing::debug!(key = other, "Ignoring unknown launch parameter");
                }
            }
        }

        for error in &errors {
            tracing::warn!(error = %error, "Launch parameter ignored");
        }

        (params, errors)
    }

    /// The initial range, present only when BOTH `its` and `ite` were
    /// supplied. A lone bound is treated as absent.
    pub fn range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.range_start, self.range_end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

fn parse_instant(name: &'static str, value: &str) -> Result<DateTime<Utc>, ParamError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ParamError::BadTimestamp {
            name,
            value: value.to_string(),
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_q_populates_query() {
        let (params, errors) = NavParams::parse("type=api&q=some_query");
        assert!(errors.is_empty());
        assert_eq!(params.query.as_deref(), Some("some_query"));
        assert_eq!(params.source, Some(LogSource::Api));
    }

    #[test]
    fn test_its_ite_populate_range() {
        let (params, errors) =
            NavParams::parse("its=2026-08-05T10:00:00Z&ite=2026-08-06T10:00:00Z");
        assert!(errors.is_empty());
        let (start, end) = params.range().unwrap();
        assert_eq!(start.to_rfc3339(), "2026-08-05T10:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2026-08-06T10:00:00+00:00");
    }

    #[test]
    fn test_lone_range_bound_is_ignored() {
        let (params, _) = NavParams::parse("its=2026-08-05T10:00:00Z");
        assert!(params.range().is_none());
        assert!(params.range_start.is_some());
    }

    #[test]
    fn test_malformed_timestamp_degrades_silently() {
        let (params, errors) = NavParams::parse("q=x&its=yesterday&ite=2026-08-06T10:00:00Z");
        assert_eq!(params.query.as_deref(), Some("x"));
        assert!(params.range_start.is_none());
        assert!(params.range_end.is_some());
        assert!(matches!(
            errors.as_slice(),
            [ParamError::BadTimestamp { name: "its", .. }]
        ));
    }

    #[test]
    fn test_unknown_source_degrades_silently() {
        let (params, errors) = NavParams::parse("type=mainframe&q=x");
        assert!(params.source.is_none());
        assert_eq!(params.query.as_deref(), Some("x"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_unknown_keys_and_empty_pairs_ignored() {
        let (params, errors) = NavParams::parse("ref=projectRef&&q=hello");
        assert!(errors.is_empty());
        assert_eq!(params.query.as_deref(), Some("hello"));
    }

    #[test]
    fn test_pair_without_equals_is_reported() {
        let (_, errors) = NavParams::parse("justakey");
        assert!(matches!(
            errors.as_slice(),
            [ParamError::MalformedPair { .. }]
        ));
    }

    #[test]
    fn test_empty_string_is_all_defaults() {
        let (params, errors) = NavParams::parse("");
        assert!(errors.is_empty());
        assert_eq!(params, NavParams::default());
    }
}
