//! Base URL validation and query-string encoding.

use ogc_common::{OgcError, OgcResult};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::{form_urlencoded, Url};

use crate::params::QueryParams;

/// Characters escaped by HTML form encoding: everything except `* - . _`.
pub const FORM_QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

/// Characters escaped inside a relaxed query component.
///
/// Sub-delimiters and `: / ? @` are legal unescaped in a query and are left
/// readable. `& = + # %` and space still have to be escaped for the query to
/// parse back to the same values.
pub const RELAXED_QUERY_COMPONENT: &AsciiSet = &FORM_QUERY_COMPONENT
    .remove(b'~')
    .remove(b':')
    .remove(b'/')
    .remove(b'?')
    .remove(b'@')
    .remove(b'!')
    .remove(b'$')
    .remove(b'(')
    .remove(b')')
    .remove(b',')
    .remove(b';');

/// Parse and validate a service base URL.
///
/// The base must be absolute and hierarchical with a host, e.g.
/// `http://example.com/geoserver/wfs`.
pub fn parse_base_url(base_url: &str) -> OgcResult<Url> {
    if base_url.trim().is_empty() {
        return Err(OgcError::invalid_input("base URL must not be empty"));
    }

    let url = Url::parse(base_url)
        .map_err(|e| OgcError::invalid_input(format!("invalid base URL '{}': {}", base_url, e)))?;

    if url.cannot_be_a_base() || !url.has_host() {
        return Err(OgcError::invalid_input(format!(
            "base URL '{}' is not an absolute http(s)-style URL",
            base_url
        )));
    }

    Ok(url)
}

/// Merge `params` onto the query of `base_url`.
///
/// Base pairs whose name matches one of `params` are dropped, so every name
/// in `params` appears exactly once. The remaining base pairs are kept
/// byte-for-byte ahead of the new ones. New names and values are escaped
/// with `escapes`, except values listed in `literals`, which are written as is.
pub fn merge_params(
    base_url: &str,
    params: &QueryParams,
    escapes: &'static AsciiSet,
    literals: &[&str],
) -> OgcResult<Url> {
    let mut url = parse_base_url(base_url)?;

    let mut segments: Vec<String> = url
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|segment| !segment.is_empty() && !params.contains(&segment_name(segment)))
        .map(str::to_string)
        .collect();

    segments.extend(params.iter().map(|(name, value)| {
        let value = if literals.iter().any(|literal| *literal == value) {
            value.to_string()
        } else {
            utf8_percent_encode(value, escapes).to_string()
        };
        format!("{}={}", utf8_percent_encode(name, escapes), value)
    }));

    url.set_query(Some(&segments.join("&")));
    Ok(url)
}

/// Decoded name of one raw `name=value` query segment.
fn segment_name(segment: &str) -> String {
    form_urlencoded::parse(segment.as_bytes())
        .next()
        .map(|(name, _)| name.into_owned())
        .unwrap_or_default()
}
