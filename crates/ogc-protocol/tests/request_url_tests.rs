//! Tests for WFS/WMS request URL construction.

use std::collections::HashMap;

use ogc_common::OgcError;
use ogc_protocol::{build_feature_query_url, build_tile_query_url, TileUrlTemplate};
use url::Url;

const WFS: &str = "http://plotly.cartoview.net/geoserver/wfs";
const WMS: &str = "http://plotly.cartoview.net/geoserver/wms";

fn query_pairs(url: &str) -> Vec<(String, String)> {
    Url::parse(url).unwrap().query_pairs().into_owned().collect()
}

fn query_map(url: &str) -> HashMap<String, String> {
    query_pairs(url).into_iter().collect()
}

// ============================================================================
// Feature query URLs
// ============================================================================

#[test]
fn test_feature_url_has_exactly_the_fixed_parameters() {
    for layer in ["geonode:fiscal_balance_layer", "roads", "ns:with space"] {
        let url = build_feature_query_url(WFS, layer).unwrap();
        let pairs = query_pairs(&url);

        let names: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            names,
            vec!["service", "version", "request", "typeName", "outputFormat"]
        );

        let map = query_map(&url);
        assert_eq!(map["service"], "WFS");
        assert_eq!(map["version"], "1.0.0");
        assert_eq!(map["request"], "GetFeature");
        assert_eq!(map["typeName"], layer);
        assert_eq!(map["outputFormat"], "application/json");
    }
}

#[test]
fn test_feature_url_type_name_round_trips() {
    for layer in ["geonode:cpi", "a&b", "x=y", "plus+sign", "percent%25", "ünïcode:layer"] {
        let url = build_feature_query_url(WFS, layer).unwrap();
        assert_eq!(query_map(&url)["typeName"], layer, "url: {}", url);
    }
}

#[test]
fn test_feature_url_keeps_colon_and_slash_readable() {
    let url = build_feature_query_url(WFS, "geonode:cpi_layer").unwrap();
    assert!(url.contains("typeName=geonode:cpi_layer"));
    assert!(url.contains("outputFormat=application/json"));
    assert!(!url.contains("%3A"));
    assert!(!url.contains("%2F"));
}

#[test]
fn test_feature_url_preserves_base_query() {
    let url = build_feature_query_url("http://example.com/ows?authkey=abc", "geonode:x").unwrap();
    let pairs = query_pairs(&url);
    assert_eq!(pairs[0], ("authkey".to_string(), "abc".to_string()));
    assert_eq!(pairs.len(), 6);
}

#[test]
fn test_feature_url_replaces_conflicting_base_pairs() {
    let url = build_feature_query_url(
        "http://example.com/ows?service=WMS&typeName=old&authkey=abc",
        "geonode:x",
    )
    .unwrap();
    let pairs = query_pairs(&url);

    let mut names: Vec<String> = pairs.iter().map(|(k, _)| k.to_ascii_lowercase()).collect();
    names.sort();
    let total = names.len();
    names.dedup();
    assert_eq!(names.len(), total, "duplicate parameter names in {}", url);

    assert_eq!(pairs.len(), 6);
    let map = query_map(&url);
    assert_eq!(map["service"], "WFS");
    assert_eq!(map["typeName"], "geonode:x");
    assert_eq!(map["authkey"], "abc");
}

#[test]
fn test_feature_url_base_query_passes_through_unchanged() {
    let url = build_feature_query_url("http://example.com/ows?k=%FF&flag", "geonode:x").unwrap();
    assert!(
        url.starts_with("http://example.com/ows?k=%FF&flag&service=WFS&"),
        "{}",
        url
    );
}

#[test]
fn test_feature_url_invalid_inputs() {
    for (base, layer) in [("", "geonode:x"), ("geoserver/wfs", "geonode:x"), (WFS, "")] {
        let err = build_feature_query_url(base, layer).unwrap_err();
        assert!(matches!(err, OgcError::InvalidInput(_)), "{} {}", base, layer);
        assert!(!err.is_retryable());
    }
}

// ============================================================================
// Tile query URLs
// ============================================================================

#[test]
fn test_tile_url_without_filter() {
    let url = build_tile_query_url(WMS, "geonode:x", None).unwrap();
    let map = query_map(&url);

    assert_eq!(map["SERVICE"], "WMS");
    assert_eq!(map["VERSION"], "1.1.1");
    assert_eq!(map["REQUEST"], "GetMap");
    assert_eq!(map["FORMAT"], "image/png");
    assert_eq!(map["TRANSPARENT"], "TRUE");
    assert_eq!(map["SRS"], "EPSG:3857");
    assert_eq!(map["bbox"], "{bbox-epsg-3857}");
    assert_eq!(map["LAYERS"], "geonode:x");
    assert_eq!(map["WIDTH"], "256");
    assert_eq!(map["HEIGHT"], "256");
    assert!(!map.keys().any(|k| k.eq_ignore_ascii_case("cql_filter")));
}

#[test]
fn test_tile_url_with_filter() {
    let url = build_tile_query_url(WMS, "geonode:x", Some("data_year = '1990'")).unwrap();
    assert_eq!(query_map(&url)["CQL_FILTER"], "data_year = '1990'");
}

#[test]
fn test_tile_url_filter_replaces_base_filter() {
    let url = build_tile_query_url(
        "http://example.com/wms?cql_filter=old&map=world",
        "geonode:x",
        Some("iso3 = 'EGY'"),
    )
    .unwrap();
    let pairs = query_pairs(&url);

    assert_eq!(pairs[0], ("map".to_string(), "world".to_string()));
    let filters: Vec<&str> = pairs
        .iter()
        .filter(|(k, _)| k.eq_ignore_ascii_case("cql_filter"))
        .map(|(_, v)| v.as_str())
        .collect();
    assert_eq!(filters, vec!["iso3 = 'EGY'"]);
    assert!(url.contains("bbox={bbox-epsg-3857}"));
}

#[test]
fn test_tile_url_invalid_inputs() {
    assert!(matches!(
        build_tile_query_url("", "geonode:x", None),
        Err(OgcError::InvalidInput(_))
    ));
    assert!(matches!(
        build_tile_query_url(WMS, "", Some("a = 1")),
        Err(OgcError::InvalidInput(_))
    ));
}

#[test]
fn test_tile_template_resolves_xyz() {
    let template = TileUrlTemplate::build(WMS, "geonode:fiscal_balance_1990", None).unwrap();
    let url = template.resolve_tile(0, 0, 0);
    let bbox = query_map(&url)["bbox"].clone();
    let parts: Vec<f64> = bbox.split(',').map(|p| p.parse().unwrap()).collect();

    assert_eq!(parts.len(), 4);
    assert!(parts[0] < -20_000_000.0);
    assert!(parts[2] > 20_000_000.0);
}
