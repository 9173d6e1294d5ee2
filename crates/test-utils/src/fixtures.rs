//! GeoJSON fixtures shaped like the indicator layers served by GeoNode.
//!
//! Every feature carries `iso3`, `data_value` and `data_year` properties and a
//! point geometry, which is all the accessor and view code looks at.

use serde_json::{json, Value};

/// One indicator observation: (iso3, data_value, data_year).
pub type IndicatorRow = (&'static str, f64, i64);

/// Fiscal balance observations for three countries over three years.
pub const FISCAL_BALANCE_ROWS: &[IndicatorRow] = &[
    ("EGY", -10.5, 1990),
    ("JOR", -3.2, 1990),
    ("TUN", -1.1, 1990),
    ("EGY", -6.8, 1991),
    ("JOR", -4.0, 1991),
    ("EGY", -3.9, 1992),
    ("TUN", -2.4, 1992),
];

/// Rough country centroids so features have plausible geometry.
fn centroid(iso3: &str) -> [f64; 2] {
    match iso3 {
        "EGY" => [30.8, 26.8],
        "JOR" => [36.2, 30.6],
        "TUN" => [9.5, 33.9],
        _ => [0.0, 0.0],
    }
}

/// A single GeoJSON feature for an indicator row.
pub fn indicator_feature(index: usize, row: &IndicatorRow) -> Value {
    let (iso3, value, year) = *row;
    json!({
        "type": "Feature",
        "id": format!("fiscal_balance_layer.{}", index + 1),
        "geometry": {
            "type": "Point",
            "coordinates": centroid(iso3),
        },
        "properties": {
            "iso3": iso3,
            "data_value": value,
            "data_year": year,
        }
    })
}

/// A GeoServer-style feature collection for the given rows.
pub fn indicator_collection(rows: &[IndicatorRow]) -> Value {
    let features: Vec<Value> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| indicator_feature(i, row))
        .collect();

    json!({
        "type": "FeatureCollection",
        "totalFeatures": features.len(),
        "features": features,
        "crs": {
            "type": "name",
            "properties": { "name": "urn:ogc:def:crs:EPSG::4326" }
        }
    })
}

/// [`indicator_collection`] serialized to bytes, as a fetcher would return it.
pub fn indicator_collection_bytes(rows: &[IndicatorRow]) -> Vec<u8> {
    indicator_collection(rows).to_string().into_bytes()
}

/// The fiscal balance fixture as response bytes.
pub fn fiscal_balance_bytes() -> Vec<u8> {
    indicator_collection_bytes(FISCAL_BALANCE_ROWS)
}

/// Bodies a map server can return that are not feature collections.
pub mod malformed {
    /// Truncated JSON.
    pub const TRUNCATED: &str = r#"{"type":"FeatureCollection","features":["#;

    /// Valid JSON, wrong GeoJSON type.
    pub const SINGLE_FEATURE: &str =
        r#"{"type":"Feature","geometry":null,"properties":{"iso3":"EGY"}}"#;

    /// GeoServer OGC exception report served with status 200.
    pub const SERVICE_EXCEPTION: &str = r#"<?xml version="1.0" ?>
<ServiceExceptionReport version="1.2.0">
  <ServiceException code="InvalidParameterValue" locator="typeName">
    Feature type geonode:missing unknown
  </ServiceException>
</ServiceExceptionReport>"#;

    /// Collection whose features are missing their `type` member.
    pub const UNTYPED_FEATURE: &str =
        r#"{"type":"FeatureCollection","features":[{"properties":{"iso3":"EGY"}}]}"#;
}
